//! Page consumers for Promesa.
//!
//! Everything here sits on top of the i18n core: the controller wires the
//! lifecycle together, views are rebuilt from resolved strings on every
//! language change, the switcher and the commitment tracker feed user
//! actions back in, and the WhatsApp helper formats the one outbound link.

mod commitments;
mod controller;
mod switcher;
mod view;
pub mod whatsapp;

pub use commitments::CommitmentTracker;
pub use controller::{PageController, PageError, PageOptions};
pub use switcher::LanguageSwitcher;
pub use view::{
    CardView, CommitmentItemView, CommitmentsView, HeroView, ModalView, PageView, VideoView,
};
