//! WhatsApp deep links.

use url::Url;

/// Build a `https://wa.me/<phone>?text=<message>` link.
///
/// Everything but digits and `+` is stripped from the phone number; the
/// message is query-encoded by the URL builder.
pub fn deep_link(phone: &str, message: &str) -> Result<Url, url::ParseError> {
    let cleaned: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let mut url = Url::parse(&format!("https://wa.me/{cleaned}"))?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}
