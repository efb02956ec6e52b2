//! Translation catalogs: a JSON tree per language, dot-path lookup, and
//! `{{name}}` placeholder interpolation.
//!
//! A catalog leaf is either a string (possibly with placeholders), an array,
//! or a nested object. Interpolation is defined for string leaves only;
//! structured leaves are handed back untouched so consumers can deserialize
//! them into their own types.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::language::Language;

/// Errors from catalog construction and loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog payload parsed, but its root is not a JSON object.
    #[error("catalog for '{language}' is not a JSON object")]
    NotAnObject {
        /// Language the payload was loaded for.
        language: Language,
    },

    /// The catalog payload could not be parsed.
    #[error("failed to parse catalog for '{language}': {message}")]
    Parse {
        /// Language the payload was loaded for.
        language: Language,
        /// Parser diagnostic.
        message: String,
    },

    /// The catalog could not be fetched at all.
    #[error("catalog for '{language}' unavailable: {message}")]
    Unavailable {
        /// Language that was requested.
        language: Language,
        /// Source diagnostic.
        message: String,
    },
}

/// An immutable translation tree for one language.
#[derive(Debug, Clone)]
pub struct Catalog {
    language: Language,
    root: Value,
}

impl Catalog {
    /// Build a catalog from an already-parsed JSON value.
    ///
    /// The root must be an object; anything else cannot hold dot-path keys.
    pub fn from_value(language: Language, root: Value) -> Result<Self, CatalogError> {
        if !root.is_object() {
            return Err(CatalogError::NotAnObject { language });
        }
        Ok(Self { language, root })
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(language: Language, json: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            language,
            message: e.to_string(),
        })?;
        Self::from_value(language, root)
    }

    /// The language this catalog translates into.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The full translation tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Walk a dot-separated key through the tree.
    ///
    /// Returns `None` when any path segment is missing or when the walk
    /// reaches a leaf before the key is exhausted.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        let mut node = &self.root;
        for segment in key.split('.') {
            node = node.as_object()?.get(segment)?;
        }
        Some(node)
    }

    /// Whether the key resolves to any value.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

/// Supplies a catalog for a language. Implementations decide where catalogs
/// come from (embedded assets, files, a network fetch).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load the catalog for `language`.
    async fn load(&self, language: Language) -> Result<Catalog, CatalogError>;
}

/// Named values substituted into `{{name}}` placeholders.
///
/// Values are coerced to strings on insertion, matching how templates render
/// them. Use the [`args!`](crate::args) macro for inline construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateArgs {
    values: BTreeMap<String, String>,
}

impl TranslateArgs {
    /// An empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.values.insert(name.into(), value.to_string());
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a value by placeholder name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether no arguments are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Inline [`TranslateArgs`] construction.
///
/// ```
/// use promesa_i18n::args;
///
/// let args = args!(completed = 2, total = 5);
/// assert_eq!(args.get("completed"), Some("2"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::TranslateArgs::new()
    };
    ($($name:ident = $value:expr),+ $(,)?) => {{
        let mut args = $crate::TranslateArgs::new();
        $(args.insert(stringify!($name), $value);)+
        args
    }};
}

/// Substitute `{{name}}` placeholders in a template.
///
/// Single pass. Placeholders without a matching argument are left verbatim
/// so a missing parameter stays visible in the rendered text; substituted
/// values are never re-scanned.
pub fn interpolate(template: &str, args: &TranslateArgs) -> String {
    if args.is_empty() || !template.contains("{{") {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match args.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated placeholder: emit the tail as-is.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// The result of resolving a translation key.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A string leaf after interpolation, or the literal key when the key
    /// was missing from the catalog.
    Text(String),
    /// A structured leaf (array or object), returned un-interpolated.
    Tree(Value),
}

impl Resolved {
    /// The text form, if this is a string resolution.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Tree(_) => None,
        }
    }

    /// The structured form, if this is an array/object resolution.
    pub fn as_tree(&self) -> Option<&Value> {
        match self {
            Self::Tree(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    /// Coerce into text. Structured values render as compact JSON, which
    /// keeps unexpected tree hits debuggable rather than destructive.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Tree(v) => v.to_string(),
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Tree(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample_catalog() -> Catalog {
        Catalog::from_value(
            Language::En,
            json!({
                "hero": {
                    "title": "I'm really sorry",
                    "line": "Could you give me another chance?"
                },
                "commitments": {
                    "progressText": "{{completed}}/{{total}}",
                    "items": ["first", "second", "third"]
                },
                "cards": {
                    "cardAriaLabel": "{{title}}. Click to see more information"
                }
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_walks_nested_keys() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.lookup("hero.title").and_then(Value::as_str),
            Some("I'm really sorry")
        );
        assert!(catalog.lookup("commitments.items").unwrap().is_array());
    }

    #[test]
    fn test_lookup_missing_segment() {
        let catalog = sample_catalog();
        assert!(catalog.lookup("hero.subtitle").is_none());
        assert!(catalog.lookup("nope").is_none());
        assert!(catalog.lookup("hero.title.deeper").is_none());
        assert!(catalog.lookup("").is_none());
    }

    #[test]
    fn test_root_must_be_object() {
        let err = Catalog::from_value(Language::Es, json!("just a string")).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject { .. }));

        let err = Catalog::from_json_str(Language::Es, "[1, 2]").unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject { .. }));
    }

    #[test]
    fn test_from_json_str_parse_error() {
        let err = Catalog::from_json_str(Language::Fr, "{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { language: Language::Fr, .. }));
    }

    #[test]
    fn test_interpolate_substitutes_known_args() {
        let args = args!(completed = 2, total = 5);
        assert_eq!(interpolate("{{completed}}/{{total}}", &args), "2/5");
    }

    #[test]
    fn test_interpolate_leaves_missing_args_verbatim() {
        assert_eq!(
            interpolate("{{completed}}/{{total}}", &TranslateArgs::new()),
            "{{completed}}/{{total}}"
        );
        let args = args!(completed = 2);
        assert_eq!(interpolate("{{completed}}/{{total}}", &args), "2/{{total}}");
    }

    #[test]
    fn test_interpolate_repeated_placeholder() {
        let args = args!(name = "Ana");
        assert_eq!(interpolate("{{name}} and {{name}}", &args), "Ana and Ana");
    }

    #[test]
    fn test_interpolate_unterminated_braces() {
        let args = args!(name = "Ana");
        assert_eq!(interpolate("hello {{name", &args), "hello {{name");
        assert_eq!(interpolate("{{", &args), "{{");
    }

    #[test]
    fn test_interpolate_no_placeholders() {
        let args = args!(name = "Ana");
        assert_eq!(interpolate("plain text", &args), "plain text");
    }

    #[test]
    fn test_args_macro_coerces_to_string() {
        let args = args!(count = 42, label = "x");
        assert_eq!(args.get("count"), Some("42"));
        assert_eq!(args.get("label"), Some("x"));
        assert_eq!(args.get("missing"), None);
        assert!(args!().is_empty());
    }

    #[test]
    fn test_resolved_text_coercion() {
        assert_eq!(Resolved::Text("hola".into()).into_text(), "hola");
        assert_eq!(Resolved::Tree(json!([1, 2])).into_text(), "[1,2]");
        assert_eq!(Resolved::Text("hola".into()).to_string(), "hola");
    }

    proptest! {
        #[test]
        fn interpolate_without_args_is_identity(template in "\\PC*") {
            prop_assert_eq!(interpolate(&template, &TranslateArgs::new()), template);
        }

        #[test]
        fn interpolate_never_leaves_matched_placeholder(value in "[a-z0-9]{0,8}") {
            let args = args!(x = value.clone());
            let rendered = interpolate("a {{x}} b", &args);
            prop_assert_eq!(rendered, format!("a {value} b"));
        }
    }
}
