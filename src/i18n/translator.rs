use std::sync::Arc;

use tracing::trace;

use super::table::StringTable;
use super::template::{self, Args};

/// Looks up translation keys and fills in their placeholders
///
/// Never fails: a missing key renders as the key itself, and a template that
/// cannot be filled is returned as written. Clones share one table.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    table: Arc<StringTable>,
}

impl Translator {
    pub fn new(table: StringTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// A translator whose every key renders literally
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &StringTable {
        &self.table
    }

    /// The raw template for `key`, or `key` when untranslated
    pub fn template<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).unwrap_or(key)
    }

    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translate `key`, substituting named arguments
    pub fn t_with(&self, key: &str, args: &Args<'_>) -> String {
        let template = self.template(key);
        match template::render(template, args) {
            Ok(rendered) => rendered,
            Err(e) => {
                trace!(key, error = %e, "template left unformatted");
                template.to_string()
            }
        }
    }
}

/// Translate a key with optional `name = value` arguments
///
/// ```rust
/// use cli_support::i18n::{StringTable, Translator};
/// use cli_support::t;
///
/// let table: StringTable = [("hello".to_string(), "Hi {name}".to_string())]
///     .into_iter()
///     .collect();
/// let tr = Translator::new(table);
/// assert_eq!(t!(tr, "hello", name = "Sam"), "Hi Sam");
/// assert_eq!(t!(tr, "hello"), "Hi {name}");
/// ```
#[macro_export]
macro_rules! t {
    ($translator:expr, $key:expr $(,)?) => {
        $translator.t($key)
    };
    ($translator:expr, $key:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $translator.t_with(
            $key,
            &[$((stringify!($name), &$value as &dyn ::std::fmt::Display)),+],
        )
    };
}
