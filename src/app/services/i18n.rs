//! Translated message tables and initial locale selection.

use std::collections::HashMap;

use crate::app::domain::{LOCALE_KEY, Locale};
use crate::app::infrastructure::error::{AppError, Result, RouteError};
use crate::app::infrastructure::storage::PreferenceStore;

const EN_MESSAGES: &str = include_str!("../../../locales/en.json");
const UZ_MESSAGES: &str = include_str!("../../../locales/uz.json");
const RU_MESSAGES: &str = include_str!("../../../locales/ru.json");

/// Pick the locale to start with: the stored one if supported, otherwise
/// the fallback.
pub fn resolve_initial_locale(store: &dyn PreferenceStore) -> Locale {
    store
        .get(LOCALE_KEY)
        .and_then(|code| Locale::from_code(&code))
        .unwrap_or(Locale::FALLBACK)
}

/// One locale's messages, flattened to dotted keys (`menu.view`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    messages: HashMap<String, String>,
}

impl MessageTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(root) = value else {
            return Err(AppError::Locale(
                "message table must be a JSON object".to_string(),
            ));
        };
        let mut messages = HashMap::new();
        flatten_into(&mut messages, String::new(), root);
        Ok(Self { messages })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn flatten_into(
    out: &mut HashMap<String, String>,
    prefix: String,
    object: serde_json::Map<String, serde_json::Value>,
) {
    for (key, value) in object {
        let full = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            serde_json::Value::Object(nested) => flatten_into(out, full, nested),
            serde_json::Value::String(s) => {
                out.insert(full, s);
            }
            serde_json::Value::Null => {}
            other => {
                out.insert(full, other.to_string());
            }
        }
    }
}

pub struct LocaleProvider {
    locale: Locale,
    fallback: Locale,
    tables: HashMap<Locale, MessageTable>,
}

impl LocaleProvider {
    /// Load the bundled tables and start in the locale chosen by
    /// [`resolve_initial_locale`].
    pub fn new(store: &dyn PreferenceStore) -> Result<Self> {
        let mut tables = HashMap::new();
        for (locale, json) in [
            (Locale::En, EN_MESSAGES),
            (Locale::Uz, UZ_MESSAGES),
            (Locale::Ru, RU_MESSAGES),
        ] {
            let table = MessageTable::from_json(json)
                .map_err(|e| AppError::Locale(format!("{locale} messages: {e}")))?;
            tables.insert(locale, table);
        }
        let locale = resolve_initial_locale(store);
        tracing::info!(locale = %locale, "Locale selected");
        Ok(Self::with_tables(locale, tables))
    }

    pub fn with_tables(locale: Locale, tables: HashMap<Locale, MessageTable>) -> Self {
        Self {
            locale,
            fallback: Locale::FALLBACK,
            tables,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn fallback_locale(&self) -> Locale {
        self.fallback
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        let found = |locale: Locale| self.tables.get(&locale).and_then(|t| t.get(key));
        found(self.locale).or_else(|| {
            let fallback = found(self.fallback);
            if fallback.is_some() {
                tracing::debug!(key, locale = %self.locale, "Message missing, using fallback locale");
            }
            fallback
        })
    }

    /// Translate `key`, falling back to the fallback locale and finally to
    /// the key itself.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    pub fn t_or(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or(default).to_string()
    }

    /// Translate and substitute `{name}` placeholders.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.t(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    /// Localized title and message for a navigation that failed to resolve.
    pub fn route_error_text(&self, error: &RouteError) -> (String, String) {
        let (title_key, message_key, path) = match error {
            RouteError::NotFound { path } => ("errors.not_found_title", "errors.not_found", path),
            RouteError::RedirectLoop { path } => {
                ("errors.redirect_loop_title", "errors.redirect_loop", path)
            }
        };
        (self.t(title_key), self.t_with(message_key, &[("path", path)]))
    }
}
