//! Long-form localized dates for record bodies

use chrono::format::{Item, StrftimeItems};
use chrono::{Locale, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::{AdrError, Result};

const FALLBACK_LOCALE: &str = "en_US";

/// How the `{{date}}` placeholder is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
    locale: Locale,
    pattern: String,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self::for_locale(FALLBACK_LOCALE)
    }
}

impl DateStyle {
    /// Style for a POSIX locale name such as `de_DE.UTF-8` or `fr_FR@euro`.
    /// Unknown names fall back to `en_US`.
    pub fn for_locale(name: &str) -> Self {
        let base = name
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('-', "_");

        match Locale::try_from(base.as_str()) {
            Ok(locale) if !matches!(base.as_str(), "C" | "POSIX") => Self {
                locale,
                pattern: long_pattern(&base).to_string(),
            },
            _ => {
                debug!("Unknown locale {:?}, using {}", name, FALLBACK_LOCALE);
                Self {
                    locale: Locale::en_US,
                    pattern: long_pattern(FALLBACK_LOCALE).to_string(),
                }
            }
        }
    }

    /// Replace the locale's long pattern with a strftime pattern
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        if pattern.is_empty()
            || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(AdrError::validation(format!(
                "invalid date format '{}'",
                pattern
            )));
        }
        self.pattern = pattern.to_string();
        Ok(self)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, date: NaiveDate) -> String {
        NaiveDateTime::new(date, NaiveTime::MIN)
            .and_utc()
            .format_localized(&self.pattern, self.locale)
            .to_string()
    }
}

fn long_pattern(locale: &str) -> &'static str {
    let (language, region) = locale.split_once('_').unwrap_or((locale, ""));
    match (language, region) {
        ("en", "US" | "CA" | "PH") => "%B %-d, %Y",
        ("de" | "da" | "nb" | "nn" | "fi" | "cs" | "sk", _) => "%-d. %B %Y",
        ("es" | "pt", _) => "%-d de %B de %Y",
        ("ja" | "zh", _) => "%Y年%-m月%-d日",
        ("ko", _) => "%Y년 %-m월 %-d일",
        ("hu", _) => "%Y. %B %-d.",
        _ => "%-d %B %Y",
    }
}
