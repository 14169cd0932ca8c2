//! Textos que pueden venir ya localizados o como cadena simple.
//!
//! La API devuelve indistintamente `"Título"` o `{ "en": "...", "ar": "..." }`.
//! `LocalizedText` modela ambas formas con un único `resolve`.
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// El árabe se escribe de derecha a izquierda.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Locale::Ar)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // acepta también etiquetas regionales: "ar-EG", "en_US"
        let lang = s.trim().split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
        match lang.as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            _ => Err(DomainError::UnknownValue(format!("locale '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized(#[serde(deserialize_with = "known_locales")] BTreeMap<Locale, String>),
}

/// Conserva las traducciones de locales soportados y descarta el resto
/// (`"fr"`, `"de"`, ...). Falla sólo si no queda ninguna.
fn known_locales<'de, D>(deserializer: D) -> Result<BTreeMap<Locale, String>, D::Error>
    where D: Deserializer<'de>
{
    let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
    let mut map = BTreeMap::new();
    for (tag, text) in raw {
        match tag.parse::<Locale>() {
            Ok(locale) => {
                map.entry(locale).or_insert(text);
            }
            Err(_) => debug!("ignoring translation for unsupported locale '{}'", tag),
        }
    }
    if map.is_empty() {
        return Err(serde::de::Error::custom("no translation for a supported locale"));
    }
    Ok(map)
}

impl LocalizedText {
    pub fn plain(text: impl Into<String>) -> Self {
        LocalizedText::Plain(text.into())
    }

    pub fn en_ar(en: impl Into<String>, ar: impl Into<String>) -> Self {
        LocalizedText::Localized(BTreeMap::from([(Locale::En, en.into()), (Locale::Ar, ar.into())]))
    }

    /// Texto para `locale`; si falta, inglés; si falta, cualquier traducción.
    pub fn resolve(&self, locale: Locale) -> &str {
        match self {
            LocalizedText::Plain(s) => s,
            LocalizedText::Localized(map) => map.get(&locale)
                                                .or_else(|| map.get(&Locale::En))
                                                .or_else(|| map.values().next())
                                                .map(String::as_str)
                                                .unwrap_or_default(),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        LocalizedText::plain(value)
    }
}
