use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A `language[_COUNTRY[_variant]]` locale identifier, `-` accepted as separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    language: String,
    country: Option<String>,
    variant: Option<String>,
}

impl Locale {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self { language: "en".to_string(), country: Some("US".to_string()), variant: None }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidLocale(s.to_string());
        let mut parts = s.split(['_', '-']);
        let language = parts.next().filter(|l| (2..=3).contains(&l.len()) && l.chars().all(|c| c.is_ascii_alphabetic())).ok_or_else(invalid)?;
        let country = match parts.next() {
            None => None,
            Some(c) if c.len() == 2 && c.chars().all(|c| c.is_ascii_alphabetic()) => Some(c.to_ascii_uppercase()),
            Some(c) if c.len() == 3 && c.chars().all(|c| c.is_ascii_digit()) => Some(c.to_string()),
            Some(_) => return Err(invalid()),
        };
        let variant = match parts.next() {
            None => None,
            Some(v) if !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric()) => Some(v.to_string()),
            Some(_) => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { language: language.to_ascii_lowercase(), country, variant })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(country) = &self.country {
            write!(f, "_{country}")?;
        }
        if let Some(variant) = &self.variant {
            write!(f, "_{variant}")?;
        }
        Ok(())
    }
}
