//! Field delimiter selection for tabular input

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Candidates tried by [`Delimiter::Auto`], in order of preference on ties
const AUTO_CANDIDATES: [Delimiter; 4] = [
    Delimiter::Comma,
    Delimiter::Semicolon,
    Delimiter::Tab,
    Delimiter::Pipe,
];

/// Field delimiter of the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
    /// Pick whichever candidate splits the header line into the most fields
    Auto,
}

impl Delimiter {
    /// Byte handed to the CSV reader
    ///
    /// `Auto` must be resolved with [`Delimiter::resolve`] first; unresolved it
    /// falls back to a comma.
    #[must_use]
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Comma | Self::Auto => b',',
            Self::Semicolon => b';',
            Self::Tab => b'\t',
            Self::Pipe => b'|',
        }
    }

    /// Resolve `Auto` against the header line of `text`; fixed delimiters pass through
    #[must_use]
    pub fn resolve(self, text: &str) -> Self {
        match self {
            Self::Auto => detect(text.lines().next().unwrap_or("")),
            fixed => fixed,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Semicolon => "semicolon",
            Self::Tab => "tab",
            Self::Pipe => "pipe",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Delimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comma" | "," => Ok(Self::Comma),
            "semicolon" | ";" => Ok(Self::Semicolon),
            "tab" | "\\t" | "\t" => Ok(Self::Tab),
            "pipe" | "|" => Ok(Self::Pipe),
            "auto" => Ok(Self::Auto),
            other => Err(Error::config(format!(
                "unknown delimiter '{other}' (expected comma, semicolon, tab, pipe or auto)"
            ))),
        }
    }
}

/// Pick the candidate delimiter that yields the most fields in `header_line`
fn detect(header_line: &str) -> Delimiter {
    let mut best = Delimiter::Comma;
    let mut best_count = 0;

    for candidate in AUTO_CANDIDATES {
        let count = header_line.split(char::from(candidate.as_byte())).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiters() {
        assert_eq!(Delimiter::Auto.resolve("date,demand\n"), Delimiter::Comma);
        assert_eq!(Delimiter::Auto.resolve("date;demand;store"), Delimiter::Semicolon);
        assert_eq!(Delimiter::Auto.resolve("date\tdemand"), Delimiter::Tab);
        assert_eq!(Delimiter::Auto.resolve("date|demand"), Delimiter::Pipe);
    }

    #[test]
    fn test_detect_prefers_comma_on_tie() {
        assert_eq!(Delimiter::Auto.resolve("single"), Delimiter::Comma);
        assert_eq!(Delimiter::Auto.resolve(""), Delimiter::Comma);
    }

    #[test]
    fn test_fixed_delimiter_is_not_detected() {
        assert_eq!(Delimiter::Pipe.resolve("date,demand"), Delimiter::Pipe);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Semicolon".parse::<Delimiter>().unwrap(), Delimiter::Semicolon);
        assert_eq!("|".parse::<Delimiter>().unwrap(), Delimiter::Pipe);
        assert!("colon".parse::<Delimiter>().is_err());
    }
}
