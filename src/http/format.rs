//! Wire format selection.

use std::fmt;

/// Serialization used for a single request's responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatMode {
    #[default]
    Json,
    Xml,
}

impl FormatMode {
    /// Resolve a format hint. Only a case-insensitive "xml" selects XML;
    /// every other value, including empty or garbage input, selects JSON.
    pub fn from_hint(hint: &str) -> Self {
        if hint.eq_ignore_ascii_case("xml") {
            FormatMode::Xml
        } else {
            FormatMode::Json
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatMode::Json => "json",
            FormatMode::Xml => "xml",
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
