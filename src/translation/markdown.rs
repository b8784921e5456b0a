/*!
 * Markdown line classification.
 *
 * Each line of a Markdown document is classified on its own so that only
 * the human-readable part is sent for translation while heading and list
 * markers are kept verbatim.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s").unwrap());
static HEADING_PARTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+\s)(.+)$").unwrap());

static LIST_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[*+-]\s|\d+\.\s)").unwrap());
static LIST_PARTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([*+-]\s|\d+\.\s)(.+)$").unwrap());

/// Kind of a single Markdown line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRecord<'a> {
    /// Empty or whitespace-only line
    Blank,
    /// `#`-style heading; `marker` includes the whitespace after the hashes
    Heading { marker: &'a str, text: &'a str },
    /// Bulleted or numbered list item; `marker` includes the trailing whitespace
    ListItem { marker: &'a str, text: &'a str },
    /// Any other line, translated as a whole
    Plain(&'a str),
}

impl<'a> LineRecord<'a> {
    /// Classify one line (without its newline)
    pub fn classify(line: &'a str) -> Self {
        if line.trim().is_empty() {
            return Self::Blank;
        }

        if HEADING_START.is_match(line) {
            let (marker, text) = split_marker(&HEADING_PARTS, line);
            return Self::Heading { marker, text };
        }

        if LIST_START.is_match(line) {
            let (marker, text) = split_marker(&LIST_PARTS, line);
            return Self::ListItem { marker, text };
        }

        Self::Plain(line)
    }

    /// The span that should go through the translator, if any
    pub fn translatable_text(&self) -> Option<&'a str> {
        let text = match self {
            Self::Blank => return None,
            Self::Heading { text, .. } | Self::ListItem { text, .. } => *text,
            Self::Plain(text) => *text,
        };

        if text.trim().is_empty() { None } else { Some(text) }
    }

    /// Markdown prefix kept verbatim in front of the translated span
    pub fn marker(&self) -> &'a str {
        match self {
            Self::Heading { marker, .. } | Self::ListItem { marker, .. } => *marker,
            Self::Blank | Self::Plain(_) => "",
        }
    }

    /// Rebuild the line around a translated span
    pub fn reassemble(&self, translated: &str) -> String {
        format!("{}{}", self.marker(), translated)
    }
}

/// Split a line into marker and text; a marker with nothing after it yields empty text
fn split_marker<'a>(parts: &Regex, line: &'a str) -> (&'a str, &'a str) {
    match parts.captures(line) {
        Some(caps) => {
            let marker = caps.get(1).map_or("", |m| m.as_str());
            let text = caps.get(2).map_or("", |m| m.as_str());
            (marker, text)
        }
        None => (line, ""),
    }
}
