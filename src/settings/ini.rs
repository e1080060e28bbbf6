//! Minimal INI document model.
//!
//! Parses the settings file into an ordered in-memory form that can be
//! edited and serialized back without disturbing unrelated content: section
//! order, key order, comments, and blank lines all survive a round trip.
//! Entry lines are normalized to `key = value` on output.

use std::fmt;

/// An INI file held in memory, editable by section and key.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    /// Lines before the first section header.
    preamble: Vec<Line>,
    sections: Vec<Section>,
}

#[derive(Debug, Clone)]
struct Section {
    name: String,
    lines: Vec<Line>,
}

#[derive(Debug, Clone)]
enum Line {
    /// A `key = value` entry.
    Entry { key: String, value: String },
    /// Anything else (comment, blank, malformed), kept verbatim.
    Raw(String),
}

impl IniDocument {
    /// Parse a document. Never fails: lines that are not section headers or
    /// `key = value` entries are carried through untouched.
    pub fn parse(input: &str) -> Self {
        let mut doc = Self::default();

        for raw in input.lines() {
            let trimmed = raw.trim();

            if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
                doc.sections.push(Section {
                    name: trimmed[1..trimmed.len() - 1].trim().to_string(),
                    lines: Vec::new(),
                });
                continue;
            }

            let line = if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';')
            {
                Line::Raw(raw.to_string())
            } else if let Some((key, value)) = trimmed.split_once('=') {
                Line::Entry {
                    key: key.trim().to_string(),
                    value: value.trim().to_string(),
                }
            } else {
                Line::Raw(raw.to_string())
            };

            match doc.sections.last_mut() {
                Some(section) => section.lines.push(line),
                None => doc.preamble.push(line),
            }
        }

        doc
    }

    /// Look up a value. Returns the first match when a key repeats.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .lines
            .iter()
            .find_map(|line| match line {
                Line::Entry { key: k, value } if k == key => Some(value.as_str()),
                _ => None,
            })
    }

    /// Set a value, updating the entry in place if it exists. A missing key
    /// is appended to its section; a missing section is appended to the
    /// document.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let section = match self.sections.iter_mut().find(|s| s.name == section) {
            Some(section) => section,
            None => {
                self.sections.push(Section {
                    name: section.to_string(),
                    lines: Vec::new(),
                });
                self.sections.last_mut().unwrap()
            }
        };

        for line in &mut section.lines {
            if let Line::Entry { key: k, value: v } = line {
                if k == key {
                    *v = value.to_string();
                    return;
                }
            }
        }

        section.lines.push(Line::Entry {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.preamble {
            writeln!(f, "{line}")?;
        }
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for line in &section.lines {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Entry { key, value } => write!(f, "{key} = {value}"),
            Line::Raw(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# widget configuration
[settings]
active = true
api_key = abc123

[mqtt]
host = broker.local
";

    #[test]
    fn test_get_existing_key() {
        let doc = IniDocument::parse(SAMPLE);
        assert_eq!(doc.get("settings", "active"), Some("true"));
        assert_eq!(doc.get("mqtt", "host"), Some("broker.local"));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let doc = IniDocument::parse(SAMPLE);
        assert_eq!(doc.get("settings", "nope"), None);
        assert_eq!(doc.get("nope", "active"), None);
    }

    #[test]
    fn test_set_updates_in_place() {
        let mut doc = IniDocument::parse(SAMPLE);
        doc.set("settings", "api_key", "xyz");
        assert_eq!(doc.get("settings", "api_key"), Some("xyz"));

        // Key order is unchanged
        let rendered = doc.to_string();
        let active_pos = rendered.find("active").unwrap();
        let key_pos = rendered.find("api_key").unwrap();
        assert!(active_pos < key_pos);
    }

    #[test]
    fn test_set_appends_new_key_and_section() {
        let mut doc = IniDocument::parse(SAMPLE);
        doc.set("settings", "cache_enabled", "false");
        doc.set("display", "theme", "dark");
        assert_eq!(doc.get("settings", "cache_enabled"), Some("false"));
        assert_eq!(doc.get("display", "theme"), Some("dark"));
    }

    #[test]
    fn test_round_trip_preserves_comments_and_sections() {
        let doc = IniDocument::parse(SAMPLE);
        let rendered = doc.to_string();
        assert!(rendered.contains("# widget configuration"));
        assert!(rendered.contains("[mqtt]"));
        assert!(rendered.contains("host = broker.local"));
    }

    #[test]
    fn test_malformed_line_is_preserved() {
        let input = "[settings]\nthis line has no separator\nactive = true\n";
        let doc = IniDocument::parse(input);
        assert_eq!(doc.get("settings", "active"), Some("true"));
        assert!(doc.to_string().contains("this line has no separator"));
    }

    #[test]
    fn test_empty_document() {
        let doc = IniDocument::parse("");
        assert_eq!(doc.to_string(), "");
    }
}
