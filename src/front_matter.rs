//! Locating the metadata header of a post and rewriting its date line
//!
//! Only the date line is touched. Delimiters, every other header line and the
//! body after the closing marker are carried over byte-for-byte.

use crate::error::ConfigError;
use regex::{NoExpand, Regex};

/// A document split around its metadata header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Opening marker line including its line ending
    pub opening: &'a str,
    /// Header lines between the markers, without the surrounding line endings
    pub header: &'a str,
    /// Line ending before the closing marker, the marker, and its line ending
    pub closing: &'a str,
    /// Everything after the closing marker line
    pub body: &'a str,
}

impl FrontMatter<'_> {
    /// Line ending used by the opening marker
    fn line_ending(&self) -> &'static str {
        if self.opening.ends_with("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    fn reassemble(&self, header: &str) -> String {
        let mut out = String::with_capacity(
            self.opening.len() + header.len() + self.closing.len() + self.body.len(),
        );
        out.push_str(self.opening);
        out.push_str(header);
        out.push_str(self.closing);
        out.push_str(self.body);
        out
    }
}

/// Header layout: delimiter line and the key holding the edit timestamp
#[derive(Debug, Clone)]
pub struct FrontMatterFormat {
    document: Regex,
    date_line: Regex,
    date_key: String,
}

impl FrontMatterFormat {
    pub fn new(marker: &str, date_key: &str) -> Result<Self, ConfigError> {
        let marker = regex::escape(marker.trim());
        let document = Regex::new(&format!(
            r"(?s)\A({marker}[ \t]*\r?\n)(.+?)(\r?\n{marker}[ \t]*\r?\n)(.+)\z"
        ))
        .map_err(|e| ConfigError::InvalidValue {
            key: "front_matter.marker".to_string(),
            reason: e.to_string(),
        })?;

        let date_line = Regex::new(&format!(r"(?m)^{}:[^\r\n]*", regex::escape(date_key)))
            .map_err(|e| ConfigError::InvalidValue {
                key: "front_matter.date_key".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            document,
            date_line,
            date_key: date_key.to_string(),
        })
    }

    /// Split a document into header and body, or `None` without both
    pub fn split<'a>(&self, content: &'a str) -> Option<FrontMatter<'a>> {
        let caps = self.document.captures(content)?;
        Some(FrontMatter {
            opening: caps.get(1)?.as_str(),
            header: caps.get(2)?.as_str(),
            closing: caps.get(3)?.as_str(),
            body: caps.get(4)?.as_str(),
        })
    }

    /// Value of the first date line in the header, if any
    pub fn date_value<'a>(&self, content: &'a str) -> Option<&'a str> {
        let front = self.split(content)?;
        let line = self.date_line.find(front.header)?.as_str();
        Some(line[self.date_key.len() + 1..].trim())
    }

    /// Set the date line to `timestamp`, replacing the first existing one or
    /// appending a new line at the end of the header.
    ///
    /// Returns `None` when the document has no header or nothing after it.
    pub fn stamp(&self, content: &str, timestamp: &str) -> Option<String> {
        let front = self.split(content)?;
        let line = format!("{}: {}", self.date_key, timestamp);

        let header = if self.date_line.is_match(front.header) {
            self.date_line
                .replacen(front.header, 1, NoExpand(&line))
                .into_owned()
        } else {
            format!("{}{}{}", front.header, front.line_ending(), line)
        };

        Some(front.reassemble(&header))
    }
}
