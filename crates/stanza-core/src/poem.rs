//! Poem formatting
//!
//! Turns a PoetryDB record into one HTML fragment:
//!
//! ```text
//! <h2>title</h2><h3><em>by author</em></h3><p>line<br>line</p><p>line</p>
//! ```
//!
//! Stanzas are runs of non-empty lines; an empty string in `lines` is the
//! delimiter between two stanzas.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::config::{RenderConfig, StanzaBreaks};
use crate::error::{Error, Result};
use crate::markup::make_tag;

/// One poem as returned by PoetryDB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    /// Poem title
    pub title: String,
    /// Author name
    pub author: String,
    /// Lines in order; empty strings separate stanzas
    pub lines: Vec<String>,
}

impl PoemRecord {
    /// Build a record from anything string-like
    pub fn new<L, S>(title: impl Into<String>, author: impl Into<String>, lines: L) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            author: author.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Partition `lines` into stanzas.
///
/// With [`StanzaBreaks::Collapse`] only maximal non-empty runs are kept.
/// With [`StanzaBreaks::Preserve`] every delimiter starts a new stanza, so
/// doubled, leading or trailing delimiters produce empty stanzas.
pub fn split_stanzas(lines: &[String], breaks: StanzaBreaks) -> Vec<Vec<&str>> {
    let runs = lines
        .split(|line| line.is_empty())
        .map(|run| run.iter().map(String::as_str).collect::<Vec<_>>());

    match breaks {
        StanzaBreaks::Collapse => runs.filter(|run| !run.is_empty()).collect(),
        StanzaBreaks::Preserve => runs.collect(),
    }
}

/// Formats poem records as HTML fragments
#[derive(Debug, Clone, Default)]
pub struct PoemFormatter {
    config: RenderConfig,
}

impl PoemFormatter {
    /// Create a formatter with the given render settings
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render settings in use
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Format a single record.
    pub fn format(&self, poem: &PoemRecord) -> String {
        let title = make_tag("h2")(self.text(&poem.title));
        let byline = crate::pipe!(make_tag("em"), make_tag("h3"));
        let author = byline(format!("by {}", self.text(&poem.author)));

        let paragraph = make_tag("p");
        let stanzas: String = split_stanzas(&poem.lines, self.config.stanza_breaks)
            .into_iter()
            .map(|stanza| paragraph(self.join_lines(&stanza)))
            .collect();

        format!("{title}{author}{stanzas}")
    }

    /// Format the first record of an API response; the rest are ignored.
    pub fn format_response(&self, poems: &[PoemRecord]) -> Result<String> {
        let (first, rest) = poems.split_first().ok_or(Error::EmptyResponse)?;
        if !rest.is_empty() {
            tracing::debug!("Ignoring {} extra poem(s) in response", rest.len());
        }
        Ok(self.format(first))
    }

    /// Decode a raw PoetryDB response body and format its first record.
    pub fn format_json(&self, body: &str) -> Result<String> {
        let poems = crate::source::parse_response(body)?;
        self.format_response(&poems)
    }

    fn join_lines(&self, stanza: &[&str]) -> String {
        stanza
            .iter()
            .map(|line| self.text(line))
            .collect::<Vec<_>>()
            .join(&self.config.line_break)
    }

    fn text<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if self.config.escape {
            Cow::Owned(minijinja::HtmlEscape(raw).to_string())
        } else {
            Cow::Borrowed(raw)
        }
    }
}

/// Format the first poem of `poems` with default settings.
pub fn make_poem_html(poems: &[PoemRecord]) -> Result<String> {
    PoemFormatter::default().format_response(poems)
}
