//! Stanza Core Library
//!
//! This crate provides the core functionality for Stanza:
//! - Tag wrapping and left-to-right function composition
//! - Poem formatting (PoetryDB record → HTML fragment)
//! - Standalone page rendering
//! - Poem sources (PoetryDB over HTTP, saved responses on disk)
//! - Configuration parsing and profiles
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│    Poem     │────▶│    Page     │
//! │ (PoetryDB)  │     │  Formatter  │     │ (optional)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use stanza_core::{PoemFormatter, PoemRecord};
//!
//! let poem = PoemRecord::new("T", "A", ["x", "y", "", "z"]);
//! let html = PoemFormatter::default().format(&poem);
//! assert_eq!(html, "<h2>T</h2><h3><em>by A</em></h3><p>x<br>y</p><p>z</p>");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod markup;
pub mod page;
pub mod pipe;
pub mod poem;
pub mod source;

pub use config::{Config, RenderConfig, SourceConfig, StanzaBreaks};
pub use error::{Error, Result};
pub use markup::{make_tag, wrap};
pub use page::PageRenderer;
pub use pipe::{Pipeline, compose, identity};
pub use poem::{PoemFormatter, PoemRecord, make_poem_html, split_stanzas};
pub use source::{FileSource, HttpSource, PoemQuery, PoemSource, parse_response};
