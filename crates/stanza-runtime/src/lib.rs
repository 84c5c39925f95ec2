//! Stanza Runtime
//!
//! This crate turns "the user asked for a poem" into fetch → format →
//! display, one request at a time.
//!
//! # Features
//!
//! - Event channel with cloneable handles
//! - Fetch timeout and coalescing of requests made while one is in flight
//! - Failed requests leave the previous poem on display
//!
//! # Usage
//!
//! ```rust,ignore
//! use stanza_runtime::{MemoryDisplay, Runtime};
//!
//! let runtime = Runtime::new(source, formatter, MemoryDisplay::default());
//! let handle = runtime.handle();
//! tokio::spawn(runtime.run());
//! handle.request_poem().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod display;
pub mod engine;
pub mod error;
pub mod events;

pub use display::{Display, MemoryDisplay};
pub use engine::{RunStats, Runtime};
pub use error::{Error, Result};
pub use events::{Event, RuntimeHandle};
