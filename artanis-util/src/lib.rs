//! Utilities that sit next to the URI parser.
//!
//! - **Periodic callbacks**: [`CallbackTimer`] runs a closure on a dedicated
//!   thread at a fixed interval until stopped
//! - **Message documents**: [`to_document`] turns a reflective [`Message`]
//!   into a JSON value, keeping 64-bit integers exact by emitting them as
//!   strings
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use artanis_util::{CallbackTimer, TimerConfig};
//!
//! let mut timer = CallbackTimer::new();
//! timer
//!     .start_with(
//!         TimerConfig::new()
//!             .with_interval(Duration::from_millis(5))
//!             .with_thread_name("heartbeat"),
//!         || {},
//!     )
//!     .unwrap();
//! timer.stop();
//! ```
//!
//! Timer lifecycle events are logged through `tracing` at debug level; a
//! panicking callback is logged at error level.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod document;
mod timer;

pub use config::TimerConfig;
pub use document::{FieldDescriptor, FieldType, FieldValue, Message, to_document};
pub use timer::{CallbackTimer, StopHandle};
