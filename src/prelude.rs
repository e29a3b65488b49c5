//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use artanis_uri::prelude::*;
//!
//! let uri = Uri::parse("coap://[fe80::1]:5683/sensors?id=4").unwrap();
//! assert_eq!(uri.port(), 5683);
//! ```

pub use crate::{
    // Core types
    QueryParams, Uri,
    // Errors
    DecodeError, ParseError, ParseErrorKind,
    // Constants
    UNSPECIFIED_PORT,
};
