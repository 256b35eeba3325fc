//! Request middleware.
//!
//! Purpose: request lifecycle concerns that wrap every handler, currently
//! trace identifiers and per-request logging.

pub mod trace;

pub use trace::Trace;
