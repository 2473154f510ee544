//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Library code only emits `tracing` events. Nothing is written anywhere
//! unless the binary installs a subscriber through `init`.
//!
//! # Usage
//!
//! ```rust
//! use tango_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use tango_core_types::schema;
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
