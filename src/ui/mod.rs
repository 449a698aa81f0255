//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module so that quiet mode and
//! JSON output are handled in one place. Diagnostics for developers go
//! through `tracing` instead.

pub mod output;
