//! Library surface of the `swatchbook` CLI.
//!
//! The binary itself is thin; the built-in theme provider lives here so
//! integration tests can drive report generation against it.

pub mod themes;
