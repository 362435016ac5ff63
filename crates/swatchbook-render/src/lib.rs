//! # Swatchbook Render - Theme Dictionary Report Engine
//!
//! `swatchbook-render` turns a UI theme's defaults dictionary (an ordered
//! mapping from string keys to heterogeneously-typed values) into a static,
//! browsable HTML report: one table row per key, with a deterministic raster
//! preview for every value type that supports one.
//!
//! This crate is the rendering foundation for the `swatchbook` CLI, but can
//! be used directly by any provider that can hand over a [`Dictionary`].
//!
//! ## Core Concepts
//!
//! - [`ThemeValue`]: the closed value universe, one variant per rendering
//!   strategy plus a catch-all, classified at ingestion time
//! - [`render_value`]: the typed-value dispatcher producing row cells and,
//!   where applicable, image artifacts
//! - [`ImageStore`]: run-scoped image persistence with the embed-vs-link
//!   size policy
//! - [`BucketPolicy`]: pluggable key classification into per-table buckets
//! - [`generate_report`]: the one-shot document writer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swatchbook_render::{generate_report, Dictionary, Rgba, SuffixPolicy, ThemeValue};
//!
//! let mut defaults = Dictionary::new();
//! defaults.insert(
//!     "Button.background".to_string(),
//!     ThemeValue::Color(Rgba::new(51, 102, 204, 255)),
//! );
//!
//! let path = generate_report(
//!     &defaults,
//!     "my-theme",
//!     std::path::Path::new("output"),
//!     &SuffixPolicy,
//! ).unwrap();
//! println!("report at {}", path.display());
//! ```
//!
//! ## Best-Effort Previews
//!
//! Procedural values (borders, painters, icons) paint through trait objects
//! whose paint methods may fail at runtime. The dispatcher isolates every
//! attempt: a failure shows up as a visible skip-paint marker on that row,
//! never as a missing row or an aborted run.

pub mod canvas;
pub mod classify;
pub mod color;
pub mod dispatch;
pub mod error;
pub mod report;
pub mod store;
pub mod theme;
pub mod value;

mod util;

pub use canvas::Canvas;
pub use classify::{classify, Bucket, BucketPolicy, ComponentPolicy, SuffixPolicy};
pub use color::Rgba;
pub use dispatch::{render_value, RowFragment};
pub use error::ReportError;
pub use report::{generate_report, REPORT_FILE};
pub use store::{ImageStore, LARGE_PREVIEW};
pub use value::{
    BorderPaint, DeferredValue, Dictionary, FontSpec, HostComponent, IconPaint, InputMap, Insets,
    PainterPaint, Size, ThemeValue,
};
