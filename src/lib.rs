//! Desires: a guided reflection on what you want and why
//!
//! A user states a main desire, three sub-desires with the outcome hoped
//! for from each, and whether each sub-desire's link to the main desire is
//! real, spurious, or unclear. The answers are drawn as a small
//! color-coded tree and appended to a cumulative table.
//!
//! # Pipeline
//!
//! - **Form** ([`form`]): typed field schema and per-session answers
//! - **Graph** ([`graph`]): display graph plus seeded spring layout
//! - **Render** ([`render`]): colored segments and labeled points, as SVG
//! - **Storage** ([`storage`]): append-only table (CSV or SQLite)
//! - **Export** ([`export`]): the whole table as a downloadable file
//!
//! # Example
//!
//! ```
//! use desires::{analyze, AnalyzeOptions, FormState, LinkType, Session};
//!
//! let mut form = FormState::new();
//! form.name = "Alice".into();
//! form.main_desire = "Financial freedom".into();
//! for (slot, sub) in form.subs.iter_mut().enumerate() {
//!     sub.sub_desire = format!("Sub-desire {}", slot + 1);
//!     sub.outcome = format!("Outcome {}", slot + 1);
//! }
//! form.set_link(1, LinkType::Spurious).unwrap();
//!
//! let analysis = analyze(&Session::with_form(form), &AnalyzeOptions::default()).unwrap();
//! assert_eq!(analysis.graph.edge_count(), 6);
//! ```

pub mod config;
pub mod export;
pub mod form;
pub mod graph;
pub mod pipeline;
pub mod render;
pub mod storage;

pub use config::{StoreConfig, StoreKind};
pub use export::{export, ExportOutcome, EXPORT_FILE_NAME};
pub use form::{FormField, FormState, LinkType, Reflection, Session, SessionId, SubEntry, ValidationError};
pub use graph::{spring_layout, DisplayGraph, EdgeTag, Layout, LayoutConfig};
pub use pipeline::{analyze, save, submit, Analysis, AnalyzeOptions, DesireError, DesireResult, Notice};
pub use render::{render_svg, Color, Figure, RenderOptions, SvgOptions};
pub use storage::{CsvStore, OpenStore, ReflectionStore, SqliteStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
