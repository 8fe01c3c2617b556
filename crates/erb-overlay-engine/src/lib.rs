//! # erb-overlay-engine
//!
//! Projects an HTML+ERB template into a Ruby buffer with the exact byte
//! layout of the original, so an unmodified Ruby analyzer can run over the
//! embedded code and report positions that map straight back to the
//! template.
//!
//! The projection never inserts or deletes a byte. The output starts as a
//! blanked copy of the source (filler everywhere except line terminators)
//! and code is overwritten in place at its original offsets. Alongside the
//! buffer, a position-mapping registry records every spot where markup was
//! replaced by placeholder code, so a downstream step can substitute the
//! original markup back into analysis-tree nodes.
//!
//! ## Passes
//!
//! One conversion runs four passes over one parse tree:
//!
//! 1. [`position::PositionIndex`] — line-start table for offset/line/column
//!    conversion.
//! 2. [`tail::analyze`] — marks the statement whose value each
//!    value-returning branch returns, so that expression stays bare instead
//!    of becoming a placeholder assignment.
//! 3. [`blocks::classify`] — selects the markup elements wide enough to
//!    render as Ruby blocks.
//! 4. [`project`] — the emission pass producing buffer + registry.
//!
//! All intermediate state is owned by one conversion and dropped with it;
//! independent conversions can run in parallel without coordination.
//!
//! ```
//! use std::path::Path;
//!
//! let source = "<div><%= user.name %></div>";
//! let projection = erb_overlay_engine::convert(Path::new("show.html.erb"), source).unwrap();
//!
//! assert_eq!(projection.code.len(), source.len());
//! assert_eq!(projection.code, "     _ = user.name;        ");
//! ```

pub mod blocks;
pub mod convert;
pub mod position;
pub mod project;
pub mod registry;
pub mod tail;
pub mod tree;

pub use convert::{ProjectError, Projection, ProjectionEngine, convert};
pub use project::ProjectOptions;
pub use registry::{MappingEntry, Registry};
