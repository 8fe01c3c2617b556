//! The public conversion operation.

use std::path::{Path, PathBuf};

use erb_overlay_syntax::{ParseDefect, SyntaxError, parse};
use thiserror::Error;

use crate::position::PositionIndex;
use crate::project::{self, ProjectOptions};
use crate::registry::Registry;
use crate::{blocks, tail};

/// A fatal conversion failure. Markup defects are not fatal; these are.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },
    /// The projected buffer stopped being valid UTF-8. Emissions are ASCII
    /// and code spans are copied at their original offsets, so this only
    /// fires on a bug in the emission geometry.
    #[error("projection of {} produced invalid UTF-8", path.display())]
    Encoding { path: PathBuf },
}

/// Result of one conversion: the projected Ruby buffer, the position
/// registry for downstream restoration, and the parser's non-fatal markup
/// defects.
#[derive(Debug)]
pub struct Projection {
    pub code: String,
    pub registry: Registry,
    pub defects: Vec<ParseDefect>,
}

/// Converts templates with one fixed set of options.
///
/// Stateless apart from the options: every call allocates its own index,
/// sets, and buffer, so one engine may serve concurrent conversions.
#[derive(Debug, Default)]
pub struct ProjectionEngine {
    options: ProjectOptions,
}

impl ProjectionEngine {
    pub fn new(options: ProjectOptions) -> Self {
        Self { options }
    }

    /// Project one template. The path is used in error messages only.
    pub fn convert(&self, path: &Path, source: &str) -> Result<Projection, ProjectError> {
        let parsed = parse(source).map_err(|e| ProjectError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        let index = PositionIndex::new(source);
        let tails = tail::analyze(&parsed.root);
        let blocks = blocks::classify(&parsed.root);
        let (buf, registry) = project::project(
            &parsed.root,
            source,
            &index,
            &tails,
            &blocks,
            self.options,
        );
        let code = String::from_utf8(buf).map_err(|_| ProjectError::Encoding {
            path: path.to_path_buf(),
        })?;
        Ok(Projection {
            code,
            registry,
            defects: parsed.defects,
        })
    }
}

/// Project one template with default options.
pub fn convert(path: &Path, source: &str) -> Result<Projection, ProjectError> {
    ProjectionEngine::default().convert(path, source)
}
