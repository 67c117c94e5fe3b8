//! Error types for documentation generation.
//!
//! Every variant aborts the current run; the builder never produces a partial tree.

use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T, E = ScribeError> = std::result::Result<T, E>;

/// Error raised while transcribing a source tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScribeError {
    /// The code loader could not produce an inspectable object for a file.
    #[error("problem in {} - {cause}", path.display())]
    Load {
        /// Offending source file.
        path: PathBuf,
        /// Underlying cause (I/O, encoding or syntax error).
        cause: String,
    },

    /// A reflected object is neither a module, a class nor a routine.
    #[error("don't know how to document object {name} of type {type_name}")]
    Classification {
        /// Symbol name as declared in source.
        name: String,
        /// Concrete runtime type of the symbol.
        type_name: String,
    },

    /// Rendering a doc-comment failed outright (not a suppressible diagnostic).
    #[error("failed to render documentation of {owner}: {cause}")]
    Render {
        /// Symbol owning the doc text.
        owner: String,
        /// Underlying cause.
        cause: String,
    },

    /// I/O error while walking the tree or writing output.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl ScribeError {
    pub(crate) fn load(path: impl Into<PathBuf>, cause: impl ToString) -> Self {
        Self::Load {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    pub(crate) fn render(owner: impl Into<String>, cause: impl ToString) -> Self {
        Self::Render {
            owner: owner.into(),
            cause: cause.to_string(),
        }
    }
}
