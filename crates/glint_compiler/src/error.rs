//! Compiler error types.

use thiserror::Error;

/// Failure to produce a linkable specialized program.
///
/// Compile failures are fatal only to the attempted recompilation: the frame
/// driver keeps the previously linked scene in force and keeps rendering.
/// The generated source text is attached where it exists, so a bad edit can
/// be diagnosed by inspecting what the backend actually emitted.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A baked literal is NaN or infinite, e.g. from a singular accumulated
    /// transform. Caught at link time, after the source has been generated.
    #[error("generated program failed to link: non-finite literal in {location}")]
    NonFiniteLiteral {
        location: String,
        /// The full generated source, for diagnosis.
        generated: String,
    },

    /// The shading template does not contain a required placeholder.
    #[error("shading template is missing placeholder `{0}`")]
    MissingPlaceholder(&'static str),
}

impl CompileError {
    /// The generated source text, when the failure happened after emission.
    pub fn generated_source(&self) -> Option<&str> {
        match self {
            CompileError::NonFiniteLiteral { generated, .. } => Some(generated),
            CompileError::MissingPlaceholder(_) => None,
        }
    }
}
