//! Error type for the fallible edges of the binding layer.
//!
//! Attaching and detaching bound objects never fails. What can fail is binding
//! a map to its surface, probing the terminal, and reading configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    /// The backend refused to bind to a surface with no area.
    #[error("surface `{id}` has zero area")]
    EmptySurface { id: String },

    /// Terminal size detection failed.
    #[error("terminal unavailable: {0}")]
    Terminal(#[from] std::io::Error),

    /// Declarative map configuration did not parse.
    #[error("invalid map config: {0}")]
    Config(#[from] serde_json::Error),

    /// A color string did not parse as hex.
    #[error("invalid color `{0}`")]
    InvalidColor(String),
}
