//! Error types for construction, input decoding and syntax checking.

/// A descriptor chain that the renderer would turn into a meaningless command.
///
/// `position` is the zero-based index of the offending node in its chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("command #{position} has an empty name")]
    EmptyName { position: usize },
    #[error("command #{position} has an empty subcommand at index {index}")]
    EmptySubcommand { position: usize, index: usize },
    #[error("command #{position}: `{key}` is not a valid environment variable name")]
    InvalidEnvKey { position: usize, key: String },
}

/// The rendered string does not parse as bash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("bash grammar could not be loaded: {0}")]
    Grammar(String),
    #[error("parser produced no tree")]
    NoTree,
    #[error("syntax error at byte {offset}: `{snippet}`")]
    Invalid { offset: usize, snippet: String },
    #[error("missing `{expected}` at byte {offset}")]
    Missing { offset: usize, expected: String },
}

/// Top-level error for the CLI and [`crate::render_json`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("invalid command descriptor: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config parse error in {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
