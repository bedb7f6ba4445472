use serde::{Deserialize, Serialize};

/// How an argument's raw value is turned into a token.
///
/// Exactly one strategy applies to each argument. `Expand` and `Glob` skip
/// escaping entirely: they are the trust boundary of the renderer and must
/// only carry caller-controlled text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    /// `escape(value)`
    #[default]
    Plain,
    /// `"` + `escape(value)` + `"`
    Quoted,
    /// `$value`, unescaped. The value must be a valid variable reference.
    Expand,
    /// `value` verbatim so `*`, `?` and `[...]` stay active. Never escaped.
    Glob,
    /// Double-quoted literal path.
    Path,
    /// `key=value` with no space around `=`. The key is emitted verbatim;
    /// `path` selects path quoting for the value instead of `escape`.
    KeyValue {
        key: String,
        #[serde(default)]
        path: bool,
    },
}

/// One command-line token and the strategy used to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub value: String,
    #[serde(default)]
    pub kind: ArgKind,
}

impl Argument {
    pub fn new(value: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(value, ArgKind::Plain)
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Self::new(value, ArgKind::Quoted)
    }

    pub fn expand(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Expand)
    }

    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::new(pattern, ArgKind::Glob)
    }

    pub fn path(path: impl Into<String>) -> Self {
        Self::new(path, ArgKind::Path)
    }

    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            value,
            ArgKind::KeyValue {
                key: key.into(),
                path: false,
            },
        )
    }

    pub fn key_path(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(
            path,
            ArgKind::KeyValue {
                key: key.into(),
                path: true,
            },
        )
    }
}
