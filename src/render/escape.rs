//! Escaping primitives shared by every argument kind.

/// Characters that force [`escape`] to single-quote its input.
const SHELL_METACHARACTERS: &[char] = &[' ', '\t', '\n', '"', '\'', '$', '&', ';', '|', '<', '>', '`'];

/// Sequence that closes a single-quoted word, emits a literal `'`, and reopens it.
const SINGLE_QUOTE_BREAK: &str = r#"'"'"'"#;

/// Whether `s` contains a character that [`escape`] would have to protect.
pub fn needs_quoting(s: &str) -> bool {
    s.contains(SHELL_METACHARACTERS)
}

/// Make `s` safe to splice into a POSIX command line as a single word.
///
/// Strings without metacharacters come back unchanged. Anything else is
/// wrapped in single quotes, with embedded `'` spelled as `'"'"'`, so the
/// shell applies no expansion or word splitting to the contents.
///
/// Glob characters (`*`, `?`, `[`) are not metacharacters here: an unquoted
/// `*.txt` passed through `escape` stays active.
pub fn escape(s: &str) -> String {
    if !needs_quoting(s) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push_str(SINGLE_QUOTE_BREAK);
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

/// Double-quote a filesystem path, backslash-escaping `"` and `\`.
///
/// `$` and backticks stay live inside double quotes, so the input must be a
/// literal path rather than untrusted text.
pub fn quote_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    out.push('"');
    for c in path.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
