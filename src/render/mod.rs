//! Turning descriptor chains into command strings.
//!
//! Rendering is total: any [`Command`] produces a string, and the input is
//! never mutated. Validity (non-empty names, identifier env keys) is checked
//! earlier by [`Command::validate`].

pub mod escape;

use std::fmt;

pub use escape::{escape, needs_quoting, quote_path};

use crate::model::{ArgKind, Argument, Command};

/// Render one argument to its token text.
pub fn render_argument(arg: &Argument) -> String {
    match &arg.kind {
        ArgKind::Plain => escape(&arg.value),
        ArgKind::Quoted => format!("\"{}\"", escape(&arg.value)),
        ArgKind::Expand => format!("${}", arg.value),
        ArgKind::Glob => arg.value.clone(),
        ArgKind::Path => quote_path(&arg.value),
        ArgKind::KeyValue { key, path: true } => format!("{key}={}", quote_path(&arg.value)),
        ArgKind::KeyValue { key, path: false } => format!("{key}={}", escape(&arg.value)),
    }
}

/// Render a single command's own segment, ignoring anything chained after it.
pub fn render_segment(cmd: &Command) -> String {
    let mut clauses: Vec<String> = Vec::new();

    // BTreeMap iteration is key-ordered, so this is stable across renders.
    if !cmd.env.is_empty() {
        let assignments: Vec<String> = cmd
            .env
            .iter()
            .map(|(k, v)| format!("{k}={}", escape(v)))
            .collect();
        clauses.push(assignments.join(" "));
    }

    let mut words = Vec::with_capacity(2 + cmd.subcommands.len() + cmd.args.len());
    if cmd.sudo {
        words.push("sudo".to_string());
    }
    words.push(escape(&cmd.name));
    words.extend(cmd.subcommands.iter().map(|s| escape(s)));
    words.extend(cmd.args.iter().map(render_argument));

    let invocation = words.join(" ");
    if cmd.grouped {
        clauses.push(format!("({invocation})"));
    } else {
        clauses.push(invocation);
    }

    if !cmd.redirections.is_empty() {
        let redirs: Vec<String> = cmd
            .redirections
            .iter()
            .map(|r| format!("{} {}", r.op.as_str(), r.target))
            .collect();
        clauses.push(redirs.join(" "));
    }

    // Redirection targets are emitted as given; quoting them is the caller's call.
    if let Some(target) = &cmd.stderr {
        clauses.push(format!("2> {target}"));
    }
    if cmd.merge_stderr {
        clauses.push("2>&1".into());
    }
    if cmd.background {
        clauses.push("&".into());
    }

    let segment = clauses.join(" ").trim().to_string();
    log::trace!("segment for {:?}: {segment}", cmd.name);
    segment
}

/// Render a whole chain: segments interleaved with their operators.
pub fn render(cmd: &Command) -> String {
    let mut parts = Vec::new();
    for (node, op) in cmd.iter() {
        parts.push(render_segment(node));
        if let Some(op) = op {
            parts.push(op.as_str().to_string());
        }
    }
    let rendered = parts.join(" ");
    log::debug!("rendered {} command(s): {rendered}", cmd.len());
    rendered
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
