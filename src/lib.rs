//! cmdchain: assemble shell-safe command lines from structured descriptors.
//!
//! A [`Command`] describes one shell command (name, subcommands, typed
//! arguments, environment, redirections, modifiers) and optionally owns the
//! next command in a chain together with the operator joining them. The
//! renderer turns a chain into a single POSIX-shell string, deciding per
//! argument kind whether and how to quote it.
//!
//! # Architecture
//!
//! - **[`model`]** — Descriptor types: commands, arguments, redirections, chain links.
//! - **[`render`]** — Escaping primitives and the segment/chain renderer.
//! - **[`builder`]** — Fluent construction with build-time validation.
//! - **[`syntax`]** — Optional check of rendered output against the bash grammar.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — simplelog setup for the CLI.
//!
//! # Trust boundary
//!
//! [`ArgKind::Expand`] and [`ArgKind::Glob`] are emitted without escaping.
//! Never feed untrusted input through them.

/// Fluent command builder.
pub mod builder;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Build, decode and syntax errors.
pub mod error;
/// Logger initialisation.
pub mod logging;
/// Command descriptor types.
pub mod model;
/// Escaping and rendering.
pub mod render;
/// tree-sitter based syntax check.
pub mod syntax;

pub use builder::CommandBuilder;
pub use error::{BuildError, Error, SyntaxError};
pub use model::{ArgKind, Argument, ChainOperator, Command, RedirectOp, Redirection};
pub use render::{escape, quote_path, render};

/// Decode a JSON descriptor, validate it, apply config defaults, and render it.
///
/// This is the main entry point for the CLI and for tests driving it.
pub fn render_json(input: &str, config: &config::Config) -> error::Result<String> {
    let mut cmd: Command = serde_json::from_str(input)?;
    cmd.validate()?;
    config.apply_env_defaults(&mut cmd);
    // Config-supplied keys are checked too.
    cmd.validate()?;

    let rendered = render(&cmd);
    if config.settings.check_syntax {
        syntax::check(&rendered)?;
    }
    logging::log_render(&cmd, &rendered);
    Ok(rendered)
}
