//! Fluent construction of command chains.
//!
//! ```
//! use cmdchain::CommandBuilder;
//!
//! let cmd = CommandBuilder::new("echo")
//!     .with_argument("Hello")
//!     .pipe_to(CommandBuilder::new("grep").with_argument("H"))
//!     .render()
//!     .unwrap();
//! assert_eq!(cmd, "echo Hello | grep H");
//! ```

use crate::error::BuildError;
use crate::model::{Argument, ChainOperator, Command, Link, RedirectOp, Redirection};
use crate::render::escape;

/// Builds a [`Command`] chain one call at a time.
///
/// Chaining methods take the next builder by value and append it to the end
/// of the current chain, so `a.pipe_to(b).and(c)` is `a | b && c`.
/// Argument and modifier methods always apply to the head command.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    command: Command,
    /// Successors in order, each with the operator that precedes it.
    links: Vec<(ChainOperator, Command)>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            command: Command::new(name),
            links: Vec::new(),
        }
    }

    fn push_arg(mut self, arg: Argument) -> Self {
        self.command.args.push(arg);
        self
    }

    // ── Arguments ──

    pub fn with_argument(self, value: impl Into<String>) -> Self {
        self.push_arg(Argument::plain(value))
    }

    /// A flag with no value, e.g. `--verbose`.
    pub fn with_option(self, option: impl Into<String>) -> Self {
        self.push_arg(Argument::plain(option))
    }

    /// A flag followed by its value as a separate word, e.g. `-o out.txt`.
    pub fn with_option_value(self, option: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_arg(Argument::plain(option))
            .push_arg(Argument::plain(value))
    }

    /// A subcommand such as `commit` in `git commit`.
    pub fn with_subcommand(mut self, sub: impl Into<String>) -> Self {
        self.command.subcommands.push(sub.into());
        self
    }

    pub fn with_quoted_argument(self, value: impl Into<String>) -> Self {
        self.push_arg(Argument::quoted(value))
    }

    /// `key=value`, e.g. `--format=json`.
    pub fn with_key_value_argument(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_arg(Argument::key_value(key, value))
    }

    /// `key="path"`, with the value quoted as a path.
    pub fn with_key_path_argument(self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.push_arg(Argument::key_path(key, path))
    }

    /// A glob pattern left active for the shell, e.g. `*.txt`. Not escaped.
    pub fn with_glob_argument(self, pattern: impl Into<String>) -> Self {
        self.push_arg(Argument::glob(pattern))
    }

    pub fn with_path_argument(self, path: impl Into<String>) -> Self {
        self.push_arg(Argument::path(path))
    }

    /// A variable reference rendered as `$name`. Not escaped.
    pub fn with_variable(self, name: impl Into<String>) -> Self {
        self.push_arg(Argument::expand(name))
    }

    // ── Modifiers ──

    pub fn with_sudo(mut self) -> Self {
        self.command.sudo = true;
        self
    }

    /// Set an environment variable for this command. A repeated key overwrites.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.command.env.insert(key.into(), value.into());
        self
    }

    pub fn grouped(mut self) -> Self {
        self.command.grouped = true;
        self
    }

    pub fn background(mut self) -> Self {
        self.command.background = true;
        self
    }

    // ── Redirections ──

    fn redirect(mut self, op: RedirectOp, target: impl Into<String>) -> Self {
        self.command.redirections.push(Redirection::new(op, target));
        self
    }

    /// Like the other redirect methods, but the target is passed through
    /// [`escape`] first, for file names with spaces or metacharacters.
    /// The plain methods emit their target unchanged so `$LOGFILE` expands.
    pub fn redirect_escaped(self, op: RedirectOp, target: &str) -> Self {
        self.redirect(op, escape(target))
    }

    pub fn redirect_to_dev_null(self) -> Self {
        self.redirect(RedirectOp::Overwrite, "/dev/null")
    }

    pub fn redirect_to_file(self, filename: impl Into<String>) -> Self {
        self.redirect(RedirectOp::Overwrite, filename)
    }

    pub fn append_to_file(self, filename: impl Into<String>) -> Self {
        self.redirect(RedirectOp::Append, filename)
    }

    pub fn redirect_from_file(self, filename: impl Into<String>) -> Self {
        self.redirect(RedirectOp::Input, filename)
    }

    /// `2> filename`. A second call replaces the first.
    pub fn redirect_stderr_to_file(mut self, filename: impl Into<String>) -> Self {
        self.command.stderr = Some(filename.into());
        self
    }

    pub fn merge_stdout_and_stderr(mut self) -> Self {
        self.command.merge_stderr = true;
        self
    }

    // ── Chaining ──

    fn chain(mut self, operator: ChainOperator, next: CommandBuilder) -> Self {
        self.links.push((operator, next.command));
        self.links.extend(next.links);
        self
    }

    pub fn pipe_to(self, next: CommandBuilder) -> Self {
        self.chain(ChainOperator::Pipe, next)
    }

    pub fn and(self, next: CommandBuilder) -> Self {
        self.chain(ChainOperator::And, next)
    }

    pub fn or(self, next: CommandBuilder) -> Self {
        self.chain(ChainOperator::Or, next)
    }

    // ── Finish ──

    /// Validate and return the descriptor chain.
    pub fn build(self) -> Result<Command, BuildError> {
        let cmd = self.into_command();
        cmd.validate()?;
        Ok(cmd)
    }

    /// Link the collected successors back to front, one pass over the chain.
    fn into_command(self) -> Command {
        let mut command = self.command;
        let mut rest: Option<Box<Link>> = None;
        for (operator, mut node) in self.links.into_iter().rev() {
            node.next = rest;
            rest = Some(Box::new(Link {
                operator,
                command: node,
            }));
        }
        command.next = rest;
        command
    }

    /// Validate and render in one step.
    pub fn render(self) -> Result<String, BuildError> {
        self.build().map(|cmd| crate::render::render(&cmd))
    }
}

impl From<CommandBuilder> for Command {
    /// Unvalidated conversion; prefer [`CommandBuilder::build`].
    fn from(builder: CommandBuilder) -> Self {
        builder.into_command()
    }
}
