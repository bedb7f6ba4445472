use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::argument::Argument;
use crate::error::BuildError;

/// Operator joining a command to its successor in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainOperator {
    /// `|` — pipe stdout into the next command
    #[serde(rename = "|", alias = "pipe")]
    Pipe,
    /// `&&` — run next only if previous succeeded
    #[serde(rename = "&&", alias = "and")]
    And,
    /// `||` — run next only if previous failed
    #[serde(rename = "||", alias = "or")]
    Or,
}

impl ChainOperator {
    /// The operator's shell syntax.
    pub fn as_str(self) -> &'static str {
        match self {
            ChainOperator::Pipe => "|",
            ChainOperator::And => "&&",
            ChainOperator::Or => "||",
        }
    }
}

/// Redirection operator for stdout/stdin clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedirectOp {
    /// `>` — truncate-write stdout
    #[serde(rename = ">")]
    Overwrite,
    /// `>>` — append stdout
    #[serde(rename = ">>")]
    Append,
    /// `<` — read stdin
    #[serde(rename = "<")]
    Input,
}

impl RedirectOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RedirectOp::Overwrite => ">",
            RedirectOp::Append => ">>",
            RedirectOp::Input => "<",
        }
    }
}

/// A redirection clause such as `> out.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirection {
    pub op: RedirectOp,
    pub target: String,
}

impl Redirection {
    pub fn new(op: RedirectOp, target: impl Into<String>) -> Self {
        Self {
            op,
            target: target.into(),
        }
    }
}

/// Successor of a command and the operator that joins them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub operator: ChainOperator,
    pub command: Command,
}

/// One shell command and, optionally, the rest of its chain.
///
/// Each node owns its successor, so a chain is always finite and acyclic.
/// `Clone`, `PartialEq`, `Debug` and `Drop` walk the chain iteratively, so
/// chain length is bounded by memory rather than stack depth.
#[derive(Default, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub subcommands: Vec<String>,
    #[serde(default)]
    pub args: Vec<Argument>,
    /// Environment assignments, rendered in key order.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub sudo: bool,
    #[serde(default)]
    pub redirections: Vec<Redirection>,
    /// Target of a `2>` clause.
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub merge_stderr: bool,
    #[serde(default)]
    pub background: bool,
    #[serde(default)]
    pub grouped: bool,
    #[serde(default)]
    pub next: Option<Box<Link>>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        let mut cmd = Self::default();
        cmd.name = name.into();
        cmd
    }

    /// Copy of this node's own fields, without its successor.
    fn clone_node(&self) -> Command {
        Command {
            name: self.name.clone(),
            subcommands: self.subcommands.clone(),
            args: self.args.clone(),
            env: self.env.clone(),
            sudo: self.sudo,
            redirections: self.redirections.clone(),
            stderr: self.stderr.clone(),
            merge_stderr: self.merge_stderr,
            background: self.background,
            grouped: self.grouped,
            next: None,
        }
    }

    /// Compare this node's own fields, ignoring successors.
    fn node_eq(&self, other: &Command) -> bool {
        self.name == other.name
            && self.subcommands == other.subcommands
            && self.args == other.args
            && self.env == other.env
            && self.sudo == other.sudo
            && self.redirections == other.redirections
            && self.stderr == other.stderr
            && self.merge_stderr == other.merge_stderr
            && self.background == other.background
            && self.grouped == other.grouped
    }

    /// Iterate over the chain: each node with the operator that follows it.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter { cur: Some(self) }
    }

    /// Number of commands in the chain, including this one.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false: a chain holds at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The last command of the chain.
    pub fn tail_mut(&mut self) -> &mut Command {
        let mut cur = self;
        loop {
            match cur.next {
                Some(ref mut link) => cur = &mut link.command,
                None => return cur,
            }
        }
    }

    /// Append `next` (and whatever it already chains to) after the tail.
    pub fn chain(&mut self, operator: ChainOperator, next: Command) {
        self.tail_mut().next = Some(Box::new(Link {
            operator,
            command: next,
        }));
    }

    /// Check the construction-time invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), BuildError> {
        for (position, (cmd, _)) in self.iter().enumerate() {
            if cmd.name.is_empty() {
                return Err(BuildError::EmptyName { position });
            }
            if let Some(index) = cmd.subcommands.iter().position(String::is_empty) {
                return Err(BuildError::EmptySubcommand { position, index });
            }
            if let Some(key) = cmd.env.keys().find(|k| !is_shell_identifier(k)) {
                return Err(BuildError::InvalidEnvKey {
                    position,
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Drop for Command {
    fn drop(&mut self) {
        // Unlink first so each node drops with no successor attached.
        let mut next = self.next.take();
        while let Some(mut link) = next {
            next = link.command.next.take();
        }
    }
}

impl Clone for Command {
    fn clone(&self) -> Self {
        let nodes: Vec<(Command, Option<ChainOperator>)> =
            self.iter().map(|(cmd, op)| (cmd.clone_node(), op)).collect();
        let mut rebuilt: Option<Command> = None;
        for (mut node, op) in nodes.into_iter().rev() {
            if let (Some(operator), Some(command)) = (op, rebuilt.take()) {
                node.next = Some(Box::new(Link { operator, command }));
            }
            rebuilt = Some(node);
        }
        rebuilt.unwrap_or_default()
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self.iter(), other.iter());
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some((x, x_op)), Some((y, y_op))) if x_op == y_op && x.node_eq(y) => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Command {}

impl fmt::Debug for Command {
    /// A flat list of nodes, each with the operator that follows it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(cmd, op)| NodeDebug(cmd, op)))
            .finish()
    }
}

struct NodeDebug<'a>(&'a Command, Option<ChainOperator>);

impl fmt::Debug for NodeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmd = self.0;
        f.debug_struct("Command")
            .field("name", &cmd.name)
            .field("subcommands", &cmd.subcommands)
            .field("args", &cmd.args)
            .field("env", &cmd.env)
            .field("sudo", &cmd.sudo)
            .field("redirections", &cmd.redirections)
            .field("stderr", &cmd.stderr)
            .field("merge_stderr", &cmd.merge_stderr)
            .field("background", &cmd.background)
            .field("grouped", &cmd.grouped)
            .field("operator", &self.1)
            .finish()
    }
}

/// Iterator returned by [`Command::iter`].
pub struct ChainIter<'a> {
    cur: Option<&'a Command>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = (&'a Command, Option<ChainOperator>);

    fn next(&mut self) -> Option<Self::Item> {
        let cmd = self.cur?;
        let op = cmd.next.as_ref().map(|link| link.operator);
        self.cur = cmd.next.as_ref().map(|link| &link.command);
        Some((cmd, op))
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*` — the names a shell accepts in `NAME=value`.
pub fn is_shell_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
