//! Command descriptors: the structured input to the renderer.

pub mod argument;
pub mod command;

pub use argument::{ArgKind, Argument};
pub use command::{ChainIter, ChainOperator, Command, Link, RedirectOp, Redirection, is_shell_identifier};
