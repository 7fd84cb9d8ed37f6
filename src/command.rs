//! Command registry and dispatch.
//!
//! Commands are registered against a dispatch table built explicitly at
//! startup: one word maps to one [`Command`] variant, and the gateway
//! handler matches on the variant. Arguments are split shell-style, so
//! export paths containing spaces can be quoted.

use std::collections::HashMap;

/// The commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    /// Import export files from the given paths into the invoking channel.
    ImportHere,
}

/// A parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Which registered command was named.
    pub command: Command,
    /// Remaining arguments, shell-split.
    pub args: Vec<String>,
}

/// Table of registered commands, keyed by command word.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    prefix: char,
    entries: HashMap<String, Command>,
}

impl CommandRegistry {
    /// Creates an empty registry using `prefix` as the trigger character.
    pub fn new(prefix: char) -> Self {
        Self {
            prefix,
            entries: HashMap::new(),
        }
    }

    /// Creates a registry with the standard command set registered.
    pub fn with_defaults(prefix: char) -> Self {
        let mut registry = Self::new(prefix);
        registry.register("import_here", Command::ImportHere);
        registry
    }

    /// Registers `word` to dispatch to `command`.
    pub fn register(&mut self, word: impl Into<String>, command: Command) {
        self.entries.insert(word.into(), command);
    }

    /// The trigger prefix this registry matches on.
    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// Parses a raw message into an invocation.
    ///
    /// Returns `None` for anything that is not a prefixed, registered
    /// command (including unparseable quoting): such messages are simply
    /// not for us.
    pub fn parse(&self, content: &str) -> Option<Invocation> {
        let rest = content.trim().strip_prefix(self.prefix)?;
        let mut tokens = shell_words::split(rest).ok()?.into_iter();
        let word = tokens.next()?;
        let command = *self.entries.get(&word)?;
        Some(Invocation {
            command,
            args: tokens.collect(),
        })
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_defaults('!')
    }
}
