//! Command trait and the generic batch command
//!
//! Each command is self-contained, storing all data needed to apply and
//! revert without querying the current state of the model.

use std::fmt;

/// A reversible operation over a host context `C`
///
/// Commands snapshot old and new values when they are built. Construction
/// never mutates the model; whether the effect is applied on commit is
/// decided by [`CommitMode`](super::CommitMode).
pub trait Command<C>: fmt::Debug {
    /// Perform the forward transition (initial apply and redo)
    fn apply(&mut self, ctx: &mut C);

    /// Perform the exact inverse of `apply` (undo)
    fn revert(&mut self, ctx: &mut C);

    /// Human-readable description used for menu labels
    fn description(&self) -> String;
}

/// A command that groups multiple commands into one undo step
pub struct BatchCmd<C> {
    pub commands: Vec<Box<dyn Command<C>>>,
    pub desc: String,
}

impl<C> BatchCmd<C> {
    pub fn new(desc: impl Into<String>) -> Self {
        Self {
            commands: Vec::new(),
            desc: desc.into(),
        }
    }

    /// Add a command to the batch
    pub fn push(&mut self, cmd: Box<dyn Command<C>>) {
        self.commands.push(cmd);
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<C> fmt::Debug for BatchCmd<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchCmd")
            .field("desc", &self.desc)
            .field("commands", &self.commands)
            .finish()
    }
}

impl<C> Command<C> for BatchCmd<C> {
    fn apply(&mut self, ctx: &mut C) {
        for cmd in &mut self.commands {
            cmd.apply(ctx);
        }
    }

    fn revert(&mut self, ctx: &mut C) {
        // Revert in reverse order
        for cmd in self.commands.iter_mut().rev() {
            cmd.revert(ctx);
        }
    }

    fn description(&self) -> String {
        self.desc.clone()
    }
}
