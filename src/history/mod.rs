//! History module for undo/redo
//!
//! This module provides:
//! - `History`: a bounded, cursor-based linear command log
//! - `Command` trait: interface for reversible operations
//! - `HistoryHost`: the collaborator a history reports dirty state,
//!   menu labels and capacity through

pub mod command;

#[cfg(test)]
mod tests;

pub use command::{BatchCmd, Command};

use tracing::{debug, warn};

/// Whether `commit` should apply the command or record an effect the
/// caller already performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Invoke `apply` as part of the commit
    ApplyNow,
    /// The caller mutated the model already; only record the command
    AlreadyApplied,
}

/// How descriptions are rendered into menu text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// `Undo Rename Style "x"`
    #[default]
    Plain,
    /// `Undo "Delete TextButton"`
    Quoted,
}

impl LabelFormat {
    fn render(self, verb: &str, description: Option<String>) -> String {
        match (self, description) {
            (_, None) => verb.to_string(),
            (LabelFormat::Plain, Some(desc)) => format!("{} {}", verb, desc),
            (LabelFormat::Quoted, Some(desc)) => format!("{} \"{}\"", verb, desc),
        }
    }
}

/// Menu text and enabled flags for the undo/redo affordances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLabels {
    pub undo_text: String,
    pub undo_enabled: bool,
    pub redo_text: String,
    pub redo_enabled: bool,
}

impl Default for MenuLabels {
    fn default() -> Self {
        Self {
            undo_text: "Undo".to_string(),
            undo_enabled: false,
            redo_text: "Redo".to_string(),
            redo_enabled: false,
        }
    }
}

/// Context a history runs against
///
/// Commands receive the same value, so the host is also where the model
/// and refresh sinks live.
pub trait HistoryHost {
    /// Flag the surrounding project as having unsaved changes
    fn mark_unsaved(&mut self);

    /// Receive the menu labels after every history mutation
    fn update_menu(&mut self, labels: &MenuLabels);

    /// Maximum number of entries to retain, read on every commit
    fn max_history(&self) -> usize;
}

/// Linear undo/redo history
///
/// Entries are kept in commit order. The first `applied` entries are in
/// effect; the rest have been undone and stay redoable until the next
/// commit truncates them. `applied` is the cursor plus one, so an empty
/// prefix means everything is undone.
pub struct History<C> {
    entries: Vec<Box<dyn Command<C>>>,
    applied: usize,
    format: LabelFormat,
}

impl<C> Default for History<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> History<C> {
    /// Create a new empty history with plain labels
    pub fn new() -> Self {
        Self::with_format(LabelFormat::Plain)
    }

    /// Create a new empty history with the given label format
    pub fn with_format(format: LabelFormat) -> Self {
        Self {
            entries: Vec::new(),
            applied: 0,
            format,
        }
    }

    /// Check if there are commands to undo
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    /// Check if there are commands to redo
    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    /// Total number of retained entries, applied or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the last applied entry, `None` when everything is undone
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    /// Description of the command the next `undo` would revert
    pub fn undo_description(&self) -> Option<String> {
        self.cursor()
            .and_then(|idx| self.entries.get(idx))
            .map(|cmd| cmd.description())
    }

    /// Description of the command the next `redo` would apply
    pub fn redo_description(&self) -> Option<String> {
        self.entries.get(self.applied).map(|cmd| cmd.description())
    }

    /// Descriptions of all retained entries in commit order
    pub fn descriptions(&self) -> Vec<String> {
        self.entries.iter().map(|cmd| cmd.description()).collect()
    }

    /// Current menu labels
    pub fn labels(&self) -> MenuLabels {
        MenuLabels {
            undo_text: self.format.render("Undo", self.undo_description()),
            undo_enabled: self.can_undo(),
            redo_text: self.format.render("Redo", self.redo_description()),
            redo_enabled: self.can_redo(),
        }
    }
}

impl<C: HistoryHost> History<C> {
    /// Record a command, discarding any redoable entries
    ///
    /// With [`CommitMode::ApplyNow`] the command is applied before it is
    /// stored. The oldest entries are evicted once the host's capacity is
    /// exceeded.
    pub fn commit(&mut self, mut cmd: Box<dyn Command<C>>, mode: CommitMode, ctx: &mut C) {
        ctx.mark_unsaved();

        let discarded = self.entries.len() - self.applied;
        if discarded > 0 {
            self.entries.truncate(self.applied);
            debug!(discarded, "dropped redo branch");
        }

        if mode == CommitMode::ApplyNow {
            cmd.apply(ctx);
        }
        debug!(command = %cmd.description(), ?mode, "commit");
        self.entries.push(cmd);
        self.applied = self.entries.len();

        let max = ctx.max_history();
        if self.entries.len() > max {
            let evicted = self.entries.len() - max;
            self.entries.drain(..evicted);
            self.applied = self.applied.saturating_sub(evicted);
            debug!(evicted, max, "evicted oldest history entries");
        }

        self.publish(ctx);
    }

    /// Undo the command at the cursor
    ///
    /// Returns `true` if a command was reverted, `false` if nothing was applied.
    pub fn undo(&mut self, ctx: &mut C) -> bool {
        let Some(idx) = self.cursor() else {
            return false;
        };
        let Some(cmd) = self.entries.get_mut(idx) else {
            debug_assert!(false, "cursor {} past {} entries", idx, self.entries.len());
            warn!(idx, len = self.entries.len(), "history cursor out of range");
            return false;
        };

        ctx.mark_unsaved();
        debug!(command = %cmd.description(), "undo");
        cmd.revert(ctx);
        self.applied = idx;
        self.publish(ctx);
        true
    }

    /// Redo the command after the cursor
    ///
    /// Returns `true` if a command was applied, `false` if nothing was undone.
    pub fn redo(&mut self, ctx: &mut C) -> bool {
        let Some(cmd) = self.entries.get_mut(self.applied) else {
            return false;
        };

        ctx.mark_unsaved();
        debug!(command = %cmd.description(), "redo");
        cmd.apply(ctx);
        self.applied += 1;
        self.publish(ctx);
        true
    }

    /// Drop every entry and reset the cursor
    pub fn clear(&mut self, ctx: &mut C) {
        self.entries.clear();
        self.applied = 0;
        self.publish(ctx);
    }

    fn publish(&self, ctx: &mut C) {
        ctx.update_menu(&self.labels());
    }
}
