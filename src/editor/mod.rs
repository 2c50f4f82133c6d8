//! Skin editor - the project-wide editing context and its undo history
//!
//! `SkinEditor` is the host every skin command runs against: it owns the
//! skin, the refresh sink for the surrounding UI, the settings and the
//! unsaved-changes flag. `SkinSession` pairs it with a `History`.

pub mod classes;
pub mod properties;
pub mod styles;
pub mod values;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Settings;
use crate::history::{Command, CommitMode, History, HistoryHost, LabelFormat, MenuLabels};
use crate::model::{ClassId, Skin, WidgetClass};

pub use classes::{
    CreateCustomClassCmd, CreateCustomStyleCmd, DeleteCustomClassCmd, DeleteCustomStyleCmd,
    RenameCustomClassCmd, RenameCustomStyleCmd, ReorderCustomStylesCmd,
};
pub use properties::{CreateCustomPropertyCmd, DeleteCustomPropertyCmd, RenameCustomPropertyCmd};
pub use styles::{CreateStyleCmd, DeleteStyleCmd, RenameStyleCmd, ReorderStylesCmd};
pub use values::{RefCheck, SetParentCmd, SetValueCmd, ValueTarget};

/// Remove the first item matching `pred`, returning its former index
pub(crate) fn detach<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Option<(usize, T)> {
    let idx = items.iter().position(pred)?;
    Some((idx, items.remove(idx)))
}

/// Insert `item` at `index`, clamped to the list length; returns where it landed
pub(crate) fn attach<T>(items: &mut Vec<T>, index: usize, item: T) -> usize {
    let idx = index.min(items.len());
    items.insert(idx, item);
    idx
}

/// Element the UI should highlight after a command moved or renamed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Style { class: WidgetClass, index: usize },
    CustomClass(ClassId),
    CustomStyle { class: ClassId, index: usize },
}

/// UI surfaces that re-render after every apply/revert
///
/// Implementations must be idempotent and must not touch the history.
pub trait Refresh {
    fn refresh_style_properties(&mut self, select_affected: bool);
    fn refresh_styles(&mut self, select_affected: bool);
    fn refresh_classes(&mut self, select_affected: bool);
    fn refresh_preview(&mut self);
    fn select(&mut self, selection: Selection);
}

/// One call into a `Refresh` sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    StyleProperties { select_affected: bool },
    Styles { select_affected: bool },
    Classes { select_affected: bool },
    Preview,
    Select(Selection),
}

/// Refresh sink that records every call
///
/// Clones share one log, so a caller can keep a handle while the editor
/// owns the boxed sink.
#[derive(Debug, Clone, Default)]
pub struct RecordingRefresh {
    log: Rc<RefCell<Vec<RefreshEvent>>>,
}

impl RecordingRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<RefreshEvent> {
        self.log.borrow().clone()
    }

    /// Drain the recorded events
    pub fn take(&self) -> Vec<RefreshEvent> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    fn record(&self, event: RefreshEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl Refresh for RecordingRefresh {
    fn refresh_style_properties(&mut self, select_affected: bool) {
        self.record(RefreshEvent::StyleProperties { select_affected });
    }

    fn refresh_styles(&mut self, select_affected: bool) {
        self.record(RefreshEvent::Styles { select_affected });
    }

    fn refresh_classes(&mut self, select_affected: bool) {
        self.record(RefreshEvent::Classes { select_affected });
    }

    fn refresh_preview(&mut self) {
        self.record(RefreshEvent::Preview);
    }

    fn select(&mut self, selection: Selection) {
        self.record(RefreshEvent::Select(selection));
    }
}

/// Refresh sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRefresh;

impl Refresh for NullRefresh {
    fn refresh_style_properties(&mut self, _select_affected: bool) {}
    fn refresh_styles(&mut self, _select_affected: bool) {}
    fn refresh_classes(&mut self, _select_affected: bool) {}
    fn refresh_preview(&mut self) {}
    fn select(&mut self, _selection: Selection) {}
}

/// Editing context for skin commands
pub struct SkinEditor {
    pub skin: Skin,
    refresh: Box<dyn Refresh>,
    settings: Settings,
    changes_saved: bool,
    menu: MenuLabels,
}

impl SkinEditor {
    pub fn new(skin: Skin, settings: Settings, refresh: Box<dyn Refresh>) -> Self {
        Self {
            skin,
            refresh,
            settings,
            changes_saved: true,
            menu: MenuLabels::default(),
        }
    }

    pub fn refresh(&mut self) -> &mut dyn Refresh {
        self.refresh.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn changes_saved(&self) -> bool {
        self.changes_saved
    }

    pub fn set_changes_saved(&mut self, saved: bool) {
        self.changes_saved = saved;
    }

    /// Menu labels as last published by the history
    pub fn menu(&self) -> &MenuLabels {
        &self.menu
    }
}

impl HistoryHost for SkinEditor {
    fn mark_unsaved(&mut self) {
        self.changes_saved = false;
    }

    fn update_menu(&mut self, labels: &MenuLabels) {
        self.menu = labels.clone();
    }

    fn max_history(&self) -> usize {
        self.settings.max_undos
    }
}

/// A skin editor together with its undo history
pub struct SkinSession {
    pub editor: SkinEditor,
    history: History<SkinEditor>,
}

impl SkinSession {
    pub fn new(editor: SkinEditor) -> Self {
        Self {
            editor,
            history: History::with_format(LabelFormat::Plain),
        }
    }

    pub fn history(&self) -> &History<SkinEditor> {
        &self.history
    }

    /// Record a command in the history
    pub fn commit<T>(&mut self, cmd: T, mode: CommitMode)
    where
        T: Command<SkinEditor> + 'static,
    {
        self.history.commit(Box::new(cmd), mode, &mut self.editor);
    }

    /// Record an already boxed command (batches, dynamic dispatch)
    pub fn commit_boxed(&mut self, cmd: Box<dyn Command<SkinEditor>>, mode: CommitMode) {
        self.history.commit(cmd, mode, &mut self.editor);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.editor)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.editor)
    }

    /// Forget all history, e.g. after loading another project
    pub fn clear_history(&mut self) {
        self.history.clear(&mut self.editor);
    }
}
