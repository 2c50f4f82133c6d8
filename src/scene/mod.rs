//! Scene composer - a live preview tree of actors with its own undo stack
//!
//! The composer keeps a separate `History` from the skin editor and renders
//! its menu labels quoted (`Undo "Delete TextButton"`).

pub mod commands;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::history::{Command, CommitMode, History, HistoryHost, LabelFormat, MenuLabels};
use crate::model::ActorId;

pub use commands::{ActorProperty, AddActorCmd, DeleteActorCmd, SetActorPropertyCmd};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Root,
    Table,
    Button,
    CheckBox,
    ImageButton,
    ImageTextButton,
    TextButton,
    Label,
}

impl ActorKind {
    pub fn name(self) -> &'static str {
        match self {
            ActorKind::Root => "Root",
            ActorKind::Table => "Table",
            ActorKind::Button => "Button",
            ActorKind::CheckBox => "CheckBox",
            ActorKind::ImageButton => "ImageButton",
            ActorKind::ImageTextButton => "ImageTextButton",
            ActorKind::TextButton => "TextButton",
            ActorKind::Label => "Label",
        }
    }

    /// Whether actors of this kind can hold children
    pub fn is_container(self) -> bool {
        matches!(self, ActorKind::Root | ActorKind::Table)
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an actor takes part in hit detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Touchable {
    #[default]
    Enabled,
    Disabled,
    ChildrenOnly,
}

impl fmt::Display for Touchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Touchable::Enabled => "enabled",
            Touchable::Disabled => "disabled",
            Touchable::ChildrenOnly => "childrenOnly",
        })
    }
}

/// A node of the composed scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimActor {
    #[serde(default)]
    pub id: ActorId,
    pub kind: ActorKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub touchable: Touchable,
    #[serde(default)]
    pub children: Vec<SimActor>,
}

impl SimActor {
    pub fn new(kind: ActorKind) -> Self {
        Self {
            id: ActorId::new(),
            kind,
            name: None,
            style: "default".to_string(),
            text: String::new(),
            checked: false,
            disabled: false,
            touchable: Touchable::Enabled,
            children: Vec::new(),
        }
    }

    pub fn find(&self, id: ActorId) -> Option<&SimActor> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: ActorId) -> Option<&mut SimActor> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Parent id and child index of `id` within this subtree
    fn position(&self, id: ActorId) -> Option<(ActorId, usize)> {
        if let Some(idx) = self.children.iter().position(|c| c.id == id) {
            return Some((self.id, idx));
        }
        self.children.iter().find_map(|child| child.position(id))
    }

    fn path_to(&self, id: ActorId, path: &mut Vec<ActorId>) -> bool {
        path.push(self.id);
        if self.id == id || self.children.iter().any(|c| c.path_to(id, path)) {
            return true;
        }
        path.pop();
        false
    }
}

/// The actor tree under composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub root: SimActor,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: SimActor::new(ActorKind::Root),
        }
    }

    pub fn find(&self, id: ActorId) -> Option<&SimActor> {
        self.root.find(id)
    }

    pub fn find_mut(&mut self, id: ActorId) -> Option<&mut SimActor> {
        self.root.find_mut(id)
    }

    /// Parent id and child index of a non-root actor
    pub fn position(&self, id: ActorId) -> Option<(ActorId, usize)> {
        self.root.position(id)
    }

    /// Ids from the root down to `id`, inclusive
    pub fn path_to(&self, id: ActorId) -> Option<Vec<ActorId>> {
        let mut path = Vec::new();
        self.root.path_to(id, &mut path).then_some(path)
    }

    /// Detach a non-root actor with its subtree
    pub fn remove(&mut self, id: ActorId) -> Option<(ActorId, usize, SimActor)> {
        let (parent, idx) = self.position(id)?;
        let actor = self.find_mut(parent)?.children.remove(idx);
        Some((parent, idx, actor))
    }

    /// Insert `actor` under `parent`, clamping the index; returns where it landed
    pub fn insert(&mut self, parent: ActorId, index: usize, actor: SimActor) -> Option<usize> {
        let parent = self.find_mut(parent)?;
        let idx = index.min(parent.children.len());
        parent.children.insert(idx, actor);
        Some(idx)
    }
}

/// Composer panels that re-render when the focused actor changes
pub trait SceneView {
    fn populate_properties(&mut self, actor: ActorId);
    fn populate_path(&mut self, path: &[ActorId]);
    fn update_preview(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    Properties(ActorId),
    Path(Vec<ActorId>),
    Preview,
}

/// View that records every call; clones share one log
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    log: Rc<RefCell<Vec<SceneEvent>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<SceneEvent> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl SceneView for RecordingView {
    fn populate_properties(&mut self, actor: ActorId) {
        self.log.borrow_mut().push(SceneEvent::Properties(actor));
    }

    fn populate_path(&mut self, path: &[ActorId]) {
        self.log.borrow_mut().push(SceneEvent::Path(path.to_vec()));
    }

    fn update_preview(&mut self) {
        self.log.borrow_mut().push(SceneEvent::Preview);
    }
}

/// Editing context for scene commands
pub struct SceneComposer {
    pub scene: Scene,
    view: Box<dyn SceneView>,
    selected: ActorId,
    settings: Settings,
    changes_saved: bool,
    menu: MenuLabels,
}

impl SceneComposer {
    /// The root starts out selected
    pub fn new(scene: Scene, settings: Settings, view: Box<dyn SceneView>) -> Self {
        Self {
            selected: scene.root.id,
            scene,
            view,
            settings,
            changes_saved: true,
            menu: MenuLabels::default(),
        }
    }

    pub fn selected(&self) -> ActorId {
        self.selected
    }

    /// Bring `id` into focus after a command touched it
    ///
    /// The property panel and path bar are only repopulated when the
    /// selection actually moves; the preview always updates.
    pub fn focus(&mut self, id: ActorId) {
        if self.selected != id {
            self.selected = id;
            self.view.populate_properties(id);
            let path = self.scene.path_to(id).unwrap_or_default();
            self.view.populate_path(&path);
        }
        self.view.update_preview();
    }

    pub fn changes_saved(&self) -> bool {
        self.changes_saved
    }

    pub fn set_changes_saved(&mut self, saved: bool) {
        self.changes_saved = saved;
    }

    pub fn menu(&self) -> &MenuLabels {
        &self.menu
    }
}

impl HistoryHost for SceneComposer {
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

/// A scene composer together with its undo stack
pub struct SceneSession {
    pub composer: SceneComposer,
    history: History<SceneComposer>,
}

impl SceneSession {
    pub fn new(composer: SceneComposer) -> Self {
        Self {
            composer,
            history: History::with_format(LabelFormat::Quoted),
        }
    }

    pub fn history(&self) -> &History<SceneComposer> {
        &self.history
    }

    pub fn commit<T>(&mut self, cmd: T, mode: CommitMode)
    where
        T: Command<SceneComposer> + 'static,
    {
        self.history.commit(Box::new(cmd), mode, &mut self.composer);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.composer)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.composer)
    }

    pub fn clear_history(&mut self) {
        self.history.clear(&mut self.composer);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Root > [Table > [TextButton, CheckBox], Label]
    pub struct Fixture {
        pub session: SceneSession,
        pub view: RecordingView,
        pub table: ActorId,
        pub button: ActorId,
        pub check: ActorId,
        pub label: ActorId,
    }

    pub fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let mut table = SimActor::new(ActorKind::Table);
        let button = SimActor::new(ActorKind::TextButton);
        let check = SimActor::new(ActorKind::CheckBox);
        let label = SimActor::new(ActorKind::Label);
        let (table_id, button_id, check_id, label_id) = (table.id, button.id, check.id, label.id);
        table.children = vec![button, check];
        scene.root.children = vec![table, label];

        let view = RecordingView::new();
        let composer = SceneComposer::new(scene, Settings::default(), Box::new(view.clone()));
        Fixture {
            session: SceneSession::new(composer),
            view,
            table: table_id,
            button: button_id,
            check: check_id,
            label: label_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::fixture;
    use super::*;

    #[test]
    fn test_position_and_path() {
        let f = fixture();
        let scene = &f.session.composer.scene;
        assert_eq!(scene.position(f.check), Some((f.table, 1)));
        assert_eq!(scene.position(scene.root.id), None);
        assert_eq!(
            scene.path_to(f.check),
            Some(vec![scene.root.id, f.table, f.check])
        );
        assert_eq!(scene.path_to(ActorId::new()), None);
    }

    #[test]
    fn test_remove_and_insert_roundtrip() {
        let mut f = fixture();
        let before = f.session.composer.scene.clone();
        let scene = &mut f.session.composer.scene;

        let (parent, idx, actor) = scene.remove(f.table).unwrap();
        assert!(scene.find(f.button).is_none());
        assert_eq!(scene.insert(parent, idx, actor), Some(0));
        assert_eq!(*scene, before);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut f = fixture();
        let scene = &mut f.session.composer.scene;
        let root = scene.root.id;
        assert_eq!(scene.insert(root, 99, SimActor::new(ActorKind::Label)), Some(2));
        assert_eq!(scene.insert(ActorId::new(), 0, SimActor::new(ActorKind::Label)), None);
    }

    #[test]
    fn test_focus_same_actor_only_updates_preview() {
        let mut f = fixture();
        let root = f.session.composer.scene.root.id;
        f.session.composer.focus(root);
        assert_eq!(f.view.take(), vec![SceneEvent::Preview]);

        f.session.composer.focus(f.label);
        assert_eq!(
            f.view.take(),
            vec![
                SceneEvent::Properties(f.label),
                SceneEvent::Path(vec![root, f.label]),
                SceneEvent::Preview,
            ]
        );
        assert_eq!(f.session.composer.selected(), f.label);
    }

    #[test]
    fn test_touchable_display() {
        assert_eq!(Touchable::ChildrenOnly.to_string(), "childrenOnly");
        assert_eq!(ActorKind::ImageTextButton.to_string(), "ImageTextButton");
    }
}
