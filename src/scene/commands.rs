//! Scene composer commands
//!
//! Every transition ends by focusing the actor it touched, so undoing an
//! edit to an actor that is no longer selected brings it back into view.

use tracing::warn;

use super::{ActorKind, Scene, SceneComposer, SimActor, Touchable};
use crate::history::Command;
use crate::model::ActorId;

/// One editable field of an actor, carrying its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorProperty {
    Name(Option<String>),
    Style(String),
    Text(String),
    Checked(bool),
    Disabled(bool),
    Touchable(Touchable),
}

impl ActorProperty {
    fn field(&self) -> &'static str {
        match self {
            ActorProperty::Name(_) => "name",
            ActorProperty::Style(_) => "style",
            ActorProperty::Text(_) => "text",
            ActorProperty::Checked(_) => "checked",
            ActorProperty::Disabled(_) => "disabled",
            ActorProperty::Touchable(_) => "touchable",
        }
    }

    /// The same field as `self`, read from `actor`
    fn read(&self, actor: &SimActor) -> Self {
        match self {
            ActorProperty::Name(_) => ActorProperty::Name(actor.name.clone()),
            ActorProperty::Style(_) => ActorProperty::Style(actor.style.clone()),
            ActorProperty::Text(_) => ActorProperty::Text(actor.text.clone()),
            ActorProperty::Checked(_) => ActorProperty::Checked(actor.checked),
            ActorProperty::Disabled(_) => ActorProperty::Disabled(actor.disabled),
            ActorProperty::Touchable(_) => ActorProperty::Touchable(actor.touchable),
        }
    }

    fn write(&self, actor: &mut SimActor) {
        match self {
            ActorProperty::Name(v) => actor.name = v.clone(),
            ActorProperty::Style(v) => actor.style = v.clone(),
            ActorProperty::Text(v) => actor.text = v.clone(),
            ActorProperty::Checked(v) => actor.checked = *v,
            ActorProperty::Disabled(v) => actor.disabled = *v,
            ActorProperty::Touchable(v) => actor.touchable = *v,
        }
    }

    fn value_label(&self) -> String {
        match self {
            ActorProperty::Name(v) => v.clone().unwrap_or_default(),
            ActorProperty::Style(v) | ActorProperty::Text(v) => v.clone(),
            ActorProperty::Checked(v) | ActorProperty::Disabled(v) => v.to_string(),
            ActorProperty::Touchable(v) => v.to_string(),
        }
    }
}

/// Change a single field of an actor
#[derive(Debug, Clone)]
pub struct SetActorPropertyCmd {
    actor: ActorId,
    kind: ActorKind,
    old: ActorProperty,
    new: ActorProperty,
}

impl SetActorPropertyCmd {
    pub fn capture(scene: &Scene, actor: ActorId, new: ActorProperty) -> Option<Self> {
        let target = scene.find(actor)?;
        Some(Self {
            actor,
            kind: target.kind,
            old: new.read(target),
            new,
        })
    }

    fn assign(&self, composer: &mut SceneComposer, value: &ActorProperty) {
        match composer.scene.find_mut(self.actor) {
            Some(actor) => value.write(actor),
            None => {
                debug_assert!(false, "actor {} vanished", self.actor);
                warn!(actor = %self.actor, "actor not found");
            }
        }
        composer.focus(self.actor);
    }
}

impl Command<SceneComposer> for SetActorPropertyCmd {
    fn apply(&mut self, composer: &mut SceneComposer) {
        self.assign(composer, &self.new);
    }

    fn revert(&mut self, composer: &mut SceneComposer) {
        self.assign(composer, &self.old);
    }

    fn description(&self) -> String {
        format!("{} {} {}", self.kind, self.new.field(), self.new.value_label())
    }
}

/// Insert a new actor under a container
#[derive(Debug)]
pub struct AddActorCmd {
    parent: ActorId,
    index: usize,
    id: ActorId,
    kind: ActorKind,
    detached: Option<SimActor>,
}

impl AddActorCmd {
    /// Returns `None` if `parent` is missing or cannot hold children
    pub fn new(scene: &Scene, parent: ActorId, index: usize, actor: SimActor) -> Option<Self> {
        if !scene.find(parent)?.kind.is_container() {
            return None;
        }
        Some(Self {
            parent,
            index,
            id: actor.id,
            kind: actor.kind,
            detached: Some(actor),
        })
    }

    pub fn actor_id(&self) -> ActorId {
        self.id
    }
}

impl Command<SceneComposer> for AddActorCmd {
    fn apply(&mut self, composer: &mut SceneComposer) {
        let Some(actor) = self.detached.take() else {
            debug_assert!(false, "actor {} applied twice", self.id);
            warn!(actor = %self.id, "actor already attached");
            return;
        };
        match composer.scene.insert(self.parent, self.index, actor) {
            Some(idx) => self.index = idx,
            None => {
                debug_assert!(false, "parent {} vanished", self.parent);
                warn!(parent = %self.parent, "parent actor not found");
                return;
            }
        }
        composer.focus(self.id);
    }

    fn revert(&mut self, composer: &mut SceneComposer) {
        match composer.scene.remove(self.id) {
            Some((_, _, actor)) => self.detached = Some(actor),
            None => {
                debug_assert!(false, "actor {} vanished", self.id);
                warn!(actor = %self.id, "actor not found");
                return;
            }
        }
        composer.focus(self.parent);
    }

    fn description(&self) -> String {
        format!("Add {}", self.kind)
    }
}

/// Remove an actor and its subtree, focusing the parent
///
/// Undo restores the same subtree at its former parent and index.
#[derive(Debug)]
pub struct DeleteActorCmd {
    id: ActorId,
    kind: ActorKind,
    parent: ActorId,
    index: usize,
    detached: Option<SimActor>,
}

impl DeleteActorCmd {
    /// Returns `None` for the root or an unknown actor
    pub fn capture(scene: &Scene, id: ActorId) -> Option<Self> {
        let (parent, index) = scene.position(id)?;
        let kind = scene.find(id)?.kind;
        Some(Self {
            id,
            kind,
            parent,
            index,
            detached: None,
        })
    }
}

impl Command<SceneComposer> for DeleteActorCmd {
    fn apply(&mut self, composer: &mut SceneComposer) {
        match composer.scene.remove(self.id) {
            Some((parent, index, actor)) => {
                self.parent = parent;
                self.index = index;
                self.detached = Some(actor);
            }
            None => {
                debug_assert!(false, "actor {} vanished", self.id);
                warn!(actor = %self.id, "actor not found");
                return;
            }
        }
        composer.focus(self.parent);
    }

    fn revert(&mut self, composer: &mut SceneComposer) {
        let Some(actor) = self.detached.take() else {
            debug_assert!(false, "actor {} not detached", self.id);
            warn!(actor = %self.id, "nothing to restore");
            return;
        };
        if composer.scene.insert(self.parent, self.index, actor).is_none() {
            debug_assert!(false, "parent {} vanished", self.parent);
            warn!(parent = %self.parent, "parent actor not found");
            return;
        }
        composer.focus(self.id);
    }

    fn description(&self) -> String {
        format!("Delete {}", self.kind)
    }
}
