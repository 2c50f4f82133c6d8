//! Structural edits on built-in widget styles
//!
//! Commands locate styles by id, never by a remembered index: other edits
//! may have shifted the class's style list in between.

use tracing::warn;

use super::{attach, detach, Selection, SkinEditor};
use crate::history::Command;
use crate::model::{PropertyKind, PropertyValue, Skin, StyleData, StyleId, WidgetClass};

fn detach_style(skin: &mut Skin, class: WidgetClass, id: StyleId) -> Option<(usize, StyleData)> {
    detach(skin.styles_of_mut(class), |s| s.id == id)
}

fn attach_style(skin: &mut Skin, class: WidgetClass, index: usize, style: StyleData) -> usize {
    attach(skin.styles_of_mut(class), index, style)
}

/// Create a new style, or a duplicate of an existing one
#[derive(Debug)]
pub struct CreateStyleCmd {
    id: StyleId,
    class: WidgetClass,
    name: String,
    verb: &'static str,
    /// The style while it is not part of the skin
    detached: Option<StyleData>,
}

impl CreateStyleCmd {
    pub fn new(class: WidgetClass, name: impl Into<String>) -> Self {
        let style = StyleData::new(class, name);
        Self {
            id: style.id,
            class,
            name: style.name.clone(),
            verb: "Create",
            detached: Some(style),
        }
    }

    /// Copy `original` (properties and parent) under a new name
    pub fn duplicate(skin: &Skin, original: StyleId, name: impl Into<String>) -> Option<Self> {
        let style = skin.find_style(original)?.duplicate(name);
        Some(Self {
            id: style.id,
            class: style.class,
            name: style.name.clone(),
            verb: "Duplicate",
            detached: Some(style),
        })
    }

    /// Identity of the style this command creates
    pub fn style_id(&self) -> StyleId {
        self.id
    }
}

impl Command<SkinEditor> for CreateStyleCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        match self.detached.take() {
            Some(style) => editor.skin.styles_of_mut(self.class).push(style),
            None => {
                debug_assert!(false, "style {} applied twice", self.id);
                warn!(style = %self.id, "create applied while already attached");
            }
        }
        editor.refresh().refresh_styles(true);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        match detach_style(&mut editor.skin, self.class, self.id) {
            Some((_, style)) => self.detached = Some(style),
            None => {
                debug_assert!(false, "style {} vanished", self.id);
                warn!(style = %self.id, "created style not found");
            }
        }
        editor.refresh().refresh_styles(true);
    }

    fn description(&self) -> String {
        format!("{} Style \"{}\"", self.verb, self.name)
    }
}

/// Delete a style, restoring it at its original position on undo
#[derive(Debug)]
pub struct DeleteStyleCmd {
    id: StyleId,
    class: WidgetClass,
    name: String,
    index: usize,
    detached: Option<StyleData>,
}

impl DeleteStyleCmd {
    pub fn capture(skin: &Skin, id: StyleId) -> Option<Self> {
        let (class, index) = skin.style_position(id)?;
        let name = skin.styles_of(class)[index].name.clone();
        Some(Self {
            id,
            class,
            name,
            index,
            detached: None,
        })
    }
}

impl Command<SkinEditor> for DeleteStyleCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        match detach_style(&mut editor.skin, self.class, self.id) {
            Some((idx, style)) => {
                self.index = idx;
                self.detached = Some(style);
            }
            None => {
                debug_assert!(false, "style {} vanished", self.id);
                warn!(style = %self.id, "deleted style not found");
            }
        }
        editor.refresh().refresh_styles(true);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        if let Some(style) = self.detached.take() {
            attach_style(&mut editor.skin, self.class, self.index, style);
        } else {
            debug_assert!(false, "style {} reverted twice", self.id);
            warn!(style = %self.id, "delete reverted without a detached style");
        }
        editor.refresh().refresh_styles(true);
    }

    fn description(&self) -> String {
        format!("Delete Style \"{}\"", self.name)
    }
}

/// Rename a style and relink every style-typed property that named it
///
/// Only the slots relinked by `apply` are restored on undo. A slot that
/// already held the new name before the rename keeps it.
#[derive(Debug)]
pub struct RenameStyleCmd {
    id: StyleId,
    class: WidgetClass,
    old: String,
    new: String,
    /// (owning style, property name) of every relinked reference
    relinked: Vec<(StyleId, String)>,
}

impl RenameStyleCmd {
    pub fn capture(skin: &Skin, id: StyleId, new: impl Into<String>) -> Option<Self> {
        let style = skin.find_style(id)?;
        Some(Self {
            id,
            class: style.class,
            old: style.name.clone(),
            new: new.into(),
            relinked: Vec::new(),
        })
    }

    fn set_name(&self, skin: &mut Skin, name: &str) {
        match skin.find_style_mut(self.id) {
            Some(style) => style.name = name.to_string(),
            None => {
                debug_assert!(false, "style {} vanished", self.id);
                warn!(style = %self.id, "renamed style not found");
            }
        }
    }

    fn relink(&mut self, skin: &mut Skin) {
        let kind = PropertyKind::Style(self.class);
        self.relinked.clear();
        for style in skin.styles.values_mut().flatten() {
            for prop in &mut style.properties {
                let references = prop.kind == kind
                    && prop.value.as_ref().and_then(PropertyValue::as_name) == Some(&*self.old);
                if references {
                    prop.value = Some(PropertyValue::name(&self.new));
                    self.relinked.push((style.id, prop.name.clone()));
                }
            }
        }
    }

    fn unlink(&mut self, skin: &mut Skin) {
        for (owner, property) in self.relinked.drain(..) {
            match skin.find_style_mut(owner).and_then(|s| s.property_mut(&property)) {
                Some(prop) => prop.value = Some(PropertyValue::name(&self.old)),
                None => {
                    debug_assert!(false, "relinked property {property} on {owner} vanished");
                    warn!(style = %owner, %property, "relinked property not found");
                }
            }
        }
    }

    fn refresh(&self, editor: &mut SkinEditor) {
        let position = editor.skin.style_position(self.id);
        let refresh = editor.refresh();
        refresh.refresh_styles(false);
        if let Some((class, index)) = position {
            refresh.select(Selection::Style { class, index });
        }
    }
}

impl Command<SkinEditor> for RenameStyleCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        self.set_name(&mut editor.skin, &self.new);
        self.relink(&mut editor.skin);
        self.refresh(editor);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        self.set_name(&mut editor.skin, &self.old);
        self.unlink(&mut editor.skin);
        self.refresh(editor);
    }

    fn description(&self) -> String {
        format!("Rename Style \"{}\"", self.new)
    }
}

/// Move a style within its class's list
#[derive(Debug)]
pub struct ReorderStylesCmd {
    id: StyleId,
    class: WidgetClass,
    from: usize,
    to: usize,
}

impl ReorderStylesCmd {
    /// Move the style at `from` to `to` in `class`
    pub fn capture(skin: &Skin, class: WidgetClass, from: usize, to: usize) -> Option<Self> {
        let id = skin.styles_of(class).get(from)?.id;
        Some(Self { id, class, from, to })
    }

    fn move_to(&self, editor: &mut SkinEditor, index: usize) {
        let placed = detach_style(&mut editor.skin, self.class, self.id)
            .map(|(_, style)| attach_style(&mut editor.skin, self.class, index, style));
        if placed.is_none() {
            debug_assert!(false, "style {} vanished", self.id);
            warn!(style = %self.id, "reordered style not found");
        }

        let refresh = editor.refresh();
        refresh.refresh_styles(false);
        if let Some(index) = placed {
            refresh.select(Selection::Style {
                class: self.class,
                index,
            });
        }
    }
}

impl Command<SkinEditor> for ReorderStylesCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        self.move_to(editor, self.to);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        self.move_to(editor, self.from);
    }

    fn description(&self) -> String {
        format!("Reorder styles for class \"{}\"", self.class)
    }
}
