//! Custom classes and the styles declared under them

use tracing::warn;

use super::{attach, detach, Selection, SkinEditor};
use crate::history::Command;
use crate::model::{ClassId, CustomClass, CustomStyle, CustomStyleId, Skin};

/// Naming of a custom class as edited in the class dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    pub display_name: String,
    pub fully_qualified_name: String,
    pub declare_after_ui_classes: bool,
}

impl ClassNames {
    pub fn of(class: &CustomClass) -> Self {
        Self {
            display_name: class.display_name.clone(),
            fully_qualified_name: class.fully_qualified_name.clone(),
            declare_after_ui_classes: class.declare_after_ui_classes,
        }
    }

    fn write_to(&self, class: &mut CustomClass) {
        class.display_name = self.display_name.clone();
        class.fully_qualified_name = self.fully_qualified_name.clone();
        class.declare_after_ui_classes = self.declare_after_ui_classes;
    }
}

fn refresh_classes(editor: &mut SkinEditor, select_affected: bool) {
    let refresh = editor.refresh();
    refresh.refresh_classes(select_affected);
    refresh.refresh_preview();
}

fn refresh_styles(editor: &mut SkinEditor, select_affected: bool) {
    let refresh = editor.refresh();
    refresh.refresh_styles(select_affected);
    refresh.refresh_preview();
}

/// Create a custom class, or duplicate an existing one
#[derive(Debug)]
pub struct CreateCustomClassCmd {
    id: ClassId,
    display_name: String,
    verb: &'static str,
    detached: Option<CustomClass>,
}

impl CreateCustomClassCmd {
    pub fn new(names: ClassNames) -> Self {
        let mut class = CustomClass::new(
            names.fully_qualified_name.clone(),
            names.display_name.clone(),
        );
        names.write_to(&mut class);
        Self {
            id: class.id,
            display_name: names.display_name,
            verb: "New Class",
            detached: Some(class),
        }
    }

    /// Deep copy `original` (template, styles and values) under new names
    pub fn duplicate(skin: &Skin, original: ClassId, names: ClassNames) -> Option<Self> {
        let mut class = skin.custom_class(original)?.copy();
        names.write_to(&mut class);
        Some(Self {
            id: class.id,
            display_name: names.display_name,
            verb: "Duplicate class",
            detached: Some(class),
        })
    }

    pub fn class_id(&self) -> ClassId {
        self.id
    }
}

impl Command<SkinEditor> for CreateCustomClassCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        match self.detached.take() {
            Some(class) => editor.skin.custom_classes.push(class),
            None => {
                debug_assert!(false, "class {} applied twice", self.id);
                warn!(class = %self.id, "create applied while already attached");
            }
        }
        refresh_classes(editor, true);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        match detach(&mut editor.skin.custom_classes, |c| c.id == self.id) {
            Some((_, class)) => self.detached = Some(class),
            None => {
                debug_assert!(false, "class {} vanished", self.id);
                warn!(class = %self.id, "created class not found");
            }
        }
        refresh_classes(editor, true);
    }

    fn description(&self) -> String {
        format!("{} {}", self.verb, self.display_name)
    }
}

/// Change a custom class's names and declaration order flag
#[derive(Debug)]
pub struct RenameCustomClassCmd {
    id: ClassId,
    old: ClassNames,
    new: ClassNames,
}

impl RenameCustomClassCmd {
    pub fn capture(skin: &Skin, id: ClassId, new: ClassNames) -> Option<Self> {
        let old = ClassNames::of(skin.custom_class(id)?);
        Some(Self { id, old, new })
    }

    fn assign(&self, editor: &mut SkinEditor, names: &ClassNames) {
        match editor.skin.custom_class_mut(self.id) {
            Some(class) => names.write_to(class),
            None => {
                debug_assert!(false, "class {} vanished", self.id);
                warn!(class = %self.id, "renamed class not found");
            }
        }
        refresh_classes(editor, false);
        editor.refresh().select(Selection::CustomClass(self.id));
    }
}

impl Command<SkinEditor> for RenameCustomClassCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        self.assign(editor, &self.new);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        self.assign(editor, &self.old);
    }

    fn description(&self) -> String {
        format!("Rename Class to {}", self.new.display_name)
    }
}

/// Delete a custom class with all its styles
#[derive(Debug)]
pub struct DeleteCustomClassCmd {
    id: ClassId,
    display_name: String,
    index: usize,
    detached: Option<CustomClass>,
}

impl DeleteCustomClassCmd {
    pub fn capture(skin: &Skin, id: ClassId) -> Option<Self> {
        let index = skin.custom_class_position(id)?;
        Some(Self {
            id,
            display_name: skin.custom_classes[index].display_name.clone(),
            index,
            detached: None,
        })
    }
}

impl Command<SkinEditor> for DeleteCustomClassCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        match detach(&mut editor.skin.custom_classes, |c| c.id == self.id) {
            Some((idx, class)) => {
                self.index = idx;
                self.detached = Some(class);
            }
            None => {
                debug_assert!(false, "class {} vanished", self.id);
                warn!(class = %self.id, "deleted class not found");
            }
        }
        refresh_classes(editor, false);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        match self.detached.take() {
            Some(class) => {
                attach(&mut editor.skin.custom_classes, self.index, class);
            }
            None => {
                debug_assert!(false, "class {} reverted twice", self.id);
                warn!(class = %self.id, "delete reverted without a detached class");
            }
        }
        refresh_classes(editor, false);
    }

    fn description(&self) -> String {
        format!("Delete class {}", self.display_name)
    }
}

/// Create a style in a custom class from its template, or duplicate one
#[derive(Debug)]
pub struct CreateCustomStyleCmd {
    class: ClassId,
    id: CustomStyleId,
    name: String,
    verb: &'static str,
    detached: Option<CustomStyle>,
}

impl CreateCustomStyleCmd {
    pub fn new(skin: &Skin, class: ClassId, name: impl Into<String>) -> Option<Self> {
        let style = skin.custom_class(class)?.template.copy(name);
        Some(Self::with_style(class, style, "New style"))
    }

    pub fn duplicate(
        skin: &Skin,
        class: ClassId,
        original: CustomStyleId,
        name: impl Into<String>,
    ) -> Option<Self> {
        let owner = skin.custom_class(class)?;
        let style = owner.styles.iter().find(|s| s.id == original)?.copy(name);
        Some(Self::with_style(class, style, "Duplicate style"))
    }

    fn with_style(class: ClassId, style: CustomStyle, verb: &'static str) -> Self {
        Self {
            class,
            id: style.id,
            name: style.name.clone(),
            verb,
            detached: Some(style),
        }
    }

    pub fn style_id(&self) -> CustomStyleId {
        self.id
    }
}

impl Command<SkinEditor> for CreateCustomStyleCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        match (editor.skin.custom_class_mut(self.class), self.detached.take()) {
            (Some(class), Some(style)) => class.styles.push(style),
            (_, style) => {
                self.detached = style;
                debug_assert!(false, "cannot attach custom style {}", self.id);
                warn!(style = %self.id, class = %self.class, "custom style not attached");
            }
        }
        editor.refresh().select(Selection::CustomClass(self.class));
        refresh_styles(editor, true);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        let detached = editor
            .skin
            .custom_class_mut(self.class)
            .and_then(|class| detach(&mut class.styles, |s| s.id == self.id));
        match detached {
            Some((_, style)) => self.detached = Some(style),
            None => {
                debug_assert!(false, "custom style {} vanished", self.id);
                warn!(style = %self.id, "created custom style not found");
            }
        }
        refresh_styles(editor, true);
    }

    fn description(&self) -> String {
        format!("{} {}", self.verb, self.name)
    }
}

/// Delete a style from a custom class
#[derive(Debug)]
pub struct DeleteCustomStyleCmd {
    class: ClassId,
    id: CustomStyleId,
    name: String,
    index: usize,
    detached: Option<CustomStyle>,
}

impl DeleteCustomStyleCmd {
    pub fn capture(skin: &Skin, class: ClassId, id: CustomStyleId) -> Option<Self> {
        let owner = skin.custom_class(class)?;
        let index = owner.style_position(id)?;
        Some(Self {
            class,
            id,
            name: owner.styles[index].name.clone(),
            index,
            detached: None,
        })
    }
}

impl Command<SkinEditor> for DeleteCustomStyleCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        let detached = editor
            .skin
            .custom_class_mut(self.class)
            .and_then(|class| detach(&mut class.styles, |s| s.id == self.id));
        match detached {
            Some((idx, style)) => {
                self.index = idx;
                self.detached = Some(style);
            }
            None => {
                debug_assert!(false, "custom style {} vanished", self.id);
                warn!(style = %self.id, "deleted custom style not found");
            }
        }
        refresh_styles(editor, true);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        match (editor.skin.custom_class_mut(self.class), self.detached.take()) {
            (Some(class), Some(style)) => {
                attach(&mut class.styles, self.index, style);
            }
            (_, style) => {
                self.detached = style;
                debug_assert!(false, "cannot restore custom style {}", self.id);
                warn!(style = %self.id, class = %self.class, "custom style not restored");
            }
        }
        editor.refresh().select(Selection::CustomClass(self.class));
        refresh_styles(editor, true);
    }

    fn description(&self) -> String {
        format!("Delete style {}", self.name)
    }
}

/// Rename a style of a custom class
#[derive(Debug)]
pub struct RenameCustomStyleCmd {
    class: ClassId,
    id: CustomStyleId,
    old: String,
    new: String,
}

impl RenameCustomStyleCmd {
    pub fn capture(
        skin: &Skin,
        class: ClassId,
        id: CustomStyleId,
        new: impl Into<String>,
    ) -> Option<Self> {
        let owner = skin.custom_class(class)?;
        let style = owner.styles.iter().find(|s| s.id == id)?;
        Some(Self {
            class,
            id,
            old: style.name.clone(),
            new: new.into(),
        })
    }

    fn assign(&self, editor: &mut SkinEditor, name: &str) {
        let index = editor.skin.custom_class_mut(self.class).and_then(|class| {
            let idx = class.style_position(self.id)?;
            class.styles[idx].name = name.to_string();
            Some(idx)
        });
        match index {
            Some(index) => editor.refresh().select(Selection::CustomStyle {
                class: self.class,
                index,
            }),
            None => {
                debug_assert!(false, "custom style {} vanished", self.id);
                warn!(style = %self.id, "renamed custom style not found");
            }
        }
        refresh_styles(editor, true);
    }
}

impl Command<SkinEditor> for RenameCustomStyleCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        self.assign(editor, &self.new);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        self.assign(editor, &self.old);
    }

    fn description(&self) -> String {
        format!("Rename style {}", self.new)
    }
}

/// Move a style within a custom class
#[derive(Debug)]
pub struct ReorderCustomStylesCmd {
    class: ClassId,
    display_name: String,
    id: CustomStyleId,
    from: usize,
    to: usize,
}

impl ReorderCustomStylesCmd {
    pub fn capture(skin: &Skin, class: ClassId, from: usize, to: usize) -> Option<Self> {
        let owner = skin.custom_class(class)?;
        let id = owner.styles.get(from)?.id;
        Some(Self {
            class,
            display_name: owner.display_name.clone(),
            id,
            from,
            to,
        })
    }

    fn move_to(&self, editor: &mut SkinEditor, index: usize) {
        let placed = editor.skin.custom_class_mut(self.class).and_then(|class| {
            let (_, style) = detach(&mut class.styles, |s| s.id == self.id)?;
            Some(attach(&mut class.styles, index, style))
        });
        let refresh = editor.refresh();
        match placed {
            Some(index) => {
                refresh.select(Selection::CustomClass(self.class));
                refresh.select(Selection::CustomStyle {
                    class: self.class,
                    index,
                });
            }
            None => {
                debug_assert!(false, "custom style {} vanished", self.id);
                warn!(style = %self.id, "reordered custom style not found");
            }
        }
        refresh.refresh_styles(false);
        refresh.refresh_preview();
    }
}

impl Command<SkinEditor> for ReorderCustomStylesCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        self.move_to(editor, self.to);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        self.move_to(editor, self.from);
    }

    fn description(&self) -> String {
        format!("Reorder styles for class \"{}\"", self.display_name)
    }
}
