//! Custom property columns
//!
//! A custom property is declared on the class template and mirrored in
//! every style of the class. Creating, deleting and renaming therefore
//! touch the whole column: template plus each style.

use tracing::warn;

use super::{attach, detach, SkinEditor};
use crate::history::Command;
use crate::model::{ClassId, CustomClass, CustomProperty, CustomPropertyType, CustomStyleId, Skin};

/// A property instance taken out of a style, with where it sat
#[derive(Debug, Clone)]
struct Detached {
    style: CustomStyleId,
    index: usize,
    property: CustomProperty,
}

fn detach_column(class: &mut CustomClass, name: &str) -> Vec<Detached> {
    let mut column = Vec::new();
    for style in class.all_styles_mut() {
        while let Some((index, property)) = detach(&mut style.properties, |p| p.name == name) {
            column.push(Detached {
                style: style.id,
                index,
                property,
            });
        }
    }
    column
}

fn attach_column(class: &mut CustomClass, column: Vec<Detached>) {
    // Reverse order puts same-style entries back at their original indices
    for entry in column.into_iter().rev() {
        match class.style_mut(entry.style) {
            Some(style) => {
                attach(&mut style.properties, entry.index, entry.property);
            }
            None => {
                debug_assert!(false, "custom style {} vanished", entry.style);
                warn!(style = %entry.style, "property column owner not found");
            }
        }
    }
}

fn refresh_properties(editor: &mut SkinEditor) {
    let refresh = editor.refresh();
    refresh.refresh_style_properties(true);
    refresh.refresh_preview();
}

/// Add a property column to a custom class, or duplicate an existing one
#[derive(Debug)]
pub struct CreateCustomPropertyCmd {
    class: ClassId,
    name: String,
    verb: &'static str,
    /// Instances waiting to be attached; empty while applied
    column: Vec<Detached>,
}

impl CreateCustomPropertyCmd {
    pub fn new(
        skin: &Skin,
        class: ClassId,
        name: impl Into<String>,
        kind: CustomPropertyType,
    ) -> Option<Self> {
        let owner = skin.custom_class(class)?;
        let prototype = CustomProperty::new(name, kind);
        let column = owner
            .all_styles()
            .map(|style| Detached {
                style: style.id,
                index: style.properties.len(),
                property: prototype.copy(),
            })
            .collect();
        Some(Self {
            class,
            name: prototype.name,
            verb: "New Property",
            column,
        })
    }

    /// Copy the column `original` under a new name and type
    ///
    /// Each style keeps its own value of the original property.
    pub fn duplicate(
        skin: &Skin,
        class: ClassId,
        original: &str,
        name: impl Into<String>,
        kind: CustomPropertyType,
    ) -> Option<Self> {
        let owner = skin.custom_class(class)?;
        let source = owner.template.property(original)?;
        let name = name.into();
        let column = owner
            .all_styles()
            .map(|style| {
                let mut property = style.property(original).unwrap_or(source).copy();
                property.name = name.clone();
                property.kind = kind;
                Detached {
                    style: style.id,
                    index: style.properties.len(),
                    property,
                }
            })
            .collect();
        Some(Self {
            class,
            name,
            verb: "Duplicate Property",
            column,
        })
    }
}

impl Command<SkinEditor> for CreateCustomPropertyCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        match editor.skin.custom_class_mut(self.class) {
            Some(class) => attach_column(class, std::mem::take(&mut self.column)),
            None => {
                debug_assert!(false, "class {} vanished", self.class);
                warn!(class = %self.class, "custom class not found");
            }
        }
        refresh_properties(editor);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        match editor.skin.custom_class_mut(self.class) {
            Some(class) => self.column = detach_column(class, &self.name),
            None => {
                debug_assert!(false, "class {} vanished", self.class);
                warn!(class = %self.class, "custom class not found");
            }
        }
        refresh_properties(editor);
    }

    fn description(&self) -> String {
        format!("{} {}", self.verb, self.name)
    }
}

/// Remove a property column from a custom class
///
/// Undo puts every instance back with its own value and position.
#[derive(Debug)]
pub struct DeleteCustomPropertyCmd {
    class: ClassId,
    name: String,
    column: Vec<Detached>,
}

impl DeleteCustomPropertyCmd {
    pub fn capture(skin: &Skin, class: ClassId, name: &str) -> Option<Self> {
        skin.custom_class(class)?.template.property(name)?;
        Some(Self {
            class,
            name: name.to_string(),
            column: Vec::new(),
        })
    }
}

impl Command<SkinEditor> for DeleteCustomPropertyCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        match editor.skin.custom_class_mut(self.class) {
            Some(class) => self.column = detach_column(class, &self.name),
            None => {
                debug_assert!(false, "class {} vanished", self.class);
                warn!(class = %self.class, "custom class not found");
            }
        }
        refresh_properties(editor);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        match editor.skin.custom_class_mut(self.class) {
            Some(class) => attach_column(class, std::mem::take(&mut self.column)),
            None => {
                debug_assert!(false, "class {} vanished", self.class);
                warn!(class = %self.class, "custom class not found");
            }
        }
        refresh_properties(editor);
    }

    fn description(&self) -> String {
        format!("Delete Property {}", self.name)
    }
}

/// Rename (and retype) a property column across the template and every style
#[derive(Debug)]
pub struct RenameCustomPropertyCmd {
    class: ClassId,
    old_name: String,
    old_kind: CustomPropertyType,
    new_name: String,
    new_kind: CustomPropertyType,
}

impl RenameCustomPropertyCmd {
    pub fn capture(
        skin: &Skin,
        class: ClassId,
        name: &str,
        new_name: impl Into<String>,
        new_kind: CustomPropertyType,
    ) -> Option<Self> {
        let property = skin.custom_class(class)?.template.property(name)?;
        Some(Self {
            class,
            old_name: property.name.clone(),
            old_kind: property.kind,
            new_name: new_name.into(),
            new_kind,
        })
    }

    fn rename(&self, editor: &mut SkinEditor, from: &str, to: &str, kind: CustomPropertyType) {
        match editor.skin.custom_class_mut(self.class) {
            Some(class) => {
                for style in class.all_styles_mut() {
                    for property in style.properties.iter_mut().filter(|p| p.name == from) {
                        property.name = to.to_string();
                        property.kind = kind;
                    }
                }
            }
            None => {
                debug_assert!(false, "class {} vanished", self.class);
                warn!(class = %self.class, "custom class not found");
            }
        }
        refresh_properties(editor);
    }
}

impl Command<SkinEditor> for RenameCustomPropertyCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        self.rename(editor, &self.old_name, &self.new_name, self.new_kind);
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        self.rename(editor, &self.new_name, &self.old_name, self.old_kind);
    }

    fn description(&self) -> String {
        format!("Rename Property {}", self.new_name)
    }
}
