//! Edit command pattern
//!
//! Scripted and UI edits name entities the way a user sees them (class and
//! style names) rather than by id. `SkinSession::dispatch` resolves and
//! validates them, then builds the matching history command and commits it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::editor::classes::ClassNames;
use crate::editor::{
    CreateCustomClassCmd, CreateCustomPropertyCmd, CreateCustomStyleCmd, CreateStyleCmd,
    DeleteCustomClassCmd, DeleteCustomPropertyCmd, DeleteCustomStyleCmd, DeleteStyleCmd,
    RenameCustomClassCmd, RenameCustomPropertyCmd, RenameCustomStyleCmd, RenameStyleCmd,
    ReorderCustomStylesCmd, ReorderStylesCmd, SetParentCmd, SetValueCmd, SkinEditor, SkinSession,
    ValueTarget,
};
use crate::history::{Command, CommitMode};
use crate::model::{
    AssetKind, ClassId, CustomPropertyType, CustomStyleId, PropertyId, PropertyKind,
    PropertyValue, Skin, StyleId, ValueShape, WidgetClass,
};

/// Edits that can be dispatched against a skin session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    // ========================================================================
    // Built-in styles
    // ========================================================================
    /// Set (or clear, with `null`) a property of a style
    SetStyleProperty {
        class: WidgetClass,
        style: String,
        property: String,
        #[serde(default)]
        value: Option<PropertyValue>,
    },

    SetStyleParent {
        class: WidgetClass,
        style: String,
        #[serde(default)]
        parent: Option<String>,
    },

    CreateStyle { class: WidgetClass, name: String },

    DuplicateStyle {
        class: WidgetClass,
        style: String,
        name: String,
    },

    DeleteStyle { class: WidgetClass, style: String },

    /// Rename a style, relinking every property that referenced it
    RenameStyle {
        class: WidgetClass,
        style: String,
        name: String,
    },

    ReorderStyles {
        class: WidgetClass,
        from: usize,
        to: usize,
    },

    // ========================================================================
    // Custom classes
    // ========================================================================
    CreateClass {
        display_name: String,
        fully_qualified_name: String,
        #[serde(default)]
        declare_after_ui_classes: bool,
    },

    DuplicateClass {
        class: String,
        display_name: String,
        fully_qualified_name: String,
        #[serde(default)]
        declare_after_ui_classes: bool,
    },

    RenameClass {
        class: String,
        display_name: String,
        fully_qualified_name: String,
        #[serde(default)]
        declare_after_ui_classes: bool,
    },

    DeleteClass { class: String },

    // ========================================================================
    // Custom styles
    // ========================================================================
    CreateCustomStyle { class: String, name: String },

    DuplicateCustomStyle {
        class: String,
        style: String,
        name: String,
    },

    DeleteCustomStyle { class: String, style: String },

    RenameCustomStyle {
        class: String,
        style: String,
        name: String,
    },

    ReorderCustomStyles { class: String, from: usize, to: usize },

    // ========================================================================
    // Custom properties
    // ========================================================================
    CreateCustomProperty {
        class: String,
        name: String,
        kind: CustomPropertyType,
    },

    DuplicateCustomProperty {
        class: String,
        property: String,
        name: String,
        kind: CustomPropertyType,
    },

    DeleteCustomProperty { class: String, property: String },

    /// Rename and retype a property across the whole class
    RenameCustomProperty {
        class: String,
        property: String,
        name: String,
        kind: CustomPropertyType,
    },

    /// Set a property value in one style (`template` addresses the template)
    SetCustomProperty {
        class: String,
        style: String,
        property: String,
        #[serde(default)]
        value: Option<PropertyValue>,
    },

    // ========================================================================
    // Assets (not undoable)
    // ========================================================================
    AddAsset { kind: AssetKind, name: String },

    RemoveAsset { kind: AssetKind, name: String },

    // ========================================================================
    // History
    // ========================================================================
    Undo,
    Redo,
    ClearHistory,
}

impl EditCommand {
    /// Whether dispatching this command records a history entry
    pub fn is_undoable(&self) -> bool {
        !matches!(
            self,
            EditCommand::AddAsset { .. }
                | EditCommand::RemoveAsset { .. }
                | EditCommand::Undo
                | EditCommand::Redo
                | EditCommand::ClearHistory
        )
    }

    /// Short description for logging
    pub fn description(&self) -> &'static str {
        match self {
            EditCommand::SetStyleProperty { .. } => "set style property",
            EditCommand::SetStyleParent { .. } => "set style parent",
            EditCommand::CreateStyle { .. } => "create style",
            EditCommand::DuplicateStyle { .. } => "duplicate style",
            EditCommand::DeleteStyle { .. } => "delete style",
            EditCommand::RenameStyle { .. } => "rename style",
            EditCommand::ReorderStyles { .. } => "reorder styles",
            EditCommand::CreateClass { .. } => "create class",
            EditCommand::DuplicateClass { .. } => "duplicate class",
            EditCommand::RenameClass { .. } => "rename class",
            EditCommand::DeleteClass { .. } => "delete class",
            EditCommand::CreateCustomStyle { .. } => "create custom style",
            EditCommand::DuplicateCustomStyle { .. } => "duplicate custom style",
            EditCommand::DeleteCustomStyle { .. } => "delete custom style",
            EditCommand::RenameCustomStyle { .. } => "rename custom style",
            EditCommand::ReorderCustomStyles { .. } => "reorder custom styles",
            EditCommand::CreateCustomProperty { .. } => "create custom property",
            EditCommand::DuplicateCustomProperty { .. } => "duplicate custom property",
            EditCommand::DeleteCustomProperty { .. } => "delete custom property",
            EditCommand::RenameCustomProperty { .. } => "rename custom property",
            EditCommand::SetCustomProperty { .. } => "set custom property",
            EditCommand::AddAsset { .. } => "add asset",
            EditCommand::RemoveAsset { .. } => "remove asset",
            EditCommand::Undo => "undo",
            EditCommand::Redo => "redo",
            EditCommand::ClearHistory => "clear history",
        }
    }
}

/// Why an edit was refused; the model and history are left untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no {class} style named \"{name}\"")]
    UnknownStyle { class: WidgetClass, name: String },

    #[error("no custom class named \"{0}\"")]
    UnknownClass(String),

    #[error("class \"{class}\" has no style named \"{name}\"")]
    UnknownCustomStyle { class: String, name: String },

    #[error("\"{owner}\" has no property \"{name}\"")]
    UnknownProperty { owner: String, name: String },

    #[error("no {kind:?} asset named \"{name}\"")]
    UnknownAsset { kind: AssetKind, name: String },

    #[error("the name \"{0}\" is already taken")]
    NameTaken(String),

    #[error("{0} name cannot be empty")]
    EmptyName(&'static str),

    #[error("style \"{0}\" is protected")]
    Protected(String),

    #[error("index {index} out of range for {len} styles")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("property \"{property}\" takes a {expected} value")]
    WrongValueType {
        property: String,
        expected: &'static str,
    },

    #[error("could not resolve \"{0}\"")]
    Unresolved(String),
}

/// What a property value must satisfy before it is assigned
struct ValueRule {
    shape: ValueShape,
    asset: Option<AssetKind>,
    style: Option<WidgetClass>,
}

impl From<PropertyKind> for ValueRule {
    fn from(kind: PropertyKind) -> Self {
        let style = match kind {
            PropertyKind::Style(class) => Some(class),
            _ => None,
        };
        Self {
            shape: kind.shape(),
            asset: kind.asset_kind(),
            style,
        }
    }
}

impl From<CustomPropertyType> for ValueRule {
    fn from(kind: CustomPropertyType) -> Self {
        Self {
            shape: kind.shape(),
            asset: kind.asset_kind(),
            style: None,
        }
    }
}

/// Clearing a value is always allowed; names must resolve at dispatch time
fn check_value(
    skin: &Skin,
    property: &str,
    rule: ValueRule,
    value: Option<&PropertyValue>,
) -> Result<(), EditError> {
    let Some(value) = value else {
        return Ok(());
    };
    if !rule.shape.accepts(value) {
        return Err(EditError::WrongValueType {
            property: property.to_string(),
            expected: rule.shape.name(),
        });
    }
    let Some(name) = value.as_name() else {
        return Ok(());
    };
    if let Some(kind) = rule.asset {
        if !skin.assets.resolves(kind, name) {
            return Err(EditError::UnknownAsset {
                kind,
                name: name.to_string(),
            });
        }
    }
    if let Some(class) = rule.style {
        find_style(skin, class, name)?;
    }
    Ok(())
}

fn non_empty(name: &str, what: &'static str) -> Result<(), EditError> {
    if name.trim().is_empty() {
        Err(EditError::EmptyName(what))
    } else {
        Ok(())
    }
}

fn find_style(skin: &Skin, class: WidgetClass, name: &str) -> Result<StyleId, EditError> {
    skin.style_by_name(class, name)
        .map(|s| s.id)
        .ok_or_else(|| EditError::UnknownStyle {
            class,
            name: name.to_string(),
        })
}

fn find_class(skin: &Skin, name: &str) -> Result<ClassId, EditError> {
    skin.custom_class_by_name(name)
        .map(|c| c.id)
        .ok_or_else(|| EditError::UnknownClass(name.to_string()))
}

fn find_custom_style(skin: &Skin, class: &str, style: &str) -> Result<CustomStyleId, EditError> {
    let id = find_class(skin, class)?;
    skin.custom_class(id)
        .and_then(|c| c.style_by_name(style))
        .map(|s| s.id)
        .ok_or_else(|| EditError::UnknownCustomStyle {
            class: class.to_string(),
            name: style.to_string(),
        })
}

fn require_custom_property(skin: &Skin, class: &str, property: &str) -> Result<ClassId, EditError> {
    let id = find_class(skin, class)?;
    match skin.custom_class(id).and_then(|c| c.template.property(property)) {
        Some(_) => Ok(id),
        None => Err(EditError::UnknownProperty {
            owner: class.to_string(),
            name: property.to_string(),
        }),
    }
}

/// `display_name` must not collide with a built-in class or another custom class
fn check_class_name(skin: &Skin, display_name: &str, except: Option<ClassId>) -> Result<(), EditError> {
    non_empty(display_name, "class")?;
    let builtin = WidgetClass::ALL.iter().any(|c| c.name() == display_name);
    let custom = skin
        .custom_classes
        .iter()
        .any(|c| c.display_name == display_name && Some(c.id) != except);
    if builtin || custom {
        return Err(EditError::NameTaken(display_name.to_string()));
    }
    Ok(())
}

fn check_style_name(
    skin: &Skin,
    class: WidgetClass,
    name: &str,
    except: Option<StyleId>,
) -> Result<(), EditError> {
    non_empty(name, "style")?;
    match skin.style_by_name(class, name) {
        Some(s) if Some(s.id) != except => Err(EditError::NameTaken(name.to_string())),
        _ => Ok(()),
    }
}

fn check_custom_style_name(
    skin: &Skin,
    class: ClassId,
    name: &str,
    except: Option<CustomStyleId>,
) -> Result<(), EditError> {
    non_empty(name, "style")?;
    let taken = skin
        .custom_class(class)
        .and_then(|c| c.style_by_name(name))
        .is_some_and(|s| Some(s.id) != except);
    if taken {
        return Err(EditError::NameTaken(name.to_string()));
    }
    Ok(())
}

fn check_property_name(
    skin: &Skin,
    class: ClassId,
    name: &str,
    except: Option<&str>,
) -> Result<(), EditError> {
    non_empty(name, "property")?;
    let taken = skin
        .custom_class(class)
        .and_then(|c| c.template.property(name))
        .is_some_and(|p| Some(p.name.as_str()) != except);
    if taken {
        return Err(EditError::NameTaken(name.to_string()));
    }
    Ok(())
}

/// Lift a constructor's `Option` after validation already ran
///
/// Validation resolved every entity the constructor looks up, so `None`
/// here means the two disagree.
fn built<T>(cmd: Option<T>, what: &str) -> Result<T, EditError> {
    cmd.ok_or_else(|| {
        debug_assert!(false, "{} lookup failed after validation", what);
        EditError::Unresolved(what.to_string())
    })
}

impl SkinSession {
    /// Validate `cmd` and commit the matching history command
    ///
    /// On error nothing is changed. History commands (`Undo`, `Redo`)
    /// at the boundary succeed as no-ops.
    pub fn dispatch(&mut self, cmd: EditCommand) -> Result<(), EditError> {
        debug!(command = cmd.description(), undoable = cmd.is_undoable(), "dispatch");
        let skin = &self.editor.skin;

        let entry: Box<dyn Command<SkinEditor>> = match cmd {
            EditCommand::SetStyleProperty {
                class,
                style,
                property,
                value,
            } => {
                let id = find_style(skin, class, &style)?;
                let kind = skin
                    .find_style(id)
                    .and_then(|s| s.property(&property))
                    .map(|p| p.kind)
                    .ok_or_else(|| EditError::UnknownProperty {
                        owner: style.clone(),
                        name: property.clone(),
                    })?;
                check_value(skin, &property, kind.into(), value.as_ref())?;
                let target = ValueTarget::style(id, property.clone());
                Box::new(built(SetValueCmd::capture(skin, target, value), &property)?)
            }

            EditCommand::SetStyleParent {
                class,
                style,
                parent,
            } => {
                let id = find_style(skin, class, &style)?;
                if let Some(parent) = &parent {
                    find_style(skin, class, parent)?;
                }
                Box::new(built(SetParentCmd::capture(skin, id, parent), &style)?)
            }

            EditCommand::CreateStyle { class, name } => {
                check_style_name(skin, class, &name, None)?;
                Box::new(CreateStyleCmd::new(class, name))
            }

            EditCommand::DuplicateStyle { class, style, name } => {
                let id = find_style(skin, class, &style)?;
                check_style_name(skin, class, &name, None)?;
                Box::new(built(CreateStyleCmd::duplicate(skin, id, name), &style)?)
            }

            EditCommand::DeleteStyle { class, style } => {
                let id = find_style(skin, class, &style)?;
                if skin.find_style(id).is_some_and(|s| !s.deletable) {
                    return Err(EditError::Protected(style));
                }
                Box::new(built(DeleteStyleCmd::capture(skin, id), &style)?)
            }

            EditCommand::RenameStyle { class, style, name } => {
                let id = find_style(skin, class, &style)?;
                if skin.find_style(id).is_some_and(|s| !s.deletable) {
                    return Err(EditError::Protected(style));
                }
                check_style_name(skin, class, &name, Some(id))?;
                Box::new(built(RenameStyleCmd::capture(skin, id, name), &style)?)
            }

            EditCommand::ReorderStyles { class, from, to } => {
                let len = skin.styles_of(class).len();
                if from >= len {
                    return Err(EditError::IndexOutOfRange { index: from, len });
                }
                Box::new(built(
                    ReorderStylesCmd::capture(skin, class, from, to),
                    class.name(),
                )?)
            }

            EditCommand::CreateClass {
                display_name,
                fully_qualified_name,
                declare_after_ui_classes,
            } => {
                check_class_name(skin, &display_name, None)?;
                non_empty(&fully_qualified_name, "fully qualified")?;
                Box::new(CreateCustomClassCmd::new(ClassNames {
                    display_name,
                    fully_qualified_name,
                    declare_after_ui_classes,
                }))
            }

            EditCommand::DuplicateClass {
                class,
                display_name,
                fully_qualified_name,
                declare_after_ui_classes,
            } => {
                let id = find_class(skin, &class)?;
                check_class_name(skin, &display_name, None)?;
                non_empty(&fully_qualified_name, "fully qualified")?;
                let names = ClassNames {
                    display_name,
                    fully_qualified_name,
                    declare_after_ui_classes,
                };
                Box::new(built(CreateCustomClassCmd::duplicate(skin, id, names), &class)?)
            }

            EditCommand::RenameClass {
                class,
                display_name,
                fully_qualified_name,
                declare_after_ui_classes,
            } => {
                let id = find_class(skin, &class)?;
                check_class_name(skin, &display_name, Some(id))?;
                non_empty(&fully_qualified_name, "fully qualified")?;
                let names = ClassNames {
                    display_name,
                    fully_qualified_name,
                    declare_after_ui_classes,
                };
                Box::new(built(RenameCustomClassCmd::capture(skin, id, names), &class)?)
            }

            EditCommand::DeleteClass { class } => {
                let id = find_class(skin, &class)?;
                Box::new(built(DeleteCustomClassCmd::capture(skin, id), &class)?)
            }

            EditCommand::CreateCustomStyle { class, name } => {
                let id = find_class(skin, &class)?;
                check_custom_style_name(skin, id, &name, None)?;
                Box::new(built(CreateCustomStyleCmd::new(skin, id, name), &class)?)
            }

            EditCommand::DuplicateCustomStyle { class, style, name } => {
                let id = find_class(skin, &class)?;
                let original = find_custom_style(skin, &class, &style)?;
                check_custom_style_name(skin, id, &name, None)?;
                Box::new(built(
                    CreateCustomStyleCmd::duplicate(skin, id, original, name),
                    &style,
                )?)
            }

            EditCommand::DeleteCustomStyle { class, style } => {
                let id = find_class(skin, &class)?;
                let target = find_custom_style(skin, &class, &style)?;
                let protected = skin
                    .custom_class(id)
                    .and_then(|c| c.style_by_name(&style))
                    .is_some_and(|s| !s.deletable);
                if protected {
                    return Err(EditError::Protected(style));
                }
                Box::new(built(DeleteCustomStyleCmd::capture(skin, id, target), &style)?)
            }

            EditCommand::RenameCustomStyle { class, style, name } => {
                let id = find_class(skin, &class)?;
                let target = find_custom_style(skin, &class, &style)?;
                let protected = skin
                    .custom_class(id)
                    .and_then(|c| c.style_by_name(&style))
                    .is_some_and(|s| !s.deletable);
                if protected {
                    return Err(EditError::Protected(style));
                }
                check_custom_style_name(skin, id, &name, Some(target))?;
                Box::new(built(
                    RenameCustomStyleCmd::capture(skin, id, target, name),
                    &style,
                )?)
            }

            EditCommand::ReorderCustomStyles { class, from, to } => {
                let id = find_class(skin, &class)?;
                let len = skin.custom_class(id).map_or(0, |c| c.styles.len());
                if from >= len {
                    return Err(EditError::IndexOutOfRange { index: from, len });
                }
                Box::new(built(
                    ReorderCustomStylesCmd::capture(skin, id, from, to),
                    &class,
                )?)
            }

            EditCommand::CreateCustomProperty { class, name, kind } => {
                let id = find_class(skin, &class)?;
                check_property_name(skin, id, &name, None)?;
                Box::new(built(
                    CreateCustomPropertyCmd::new(skin, id, name, kind),
                    &class,
                )?)
            }

            EditCommand::DuplicateCustomProperty {
                class,
                property,
                name,
                kind,
            } => {
                let id = require_custom_property(skin, &class, &property)?;
                check_property_name(skin, id, &name, None)?;
                Box::new(built(
                    CreateCustomPropertyCmd::duplicate(skin, id, &property, name, kind),
                    &property,
                )?)
            }

            EditCommand::DeleteCustomProperty { class, property } => {
                let id = require_custom_property(skin, &class, &property)?;
                Box::new(built(
                    DeleteCustomPropertyCmd::capture(skin, id, &property),
                    &property,
                )?)
            }

            EditCommand::RenameCustomProperty {
                class,
                property,
                name,
                kind,
            } => {
                let id = require_custom_property(skin, &class, &property)?;
                check_property_name(skin, id, &name, Some(&property))?;
                Box::new(built(
                    RenameCustomPropertyCmd::capture(skin, id, &property, name, kind),
                    &property,
                )?)
            }

            EditCommand::SetCustomProperty {
                class,
                style,
                property,
                value,
            } => {
                let prop = custom_property_id(skin, &class, &style, &property)?;
                let kind = built(skin.find_custom_property(prop).map(|p| p.kind), &property)?;
                check_value(skin, &property, kind.into(), value.as_ref())?;
                Box::new(built(
                    SetValueCmd::capture(skin, ValueTarget::Custom(prop), value),
                    &property,
                )?)
            }

            EditCommand::AddAsset { kind, name } => {
                non_empty(&name, "asset")?;
                self.editor.skin.assets.add(kind, name);
                self.editor.set_changes_saved(false);
                return Ok(());
            }

            EditCommand::RemoveAsset { kind, name } => {
                if !self.editor.skin.assets.remove(kind, &name) {
                    return Err(EditError::UnknownAsset { kind, name });
                }
                self.editor.set_changes_saved(false);
                return Ok(());
            }

            EditCommand::Undo => {
                self.undo();
                return Ok(());
            }

            EditCommand::Redo => {
                self.redo();
                return Ok(());
            }

            EditCommand::ClearHistory => {
                self.clear_history();
                return Ok(());
            }
        };

        self.commit_boxed(entry, CommitMode::ApplyNow);
        Ok(())
    }
}

fn custom_property_id(
    skin: &Skin,
    class: &str,
    style: &str,
    property: &str,
) -> Result<PropertyId, EditError> {
    let id = find_class(skin, class)?;
    let owner = skin
        .custom_class(id)
        .ok_or_else(|| EditError::UnknownClass(class.to_string()))?;
    let target = owner
        .all_styles()
        .find(|s| s.name == style)
        .ok_or_else(|| EditError::UnknownCustomStyle {
            class: class.to_string(),
            name: style.to_string(),
        })?;
    target
        .property(property)
        .map(|p| p.id)
        .ok_or_else(|| EditError::UnknownProperty {
            owner: style.to_string(),
            name: property.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_support::session;

    fn run(session: &mut SkinSession, json: &str) -> Result<(), EditError> {
        let cmd: EditCommand = serde_json::from_str(json).unwrap();
        session.dispatch(cmd)
    }

    #[test]
    fn test_history_commands_not_undoable() {
        assert!(!EditCommand::Undo.is_undoable());
        assert!(!EditCommand::ClearHistory.is_undoable());
        assert!(!EditCommand::AddAsset {
            kind: AssetKind::Font,
            name: "mono".to_string()
        }
        .is_undoable());
        assert!(EditCommand::DeleteClass {
            class: "Gauge".to_string()
        }
        .is_undoable());
    }

    #[test]
    fn test_parse_tagged_json() {
        let cmd: EditCommand = serde_json::from_str(
            r#"{"op": "set_style_property", "class": "Label", "style": "default",
                "property": "font", "value": {"type": "name", "value": "mono"}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            EditCommand::SetStyleProperty {
                class: WidgetClass::Label,
                style: "default".to_string(),
                property: "font".to_string(),
                value: Some(PropertyValue::name("mono")),
            }
        );
        let undo: EditCommand = serde_json::from_str(r#"{"op": "undo"}"#).unwrap();
        assert_eq!(undo, EditCommand::Undo);
    }

    #[test]
    fn test_rename_cascade_via_dispatch() {
        let (mut session, _) = session();
        run(&mut session, r#"{"op": "create_style", "class": "List", "name": "x"}"#).unwrap();
        run(
            &mut session,
            r#"{"op": "set_style_property", "class": "SelectBox", "style": "default",
                "property": "listStyle", "value": {"type": "name", "value": "x"}}"#,
        )
        .unwrap();
        run(
            &mut session,
            r#"{"op": "rename_style", "class": "List", "style": "x", "name": "y"}"#,
        )
        .unwrap();

        let list_style = |s: &SkinSession| {
            s.editor
                .skin
                .style_by_name(WidgetClass::SelectBox, "default")
                .unwrap()
                .property("listStyle")
                .unwrap()
                .value
                .clone()
        };
        assert_eq!(list_style(&session), Some(PropertyValue::name("y")));
        assert_eq!(session.editor.menu().undo_text, "Undo Rename Style \"y\"");

        run(&mut session, r#"{"op": "undo"}"#).unwrap();
        assert_eq!(list_style(&session), Some(PropertyValue::name("x")));
        assert!(session.editor.skin.style_by_name(WidgetClass::List, "x").is_some());
    }

    #[test]
    fn test_errors_leave_history_untouched() {
        let (mut session, _) = session();
        let err = run(
            &mut session,
            r#"{"op": "delete_style", "class": "Button", "style": "default"}"#,
        )
        .unwrap_err();
        assert_eq!(err, EditError::Protected("default".to_string()));

        let err = run(
            &mut session,
            r#"{"op": "create_style", "class": "Button", "name": "default"}"#,
        )
        .unwrap_err();
        assert_eq!(err, EditError::NameTaken("default".to_string()));

        let err = run(
            &mut session,
            r#"{"op": "set_style_property", "class": "Label", "style": "nope",
                "property": "font"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EditError::UnknownStyle { .. }));

        let err = run(
            &mut session,
            r#"{"op": "set_style_property", "class": "Label", "style": "default",
                "property": "nope"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EditError::UnknownProperty { .. }));

        let err = run(&mut session, r#"{"op": "reorder_styles", "class": "Label", "from": 3, "to": 0}"#)
            .unwrap_err();
        assert_eq!(err, EditError::IndexOutOfRange { index: 3, len: 1 });

        assert!(session.history().is_empty());
        assert!(session.editor.changes_saved());
    }

    #[test]
    fn test_class_name_collisions() {
        let (mut session, _) = session();
        let err = run(
            &mut session,
            r#"{"op": "create_class", "display_name": "Button", "fully_qualified_name": "a.B"}"#,
        )
        .unwrap_err();
        assert_eq!(err, EditError::NameTaken("Button".to_string()));

        run(
            &mut session,
            r#"{"op": "create_class", "display_name": "Gauge", "fully_qualified_name": "a.Gauge"}"#,
        )
        .unwrap();
        assert_eq!(session.editor.menu().undo_text, "Undo New Class Gauge");

        // Renaming a class to its own name is fine
        run(
            &mut session,
            r#"{"op": "rename_class", "class": "Gauge", "display_name": "Gauge",
                "fully_qualified_name": "a.b.Gauge"}"#,
        )
        .unwrap();
        let err = run(
            &mut session,
            r#"{"op": "duplicate_class", "class": "Gauge", "display_name": "Gauge",
                "fully_qualified_name": "a.Gauge2"}"#,
        )
        .unwrap_err();
        assert_eq!(err, EditError::NameTaken("Gauge".to_string()));
    }

    #[test]
    fn test_custom_property_flow() {
        let (mut session, _) = session();
        for step in [
            r#"{"op": "create_class", "display_name": "Gauge", "fully_qualified_name": "a.Gauge"}"#,
            r#"{"op": "create_custom_style", "class": "Gauge", "name": "big"}"#,
            r#"{"op": "create_custom_property", "class": "Gauge", "name": "max", "kind": "number"}"#,
            r#"{"op": "set_custom_property", "class": "Gauge", "style": "big", "property": "max",
                "value": {"type": "number", "value": 99.0}}"#,
        ] {
            run(&mut session, step).unwrap();
        }

        let err = run(
            &mut session,
            r#"{"op": "create_custom_property", "class": "Gauge", "name": "max", "kind": "text"}"#,
        )
        .unwrap_err();
        assert_eq!(err, EditError::NameTaken("max".to_string()));

        let err = run(
            &mut session,
            r#"{"op": "delete_custom_style", "class": "Gauge", "style": "default"}"#,
        )
        .unwrap_err();
        assert_eq!(err, EditError::Protected("default".to_string()));

        run(
            &mut session,
            r#"{"op": "delete_custom_property", "class": "Gauge", "property": "max"}"#,
        )
        .unwrap();
        run(&mut session, r#"{"op": "undo"}"#).unwrap();

        let class = session.editor.skin.custom_class_by_name("Gauge").unwrap();
        let big = class.style_by_name("big").unwrap();
        assert_eq!(big.property("max").unwrap().value, Some(PropertyValue::Number(99.0)));
    }

    #[test]
    fn test_assets_are_not_recorded() {
        let (mut session, _) = session();
        run(&mut session, r#"{"op": "add_asset", "kind": "drawable", "name": "panel"}"#).unwrap();
        assert!(session.history().is_empty());
        assert!(!session.editor.changes_saved());

        run(
            &mut session,
            r#"{"op": "set_style_property", "class": "Label", "style": "default",
                "property": "background", "value": {"type": "name", "value": "panel"}}"#,
        )
        .unwrap();
        run(&mut session, r#"{"op": "remove_asset", "kind": "drawable", "name": "panel"}"#)
            .unwrap();
        let err = run(&mut session, r#"{"op": "remove_asset", "kind": "drawable", "name": "panel"}"#)
            .unwrap_err();
        assert!(matches!(err, EditError::UnknownAsset { .. }));

        // Undo re-sets the prior (unset) value, redo can't restore the dangling name
        run(&mut session, r#"{"op": "undo"}"#).unwrap();
        run(&mut session, r#"{"op": "redo"}"#).unwrap();
        let label = session.editor.skin.style_by_name(WidgetClass::Label, "default").unwrap();
        assert_eq!(label.property("background").unwrap().value, None);
    }

    #[test]
    fn test_values_are_checked_against_property_kind() {
        let (mut session, _) = session();
        let err = run(
            &mut session,
            r#"{"op": "set_style_property", "class": "Button", "style": "default",
                "property": "pressedOffsetX", "value": {"type": "text", "value": "wide"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            EditError::WrongValueType {
                property: "pressedOffsetX".to_string(),
                expected: "number",
            }
        );

        let err = run(
            &mut session,
            r#"{"op": "set_style_property", "class": "Button", "style": "default",
                "property": "up", "value": {"type": "name", "value": "no-such-drawable"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            EditError::UnknownAsset {
                kind: AssetKind::Drawable,
                name: "no-such-drawable".to_string(),
            }
        );

        let err = run(
            &mut session,
            r#"{"op": "set_style_property", "class": "SelectBox", "style": "default",
                "property": "scrollStyle", "value": {"type": "name", "value": "bar"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            EditError::UnknownStyle {
                class: WidgetClass::ScrollPane,
                name: "bar".to_string(),
            }
        );

        assert!(session.history().is_empty());
        assert!(session.editor.changes_saved());

        // Clearing needs no check
        run(
            &mut session,
            r#"{"op": "set_style_property", "class": "Button", "style": "default",
                "property": "up"}"#,
        )
        .unwrap();
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_custom_values_are_checked_against_property_type() {
        let (mut session, _) = session();
        for step in [
            r#"{"op": "create_class", "display_name": "Gauge", "fully_qualified_name": "a.Gauge"}"#,
            r#"{"op": "create_custom_property", "class": "Gauge", "name": "max", "kind": "number"}"#,
            r#"{"op": "create_custom_property", "class": "Gauge", "name": "needle", "kind": "drawable"}"#,
        ] {
            run(&mut session, step).unwrap();
        }
        let recorded = session.history().len();

        let err = run(
            &mut session,
            r#"{"op": "set_custom_property", "class": "Gauge", "style": "default",
                "property": "max", "value": {"type": "bool", "value": true}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            EditError::WrongValueType {
                property: "max".to_string(),
                expected: "number",
            }
        );

        let err = run(
            &mut session,
            r#"{"op": "set_custom_property", "class": "Gauge", "style": "default",
                "property": "needle", "value": {"type": "name", "value": "arrow"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EditError::UnknownAsset { .. }));
        assert_eq!(session.history().len(), recorded);

        run(&mut session, r#"{"op": "add_asset", "kind": "drawable", "name": "arrow"}"#).unwrap();
        run(
            &mut session,
            r#"{"op": "set_custom_property", "class": "Gauge", "style": "default",
                "property": "needle", "value": {"type": "name", "value": "arrow"}}"#,
        )
        .unwrap();
        assert_eq!(session.history().len(), recorded + 1);
    }

    #[test]
    fn test_boundary_undo_is_ok() {
        let (mut session, _) = session();
        assert!(run(&mut session, r#"{"op": "undo"}"#).is_ok());
        assert!(run(&mut session, r#"{"op": "redo"}"#).is_ok());
        assert!(session.editor.changes_saved());
    }
}
