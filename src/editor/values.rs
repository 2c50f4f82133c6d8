//! Value changes on style and custom properties
//!
//! Values naming a drawable, font or color are re-validated against the
//! asset registry on every apply and revert: an intervening edit may have
//! deleted the asset, and a dangling name must never be written.

use tracing::{debug, warn};

use super::SkinEditor;
use crate::history::Command;
use crate::model::{AssetKind, AssetRegistry, PropertyId, PropertyValue, Skin, StyleId};

/// The property a value change writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTarget {
    /// A named property of a built-in style
    Style { style: StyleId, property: String },
    /// A custom property instance
    Custom(PropertyId),
}

impl ValueTarget {
    pub fn style(style: StyleId, property: impl Into<String>) -> Self {
        ValueTarget::Style {
            style,
            property: property.into(),
        }
    }

    fn slot<'a>(&self, skin: &'a mut Skin) -> Option<&'a mut Option<PropertyValue>> {
        match self {
            ValueTarget::Style { style, property } => skin
                .find_style_mut(*style)?
                .property_mut(property)
                .map(|p| &mut p.value),
            ValueTarget::Custom(id) => skin.find_custom_property_mut(*id).map(|p| &mut p.value),
        }
    }
}

/// Validation applied before a value is assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCheck {
    None,
    /// The value must be unset or name an existing asset of this kind
    Asset(AssetKind),
}

impl RefCheck {
    pub fn allows(self, assets: &AssetRegistry, value: Option<&PropertyValue>) -> bool {
        match (self, value) {
            (RefCheck::None, _) | (_, None) => true,
            (RefCheck::Asset(kind), Some(value)) => value
                .as_name()
                .is_some_and(|name| assets.resolves(kind, name)),
        }
    }
}

/// Change the value of a style or custom property
#[derive(Debug, Clone)]
pub struct SetValueCmd {
    target: ValueTarget,
    property_name: String,
    old: Option<PropertyValue>,
    new: Option<PropertyValue>,
    check: RefCheck,
}

impl SetValueCmd {
    /// Snapshot the current value of `target` as the old value
    ///
    /// The reference check is derived from the property's kind. Returns
    /// `None` if the target doesn't exist.
    pub fn capture(skin: &Skin, target: ValueTarget, new: Option<PropertyValue>) -> Option<Self> {
        let (property_name, old, asset) = match &target {
            ValueTarget::Style { style, property } => {
                let prop = skin.find_style(*style)?.property(property)?;
                (prop.name.clone(), prop.value.clone(), prop.kind.asset_kind())
            }
            ValueTarget::Custom(id) => {
                let prop = skin.find_custom_property(*id)?;
                (prop.name.clone(), prop.value.clone(), prop.kind.asset_kind())
            }
        };
        Some(Self {
            target,
            property_name,
            old,
            new,
            check: asset.map_or(RefCheck::None, RefCheck::Asset),
        })
    }

    /// Build from values the caller already snapshotted
    pub fn from_values(
        target: ValueTarget,
        property_name: impl Into<String>,
        old: Option<PropertyValue>,
        new: Option<PropertyValue>,
        check: RefCheck,
    ) -> Self {
        Self {
            target,
            property_name: property_name.into(),
            old,
            new,
            check,
        }
    }

    pub fn check(&self) -> RefCheck {
        self.check
    }

    fn assign(&self, editor: &mut SkinEditor, value: Option<PropertyValue>) {
        if self.check.allows(&editor.skin.assets, value.as_ref()) {
            match self.target.slot(&mut editor.skin) {
                Some(slot) => *slot = value,
                None => {
                    debug_assert!(false, "value target vanished: {:?}", self.target);
                    warn!(target = ?self.target, "value target not found");
                }
            }
        } else {
            debug!(
                property = %self.property_name,
                ?value,
                "skipped assignment of unresolved asset name"
            );
        }

        let refresh = editor.refresh();
        refresh.refresh_style_properties(true);
        refresh.refresh_preview();
    }
}

impl Command<SkinEditor> for SetValueCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        self.assign(editor, self.new.clone());
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        self.assign(editor, self.old.clone());
    }

    fn description(&self) -> String {
        format!("Change Style Property {}", self.property_name)
    }
}

/// Change the parent a style inherits from
#[derive(Debug, Clone)]
pub struct SetParentCmd {
    style: StyleId,
    old: Option<String>,
    new: Option<String>,
}

impl SetParentCmd {
    pub fn capture(skin: &Skin, style: StyleId, new: Option<String>) -> Option<Self> {
        let old = skin.find_style(style)?.parent.clone();
        Some(Self { style, old, new })
    }

    fn assign(&self, editor: &mut SkinEditor, parent: Option<String>) {
        match editor.skin.find_style_mut(self.style) {
            Some(style) => style.parent = parent,
            None => {
                debug_assert!(false, "style {} vanished", self.style);
                warn!(style = %self.style, "style not found");
            }
        }
        let refresh = editor.refresh();
        refresh.refresh_style_properties(true);
        refresh.refresh_preview();
    }
}

impl Command<SkinEditor> for SetParentCmd {
    fn apply(&mut self, editor: &mut SkinEditor) {
        self.assign(editor, self.new.clone());
    }

    fn revert(&mut self, editor: &mut SkinEditor) {
        self.assign(editor, self.old.clone());
    }

    fn description(&self) -> String {
        "Change Style Parent".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_support::session;
    use crate::editor::RefreshEvent;
    use crate::history::CommitMode;
    use crate::model::{CustomClass, CustomProperty, CustomPropertyType, WidgetClass};

    fn label_style(editor: &SkinEditor) -> StyleId {
        editor.skin.styles_of(WidgetClass::Label)[0].id
    }

    fn label_value(editor: &SkinEditor, property: &str) -> Option<PropertyValue> {
        editor.skin.styles_of(WidgetClass::Label)[0]
            .property(property)
            .unwrap()
            .value
            .clone()
    }

    #[test]
    fn test_capture_derives_asset_check_from_kind() {
        let skin = Skin::new();
        let id = skin.styles_of(WidgetClass::Label)[0].id;
        let font = SetValueCmd::capture(&skin, ValueTarget::style(id, "font"), None).unwrap();
        assert_eq!(font.check(), RefCheck::Asset(AssetKind::Font));

        let button = skin.styles_of(WidgetClass::Button)[0].id;
        let offset =
            SetValueCmd::capture(&skin, ValueTarget::style(button, "pressedOffsetX"), None)
                .unwrap();
        assert_eq!(offset.check(), RefCheck::None);
    }

    #[test]
    fn test_capture_missing_target() {
        let skin = Skin::new();
        let id = skin.styles_of(WidgetClass::Label)[0].id;
        assert!(SetValueCmd::capture(&skin, ValueTarget::style(id, "nope"), None).is_none());
        assert!(SetValueCmd::capture(&skin, ValueTarget::Custom(PropertyId::new()), None).is_none());
    }

    #[test]
    fn test_drawable_to_deleted_name_leaves_field_unchanged() {
        let (mut session, _) = session();
        session.editor.skin.assets.add(AssetKind::Drawable, "panel");
        session.editor.skin.assets.add(AssetKind::Drawable, "panel-dark");
        let id = label_style(&session.editor);

        let first = SetValueCmd::capture(
            &session.editor.skin,
            ValueTarget::style(id, "background"),
            Some(PropertyValue::name("panel")),
        )
        .unwrap();
        session.commit(first, CommitMode::ApplyNow);
        let second = SetValueCmd::capture(
            &session.editor.skin,
            ValueTarget::style(id, "background"),
            Some(PropertyValue::name("panel-dark")),
        )
        .unwrap();
        session.commit(second, CommitMode::ApplyNow);

        session.undo();
        assert_eq!(label_value(&session.editor, "background"), Some(PropertyValue::name("panel")));

        // The drawable is deleted while the change sits on the redo side
        session.editor.skin.assets.remove(AssetKind::Drawable, "panel-dark");
        session.redo();
        assert_eq!(label_value(&session.editor, "background"), Some(PropertyValue::name("panel")));
    }

    #[test]
    fn test_unset_always_passes_check() {
        let (mut session, _) = session();
        session.editor.skin.assets.add(AssetKind::Color, "white");
        let id = label_style(&session.editor);
        let set = SetValueCmd::capture(
            &session.editor.skin,
            ValueTarget::style(id, "fontColor"),
            Some(PropertyValue::name("white")),
        )
        .unwrap();
        session.commit(set, CommitMode::ApplyNow);

        let clear =
            SetValueCmd::capture(&session.editor.skin, ValueTarget::style(id, "fontColor"), None)
                .unwrap();
        session.commit(clear, CommitMode::ApplyNow);
        assert_eq!(label_value(&session.editor, "fontColor"), None);

        session.editor.skin.assets.remove(AssetKind::Color, "white");
        session.undo();
        // "white" no longer resolves, so undoing the clear leaves the field unset
        assert_eq!(label_value(&session.editor, "fontColor"), None);
    }

    #[test]
    fn test_font_resolves_through_freetype_list() {
        let (mut session, _) = session();
        session.editor.skin.assets.freetype_fonts.push("roboto".to_string());
        let id = label_style(&session.editor);
        let cmd = SetValueCmd::capture(
            &session.editor.skin,
            ValueTarget::style(id, "font"),
            Some(PropertyValue::name("roboto")),
        )
        .unwrap();
        session.commit(cmd, CommitMode::ApplyNow);
        assert_eq!(label_value(&session.editor, "font"), Some(PropertyValue::name("roboto")));
    }

    #[test]
    fn test_every_transition_refreshes_properties_and_preview() {
        let (mut session, refresh) = session();
        let id = label_style(&session.editor);
        // Refresh fires even when the assignment is skipped
        let cmd = SetValueCmd::capture(
            &session.editor.skin,
            ValueTarget::style(id, "background"),
            Some(PropertyValue::name("missing")),
        )
        .unwrap();
        session.commit(cmd, CommitMode::ApplyNow);
        session.undo();

        assert_eq!(
            refresh.take(),
            vec![
                RefreshEvent::StyleProperties { select_affected: true },
                RefreshEvent::Preview,
                RefreshEvent::StyleProperties { select_affected: true },
                RefreshEvent::Preview,
            ]
        );
        assert_eq!(label_value(&session.editor, "background"), None);
    }

    #[test]
    fn test_custom_property_value_change() {
        let (mut session, _) = session();
        let mut class = CustomClass::new("com.example.Gauge", "Gauge");
        class.styles[0]
            .properties
            .push(CustomProperty::new("max", CustomPropertyType::Number));
        let prop_id = class.styles[0].properties[0].id;
        session.editor.skin.custom_classes.push(class);

        let cmd = SetValueCmd::capture(
            &session.editor.skin,
            ValueTarget::Custom(prop_id),
            Some(PropertyValue::Number(100.0)),
        )
        .unwrap();
        assert_eq!(cmd.description(), "Change Style Property max");
        session.commit(cmd, CommitMode::ApplyNow);

        let value = |s: &crate::editor::SkinSession| {
            s.editor.skin.find_custom_property(prop_id).unwrap().value.clone()
        };
        assert_eq!(value(&session), Some(PropertyValue::Number(100.0)));
        session.undo();
        assert_eq!(value(&session), None);
    }

    #[test]
    fn test_set_parent_roundtrip() {
        let (mut session, _) = session();
        let id = label_style(&session.editor);
        let cmd = SetParentCmd::capture(&session.editor.skin, id, Some("base".to_string())).unwrap();
        session.commit(cmd, CommitMode::ApplyNow);
        assert_eq!(
            session.editor.skin.find_style(id).unwrap().parent.as_deref(),
            Some("base")
        );
        assert_eq!(session.editor.menu().undo_text, "Undo Change Style Parent");

        session.undo();
        assert_eq!(session.editor.skin.find_style(id).unwrap().parent, None);
    }
}
