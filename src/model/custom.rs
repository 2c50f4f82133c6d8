//! User-declared widget classes with free-form properties

use std::iter;

use serde::{Deserialize, Serialize};

use super::{AssetKind, ClassId, CustomStyleId, PropertyId, PropertyValue, ValueShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomPropertyType {
    Number,
    Text,
    RawText,
    Bool,
    Drawable,
    Font,
    Color,
    Style,
}

impl CustomPropertyType {
    pub fn shape(self) -> ValueShape {
        match self {
            CustomPropertyType::Number => ValueShape::Number,
            CustomPropertyType::Text | CustomPropertyType::RawText => ValueShape::Text,
            CustomPropertyType::Bool => ValueShape::Bool,
            CustomPropertyType::Drawable
            | CustomPropertyType::Font
            | CustomPropertyType::Color
            | CustomPropertyType::Style => ValueShape::Name,
        }
    }

    /// Asset kind the value must resolve against, if any
    pub fn asset_kind(self) -> Option<AssetKind> {
        match self {
            CustomPropertyType::Drawable => Some(AssetKind::Drawable),
            CustomPropertyType::Font => Some(AssetKind::Font),
            CustomPropertyType::Color => Some(AssetKind::Color),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProperty {
    #[serde(default)]
    pub id: PropertyId,
    pub name: String,
    pub kind: CustomPropertyType,
    #[serde(default)]
    pub value: Option<PropertyValue>,
}

impl CustomProperty {
    pub fn new(name: impl Into<String>, kind: CustomPropertyType) -> Self {
        Self {
            id: PropertyId::new(),
            name: name.into(),
            kind,
            value: None,
        }
    }

    /// Same name, kind and value under a fresh identity
    pub fn copy(&self) -> Self {
        Self {
            id: PropertyId::new(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomStyle {
    #[serde(default)]
    pub id: CustomStyleId,
    pub name: String,
    #[serde(default = "default_deletable")]
    pub deletable: bool,
    #[serde(default)]
    pub properties: Vec<CustomProperty>,
}

fn default_deletable() -> bool {
    true
}

impl CustomStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomStyleId::new(),
            name: name.into(),
            deletable: true,
            properties: Vec::new(),
        }
    }

    /// Deep copy with fresh identities for the style and its properties
    pub fn copy(&self, name: impl Into<String>) -> Self {
        Self {
            id: CustomStyleId::new(),
            name: name.into(),
            deletable: true,
            properties: self.properties.iter().map(CustomProperty::copy).collect(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&CustomProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A custom widget class
///
/// The template style defines the property columns; every style of the
/// class carries its own copy of each column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomClass {
    #[serde(default)]
    pub id: ClassId,
    pub fully_qualified_name: String,
    pub display_name: String,
    #[serde(default)]
    pub declare_after_ui_classes: bool,
    pub template: CustomStyle,
    #[serde(default)]
    pub styles: Vec<CustomStyle>,
}

impl CustomClass {
    /// Create a class with an empty template and a protected `default` style
    pub fn new(fully_qualified_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        let template = CustomStyle::new("template");
        let mut default = template.copy("default");
        default.deletable = false;
        Self {
            id: ClassId::new(),
            fully_qualified_name: fully_qualified_name.into(),
            display_name: display_name.into(),
            declare_after_ui_classes: false,
            template,
            styles: vec![default],
        }
    }

    /// Deep copy with fresh identities throughout
    pub fn copy(&self) -> Self {
        Self {
            id: ClassId::new(),
            fully_qualified_name: self.fully_qualified_name.clone(),
            display_name: self.display_name.clone(),
            declare_after_ui_classes: self.declare_after_ui_classes,
            template: self.template.copy(self.template.name.clone()),
            styles: self
                .styles
                .iter()
                .map(|s| {
                    let mut copy = s.copy(s.name.clone());
                    copy.deletable = s.deletable;
                    copy
                })
                .collect(),
        }
    }

    /// Template first, then every style
    pub fn all_styles(&self) -> impl Iterator<Item = &CustomStyle> {
        iter::once(&self.template).chain(self.styles.iter())
    }

    /// Template first, then every style
    pub fn all_styles_mut(&mut self) -> impl Iterator<Item = &mut CustomStyle> {
        iter::once(&mut self.template).chain(self.styles.iter_mut())
    }

    pub fn style_mut(&mut self, id: CustomStyleId) -> Option<&mut CustomStyle> {
        self.all_styles_mut().find(|s| s.id == id)
    }

    /// Index of a style in `styles` (the template has no index)
    pub fn style_position(&self, id: CustomStyleId) -> Option<usize> {
        self.styles.iter().position(|s| s.id == id)
    }

    pub fn style_by_name(&self, name: &str) -> Option<&CustomStyle> {
        self.styles.iter().find(|s| s.name == name)
    }
}
