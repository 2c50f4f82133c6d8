//! Skin data model - styles, custom classes and the asset registry
//!
//! Entities carry stable ids so commands can find them again after
//! unrelated edits have shifted indices around.

pub mod assets;
pub mod custom;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use assets::{AssetKind, AssetRegistry};
pub use custom::{CustomClass, CustomProperty, CustomPropertyType, CustomStyle};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identity of a built-in widget style
    StyleId
);
entity_id!(
    /// Identity of a custom class
    ClassId
);
entity_id!(
    /// Identity of a style inside a custom class (template included)
    CustomStyleId
);
entity_id!(
    /// Identity of a single custom property instance
    PropertyId
);
entity_id!(
    /// Identity of an actor in the scene composer
    ActorId
);

/// Built-in widget classes that can be styled
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum WidgetClass {
    Button,
    CheckBox,
    Label,
    List,
    ScrollPane,
    SelectBox,
    TextButton,
    TextField,
    Window,
}

impl WidgetClass {
    pub const ALL: [WidgetClass; 9] = [
        WidgetClass::Button,
        WidgetClass::CheckBox,
        WidgetClass::Label,
        WidgetClass::List,
        WidgetClass::ScrollPane,
        WidgetClass::SelectBox,
        WidgetClass::TextButton,
        WidgetClass::TextField,
        WidgetClass::Window,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WidgetClass::Button => "Button",
            WidgetClass::CheckBox => "CheckBox",
            WidgetClass::Label => "Label",
            WidgetClass::List => "List",
            WidgetClass::ScrollPane => "ScrollPane",
            WidgetClass::SelectBox => "SelectBox",
            WidgetClass::TextButton => "TextButton",
            WidgetClass::TextField => "TextField",
            WidgetClass::Window => "Window",
        }
    }

    /// Property names and kinds every style of this class carries
    pub fn property_template(self) -> &'static [(&'static str, PropertyKind)] {
        use PropertyKind::*;
        match self {
            WidgetClass::Button => &[
                ("up", Drawable),
                ("down", Drawable),
                ("over", Drawable),
                ("checked", Drawable),
                ("disabled", Drawable),
                ("pressedOffsetX", Number),
                ("pressedOffsetY", Number),
            ],
            WidgetClass::CheckBox => &[
                ("checkboxOn", Drawable),
                ("checkboxOff", Drawable),
                ("font", Font),
                ("fontColor", Color),
            ],
            WidgetClass::Label => &[
                ("font", Font),
                ("fontColor", Color),
                ("background", Drawable),
            ],
            WidgetClass::List => &[
                ("font", Font),
                ("fontColorSelected", Color),
                ("fontColorUnselected", Color),
                ("selection", Drawable),
            ],
            WidgetClass::ScrollPane => &[
                ("background", Drawable),
                ("hScroll", Drawable),
                ("vScroll", Drawable),
            ],
            WidgetClass::SelectBox => &[
                ("font", Font),
                ("fontColor", Color),
                ("background", Drawable),
                ("scrollStyle", Style(WidgetClass::ScrollPane)),
                ("listStyle", Style(WidgetClass::List)),
            ],
            WidgetClass::TextButton => &[
                ("up", Drawable),
                ("down", Drawable),
                ("font", Font),
                ("fontColor", Color),
            ],
            WidgetClass::TextField => &[
                ("font", Font),
                ("fontColor", Color),
                ("cursor", Drawable),
                ("selection", Drawable),
                ("background", Drawable),
            ],
            WidgetClass::Window => &[
                ("titleFont", Font),
                ("titleFontColor", Color),
                ("background", Drawable),
                ("stageBackground", Drawable),
            ],
        }
    }
}

impl fmt::Display for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a built-in style property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Number,
    Text,
    Bool,
    Drawable,
    Font,
    Color,
    /// Name of a style of the given class
    Style(WidgetClass),
}

/// The `PropertyValue` variant a property accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Number,
    Text,
    Bool,
    /// An asset or style name
    Name,
}

impl ValueShape {
    pub fn name(self) -> &'static str {
        match self {
            ValueShape::Number => "number",
            ValueShape::Text => "text",
            ValueShape::Bool => "bool",
            ValueShape::Name => "name",
        }
    }

    pub fn accepts(self, value: &PropertyValue) -> bool {
        matches!(
            (self, value),
            (ValueShape::Number, PropertyValue::Number(_))
                | (ValueShape::Text, PropertyValue::Text(_))
                | (ValueShape::Bool, PropertyValue::Bool(_))
                | (ValueShape::Name, PropertyValue::Name(_))
        )
    }
}

impl PropertyKind {
    pub fn shape(self) -> ValueShape {
        match self {
            PropertyKind::Number => ValueShape::Number,
            PropertyKind::Text => ValueShape::Text,
            PropertyKind::Bool => ValueShape::Bool,
            PropertyKind::Drawable
            | PropertyKind::Font
            | PropertyKind::Color
            | PropertyKind::Style(_) => ValueShape::Name,
        }
    }

    /// Asset kind the value must resolve against, if any
    pub fn asset_kind(self) -> Option<AssetKind> {
        match self {
            PropertyKind::Drawable => Some(AssetKind::Drawable),
            PropertyKind::Font => Some(AssetKind::Font),
            PropertyKind::Color => Some(AssetKind::Color),
            _ => None,
        }
    }
}

/// A property value; references to assets and styles are by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Name(String),
}

impl PropertyValue {
    pub fn name(name: impl Into<String>) -> Self {
        PropertyValue::Name(name.into())
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            PropertyValue::Name(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProperty {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub value: Option<PropertyValue>,
}

/// A named style of a built-in widget class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleData {
    #[serde(default)]
    pub id: StyleId,
    pub name: String,
    pub class: WidgetClass,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default = "default_deletable")]
    pub deletable: bool,
    #[serde(default)]
    pub properties: Vec<StyleProperty>,
}

fn default_deletable() -> bool {
    true
}

impl StyleData {
    /// Create a style with the class's full, unset property template
    pub fn new(class: WidgetClass, name: impl Into<String>) -> Self {
        let properties = class
            .property_template()
            .iter()
            .map(|&(name, kind)| StyleProperty {
                name: name.to_string(),
                kind,
                value: None,
            })
            .collect();
        Self {
            id: StyleId::new(),
            name: name.into(),
            class,
            parent: None,
            deletable: true,
            properties,
        }
    }

    /// Copy this style under a new name and identity
    pub fn duplicate(&self, name: impl Into<String>) -> Self {
        Self {
            id: StyleId::new(),
            name: name.into(),
            deletable: true,
            ..self.clone()
        }
    }

    pub fn property(&self, name: &str) -> Option<&StyleProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut StyleProperty> {
        self.properties.iter_mut().find(|p| p.name == name)
    }
}

/// The skin being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    #[serde(default)]
    pub styles: BTreeMap<WidgetClass, Vec<StyleData>>,
    #[serde(default)]
    pub custom_classes: Vec<CustomClass>,
    #[serde(default)]
    pub assets: AssetRegistry,
}

impl Default for Skin {
    fn default() -> Self {
        Self::new()
    }
}

impl Skin {
    /// Create a skin where every class has its protected `default` style
    pub fn new() -> Self {
        let styles = WidgetClass::ALL
            .iter()
            .map(|&class| {
                let mut style = StyleData::new(class, "default");
                style.deletable = false;
                (class, vec![style])
            })
            .collect();
        Self {
            styles,
            custom_classes: Vec::new(),
            assets: AssetRegistry::default(),
        }
    }

    pub fn styles_of(&self, class: WidgetClass) -> &[StyleData] {
        self.styles.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn styles_of_mut(&mut self, class: WidgetClass) -> &mut Vec<StyleData> {
        self.styles.entry(class).or_default()
    }

    pub fn style_by_name(&self, class: WidgetClass, name: &str) -> Option<&StyleData> {
        self.styles_of(class).iter().find(|s| s.name == name)
    }

    pub fn find_style(&self, id: StyleId) -> Option<&StyleData> {
        self.styles.values().flatten().find(|s| s.id == id)
    }

    pub fn find_style_mut(&mut self, id: StyleId) -> Option<&mut StyleData> {
        self.styles.values_mut().flatten().find(|s| s.id == id)
    }

    /// Class and index of a style
    pub fn style_position(&self, id: StyleId) -> Option<(WidgetClass, usize)> {
        self.styles.iter().find_map(|(&class, styles)| {
            styles
                .iter()
                .position(|s| s.id == id)
                .map(|idx| (class, idx))
        })
    }

    pub fn custom_class(&self, id: ClassId) -> Option<&CustomClass> {
        self.custom_classes.iter().find(|c| c.id == id)
    }

    pub fn custom_class_mut(&mut self, id: ClassId) -> Option<&mut CustomClass> {
        self.custom_classes.iter_mut().find(|c| c.id == id)
    }

    pub fn custom_class_position(&self, id: ClassId) -> Option<usize> {
        self.custom_classes.iter().position(|c| c.id == id)
    }

    pub fn custom_class_by_name(&self, display_name: &str) -> Option<&CustomClass> {
        self.custom_classes
            .iter()
            .find(|c| c.display_name == display_name)
    }

    pub fn find_custom_property(&self, id: PropertyId) -> Option<&CustomProperty> {
        self.custom_classes
            .iter()
            .flat_map(|c| c.all_styles())
            .flat_map(|s| s.properties.iter())
            .find(|p| p.id == id)
    }

    pub fn find_custom_property_mut(&mut self, id: PropertyId) -> Option<&mut CustomProperty> {
        self.custom_classes
            .iter_mut()
            .flat_map(|c| c.all_styles_mut())
            .flat_map(|s| s.properties.iter_mut())
            .find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_skin_has_protected_defaults() {
        let skin = Skin::new();
        for class in WidgetClass::ALL {
            let styles = skin.styles_of(class);
            assert_eq!(styles.len(), 1);
            assert_eq!(styles[0].name, "default");
            assert!(!styles[0].deletable);
        }
    }

    #[test]
    fn test_style_position_finds_by_identity() {
        let mut skin = Skin::new();
        let extra = StyleData::new(WidgetClass::Label, "title");
        let id = extra.id;
        skin.styles_of_mut(WidgetClass::Label).push(extra);

        assert_eq!(skin.style_position(id), Some((WidgetClass::Label, 1)));
        assert_eq!(skin.find_style(id).map(|s| s.name.as_str()), Some("title"));
        assert_eq!(skin.style_position(StyleId::new()), None);
    }

    #[test]
    fn test_duplicate_gets_new_identity() {
        let mut original = StyleData::new(WidgetClass::Button, "default");
        original.deletable = false;
        original.property_mut("up").unwrap().value = Some(PropertyValue::name("button-up"));

        let copy = original.duplicate("toggle");
        assert_ne!(copy.id, original.id);
        assert!(copy.deletable);
        assert_eq!(copy.properties, original.properties);
    }

    #[test]
    fn test_skin_json_roundtrip_keeps_class_keys() {
        let skin = Skin::new();
        let json = serde_json::to_string(&skin).unwrap();
        assert!(json.contains("\"SelectBox\""));
        let back: Skin = serde_json::from_str(&json).unwrap();
        assert_eq!(back, skin);
    }

    #[test]
    fn test_minimal_style_json_fills_defaults() {
        let style: StyleData =
            serde_json::from_str(r#"{"name": "big", "class": "Label"}"#).unwrap();
        assert!(style.deletable);
        assert!(style.properties.is_empty());
        assert_eq!(style.parent, None);
    }
}
