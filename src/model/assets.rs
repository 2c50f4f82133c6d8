//! Named assets that style properties refer to
//!
//! Atlas packing and font loading happen elsewhere; this registry only
//! answers whether a name currently resolves.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Drawable,
    Font,
    Color,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRegistry {
    #[serde(default)]
    pub drawables: Vec<String>,
    #[serde(default)]
    pub fonts: Vec<String>,
    #[serde(default)]
    pub freetype_fonts: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl AssetRegistry {
    /// Check whether `name` names an existing asset of `kind`
    ///
    /// Fonts resolve against both bitmap and FreeType fonts.
    pub fn resolves(&self, kind: AssetKind, name: &str) -> bool {
        match kind {
            AssetKind::Drawable => self.drawables.iter().any(|d| d == name),
            AssetKind::Font => self
                .fonts
                .iter()
                .chain(self.freetype_fonts.iter())
                .any(|f| f == name),
            AssetKind::Color => self.colors.iter().any(|c| c == name),
        }
    }

    /// Register an asset; bitmap font list for fonts. No-op if present.
    pub fn add(&mut self, kind: AssetKind, name: impl Into<String>) {
        let name = name.into();
        if self.resolves(kind, &name) {
            return;
        }
        match kind {
            AssetKind::Drawable => self.drawables.push(name),
            AssetKind::Font => self.fonts.push(name),
            AssetKind::Color => self.colors.push(name),
        }
    }

    /// Remove an asset. Returns `true` if something was removed.
    pub fn remove(&mut self, kind: AssetKind, name: &str) -> bool {
        let lists: Vec<&mut Vec<String>> = match kind {
            AssetKind::Drawable => vec![&mut self.drawables],
            AssetKind::Font => vec![&mut self.fonts, &mut self.freetype_fonts],
            AssetKind::Color => vec![&mut self.colors],
        };
        let mut removed = false;
        for list in lists {
            let before = list.len();
            list.retain(|entry| entry != name);
            removed |= list.len() != before;
        }
        removed
    }
}
