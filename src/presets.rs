//! Fixed catalog of export targets.
//!
//! Values are constants for the whole process; nothing here is mutable.

use std::str::FromStr;

use crate::foundation::{
    core::Canvas,
    error::{ArplusError, ArplusResult},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PresetId {
    Poster,
    FullscreenLogo,
    Hero,
    Logo,
    Background,
    BackgroundNoLogo,
}

impl PresetId {
    pub const ALL: [PresetId; 6] = [
        PresetId::Poster,
        PresetId::FullscreenLogo,
        PresetId::Hero,
        PresetId::Logo,
        PresetId::Background,
        PresetId::BackgroundNoLogo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetId::Poster => "poster",
            PresetId::FullscreenLogo => "fullscreen_logo",
            PresetId::Hero => "hero",
            PresetId::Logo => "logo",
            PresetId::Background => "background",
            PresetId::BackgroundNoLogo => "background_no_logo",
        }
    }
}

impl std::fmt::Display for PresetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetId {
    type Err = ArplusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ArplusError::unknown_preset(s))
    }
}

/// A named export target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
    pub id: PresetId,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
    pub includes_logo: bool,
}

impl Preset {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

static CATALOG: [Preset; 6] = [
    Preset {
        id: PresetId::Poster,
        label: "Poster",
        width: 1000,
        height: 1500,
        includes_logo: true,
    },
    Preset {
        id: PresetId::FullscreenLogo,
        label: "FullScreen + Logo",
        width: 1920,
        height: 1080,
        includes_logo: true,
    },
    Preset {
        id: PresetId::Hero,
        label: "Hero Banner",
        width: 1920,
        height: 600,
        includes_logo: true,
    },
    Preset {
        id: PresetId::Logo,
        label: "Logo",
        width: 512,
        height: 512,
        includes_logo: true,
    },
    Preset {
        id: PresetId::Background,
        label: "Background",
        width: 1920,
        height: 1080,
        includes_logo: true,
    },
    Preset {
        id: PresetId::BackgroundNoLogo,
        label: "Background (no logo)",
        width: 1920,
        height: 1080,
        includes_logo: false,
    },
];

/// Every catalog entry, in display order.
pub fn all() -> &'static [Preset] {
    &CATALOG
}

/// Look up a catalog entry by typed id. Infallible: the enum only names catalog entries.
pub fn preset(id: PresetId) -> &'static Preset {
    // CATALOG is declared in PresetId::ALL order.
    &CATALOG[id as usize]
}

/// Look up a catalog entry by its string id.
pub fn resolve(id: &str) -> ArplusResult<&'static Preset> {
    let id = PresetId::from_str(id)?;
    Ok(preset(id))
}

#[cfg(test)]
#[path = "../tests/unit/presets/catalog.rs"]
mod tests;
