use std::sync::Arc;

use crate::foundation::{
    core::PixelBuffer,
    error::{ArplusError, ArplusResult},
};

/// Stable identity of a layer for the whole session.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Image,
    /// Externally rasterized text; `content` is kept for display and re-rasterization.
    Text { content: String },
}

/// An imported layer. Source pixels are shared read-only between the live project and any
/// export snapshot.
#[derive(Clone, Debug)]
pub struct Layer {
    pub id: LayerId,
    pub kind: LayerKind,
    /// Logo layers are skipped by presets that exclude the logo.
    pub is_logo: bool,
    pub source: Arc<PixelBuffer>,
}

impl Layer {
    pub fn image(id: impl Into<LayerId>, source: PixelBuffer) -> ArplusResult<Self> {
        Self::with_kind(id.into(), LayerKind::Image, source)
    }

    pub fn text(
        id: impl Into<LayerId>,
        content: impl Into<String>,
        source: PixelBuffer,
    ) -> ArplusResult<Self> {
        Self::with_kind(
            id.into(),
            LayerKind::Text {
                content: content.into(),
            },
            source,
        )
    }

    pub fn as_logo(mut self) -> Self {
        self.is_logo = true;
        self
    }

    fn with_kind(id: LayerId, kind: LayerKind, source: PixelBuffer) -> ArplusResult<Self> {
        if source.is_empty() {
            return Err(ArplusError::validation(format!(
                "layer '{id}' has an empty source ({}x{})",
                source.width, source.height
            )));
        }
        Ok(Self {
            id,
            kind,
            is_logo: false,
            source: Arc::new(source),
        })
    }

    pub fn width(&self) -> u32 {
        self.source.width
    }

    pub fn height(&self) -> u32 {
        self.source.height
    }

    /// Source size in pixels as floats.
    pub fn size(&self) -> (f64, f64) {
        (f64::from(self.source.width), f64::from(self.source.height))
    }
}
