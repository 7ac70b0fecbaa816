pub mod composite;
pub mod compositor;
pub mod resample;

/// Compositor options.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Base color under all layers (straight RGBA8). `None` leaves the canvas transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Honor `Transform::rotation`. When off, stored rotations are ignored.
    pub rotation: bool,
}
