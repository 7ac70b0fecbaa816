use super::*;
use crate::{
    foundation::core::{PixelBuffer, Transform},
    project::model::Project,
};

fn project_with(id: &str, w: u32, h: u32, preset: PresetId, scale: f64) -> Project {
    let mut project = Project::new();
    project
        .add_layer(Layer::image(id, PixelBuffer::filled(w, h, [0, 0, 0, 255]).unwrap()).unwrap())
        .unwrap();
    project
        .set_transform(
            preset,
            &LayerId::from(id),
            Transform {
                translation_x: 0.0,
                translation_y: 0.0,
                scale,
                rotation: 0.0,
            },
        )
        .unwrap();
    project
}

#[test]
fn one_and_a_half_times_triggers_single_warning() {
    let project = project_with("photo", 100, 100, PresetId::Poster, 1.5);
    let warnings = inspect(&project.snapshot(), PresetId::Poster);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].layer_id, LayerId::from("photo"));
    assert_eq!(warnings[0].preset_id, PresetId::Poster);
    assert!((warnings[0].ratio - 1.5).abs() < 1e-9);
    assert!(warnings[0].to_string().contains("150%"));
}

#[test]
fn downscale_and_native_do_not_warn() {
    let project = project_with("photo", 100, 100, PresetId::Poster, 0.8);
    assert!(inspect(&project.snapshot(), PresetId::Poster).is_empty());
    let project = project_with("photo", 100, 100, PresetId::Poster, 1.0);
    assert!(inspect(&project.snapshot(), PresetId::Poster).is_empty());
}

#[test]
fn limiting_axis_is_the_larger_ratio() {
    let layer = Layer::image("l", PixelBuffer::filled(3, 200, [0, 0, 0, 255]).unwrap()).unwrap();
    // 3 * 1.2 rounds to 4 pixels, a 1.333 ratio on the narrow axis.
    assert!((upscale_ratio(&layer, 1.2) - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn only_inspected_preset_is_reported() {
    let project = project_with("photo", 100, 100, PresetId::Hero, 2.0);
    assert!(inspect(&project.snapshot(), PresetId::Poster).is_empty());
    assert_eq!(inspect(&project.snapshot(), PresetId::Hero).len(), 1);
}

#[test]
fn excluded_logo_is_not_reported() {
    let mut project = Project::new();
    project
        .add_layer(
            Layer::image("logo", PixelBuffer::filled(10, 10, [0, 0, 0, 255]).unwrap())
                .unwrap()
                .as_logo(),
        )
        .unwrap();
    project
        .set_transform(
            PresetId::BackgroundNoLogo,
            &LayerId::from("logo"),
            Transform::centered_at(crate::foundation::core::Point::ORIGIN, 4.0),
        )
        .unwrap();
    assert!(inspect(&project.snapshot(), PresetId::BackgroundNoLogo).is_empty());
}
