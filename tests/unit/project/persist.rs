use std::io::Cursor;

use super::*;
use crate::{assets::layer::LayerKind, foundation::core::Transform, presets::PresetId};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "arplus_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

#[test]
fn state_json_roundtrip_preserves_entries() {
    let mut state = ProjectState::new();
    state
        .set_transform(
            PresetId::Poster,
            &LayerId::from("bg"),
            Transform {
                translation_x: 12.5,
                translation_y: -3.0,
                scale: 0.75,
                rotation: 15.0,
            },
        )
        .unwrap();
    let json = state_to_json(&state).unwrap();
    assert_eq!(state_from_json(&json).unwrap(), state);
}

#[test]
fn state_from_json_reports_serde_and_invalid_values() {
    assert!(matches!(
        state_from_json("{not json"),
        Err(ArplusError::Serde(_))
    ));
    assert!(matches!(
        state_from_json(r#"{"logo":{"x":{"translation_x":0,"translation_y":0,"scale":0}}}"#),
        Err(ArplusError::InvalidTransform(_))
    ));
}

#[test]
fn save_and_load_state_file() {
    let dir = temp_dir("persist_state");
    let path = dir.join("nested").join("state.json");
    let mut state = ProjectState::new();
    state
        .set_transform(PresetId::Logo, &LayerId::from("logo"), Transform::default())
        .unwrap();
    save_state(&state, &path).unwrap();
    assert_eq!(load_state(&path).unwrap(), state);
}

#[test]
fn manifest_loads_layers_and_fills_missing_placements() {
    let dir = temp_dir("persist_manifest");
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("bg.png"), 40, 20);
    write_png(&dir.join("logo.png"), 10, 10);

    let manifest_json = r#"{
        "layers": [
            { "id": "bg", "source": "bg.png" },
            { "id": "logo", "source": "logo.png", "logo": true, "text": "ARPLUS" }
        ],
        "state": {
            "hero": { "bg": { "translation_x": 100.0, "translation_y": 50.0, "scale": 2.0 } }
        }
    }"#;
    let manifest_path = dir.join("project.json");
    std::fs::write(&manifest_path, manifest_json).unwrap();

    let manifest = ProjectManifest::read(&manifest_path).unwrap();
    let project = manifest.load_project(&dir).unwrap();

    let bg = LayerId::from("bg");
    let logo = project.layer(&LayerId::from("logo")).unwrap();
    assert!(logo.is_logo);
    assert_eq!(
        logo.kind,
        LayerKind::Text {
            content: "ARPLUS".to_string()
        }
    );
    assert_eq!(
        project.get_transform(PresetId::Hero, &bg).unwrap().scale,
        2.0
    );
    for preset in PresetId::ALL {
        assert!(project.is_placed(preset, &bg));
        assert!(project.is_placed(preset, &LayerId::from("logo")));
    }
    assert!(!manifest.render.rotation);
}

#[test]
fn manifest_with_missing_image_fails() {
    let dir = temp_dir("persist_missing");
    std::fs::create_dir_all(&dir).unwrap();
    let manifest: ProjectManifest =
        serde_json::from_str(r#"{ "layers": [{ "id": "bg", "source": "nope.png" }] }"#).unwrap();
    assert!(manifest.load_project(&dir).is_err());
}
