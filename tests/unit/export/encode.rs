use super::*;

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

#[test]
fn output_path_uses_preset_id_and_extension() {
    let p = output_path(Path::new("out"), PresetId::BackgroundNoLogo, ExportFormat::Jpeg);
    assert_eq!(p, Path::new("out").join("background_no_logo.jpg"));
}

#[test]
fn flatten_blends_over_matte() {
    let rgba = [255, 0, 0, 255, 0, 0, 0, 0, 200, 200, 200, 128];
    let rgb = flatten_rgb(&rgba, [255, 255, 255]);
    assert_eq!(&rgb[..6], &[255, 0, 0, 255, 255, 255]);
    assert!(rgb[6] > 200 && rgb[6] < 255);
}

#[test]
fn png_roundtrips_pixels() {
    let dir = temp_dir("encode_png");
    let path = dir.join("logo.png");
    let buf = PixelBuffer::new(2, 1, vec![1, 2, 3, 4, 250, 251, 252, 255]).unwrap();
    write_rendered(&buf, &path, ExportFormat::Png, [0, 0, 0]).unwrap();

    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.into_raw(), buf.data);
}

#[test]
fn jpeg_and_webp_are_written() {
    let dir = temp_dir("encode_lossy");
    let buf = PixelBuffer::filled(8, 8, [10, 120, 240, 255]).unwrap();
    for format in [ExportFormat::Jpeg, ExportFormat::Webp] {
        let path = dir.join(format!("x.{}", format.extension()));
        write_rendered(&buf, &path, format, [255, 255, 255]).unwrap();
        let back = image::open(&path).unwrap();
        assert_eq!((back.width(), back.height()), (8, 8));
    }
}

#[test]
fn empty_buffer_is_rejected() {
    let buf = PixelBuffer::new(0, 0, vec![]).unwrap();
    let path = temp_dir("encode_empty").join("e.png");
    assert!(write_rendered(&buf, &path, ExportFormat::Png, [0, 0, 0]).is_err());
}
