use super::*;

#[test]
fn scaled_size_rounds_and_never_collapses() {
    assert_eq!(scaled_size(800, 600, 0.5), (400, 300));
    assert_eq!(scaled_size(100, 100, 1.5), (150, 150));
    assert_eq!(scaled_size(3, 3, 0.01), (1, 1));
}

#[test]
fn filter_depends_on_direction() {
    assert_eq!(filter_for((100, 100), (50, 50)), FilterType::Lanczos3);
    assert_eq!(filter_for((100, 100), (150, 150)), FilterType::CatmullRom);
    assert_eq!(filter_for((100, 100), (100, 100)), FilterType::CatmullRom);
}

#[test]
fn scale_layer_identity_only_premultiplies() {
    let src = PixelBuffer::new(1, 1, vec![200, 100, 50, 0]).unwrap();
    let out = scale_layer(&src, 1.0).unwrap();
    assert_eq!(out.data, vec![0, 0, 0, 0]);
}

#[test]
fn downscale_of_uniform_color_stays_uniform() {
    let src = PixelBuffer::filled(64, 32, [40, 80, 120, 255]).unwrap();
    let out = scale_layer(&src, 0.25).unwrap();
    assert_eq!((out.width, out.height), (16, 8));
    for px in out.data.chunks_exact(4) {
        assert_eq!(px, &[40, 80, 120, 255]);
    }
}

#[test]
fn downscale_averages_stripes_instead_of_skipping() {
    // Alternating black/white columns; nearest-neighbour at 0.5 would keep only one color.
    let mut data = Vec::new();
    for _y in 0..8 {
        for x in 0..16 {
            let v = if x % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let src = PixelBuffer::new(16, 8, data).unwrap();
    let out = scale_layer(&src, 0.5).unwrap();
    let mid = ((4 * out.width + 4) * 4) as usize;
    let v = out.data[mid];
    assert!((96..=160).contains(&v), "got {v}");
}

#[test]
fn rotate_quarter_turn_swaps_dimensions() {
    let mut src = Surface::new(4, 2, [0, 0, 0, 0]);
    // Mark the top-left pixel.
    src.data[..4].copy_from_slice(&[255, 0, 0, 255]);
    let out = rotate_surface(&src, 90.0);
    assert_eq!((out.width, out.height), (2, 4));
    // Clockwise quarter turn moves the top-left corner to the top-right.
    let i = (1 * 4) as usize;
    assert_eq!(&out.data[i..i + 4], &[255, 0, 0, 255]);
}

#[test]
fn rotate_full_turn_is_identity() {
    let src = Surface::new(3, 2, [5, 6, 7, 255]);
    assert_eq!(rotate_surface(&src, 360.0), src);
    assert_eq!(rotate_surface(&src, 0.0), src);
}

fn hard_alpha_edge(w: u32, h: u32) -> PixelBuffer {
    let mut data = Vec::new();
    for _y in 0..h {
        for x in 0..w {
            if x < w / 2 {
                data.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                data.extend_from_slice(&[255, 255, 255, 255]);
            }
        }
    }
    PixelBuffer::new(w, h, data).unwrap()
}

#[test]
fn resampled_color_never_exceeds_alpha() {
    let src = hard_alpha_edge(40, 6);
    for scale in [0.3, 0.55, 1.7, 3.0] {
        let out = scale_layer(&src, scale).unwrap();
        for px in out.data.chunks_exact(4) {
            assert!(px[..3].iter().all(|&c| c <= px[3]), "scale {scale}: {px:?}");
        }
    }
}

#[test]
fn window_is_bounded_by_canvas_at_huge_scale() {
    let src = PixelBuffer::filled(100, 100, [10, 20, 30, 255]).unwrap();
    let affine = Affine::translate((256.0, 256.0)) * Affine::scale(1e5);
    let (win, x0, y0) = sample_window(&src, affine, 512, 512).unwrap();
    assert_eq!((win.width, win.height, x0, y0), (512, 512, 0, 0));
    assert!(win.data.chunks_exact(4).all(|px| px == &[10, 20, 30, 255]));
}

#[test]
fn window_clips_to_the_visible_part() {
    let src = PixelBuffer::filled(10, 10, [0, 0, 0, 255]).unwrap();
    // 10x10 layer centered on the canvas corner: only its bottom-right quarter shows.
    let (win, x0, y0) = sample_window(&src, Affine::IDENTITY, 64, 64).unwrap();
    assert_eq!((x0, y0), (0, 0));
    assert_eq!((win.width, win.height), (5, 5));
}

#[test]
fn window_outside_canvas_is_none() {
    let src = PixelBuffer::filled(10, 10, [0, 0, 0, 255]).unwrap();
    assert!(sample_window(&src, Affine::translate((1e19, 0.0)), 64, 64).is_none());
    assert!(sample_window(&src, Affine::translate((-500.0, 20.0)), 64, 64).is_none());
}
