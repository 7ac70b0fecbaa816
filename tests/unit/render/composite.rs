use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_opacity_blends() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
}

#[test]
fn blit_clips_to_destination() {
    let mut dst = Surface::new(4, 3, [0, 0, 0, 0]);
    let src = Surface::new(3, 3, [9, 9, 9, 255]);
    dst.blit_over(&src, -1, 2, 1.0);

    for y in 0..3u32 {
        for x in 0..4u32 {
            let i = ((y * 4 + x) * 4) as usize;
            let expected = if y == 2 && x < 2 { 255 } else { 0 };
            assert_eq!(dst.data[i + 3], expected, "pixel ({x},{y})");
        }
    }
}

#[test]
fn blit_fully_outside_is_noop() {
    let mut dst = Surface::new(2, 2, [1, 2, 3, 4]);
    let before = dst.clone();
    dst.blit_over(&Surface::new(2, 2, [255, 255, 255, 255]), 5, -9, 1.0);
    assert_eq!(dst, before);
}

#[test]
fn blit_at_extreme_positions_is_noop() {
    let mut dst = Surface::new(3, 3, [0, 0, 0, 0]);
    let before = dst.clone();
    let src = Surface::new(2, 2, [255, 255, 255, 255]);
    for (x, y) in [
        (i64::MAX, 0),
        (0, i64::MAX),
        (i64::MIN, 0),
        (0, i64::MIN),
        (i64::MAX - 1, i64::MIN + 1),
    ] {
        dst.blit_over(&src, x, y, 1.0);
    }
    assert_eq!(dst, before);
}
