use super::*;

fn t(x: f64, y: f64, scale: f64, rotation: f64) -> Transform {
    Transform {
        translation_x: x,
        translation_y: y,
        scale,
        rotation,
    }
}

fn assert_close(a: Point, b: Point, tol: f64) {
    assert!((a - b).hypot() < tol, "{a:?} != {b:?}");
}

#[test]
fn anchor_keeps_local_point_fixed_over_many_steps() {
    let mut cur = t(400.0, 300.0, 0.5, 0.0);
    let anchor = Point::new(523.25, 181.5);
    let local = layer_local_point(cur, anchor, false);

    for _ in 0..20 {
        let next = wheel_step_scale(cur.scale, 1.1, 1.0, ScaleBounds::default());
        cur = anchored_rescale(cur, anchor, next, false);
        assert_close(layer_local_point(cur, anchor, false), local, 1e-6);
    }
    for _ in 0..20 {
        let next = wheel_step_scale(cur.scale, 1.1, -1.0, ScaleBounds::default());
        cur = anchored_rescale(cur, anchor, next, false);
        assert_close(layer_local_point(cur, anchor, false), local, 1e-6);
    }
    assert!((cur.scale - 0.5).abs() < 1e-9);
    assert_close(cur.translation(), Point::new(400.0, 300.0), 1e-6);
}

#[test]
fn anchor_holds_with_rotation() {
    let start = t(100.0, 80.0, 1.3, 33.0);
    let anchor = Point::new(140.0, 20.0);
    let local = layer_local_point(start, anchor, true);
    let out = anchored_rescale(start, anchor, 2.6, true);
    assert_close(layer_local_point(out, anchor, true), local, 1e-9);
    assert_eq!(out.rotation, 33.0);
}

#[test]
fn anchoring_at_center_leaves_translation() {
    let start = t(250.0, 125.0, 1.0, 0.0);
    let out = anchored_rescale(start, start.translation(), 3.0, false);
    assert_eq!(out.translation(), start.translation());
    assert_eq!(out.scale, 3.0);
}

#[test]
fn anchored_rescale_matches_closed_form() {
    // Without rotation: t' = p - (p - t) * s'/s.
    let start = t(10.0, 20.0, 2.0, 0.0);
    let p = Point::new(30.0, -10.0);
    let out = anchored_rescale(start, p, 3.0, false);
    assert_close(out.translation(), Point::new(0.0, 35.0), 1e-9);
}

#[test]
fn wheel_step_clamps_and_ignores_zero() {
    let b = ScaleBounds::default();
    assert_eq!(wheel_step_scale(4.9, 1.1, 1.0, b), 5.0);
    assert_eq!(wheel_step_scale(0.105, 1.1, -3.0, b), 0.1);
    assert_eq!(wheel_step_scale(1.0, 1.1, 0.0, b), 1.0);
    assert!((wheel_step_scale(1.0, 1.1, 120.0, b) - 1.1).abs() < 1e-12);
}
