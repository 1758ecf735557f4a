#![allow(clippy::float_cmp)]

use catalog::tree::BoundingBox;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Coordinate conversions ---

#[test]
fn screen_to_world_identity() {
    let cam = Camera::default();
    let world = cam.screen_to_world(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(20.0, 10.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 3.0 };
    let screen = cam.world_to_screen(Point::new(5.0, 5.0));
    assert!(approx_eq(screen.x, 35.0));
    assert!(approx_eq(screen.y, 25.0));
}

#[test]
fn conversions_round_trip() {
    let cam = Camera { pan_x: 13.7, pan_y: -42.3, zoom: 0.75 };
    let world = Point::new(333.3, -999.9);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(point_approx_eq(world, back));
}

#[test]
fn screen_dist_to_world_divides_by_zoom() {
    let cam = Camera { pan_x: 999.0, pan_y: -999.0, zoom: 4.0 };
    assert!(approx_eq(cam.screen_dist_to_world(8.0), 2.0));
}

// --- Fitting ---

fn wide_box() -> BoundingBox {
    BoundingBox { top: 0.0, left: 0.0, bottom: 368.0, right: 664.0 }
}

#[test]
fn fit_picks_the_more_restrictive_axis() {
    // 1080 / (368 - 4) ≈ 2.967 vs 1920 / 664 ≈ 2.891: width binds.
    let cam = Camera::fit(SurfaceSize::new(1920.0, 1080.0), wide_box()).unwrap();
    assert!(approx_eq(cam.zoom, 1920.0 / 664.0));
}

#[test]
fn fit_centres_the_box() {
    let cam = Camera::fit(SurfaceSize::new(1920.0, 1080.0), wide_box()).unwrap();
    // Width binds exactly, so the box spans the full surface width.
    assert!(approx_eq(cam.pan_x, 0.0));
    // The inset-reduced box centre (y = 182) lands on the surface centre.
    let centre = cam.world_to_screen(Point::new(332.0, 182.0));
    assert!(approx_eq(centre.x, 960.0));
    assert!(approx_eq(centre.y, 540.0));
}

#[test]
fn fit_height_bound_box() {
    let bbox = BoundingBox { top: 0.0, left: 0.0, bottom: 104.0, right: 100.0 };
    let cam = Camera::fit(SurfaceSize::new(1000.0, 500.0), bbox).unwrap();
    // 500 / (104 - 4) = 5 vs 1000 / 100 = 10: height binds.
    assert!(approx_eq(cam.zoom, 5.0));
}

#[test]
fn fit_is_idempotent() {
    let surface = SurfaceSize::new(1283.0, 747.0);
    let bbox = BoundingBox { top: -12.5, left: 40.0, bottom: 391.0, right: 1031.5 };
    let a = Camera::fit(surface, bbox).unwrap();
    let b = Camera::fit(surface, bbox).unwrap();
    // Bit-identical, not merely approximately equal.
    assert_eq!(a, b);
}

#[test]
fn fit_never_overflows_the_surface() {
    let cases = [
        (SurfaceSize::new(1920.0, 1080.0), wide_box()),
        (
            SurfaceSize::new(320.0, 180.0),
            BoundingBox { top: 8.0, left: -40.0, bottom: 500.0, right: 20.0 },
        ),
        (
            SurfaceSize::new(747.0, 1283.0),
            BoundingBox { top: 0.0, left: 0.0, bottom: 23.0, right: 4000.0 },
        ),
    ];
    for (surface, bbox) in cases {
        let cam = Camera::fit(surface, bbox).unwrap();
        assert!(bbox.width() * cam.zoom <= surface.width + EPSILON);
        assert!((bbox.height() - 4.0) * cam.zoom <= surface.height + EPSILON);
    }
}

#[test]
fn fit_rejects_a_zero_surface() {
    let err = Camera::fit(SurfaceSize::new(0.0, 0.0), wide_box()).unwrap_err();
    assert!(matches!(err, FitError::DegenerateExtent { .. }));
}

#[test]
fn fit_rejects_a_box_no_taller_than_the_inset() {
    let bbox = BoundingBox { top: 0.0, left: 0.0, bottom: 4.0, right: 100.0 };
    let err = Camera::fit(SurfaceSize::new(800.0, 600.0), bbox).unwrap_err();
    assert!(matches!(err, FitError::DegenerateExtent { .. }));
}

#[test]
fn fit_rejects_a_zero_width_box() {
    let bbox = BoundingBox { top: 0.0, left: 10.0, bottom: 100.0, right: 10.0 };
    assert!(Camera::fit(SurfaceSize::new(800.0, 600.0), bbox).is_err());
}
