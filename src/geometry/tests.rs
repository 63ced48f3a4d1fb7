use {
  super::*,
  euclid::point2
};

fn circle(x: f64, y: f64, r: f64) -> Circle<f64, TreeSpace> {
  Circle::new(point2(x, y), r)
}

#[test] fn collide_with_gap() {
  let a = circle(0.0, 0.0, 10.0);
  // centers 25 apart, radii sum 20
  let b = circle(25.0, 0.0, 10.0);
  assert!(!collide(&a, &b, 0.0));
  assert!(!collide(&a, &b, 4.9));
  assert!(collide(&a, &b, 5.1));
  // exactly touching the margin is not a collision
  assert!(!collide(&a, &b, 5.0));
}

#[test] fn collide_is_symmetric() {
  let a = circle(3.0, -4.0, 7.5);
  let b = circle(-10.0, 12.0, 12.0);
  for gap in [0.0, 1.0, 5.0, 10.0, 40.0] {
    assert_eq!(a.collides(&b, gap), b.collides(&a, gap));
  }
}

#[test] fn self_collision() {
  let a = circle(1.0, 1.0, 1.0);
  assert!(a.collides(&a, 0.0));
}

#[test] fn circle_bounding_box() {
  let bb = circle(10.0, 20.0, 5.0).bounding_box();
  assert_eq!(bb.min, point2(5.0, 15.0));
  assert_eq!(bb.max, point2(15.0, 25.0));
}

#[test] fn triangle_contains() {
  let t = Triangle::<f64, TreeSpace> {
    a: point2(50.0, 0.0),
    b: point2(0.0, 100.0),
    c: point2(100.0, 100.0)
  };
  assert!(t.contains(point2(50.0, 50.0)));
  assert!(t.contains(point2(50.0, 0.0)));
  assert!(!t.contains(point2(5.0, 10.0)));
  assert!(!t.contains(point2(50.0, 101.0)));

  let flipped = Triangle { a: t.a, b: t.c, c: t.b };
  assert!(flipped.contains(point2(50.0, 50.0)));
}

#[test] fn fit_preserves_aspect() {
  let view = Size2D::<f64, TreeSpace>::new(100.0, 200.0);
  let resolution = Size2D::<u32, PixelSpace>::new(400, 400);
  let (scale, offset) = fit_scale(view, resolution);
  assert_eq!(scale, 2.0);
  assert_eq!(offset, V2::new(100.0, 0.0));

  let p = to_pixel_space(point2(50.0, 100.0), view, resolution);
  assert_eq!(p, point2(200.0, 200.0));
}

#[test] fn lerp_endpoints() {
  assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
  assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
  assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
}
