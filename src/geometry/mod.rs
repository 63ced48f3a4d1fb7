//! Geometry primitives and the two coordinate spaces.
//!
//! The origin of tree coordinates is the apex of the silhouette, `y` grows downwards.
//! Pixel coordinates only appear when a scene is rasterized.

use {
  std::ops::{Add, Mul, Sub},
  euclid::{Point2D, Box2D, Vector2D as V2, Size2D},
  num_traits::Float
};

#[cfg(test)] mod tests;

/// Pixel coordinate basis
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelSpace;
/// Tree coordinate basis, apex at the origin
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TreeSpace;

pub type P2<T> = Point2D<T, TreeSpace>;

pub trait BoundingBox<T, S> {
  fn bounding_box(&self) -> Box2D<T, S>;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle<T, U> {
  pub xy: Point2D<T, U>,
  pub r: T,
}

impl<T: Float, U> Circle<T, U> {
  pub fn new(xy: Point2D<T, U>, r: T) -> Self {
    Circle { xy, r }
  }

  /// Centers closer than `r1 + r2 + min_gap`.
  pub fn collides(&self, other: &Self, min_gap: T) -> bool {
    collide(self, other, min_gap)
  }
}

/// Circle overlap test with a margin. Symmetric, a circle always collides with itself.
pub fn collide<T: Float, U>(a: &Circle<T, U>, b: &Circle<T, U>, min_gap: T) -> bool {
  a.xy.distance_to(b.xy) < a.r + b.r + min_gap
}

impl<T: Float, S> BoundingBox<T, S> for Circle<T, S> {
  fn bounding_box(&self) -> Box2D<T, S> {
    Box2D::new(
      (self.xy.to_vector() - V2::splat(self.r)).to_point(),
      (self.xy.to_vector() + V2::splat(self.r)).to_point()
    )
  }
}

impl<T: Copy + Mul<Output = T>, U> Mul<T> for Circle<T, U> {
  type Output = Self;

  fn mul(self, rhs: T) -> Self::Output {
    Circle {
      xy: self.xy * rhs,
      r: self.r * rhs
    }
  }
}

/// Filled triangle, used for silhouette levels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle<T, U> {
  pub a: Point2D<T, U>,
  pub b: Point2D<T, U>,
  pub c: Point2D<T, U>,
}

impl<T, U> Triangle<T, U>
  where T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + PartialOrd + num_traits::Zero {
  /// Edge-function test, inclusive of the boundary, either winding.
  pub fn contains(&self, p: Point2D<T, U>) -> bool {
    let edge = |a: Point2D<T, U>, b: Point2D<T, U>|
      (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let (e0, e1, e2) = (edge(self.a, self.b), edge(self.b, self.c), edge(self.c, self.a));
    let zero = T::zero();
    (e0 >= zero && e1 >= zero && e2 >= zero) || (e0 <= zero && e1 <= zero && e2 <= zero)
  }
}

impl<T: Float, S> BoundingBox<T, S> for Triangle<T, S> {
  fn bounding_box(&self) -> Box2D<T, S> {
    Box2D::from_points([self.a, self.b, self.c])
  }
}

impl<T: Copy + Add<Output = T>, S> BoundingBox<T, S> for euclid::Rect<T, S> {
  fn bounding_box(&self) -> Box2D<T, S> {
    self.to_box2d()
  }
}

/// Map a tree point into pixels, fitting `view` into `resolution` and preserving aspect ratio.
pub fn to_pixel_space<T: Float>(
  point: Point2D<T, TreeSpace>,
  view: Size2D<T, TreeSpace>,
  resolution: Size2D<u32, PixelSpace>
) -> Point2D<T, PixelSpace> {
  let (scale, offset) = fit_scale(view, resolution);
  (point.to_vector() * scale).cast_unit().to_point() + offset
}

/// Uniform scale and centering offset that fit `view` inside `resolution`.
pub fn fit_scale<T: Float>(
  view: Size2D<T, TreeSpace>,
  resolution: Size2D<u32, PixelSpace>
) -> (T, V2<T, PixelSpace>) {
  let res = resolution.cast::<T>();
  let scale = (res.width / view.width).min(res.height / view.height);
  let two = T::one() + T::one();
  let offset = V2::new(
    (res.width - view.width * scale) / two,
    (res.height - view.height * scale) / two
  );
  (scale, offset)
}

pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
  a + (b - a) * t
}
