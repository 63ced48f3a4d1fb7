//! Tree geometry as a function of the item count.
//!
//! The tree grows linearly from `min_height` (empty) to `max_height` (at capacity) and is
//! split into horizontal levels. Each level is a triangle with its apex at the top center
//! and its base at the bottom; consecutive levels overlap so the outline interlocks, and
//! together they cover `[0, height - trunk_height]` without gaps. Levels widen towards
//! the base.

use {
  crate::{
    config::TreeConfig,
    error::{Error, Result},
    geometry::{BoundingBox, Triangle, TreeSpace, P2, lerp}
  },
  euclid::{Box2D, Rect, Point2D, Size2D, point2},
  serde::Serialize
};


/// Narrowest a level may get, relative to the tree width.
const MIN_LEVEL_FRACTION: f64 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Level {
  /// 0 is the top level
  pub index: usize,
  pub top_y: f64,
  pub bottom_y: f64,
  pub left_x: f64,
  pub right_x: f64,
  pub center_x: f64,
  /// width at `bottom_y`
  pub width: f64
}

impl Level {
  pub fn height(&self) -> f64 {
    self.bottom_y - self.top_y
  }

  /// Width of the level at vertical fraction `t`, 0 at the apex.
  pub fn local_width(&self, t: f64) -> f64 {
    self.width * t.clamp(0.0, 1.0)
  }

  pub fn y_at(&self, t: f64) -> f64 {
    lerp(self.top_y, self.bottom_y, t)
  }

  pub fn triangle(&self) -> Triangle<f64, TreeSpace> {
    Triangle {
      a: point2(self.center_x, self.top_y),
      b: point2(self.left_x, self.bottom_y),
      c: point2(self.right_x, self.bottom_y)
    }
  }

  /// Inside the level's axis-aligned bounds.
  pub fn bounds_contain(&self, p: P2<f64>) -> bool {
    (self.left_x..=self.right_x).contains(&p.x) && (self.top_y..=self.bottom_y).contains(&p.y)
  }
}

impl BoundingBox<f64, TreeSpace> for Level {
  fn bounding_box(&self) -> Box2D<f64, TreeSpace> {
    Box2D::new(point2(self.left_x, self.top_y), point2(self.right_x, self.bottom_y))
  }
}

/// Overall height for `item_count` items, linear between the configured bounds.
pub fn tree_height(item_count: usize, config: &TreeConfig) -> f64 {
  let fill = item_count.min(config.max_capacity) as f64 / config.max_capacity.max(1) as f64;
  lerp(config.min_height, config.max_height, fill)
}

/// Level bounds for a tree of the given size.
pub fn levels(level_count: usize, tree_width: f64, available_height: f64, config: &TreeConfig) -> Vec<Level> {
  if level_count == 0 {
    return vec![];
  }
  let level_height = available_height / (config.level_step * (level_count - 1) as f64 + config.level_span);
  let center_x = tree_width / 2.0;

  (0..level_count)
    .map(|index| {
      let steps_from_base = (level_count - 1 - index) as f64;
      let fraction = (config.base_width_fraction - steps_from_base * config.level_taper)
        .max(MIN_LEVEL_FRACTION.min(config.base_width_fraction));
      let width = tree_width * fraction;
      let top_y = index as f64 * config.level_step * level_height;
      let bottom_y = if index == level_count - 1 {
        available_height
      } else {
        top_y + config.level_span * level_height
      };
      Level {
        index,
        top_y,
        bottom_y,
        left_x: center_x - width / 2.0,
        right_x: center_x + width / 2.0,
        center_x,
        width
      }
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Silhouette {
  pub item_count: usize,
  pub capacity: usize,
  pub height: f64,
  pub width: f64,
  pub trunk: Rect<f64, TreeSpace>,
  /// top to bottom
  pub levels: Vec<Level>,
  /// center of the star above the apex
  pub star: P2<f64>,
  pub star_radius: f64,
  /// full drawable area, star and base margin included
  pub view_box: Box2D<f64, TreeSpace>
}

impl Silhouette {
  /// Rejects counts above capacity with [`Error::InvalidLayoutInput`].
  pub fn new(item_count: usize, config: &TreeConfig) -> Result<Self> {
    config.validate()?;
    if item_count > config.max_capacity {
      return Err(Error::invalid_input(format!(
        "item count {item_count} exceeds capacity {}", config.max_capacity
      )));
    }

    let height = tree_height(item_count, config);
    let width = height * config.width_ratio;
    let trunk_height = height * config.trunk_ratio;
    let trunk_width = width * config.trunk_width_ratio;
    let level_count = config.level_policy.level_count(item_count);

    Ok(Self {
      item_count,
      capacity: config.max_capacity,
      height,
      width,
      trunk: Rect::new(
        point2((width - trunk_width) / 2.0, height - trunk_height),
        Size2D::new(trunk_width, trunk_height)
      ),
      levels: levels(level_count, width, height - trunk_height, config),
      star: point2(width / 2.0, -config.star_offset / 2.0),
      star_radius: (config.star_offset / 2.0).min(width / 2.0),
      view_box: Box2D::new(
        point2(0.0, -config.star_offset),
        point2(width, height + config.base_margin)
      )
    })
  }

  /// Like [`Silhouette::new`], but counts above capacity are clamped.
  pub fn clamped(item_count: usize, config: &TreeConfig) -> Result<Self> {
    if item_count > config.max_capacity {
      tracing::warn!(item_count, capacity = config.max_capacity, "clamping item count to capacity");
    }
    Self::new(item_count.min(config.max_capacity), config)
  }

  pub fn view_size(&self) -> Size2D<f64, TreeSpace> {
    self.view_box.size()
  }

  /// Five-pointed star outline, outer points only, as drawn above the apex.
  pub fn star_points(&self) -> [P2<f64>; 5] {
    use std::f64::consts::PI;
    let mut points = [Point2D::origin(); 5];
    for (i, p) in points.iter_mut().enumerate() {
      let angle = (i as f64 * 4.0 * PI) / 5.0 - PI / 2.0;
      *p = self.star + euclid::vec2(angle.cos(), angle.sin()) * self.star_radius;
    }
    points
  }

  pub fn level_containing(&self, p: P2<f64>) -> Option<&Level> {
    self.levels.iter().find(|level| level.bounds_contain(p))
  }
}

impl BoundingBox<f64, TreeSpace> for Silhouette {
  fn bounding_box(&self) -> Box2D<f64, TreeSpace> {
    self.levels.iter()
      .map(|level| level.bounding_box())
      .fold(self.trunk.to_box2d(), |a, b| a.union(&b))
  }
}
