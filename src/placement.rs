//! Seeded ornament placement.
//!
//! Items are placed one after another from a single PRNG stream, so the whole layout is a
//! function of `(item_count, levels, seed)`; item `i` alone cannot be reproduced without
//! placing `0..i` first. Each item gets at most `max_attempts` random candidates, each
//! tested against everything placed so far. When all of them collide the item falls back
//! to a fixed spot on the level's center line, which keeps the work bounded by
//! `item_count * max_attempts` candidates.

use {
  crate::{
    config::PlacementConfig,
    error::{Error, Result},
    geometry::{Circle, TreeSpace, P2},
    prng::Mulberry32,
    seed::Seed,
    silhouette::{Level, Silhouette}
  },
  euclid::{Angle, point2},
  serde::Serialize
};


#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Ornament {
  /// photo ordinal
  pub index: usize,
  pub center: P2<f64>,
  pub radius: f64,
  pub rotation: Angle<f64>,
  /// where the string meets the branch, straight above the center
  pub hang: P2<f64>,
  pub level: usize,
  /// placed by the deterministic fallback, may overlap its neighbours
  pub fallback: bool
}

impl Ornament {
  pub fn circle(&self) -> Circle<f64, TreeSpace> {
    Circle::new(self.center, self.radius)
  }

  pub fn rotation_degrees(&self) -> f64 {
    self.rotation.to_degrees()
  }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlacementStats {
  /// values drawn from the PRNG
  pub draws: u64,
  /// random candidates generated and tested
  pub candidates: u64,
  /// circle-circle collision tests
  pub pair_checks: u64,
  pub fallbacks: usize
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
  pub seed: Seed,
  pub ornaments: Vec<Ornament>,
  pub stats: PlacementStats
}

impl Layout {
  pub fn len(&self) -> usize {
    self.ornaments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ornaments.is_empty()
  }
}

struct Placer<'a> {
  rng: Mulberry32,
  levels: &'a [Level],
  config: &'a PlacementConfig,
  placed: Vec<Ornament>,
  stats: PlacementStats
}

impl<'a> Placer<'a> {
  /// One random candidate: level, vertical fraction, horizontal offset, radius.
  fn candidate(&mut self, index: usize) -> Ornament {
    let config = self.config;
    let level = self.levels[self.rng.next_index(self.levels.len())];
    let t = self.rng.next_unit();
    let local_width = level.local_width(t);
    let x = level.center_x + (self.rng.next_unit() - 0.5) * local_width * config.margin_factor;
    let y = level.y_at(t);
    let radius = config.base_radius + self.rng.next_signed(config.radius_half_band);
    self.ornament(index, point2(x, y), radius, level.index, false)
  }

  fn fallback(&self, index: usize, item_count: usize) -> Ornament {
    let level = self.levels[(index * self.levels.len() / item_count).min(self.levels.len() - 1)];
    let t = index as f64 / item_count as f64;
    self.ornament(index, point2(level.center_x, level.y_at(t)), self.config.base_radius, level.index, true)
  }

  fn ornament(&self, index: usize, center: P2<f64>, radius: f64, level: usize, fallback: bool) -> Ornament {
    Ornament {
      index,
      center,
      radius,
      rotation: Angle::zero(),
      hang: point2(center.x, center.y - self.config.hang_distance),
      level,
      fallback
    }
  }

  fn collides(&mut self, candidate: &Ornament) -> bool {
    let circle = candidate.circle();
    let min_gap = self.config.min_gap;
    let stats = &mut self.stats;
    self.placed.iter().any(|other| {
      stats.pair_checks += 1;
      circle.collides(&other.circle(), min_gap)
    })
  }

  fn place_one(&mut self, index: usize, item_count: usize) -> Ornament {
    let accepted = (0..self.config.max_attempts).find_map(|_| {
      let candidate = self.candidate(index);
      self.stats.candidates += 1;
      (!self.collides(&candidate)).then_some(candidate)
    });
    let mut ornament = accepted.unwrap_or_else(|| {
      tracing::trace!(index, item_count, "placement attempts exhausted, using fallback");
      self.stats.fallbacks += 1;
      self.fallback(index, item_count)
    });
    ornament.rotation = Angle::degrees(self.rng.next_signed(self.config.rotation_half_band));
    ornament
  }
}

/// Place `item_count` ornaments inside `levels`, deterministically for a given `seed`.
///
/// Returns exactly `item_count` ornaments. Fails with [`Error::InvalidLayoutInput`] when
/// there is something to place but no level to place it in, or when a level is degenerate.
pub fn place(item_count: usize, levels: &[Level], seed: Seed, config: &PlacementConfig) -> Result<Layout> {
  config.validate()?;
  if item_count == 0 {
    return Ok(Layout { seed, ornaments: vec![], stats: PlacementStats::default() });
  }
  if levels.is_empty() {
    return Err(Error::invalid_input(format!("no levels to place {item_count} items into")));
  }
  if let Some(level) = levels.iter().find(|l| !valid_level(l)) {
    return Err(Error::invalid_input(format!("degenerate level {}: {level:?}", level.index)));
  }

  let mut placer = Placer {
    rng: Mulberry32::new(seed),
    levels,
    config,
    placed: Vec::with_capacity(item_count),
    stats: PlacementStats::default()
  };
  for index in 0..item_count {
    let ornament = placer.place_one(index, item_count);
    placer.placed.push(ornament);
  }
  placer.stats.draws = placer.rng.draws();

  tracing::debug!(
    item_count, seed,
    fallbacks = placer.stats.fallbacks,
    candidates = placer.stats.candidates,
    "placed ornaments"
  );
  Ok(Layout { seed, ornaments: placer.placed, stats: placer.stats })
}

/// [`place`] with the silhouette's own item count and levels.
pub fn place_in(silhouette: &Silhouette, seed: Seed, config: &PlacementConfig) -> Result<Layout> {
  place(silhouette.item_count, &silhouette.levels, seed, config)
}

fn valid_level(level: &Level) -> bool {
  [level.top_y, level.bottom_y, level.left_x, level.right_x, level.center_x, level.width]
    .iter()
    .all(|v| v.is_finite())
    && level.bottom_y >= level.top_y
    && level.width >= 0.0
}
