//! Layout and view configuration.
//!
//! All sections deserialize from TOML with every field optional:
//! ```toml
//! [tree]
//! max_capacity = 130
//! level_policy = { fixed = 7 }
//!
//! [placement]
//! max_attempts = 100
//!
//! [view]
//! poll_interval_ms = 30000
//! ```

use {
  crate::error::{Error, Result},
  serde::{Deserialize, Serialize},
  std::{path::Path, time::Duration}
};

#[cfg(test)] mod tests;

/// Upper bound for `LevelPolicy::Fixed`.
pub const MAX_LEVELS: u32 = 32;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  pub tree: TreeConfig,
  pub placement: PlacementConfig,
  pub view: ViewConfig
}

/// How many levels the silhouette is split into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelPolicy {
  /// 3 levels up to 20 items, 5 up to 70, 7 above.
  Stepped,
  Fixed(u32)
}

impl LevelPolicy {
  pub fn level_count(self, item_count: usize) -> usize {
    match self {
      LevelPolicy::Fixed(n) => n as usize,
      LevelPolicy::Stepped => match item_count {
        0..=20 => 3,
        21..=70 => 5,
        _ => 7
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
  pub max_capacity: usize,
  pub min_height: f64,
  pub max_height: f64,
  /// tree width = height * width_ratio
  pub width_ratio: f64,
  /// share of the height taken by the trunk
  pub trunk_ratio: f64,
  pub trunk_width_ratio: f64,
  /// room above the apex for the star
  pub star_offset: f64,
  /// room below the trunk
  pub base_margin: f64,
  pub level_policy: LevelPolicy,
  /// distance between consecutive level tops, in level heights
  pub level_step: f64,
  /// height of one level, in level heights; `> level_step` makes levels interlock
  pub level_span: f64,
  /// width of the bottom level relative to the tree width
  pub base_width_fraction: f64,
  /// width lost per level going up
  pub level_taper: f64
}

impl Default for TreeConfig {
  fn default() -> Self {
    Self {
      max_capacity: 130,
      min_height: 300.0,
      max_height: 800.0,
      width_ratio: 0.6,
      trunk_ratio: 0.15,
      trunk_width_ratio: 0.1,
      star_offset: 40.0,
      base_margin: 50.0,
      level_policy: LevelPolicy::Stepped,
      level_step: 0.85,
      level_span: 1.2,
      base_width_fraction: 0.9,
      level_taper: 0.08
    }}}

impl TreeConfig {
  pub fn with_capacity(mut self, max_capacity: usize) -> Self {
    self.max_capacity = max_capacity;
    self
  }

  pub fn with_level_policy(mut self, policy: LevelPolicy) -> Self {
    self.level_policy = policy;
    self
  }

  pub fn with_height_range(mut self, min_height: f64, max_height: f64) -> Self {
    self.min_height = min_height;
    self.max_height = max_height;
    self
  }

  pub fn validate(&self) -> Result<()> {
    ensure(self.max_capacity > 0, "tree.max_capacity must be positive")?;
    ensure(self.min_height > 0.0 && self.min_height.is_finite(), "tree.min_height must be positive")?;
    ensure(self.max_height >= self.min_height && self.max_height.is_finite(),
      "tree.max_height must not be below tree.min_height")?;
    ensure(self.width_ratio > 0.0, "tree.width_ratio must be positive")?;
    ensure((0.0..1.0).contains(&self.trunk_ratio), "tree.trunk_ratio must be in [0, 1)")?;
    ensure((0.0..=1.0).contains(&self.trunk_width_ratio), "tree.trunk_width_ratio must be in [0, 1]")?;
    ensure(self.star_offset >= 0.0 && self.base_margin >= 0.0, "tree margins must not be negative")?;
    ensure(self.level_step > 0.0, "tree.level_step must be positive")?;
    ensure(self.level_span >= self.level_step, "tree.level_span must not be below tree.level_step")?;
    ensure(self.base_width_fraction > 0.0 && self.base_width_fraction <= 1.0,
      "tree.base_width_fraction must be in (0, 1]")?;
    ensure(self.level_taper >= 0.0, "tree.level_taper must not be negative")?;
    if let LevelPolicy::Fixed(n) = self.level_policy {
      ensure(n > 0, "tree.level_policy must have at least one level")?;
      ensure(n <= MAX_LEVELS, "tree.level_policy has too many levels")?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
  pub base_radius: f64,
  /// radius is drawn from `base_radius ± radius_half_band`
  pub radius_half_band: f64,
  pub max_attempts: u32,
  pub min_gap: f64,
  /// keeps ornaments inset from the silhouette edge
  pub margin_factor: f64,
  /// degrees, rotation is drawn from `± rotation_half_band`
  pub rotation_half_band: f64,
  pub hang_distance: f64
}

impl Default for PlacementConfig {
  fn default() -> Self {
    Self {
      base_radius: 25.0,
      radius_half_band: 5.0,
      max_attempts: 100,
      min_gap: 10.0,
      margin_factor: 0.7,
      rotation_half_band: 7.5,
      hang_distance: 8.0
    }}}

impl PlacementConfig {
  pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
    self.max_attempts = max_attempts;
    self
  }

  pub fn with_min_gap(mut self, min_gap: f64) -> Self {
    self.min_gap = min_gap;
    self
  }

  pub fn with_radius(mut self, base_radius: f64, half_band: f64) -> Self {
    self.base_radius = base_radius;
    self.radius_half_band = half_band;
    self
  }

  pub fn validate(&self) -> Result<()> {
    ensure(self.base_radius > 0.0 && self.base_radius.is_finite(), "placement.base_radius must be positive")?;
    ensure(self.radius_half_band >= 0.0 && self.radius_half_band < self.base_radius,
      "placement.radius_half_band must be in [0, base_radius)")?;
    ensure(self.min_gap >= 0.0 && self.min_gap.is_finite(), "placement.min_gap must not be negative")?;
    ensure(self.margin_factor > 0.0 && self.margin_factor <= 1.0, "placement.margin_factor must be in (0, 1]")?;
    ensure(self.rotation_half_band >= 0.0 && self.rotation_half_band.is_finite(),
      "placement.rotation_half_band must not be negative")?;
    ensure(self.hang_distance >= 0.0 && self.hang_distance.is_finite(), "placement.hang_distance must not be negative")?;
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
  pub poll_interval_ms: u64,
  /// resize bursts closer together than this collapse into one render
  pub resize_quiet_ms: u64,
  pub entrance_ms: u64,
  /// draw an empty tree instead of skipping the render when photo data is unavailable
  pub render_empty_on_unavailable: bool
}

impl Default for ViewConfig {
  fn default() -> Self {
    Self {
      poll_interval_ms: 30_000,
      resize_quiet_ms: 250,
      entrance_ms: 500,
      render_empty_on_unavailable: false
    }}}

impl ViewConfig {
  pub fn poll_interval(&self) -> Duration { Duration::from_millis(self.poll_interval_ms) }
  pub fn resize_quiet(&self) -> Duration { Duration::from_millis(self.resize_quiet_ms) }
  pub fn entrance(&self) -> Duration { Duration::from_millis(self.entrance_ms) }

  pub fn validate(&self) -> Result<()> {
    ensure(self.poll_interval_ms > 0, "view.poll_interval_ms must be positive")
  }
}

impl Config {
  pub fn from_toml_str(s: &str) -> Result<Self> {
    let config: Config = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
      .map_err(|e| Error::invalid_config(format!("{}: {e}", path.display())))?;
    Self::from_toml_str(&text)
  }

  pub fn validate(&self) -> Result<()> {
    self.tree.validate()?;
    self.placement.validate()?;
    self.view.validate()
  }
}

fn ensure(cond: bool, msg: &str) -> Result<()> {
  cond.then_some(()).ok_or_else(|| Error::invalid_config(msg))
}
