//! Drawable scene: silhouette, placed ornaments and the entrance cue, in tree coordinates.

use {
  crate::{
    config::Config,
    error::Result,
    geometry::P2,
    growth::EntranceCue,
    photos::{Metadata, PhotoData, PhotoRecord},
    placement::{self, Ornament, PlacementStats},
    seed::Seed,
    silhouette::Silhouette
  },
  itertools::Itertools,
  serde::Serialize,
  std::fmt::{self, Display, Formatter}
};

#[cfg(test)] mod tests;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
  pub seed: Seed,
  pub silhouette: Silhouette,
  pub ornaments: Vec<Ornament>,
  pub stats: PlacementStats,
  pub entrance: Option<EntranceCue>,
  /// photo for ornament `i` at `photos[i]`; empty for a scene built from a bare count
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub photos: Vec<PhotoRecord>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub metadata: Option<Metadata>
}

impl Scene {
  /// Recompute silhouette and layout from scratch. Counts above capacity are rejected.
  pub fn compose(item_count: usize, seed: Seed, config: &Config) -> Result<Self> {
    let silhouette = Silhouette::new(item_count, &config.tree)?;
    let layout = placement::place_in(&silhouette, seed, &config.placement)?;
    Ok(Self {
      seed,
      silhouette,
      ornaments: layout.ornaments,
      stats: layout.stats,
      entrance: None,
      photos: vec![],
      metadata: None
    })
  }

  /// Attach the photos behind the ornaments, in order, and the collaborator's metadata.
  pub fn with_photos(mut self, data: &PhotoData) -> Self {
    self.photos = data.photos.iter().take(self.ornaments.len()).cloned().collect();
    self.metadata = Some(data.metadata.clone());
    self
  }

  pub fn photo(&self, index: usize) -> Option<&PhotoRecord> {
    self.photos.get(index)
  }

  pub fn with_entrance(mut self, entrance: Option<EntranceCue>) -> Self {
    self.entrance = entrance;
    self
  }

  pub fn item_count(&self) -> usize {
    self.ornaments.len()
  }

  pub fn is_new(&self, index: usize) -> bool {
    self.entrance.is_some_and(|cue| cue.index == index)
  }

  pub fn svg(&self) -> Svg<'_> {
    Svg(self)
  }

  pub fn to_svg(&self) -> String {
    self.svg().to_string()
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

/// SVG rendering of a [`Scene`]: structure and classes only, no styling.
pub struct Svg<'a>(&'a Scene);

/// Escape for attribute values and text nodes.
fn escape(s: &str) -> String {
  s.replace('&', "&amp;")
    .replace('"', "&quot;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
}

fn points(points: impl IntoIterator<Item = P2<f64>>) -> String {
  points.into_iter()
    .map(|p| format!("{:.2},{:.2}", p.x, p.y))
    .join(" ")
}

impl Display for Svg<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let scene = self.0;
    let tree = &scene.silhouette;
    let view = tree.view_box;
    let size = view.size();

    write!(f,
      r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}" preserveAspectRatio="xMidYMid meet" class="christmas-tree{}" data-count="{}" data-capacity="{}""#,
      view.min.x, view.min.y, size.width, size.height,
      if scene.entrance.is_some() { " tree-growing" } else { "" },
      scene.item_count(), tree.capacity
    )?;
    let last_updated = scene.metadata.as_ref().and_then(|m| m.last_updated.as_deref());
    if let Some(updated) = last_updated {
      write!(f, r#" data-updated="{}""#, escape(updated))?;
    }
    f.write_str(">")?;

    if !scene.photos.is_empty() {
      f.write_str("<defs>")?;
      for o in scene.ornaments.iter().filter(|o| scene.photo(o.index).is_some()) {
        write!(f, r#"<clipPath id="ornament-clip-{}"><circle cx="{:.2}" cy="{:.2}" r="{:.2}"/></clipPath>"#,
          o.index, o.center.x, o.center.y, o.radius)?;
      }
      f.write_str("</defs>")?;
    }

    f.write_str(r#"<g class="tree-branches">"#)?;
    for level in &tree.levels {
      let t = level.triangle();
      write!(f, r#"<polygon class="branch-level-{0}" data-level="{0}" points="{1}"/>"#,
        level.index, points([t.a, t.b, t.c]))?;
    }
    f.write_str("</g>")?;

    let trunk = tree.trunk;
    write!(f, r#"<rect class="tree-trunk" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
      trunk.origin.x, trunk.origin.y, trunk.size.width, trunk.size.height)?;
    write!(f, r#"<polygon class="tree-star" points="{}"/>"#, points(tree.star_points()))?;

    f.write_str(r#"<g class="ornament-strings">"#)?;
    for o in &scene.ornaments {
      write!(f, r#"<line class="ornament-string" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
        o.hang.x, o.hang.y, o.center.x, o.center.y)?;
    }
    f.write_str("</g>")?;

    f.write_str(r#"<g class="ornaments">"#)?;
    for o in &scene.ornaments {
      let mut class = String::from("ornament");
      class.push_str(if o.index % 2 == 0 { " ornament-border-gold" } else { " ornament-border-silver" });
      if scene.is_new(o.index) { class.push_str(" ornament-new"); }
      if o.fallback { class.push_str(" ornament-fallback"); }
      let rotate = format!("rotate({:.2} {:.2} {:.2})", o.rotation_degrees(), o.center.x, o.center.y);
      write!(f,
        r#"<circle class="{class}" data-index="{}" cx="{:.2}" cy="{:.2}" r="{:.2}" transform="{rotate}"/>"#,
        o.index, o.center.x, o.center.y, o.radius)?;
      if let Some(photo) = scene.photo(o.index) {
        write!(f,
          r#"<image class="ornament-image" data-index="{0}" data-photo-id="{1}" href="{2}" x="{3:.2}" y="{4:.2}" width="{5:.2}" height="{5:.2}" preserveAspectRatio="xMidYMid slice" clip-path="url(#ornament-clip-{0})" transform="{rotate}"/>"#,
          o.index, escape(&photo.id), escape(&photo.image_data),
          o.center.x - o.radius, o.center.y - o.radius, o.radius * 2.0)?;
      }
    }
    f.write_str("</g>")?;

    // photo count and last update, in the margin below the trunk
    let x = tree.width / 2.0;
    let y = (tree.height + view.max.y) / 2.0;
    write!(f, r#"<text class="photo-count" x="{x:.2}" y="{y:.2}" text-anchor="middle">{} / {}</text>"#,
      scene.item_count(), tree.capacity)?;
    if let Some(updated) = last_updated {
      write!(f, r#"<text class="last-update" x="{x:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
        y + (view.max.y - y) / 2.0, escape(updated))?;
    }
    f.write_str("</svg>")
  }
}
