//! Rasterizing a [`Scene`] into an `RgbaImage`.
//!
//! Every shape is drawn through its signed distance function: pixels inside get the
//! texture, pixels within half a pixel of the edge get a proportional share of it.

use {
  crate::{
    error::{Error, Result},
    geometry::{BoundingBox, Circle, PixelSpace, TreeSpace, Triangle, P2},
    photos::{self, PhotoData},
    placement::Ornament,
    scene::Scene
  },
  euclid::{Box2D, Point2D, Rect, Rotation2D, Size2D, Vector2D as V2},
  image::{DynamicImage, Rgba, RgbaImage},
  rayon::prelude::*,
  tracing::{debug, warn}
};

mod impl_draw_rgbaimage;
#[cfg(test)] mod tests;

pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);
pub const BRANCH_DARK: Rgba<u8> = Rgba([22, 101, 52, 255]);
pub const BRANCH_LIGHT: Rgba<u8> = Rgba([34, 139, 68, 255]);
pub const TRUNK: Rgba<u8> = Rgba([101, 67, 33, 255]);
pub const STAR: Rgba<u8> = Rgba([255, 215, 0, 255]);
pub const STRING: Rgba<u8> = Rgba([200, 200, 200, 255]);
/// ornaments without a photo
pub const BAUBLE: Rgba<u8> = Rgba([200, 30, 45, 255]);

/// Signed distance in tree units, negative inside.
pub trait Sdf {
  fn sdf(&self, p: P2<f64>) -> f64;
}

pub trait Shape: Sdf + BoundingBox<f64, TreeSpace> {
  fn texture<T>(self, texture: T) -> Texture<Self, T> where Self: Sized {
    Texture { shape: self, texture }
  }
}
impl<S> Shape for S where S: Sdf + BoundingBox<f64, TreeSpace> {}

pub trait Draw {
  fn draw(&self, image: &mut RgbaImage, frame: &Frame);
}

#[derive(Debug, Copy, Clone)]
pub struct Texture<S, T> {
  pub shape: S,
  pub texture: T
}

impl Sdf for Circle<f64, TreeSpace> {
  fn sdf(&self, p: P2<f64>) -> f64 {
    p.distance_to(self.xy) - self.r
  }
}

/// Closed polygon, filled with the nonzero rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
  pub points: Vec<P2<f64>>
}

impl Polygon {
  fn edges(&self) -> impl Iterator<Item = (P2<f64>, P2<f64>)> + '_ {
    self.points.iter().copied()
      .zip(self.points.iter().copied().cycle().skip(1))
  }

  pub fn winding_number(&self, p: P2<f64>) -> i32 {
    self.edges().fold(0, |winding, (a, b)| {
      let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
      match (a.y <= p.y, b.y > p.y) {
        (true, true) if side > 0.0 => winding + 1,
        (false, false) if side < 0.0 => winding - 1,
        _ => winding
      }
    })
  }
}

impl Sdf for Polygon {
  fn sdf(&self, p: P2<f64>) -> f64 {
    let distance = self.edges()
      .map(|(a, b)| segment_distance(p, a, b))
      .fold(f64::INFINITY, f64::min);
    if self.winding_number(p) != 0 { -distance } else { distance }
  }
}

impl BoundingBox<f64, TreeSpace> for Polygon {
  fn bounding_box(&self) -> Box2D<f64, TreeSpace> {
    Box2D::from_points(&self.points)
  }
}

impl From<Triangle<f64, TreeSpace>> for Polygon {
  fn from(t: Triangle<f64, TreeSpace>) -> Self {
    Polygon { points: vec![t.a, t.b, t.c] }
  }
}

impl From<Rect<f64, TreeSpace>> for Polygon {
  fn from(r: Rect<f64, TreeSpace>) -> Self {
    let (min, max) = (r.min(), r.max());
    Polygon { points: vec![min, euclid::point2(max.x, min.y), max, euclid::point2(min.x, max.y)] }
  }
}

/// Line segment with round caps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
  pub a: P2<f64>,
  pub b: P2<f64>,
  pub half_width: f64
}

impl Sdf for Segment {
  fn sdf(&self, p: P2<f64>) -> f64 {
    segment_distance(p, self.a, self.b) - self.half_width
  }
}

impl BoundingBox<f64, TreeSpace> for Segment {
  fn bounding_box(&self) -> Box2D<f64, TreeSpace> {
    Box2D::from_points([self.a, self.b]).inflate(self.half_width, self.half_width)
  }
}

fn segment_distance(p: P2<f64>, a: P2<f64>, b: P2<f64>) -> f64 {
  let ab = b - a;
  let len2 = ab.square_length();
  if len2 == 0.0 {
    return p.distance_to(a);
  }
  let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
  p.distance_to(a + ab * t)
}

/// Tree to pixel mapping: the scene's view box fitted into the image, aspect ratio kept.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
  origin: P2<f64>,
  scale: f64,
  offset: V2<f64, PixelSpace>,
  resolution: Size2D<u32, PixelSpace>
}

impl Frame {
  pub fn fit(view_box: Box2D<f64, TreeSpace>, resolution: Size2D<u32, PixelSpace>) -> Self {
    let (scale, offset) = crate::geometry::fit_scale(view_box.size(), resolution);
    Self { origin: view_box.min, scale, offset, resolution }
  }

  /// Pixels per tree unit.
  pub fn scale(&self) -> f64 {
    self.scale
  }

  pub fn to_pixel(&self, p: P2<f64>) -> Point2D<f64, PixelSpace> {
    ((p - self.origin) * self.scale).cast_unit().to_point() + self.offset
  }

  pub fn to_tree(&self, p: Point2D<f64, PixelSpace>) -> P2<f64> {
    self.origin + ((p - self.offset).to_vector() / self.scale).cast_unit()
  }

  /// Pixels covered by `bounds`, clipped to the image. `None` when off screen.
  pub fn pixel_box(&self, bounds: Box2D<f64, TreeSpace>) -> Option<Box2D<u32, PixelSpace>> {
    Box2D::new(self.to_pixel(bounds.min), self.to_pixel(bounds.max))
      .inflate(1.0, 1.0)
      .round_out()
      .intersection(&Box2D::from_size(self.resolution.to_f64()))
      .map(|b| b.to_u32())
  }
}

/// Cover `photo` with a square `side` x `side` texture.
pub fn prepare_texture(photo: &DynamicImage, side: u32) -> RgbaImage {
  photos::prepare_image(photo, side.max(1)).to_rgba8()
}

/// Sample a photo texture laid over `ornament`, turned by its rotation.
pub fn photo_sampler<'a>(ornament: &Ornament, photo: &'a RgbaImage) -> impl Fn(P2<f64>) -> Rgba<u8> + 'a {
  let center = ornament.center;
  let diameter = ornament.radius * 2.0;
  let unrotate = Rotation2D::<f64, TreeSpace, TreeSpace>::new(-ornament.rotation);
  let (width, height) = photo.dimensions();
  move |p| {
    let local = unrotate.transform_vector(p - center) / diameter;
    let x = ((local.x + 0.5).clamp(0.0, 1.0) * width as f64) as u32;
    let y = ((local.y + 0.5).clamp(0.0, 1.0) * height as f64) as u32;
    *photo.get_pixel(x.min(width - 1), y.min(height - 1))
  }
}

/// Decode every photo's data URL, in parallel. Photos that fail to decode are logged and
/// drawn as plain baubles.
pub fn decode_textures(data: &PhotoData) -> Vec<Option<DynamicImage>> {
  data.photos.par_iter()
    .map(|photo| match photos::decode_data_url(&photo.image_data) {
      Ok(image) => Some(image),
      Err(e) => {
        warn!(id = %photo.id, "{e}");
        None
      }
    })
    .collect()
}

/// Draw `scene` at `resolution`. `textures[i]` is the photo for ornament `i`.
pub fn draw_scene(
  scene: &Scene,
  textures: &[Option<DynamicImage>],
  resolution: Size2D<u32, PixelSpace>
) -> Result<RgbaImage> {
  if resolution.width == 0 || resolution.height == 0 {
    return Err(Error::invalid_input("resolution must be non-zero"));
  }
  let tree = &scene.silhouette;
  let frame = Frame::fit(tree.view_box, resolution);
  let mut image = RgbaImage::from_pixel(resolution.width, resolution.height, BACKGROUND);

  Polygon::from(tree.trunk).texture(TRUNK).draw(&mut image, &frame);
  tree.levels.iter().for_each(|level| {
    let color = if level.index % 2 == 0 { BRANCH_DARK } else { BRANCH_LIGHT };
    Polygon::from(level.triangle()).texture(color).draw(&mut image, &frame);
  });
  Polygon { points: tree.star_points().to_vec() }.texture(STAR).draw(&mut image, &frame);

  // photos are scaled once to their on-screen size
  let prepared = scene.ornaments.par_iter()
    .map(|o| {
      let side = (o.radius * 2.0 * frame.scale()).ceil() as u32;
      textures.get(o.index)
        .and_then(Option::as_ref)
        .map(|photo| prepare_texture(photo, side))
    })
    .collect::<Vec<_>>();

  for (ornament, texture) in scene.ornaments.iter().zip(&prepared) {
    Segment { a: ornament.hang, b: ornament.center, half_width: 0.75 }
      .texture(STRING)
      .draw(&mut image, &frame);
    match texture {
      Some(texture) => ornament.circle()
        .texture(photo_sampler(ornament, texture))
        .draw(&mut image, &frame),
      None => ornament.circle().texture(BAUBLE).draw(&mut image, &frame)
    }
    if scene.is_new(ornament.index) {
      Ring { circle: ornament.circle(), half_width: 1.5 }
        .texture(STAR)
        .draw(&mut image, &frame);
    }
  }
  debug!(
    ornaments = scene.ornaments.len(),
    photos = prepared.iter().flatten().count(),
    width = resolution.width,
    height = resolution.height,
    "scene drawn"
  );
  Ok(image)
}

/// Outline of a circle, marks the newest ornament.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ring {
  pub circle: Circle<f64, TreeSpace>,
  pub half_width: f64
}

impl Sdf for Ring {
  fn sdf(&self, p: P2<f64>) -> f64 {
    self.circle.sdf(p).abs() - self.half_width
  }
}

impl BoundingBox<f64, TreeSpace> for Ring {
  fn bounding_box(&self) -> Box2D<f64, TreeSpace> {
    self.circle.bounding_box().inflate(self.half_width, self.half_width)
  }
}
