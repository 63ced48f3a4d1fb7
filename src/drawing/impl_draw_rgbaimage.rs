#![allow(non_snake_case)]
use {
  crate::{
    drawing::{Draw, Frame, Shape, Texture},
    geometry::{PixelSpace, P2}
  },
  euclid::{Point2D, Vector2D as V2},
  image::{Pixel, Rgba, RgbaImage}
};

impl<S> Draw for Texture<S, Rgba<u8>>
  where S: Shape + Clone
{
  fn draw(&self, image: &mut RgbaImage, frame: &Frame) {
    let color = self.texture;
    self.shape.clone()
      .texture(move |_: P2<f64>| color)
      .draw(image, frame);
  }
}

/// F: Fn(point) -> Rgba<u8>, with the point in tree coordinates.
impl<S, F> Draw for Texture<S, F>
  where S: Shape,
        F: Fn(P2<f64>) -> Rgba<u8>
{
  fn draw(&self, image: &mut RgbaImage, frame: &Frame) {
    let bounding_box = match frame.pixel_box(self.shape.bounding_box()) {
      Some(x) => x,
      None => return // bounding box has no intersection with the image at all
    };
    let Δp = 1.0 / frame.scale();

    itertools::iproduct!(bounding_box.y_range(), bounding_box.x_range())
      .map(|(y, x)| Point2D::<_, PixelSpace>::new(x, y))
      .for_each(|pixel| {
        // sample at the pixel center
        let p = frame.to_tree(pixel.to_f64() + V2::splat(0.5));
        let sdf = self.shape.sdf(p);
        if sdf > Δp {
          return;
        }
        let tex_px = (self.texture)(p);
        let pixel = image.get_pixel_mut(pixel.x, pixel.y);
        *pixel = sdf_overlay_aa(sdf, Δp, *pixel, tex_px);
      });
  }
}

fn sdf_overlay_aa(sdf: f64, Δp: f64, mut col1: Rgba<u8>, mut col2: Rgba<u8>) -> Rgba<u8> {
  let Δf = (0.5 * Δp - sdf) // antialias
    .clamp(0.0, Δp);
  let alpha = Δf / Δp;
  col2.0[3] = ((col2.0[3] as f64) * alpha) as u8;
  col1.blend(&col2);
  col1
}
