use {
  super::*,
  crate::{
    config::Config,
    error::Result,
    photos::{PhotoRecord, PHOTO_SIZE}
  },
  euclid::{point2, size2},
  image::{DynamicImage, GenericImageView, Rgba, RgbaImage}
};

const SEED: u32 = 20251225;

fn close(a: Rgba<u8>, b: Rgba<u8>) -> bool {
  a.0.iter().zip(b.0).all(|(&x, y)| x.abs_diff(y) <= 2)
}

fn pixel_at(image: &RgbaImage, frame: &Frame, p: P2<f64>) -> Rgba<u8> {
  let px = frame.to_pixel(p);
  *image.get_pixel(px.x as u32, px.y as u32)
}

#[test] fn frame_fits_view_box() {
  let view = Box2D::new(point2(0.0, -40.0), point2(180.0, 350.0));
  let frame = Frame::fit(view, size2(400, 400));
  let min = frame.to_pixel(view.min);
  let max = frame.to_pixel(view.max);
  // taller than wide: fills the height, centered horizontally
  assert!(min.y.abs() < 1e-9 && (max.y - 400.0).abs() < 1e-9);
  assert!(((min.x + max.x) / 2.0 - 200.0).abs() < 1e-9);

  let p = point2(42.0, 17.5);
  assert!(frame.to_tree(frame.to_pixel(p)).distance_to(p) < 1e-9);
  assert!(frame.pixel_box(Box2D::new(point2(-500.0, -500.0), point2(-400.0, -400.0))).is_none());
}

#[test] fn polygon_distance() {
  let square = Polygon::from(Rect::new(point2(0.0, 0.0), size2(2.0, 2.0)));
  assert!((square.sdf(point2(1.0, 1.0)) + 1.0).abs() < 1e-9);
  assert!((square.sdf(point2(3.0, 1.0)) - 1.0).abs() < 1e-9);
  assert!(square.sdf(point2(2.0, 1.0)).abs() < 1e-9);
}

#[test] fn star_center_is_filled() -> Result<()> {
  let scene = Scene::compose(0, SEED, &Config::default())?;
  let star = Polygon { points: scene.silhouette.star_points().to_vec() };
  assert_ne!(star.winding_number(scene.silhouette.star), 0);
  assert!(star.sdf(scene.silhouette.star) < 0.0);
  Ok(())
}

#[test] fn segment_and_ring() {
  let s = Segment { a: point2(0.0, 0.0), b: point2(10.0, 0.0), half_width: 1.0 };
  assert!((s.sdf(point2(5.0, 3.0)) - 2.0).abs() < 1e-9);
  assert!((s.sdf(point2(13.0, 0.0)) - 2.0).abs() < 1e-9);

  let ring = Ring { circle: Circle::new(point2(0.0, 0.0), 10.0), half_width: 1.0 };
  assert!(ring.sdf(point2(10.0, 0.0)) < 0.0);
  assert!(ring.sdf(point2(0.0, 0.0)) > 0.0);
  assert_eq!(ring, Ring { ..ring });
  assert_ne!(ring, Ring { half_width: 2.0, ..ring });
}

#[test] fn empty_tree() -> Result<()> {
  let scene = Scene::compose(0, SEED, &Config::default())?;
  let resolution = size2(400, 400);
  let image = draw_scene(&scene, &[], resolution)?;
  let frame = Frame::fit(scene.silhouette.view_box, resolution);
  let tree = &scene.silhouette;

  assert!(close(pixel_at(&image, &frame, tree.star), STAR));
  assert!(close(pixel_at(&image, &frame, tree.trunk.center()), TRUNK));
  let bottom = tree.levels.last().expect("levels");
  let inside = point2(bottom.center_x, bottom.bottom_y - 5.0);
  assert!(close(pixel_at(&image, &frame, inside), BRANCH_DARK) || close(pixel_at(&image, &frame, inside), BRANCH_LIGHT));
  assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
  Ok(())
}

#[test] fn baubles_without_photos() -> Result<()> {
  let scene = Scene::compose(5, SEED, &Config::default())?;
  let resolution = size2(300, 500);
  let image = draw_scene(&scene, &[], resolution)?;
  let frame = Frame::fit(scene.silhouette.view_box, resolution);
  for o in scene.ornaments.iter().filter(|o| !o.fallback) {
    assert!(close(pixel_at(&image, &frame, o.center), BAUBLE), "ornament {}", o.index);
  }
  Ok(())
}

#[test] fn photos_fill_ornaments() -> Result<()> {
  let scene = Scene::compose(3, SEED, &Config::default())?;
  let blue = Rgba([10, 20, 230, 255]);
  let photo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 48, blue));
  let textures = vec![Some(photo.clone()), None, Some(photo)];
  let resolution = size2(400, 400);
  let image = draw_scene(&scene, &textures, resolution)?;
  let frame = Frame::fit(scene.silhouette.view_box, resolution);

  let colors = scene.ornaments.iter()
    .map(|o| pixel_at(&image, &frame, o.center))
    .collect::<Vec<_>>();
  assert!(close(colors[0], blue));
  assert!(close(colors[1], BAUBLE));
  assert!(close(colors[2], blue));
  Ok(())
}

#[test] fn newest_ornament_is_ringed() -> Result<()> {
  let base = Scene::compose(4, SEED, &Config::default())?;
  let cue = crate::growth::Growth::between(Some(3), 4).entrance(std::time::Duration::from_millis(500));
  let cued = base.clone().with_entrance(cue);
  let resolution = size2(400, 400);
  let plain = draw_scene(&base, &[], resolution)?;
  let ringed = draw_scene(&cued, &[], resolution)?;

  let frame = Frame::fit(base.silhouette.view_box, resolution);
  let newest = base.ornaments[3];
  let edge = newest.center + euclid::vec2(newest.radius, 0.0);
  assert!(close(pixel_at(&ringed, &frame, edge), STAR));
  assert!(!close(pixel_at(&plain, &frame, edge), STAR));
  Ok(())
}

#[test] fn sampler_follows_rotation() -> Result<()> {
  let scene = Scene::compose(1, SEED, &Config::default())?;
  let ornament = scene.ornaments[0];
  // left half red, right half green
  let photo = RgbaImage::from_fn(20, 20, |x, _| if x < 10 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 255, 0, 255]) });
  let sample = photo_sampler(&ornament, &photo);
  let left = ornament.center - euclid::vec2(ornament.radius * 0.5, 0.0);
  let right = ornament.center + euclid::vec2(ornament.radius * 0.5, 0.0);
  assert_eq!(sample(left), Rgba([255, 0, 0, 255]));
  assert_eq!(sample(right), Rgba([0, 255, 0, 255]));
  Ok(())
}

#[test] fn zero_resolution() -> Result<()> {
  let scene = Scene::compose(0, SEED, &Config::default())?;
  assert!(draw_scene(&scene, &[], size2(0, 100)).is_err());
  Ok(())
}

#[test] fn textures_from_photo_data() -> Result<()> {
  let photo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(32, 32, Rgba([1, 2, 3, 255])));
  let mut data = PhotoData::empty(130);
  data.photos = vec![
    PhotoRecord { id: "ok".into(), image_data: photos::encode_data_url(&photo)?, uploaded_at: String::new(), timestamp: None },
    PhotoRecord { id: "bad".into(), image_data: "data:image/png;base64,AAAA".into(), uploaded_at: String::new(), timestamp: None }
  ];
  let textures = decode_textures(&data);
  assert_eq!(textures.len(), 2);
  assert_eq!(textures[0].as_ref().map(|t| t.width()), Some(PHOTO_SIZE));
  assert!(textures[1].is_none());
  Ok(())
}

#[test] fn saves_png() -> Result<()> {
  let dir = tempfile::tempdir()?;
  let path = dir.path().join("tree.png");
  let scene = Scene::compose(20, SEED, &Config::default())?;
  draw_scene(&scene, &[], size2(256, 256))?.save(&path)?;
  assert_eq!(image::open(&path)?.width(), 256);
  Ok(())
}
