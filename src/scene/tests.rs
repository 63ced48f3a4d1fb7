use {
  super::*,
  anyhow::Result,
  pretty_assertions::assert_eq
};

#[test] fn compose_matches_parts() -> Result<()> {
  let config = Config::default();
  let scene = Scene::compose(17, 20251225, &config)?;
  let tree = Silhouette::new(17, &config.tree)?;
  let layout = placement::place_in(&tree, 20251225, &config.placement)?;
  assert_eq!(scene.silhouette, tree);
  assert_eq!(scene.ornaments, layout.ornaments);
  assert_eq!(scene.item_count(), 17);
  assert_eq!(scene.entrance, None);
  Ok(())
}

#[test] fn same_day_same_scene() -> Result<()> {
  let config = Config::default();
  assert_eq!(Scene::compose(64, 20251224, &config)?, Scene::compose(64, 20251224, &config)?);
  Ok(())
}

#[test] fn svg_structure() -> Result<()> {
  let config = Config::default();
  let scene = Scene::compose(4, 20251225, &config)?
    .with_entrance(Some(EntranceCue { index: 3, duration_ms: 500 }));
  let svg = scene.to_svg();
  assert!(svg.starts_with("<svg "));
  assert!(svg.ends_with("</svg>"));
  assert!(svg.contains("tree-growing"));
  assert_eq!(svg.matches("<polygon class=\"branch-level-").count(), 3);
  assert_eq!(svg.matches("<line class=\"ornament-string\"").count(), 4);
  assert_eq!(svg.matches("<circle ").count(), 4);
  assert_eq!(svg.matches("ornament-new").count(), 1);
  assert!(svg.contains("data-index=\"3\""));
  assert!(svg.contains("class=\"tree-trunk\""));
  Ok(())
}

#[test] fn svg_without_entrance() -> Result<()> {
  let scene = Scene::compose(2, 1, &Config::default())?;
  let svg = scene.to_svg();
  assert!(!svg.contains("tree-growing"));
  assert!(!svg.contains("ornament-new"));
  Ok(())
}

fn photo_data(count: usize) -> PhotoData {
  let mut data = PhotoData::empty(130);
  data.photos = (0..count).map(|i| PhotoRecord {
    id: format!("photo-{i}"),
    image_data: format!("data:image/jpeg;base64,AAA{i}"),
    uploaded_at: String::new(),
    timestamp: None
  }).collect();
  data.metadata.total_count = count;
  data.metadata.last_updated = Some("2025-12-24T18:00:00Z".into());
  data
}

#[test] fn svg_shows_photos_and_metadata() -> Result<()> {
  let scene = Scene::compose(3, 20251225, &Config::default())?.with_photos(&photo_data(3));
  let svg = scene.to_svg();
  assert_eq!(svg.matches("<image ").count(), 3);
  assert_eq!(svg.matches("<clipPath ").count(), 3);
  assert!(svg.contains(r#"href="data:image/jpeg;base64,AAA1""#));
  assert!(svg.contains(r#"clip-path="url(#ornament-clip-2)""#));
  assert!(svg.contains(r#"data-photo-id="photo-0""#));
  assert!(svg.contains(">3 / 130</text>"));
  assert!(svg.contains(r#"data-updated="2025-12-24T18:00:00Z""#));
  assert!(svg.contains(r#"class="last-update""#));
  Ok(())
}

#[test] fn bare_scene_has_count_but_no_images() -> Result<()> {
  let svg = Scene::compose(2, 1, &Config::default())?.to_svg();
  assert!(!svg.contains("<image "));
  assert!(!svg.contains("<defs>"));
  assert!(svg.contains(">2 / 130</text>"));
  assert!(!svg.contains("data-updated"));
  Ok(())
}

#[test] fn photos_follow_ornaments() -> Result<()> {
  // more photos than ornaments: only the first ones are attached
  let scene = Scene::compose(2, 1, &Config::default())?.with_photos(&photo_data(5));
  assert_eq!(scene.photos.len(), 2);
  assert_eq!(scene.photo(1).map(|p| p.id.as_str()), Some("photo-1"));
  assert_eq!(scene.photo(2), None);
  assert_eq!(scene.metadata.as_ref().map(|m| m.total_count), Some(5));
  Ok(())
}

#[test] fn svg_escapes_photo_fields() -> Result<()> {
  let mut data = photo_data(1);
  data.photos[0].id = r#"a"b<c>&d"#.into();
  let svg = Scene::compose(1, 1, &Config::default())?.with_photos(&data).to_svg();
  assert!(svg.contains(r#"data-photo-id="a&quot;b&lt;c&gt;&amp;d""#));
  Ok(())
}

#[test] fn json_roundtrips_through_value() -> Result<()> {
  let scene = Scene::compose(3, 20251225, &Config::default())?;
  let value: serde_json::Value = serde_json::from_str(&scene.to_json()?)?;
  assert_eq!(value["seed"], 20251225);
  assert_eq!(value["ornaments"].as_array().map(Vec::len), Some(3));
  assert_eq!(value["silhouette"]["levels"].as_array().map(Vec::len), Some(3));
  assert!(value.get("photos").is_none());
  Ok(())
}

#[test] fn over_capacity_rejected() {
  assert!(Scene::compose(131, 1, &Config::default()).is_err());
}
