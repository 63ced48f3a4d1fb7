use {
  super::*,
  anyhow::Result,
  pretty_assertions::assert_eq
};

#[test] fn defaults_are_valid() -> Result<()> {
  Config::default().validate()?;
  Ok(())
}

#[test] fn empty_toml_is_default() -> Result<()> {
  assert_eq!(Config::from_toml_str("")?, Config::default());
  Ok(())
}

#[test] fn partial_toml() -> Result<()> {
  let config = Config::from_toml_str(r#"
    [tree]
    max_capacity = 40
    level_policy = { fixed = 4 }

    [placement]
    max_attempts = 12

    [view]
    render_empty_on_unavailable = true
  "#)?;
  assert_eq!(config.tree.max_capacity, 40);
  assert_eq!(config.tree.level_policy, LevelPolicy::Fixed(4));
  assert_eq!(config.tree.min_height, 300.0);
  assert_eq!(config.placement.max_attempts, 12);
  assert_eq!(config.placement.base_radius, 25.0);
  assert!(config.view.render_empty_on_unavailable);
  assert_eq!(config.view.poll_interval(), Duration::from_secs(30));
  Ok(())
}

#[test] fn stepped_policy_from_toml() -> Result<()> {
  let config = Config::from_toml_str("[tree]\nlevel_policy = \"stepped\"")?;
  assert_eq!(config.tree.level_policy, LevelPolicy::Stepped);
  Ok(())
}

#[test] fn stepped_level_counts() {
  let policy = LevelPolicy::Stepped;
  assert_eq!(policy.level_count(0), 3);
  assert_eq!(policy.level_count(20), 3);
  assert_eq!(policy.level_count(21), 5);
  assert_eq!(policy.level_count(70), 5);
  assert_eq!(policy.level_count(71), 7);
  assert_eq!(policy.level_count(130), 7);
  assert_eq!(LevelPolicy::Fixed(9).level_count(1), 9);
}

#[test] fn rejects_bad_values() {
  let cases = [
    "[tree]\nmax_capacity = 0",
    "[tree]\nmin_height = 900.0",
    "[tree]\nlevel_policy = { fixed = 0 }",
    "[tree]\nlevel_policy = { fixed = 33 }",
    "[tree]\nlevel_policy = { fixed = 4294967295 }",
    "[tree]\nlevel_span = 0.5",
    "[placement]\nbase_radius = 0.0",
    "[placement]\nradius_half_band = 30.0",
    "[placement]\nmargin_factor = 1.5",
    "[view]\npoll_interval_ms = 0",
  ];
  for case in cases {
    match Config::from_toml_str(case) {
      Err(Error::InvalidConfig(_)) => {},
      other => panic!("{case:?} should be rejected, got {other:?}")
    }
  }
}

#[test] fn level_count_bounds() -> Result<()> {
  let config = Config::from_toml_str(&format!("[tree]\nlevel_policy = {{ fixed = {MAX_LEVELS} }}"))?;
  assert_eq!(config.tree.level_policy.level_count(5), MAX_LEVELS as usize);
  let huge = TreeConfig::default().with_level_policy(LevelPolicy::Fixed(u32::MAX));
  assert!(matches!(huge.validate(), Err(Error::InvalidConfig(_))));
  Ok(())
}

#[test] fn malformed_toml_is_config_error() {
  assert!(matches!(Config::from_toml_str("[tree"), Err(Error::InvalidConfig(_))));
}

#[test] fn load_from_file() -> Result<()> {
  let dir = tempfile::tempdir()?;
  let path = dir.path().join("tree.toml");
  std::fs::write(&path, "[placement]\nmin_gap = 4.0\n")?;
  let config = Config::load(&path)?;
  assert_eq!(config.placement.min_gap, 4.0);
  assert!(matches!(Config::load(dir.path().join("missing.toml")), Err(Error::InvalidConfig(_))));
  Ok(())
}
