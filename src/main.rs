use {
  anyhow::{Context, Result},
  async_trait::async_trait,
  clap::{Args, Parser, Subcommand},
  ornament_tree::{
    config::Config,
    growth::EntranceCue,
    photos::Snapshot,
    scene::Scene,
    seed::{self, Seed},
    session::{RenderSession, Trigger},
    view::{self, FileSource, SceneSink}
  },
  std::path::{Path, PathBuf},
  tracing::info,
  tracing_subscriber::EnvFilter
};

#[derive(Parser)]
#[command(version, about = "Day-seeded photo ornaments on a growing tree")]
struct Cli {
  /// TOML configuration, defaults are used for anything missing
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command
}

#[derive(Subcommand)]
enum Command {
  /// Print the scene for a photo count as JSON
  Layout {
    #[arg(long)]
    count: usize,
    /// overrides tree.max_capacity
    #[arg(long)]
    capacity: Option<usize>,
    #[command(flatten)]
    day: Day
  },
  /// Write the tree for a photo data file as SVG
  Svg {
    #[arg(long)]
    input: PathBuf,
    /// stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
    #[command(flatten)]
    day: Day
  },
  /// Rasterize the tree with its photos (needs the `drawing` feature)
  Render {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// image side in pixels
    #[arg(long, default_value_t = 1024)]
    size: u32,
    #[command(flatten)]
    day: Day
  },
  /// Keep an SVG in sync with a photo data file until Ctrl-C
  Watch {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    day: Day
  }
}

#[derive(Args)]
struct Day {
  /// YYYY-MM-DD, today (local time) when omitted
  #[arg(long, conflicts_with = "seed")]
  date: Option<String>,
  /// raw seed, bypassing the calendar
  #[arg(long)]
  seed: Option<Seed>
}

impl Day {
  fn seed(&self) -> Result<Seed> {
    Ok(match (&self.date, self.seed) {
      (_, Some(seed)) => seed,
      (Some(date), None) => seed::seed_for_date(seed::parse_date(date)?),
      (None, None) => seed::today_seed()
    })
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = match &cli.config {
    Some(path) => Config::load(path)?,
    None => Config::default()
  };

  match cli.command {
    Command::Layout { count, capacity, day } => {
      let mut config = config;
      if let Some(capacity) = capacity {
        config.tree.max_capacity = capacity;
      }
      let scene = Scene::compose(count, day.seed()?, &config)?;
      println!("{}", scene.to_json()?);
    }
    Command::Svg { input, out, day } => {
      let scene = scene_from_file(&input, config, day.seed()?)?;
      match out {
        Some(out) => std::fs::write(&out, scene.to_svg())
          .with_context(|| format!("writing {}", out.display()))?,
        None => println!("{}", scene.svg())
      }
    }
    #[cfg(feature = "drawing")]
    Command::Render { input, out, size, day } => {
      use ornament_tree::{drawing, photos::PhotoData};
      let scene = scene_from_file(&input, config, day.seed()?)?;
      let data = PhotoData::from_slice(&std::fs::read(&input)?)?;
      let textures = drawing::decode_textures(&data);
      drawing::draw_scene(&scene, &textures, euclid::size2(size, size))?
        .save(&out)
        .with_context(|| format!("writing {}", out.display()))?;
      info!(ornaments = scene.item_count(), out = %out.display(), "rendered");
    }
    #[cfg(not(feature = "drawing"))]
    Command::Render { .. } => anyhow::bail!("built without the `drawing` feature"),
    Command::Watch { input, out, day } => {
      let seed = day.seed()?;
      tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(watch(config, input, out, seed))?;
    }
  }
  Ok(())
}

fn scene_from_file(input: &Path, config: Config, seed: Seed) -> Result<Scene> {
  let bytes = std::fs::read(input)
    .with_context(|| format!("reading {}", input.display()))?;
  RenderSession::new(config, seed)
    .render(Trigger::Initial, Ok(Snapshot::new(bytes)))?
    .with_context(|| format!("no usable photo data in {}", input.display()))
}

async fn watch(config: Config, input: PathBuf, out: PathBuf, seed: Seed) -> Result<()> {
  let handle = view::initialize(config, FileSource::new(input), SvgFile { path: out, last: None }, || seed)?;
  tokio::signal::ctrl_c().await?;
  info!("stopping");
  handle.teardown().await;
  Ok(())
}

/// Rewrites one SVG file per render.
struct SvgFile {
  path: PathBuf,
  last: Option<Scene>
}

#[async_trait]
impl SceneSink for SvgFile {
  async fn present(&mut self, scene: &Scene) -> ornament_tree::error::Result<()> {
    tokio::fs::write(&self.path, scene.to_svg()).await?;
    info!(ornaments = scene.item_count(), new = ?scene.entrance.map(|cue| cue.index), "tree updated");
    self.last = Some(scene.clone());
    Ok(())
  }

  async fn clear_entrance(&mut self, _cue: EntranceCue) -> ornament_tree::error::Result<()> {
    if let Some(scene) = self.last.take() {
      let scene = scene.with_entrance(None);
      tokio::fs::write(&self.path, scene.to_svg()).await?;
      self.last = Some(scene);
    }
    Ok(())
  }
}
