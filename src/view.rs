//! View driver: fetches photo data, keeps a [`RenderSession`] and pushes scenes to a sink.
//!
//! Nothing runs until [`initialize`] is called, and everything stops with
//! [`ViewHandle::teardown`] or when the handle is dropped. One task owns the session, so
//! renders from polling, refreshes and resizes never overlap.

use {
  crate::{
    config::{Config, ViewConfig},
    error::{Error, Result},
    growth::EntranceCue,
    photos::Snapshot,
    scene::Scene,
    seed::Seed,
    session::{RenderSession, Trigger}
  },
  async_trait::async_trait,
  std::{path::PathBuf, sync::Arc},
  tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior}
  },
  tracing::{debug, error, info}
};


/// Where photo data comes from. Failures should be [`Error::DataUnavailable`].
#[async_trait]
pub trait PhotoSource: Send + Sync + 'static {
  async fn fetch(&self) -> Result<Snapshot>;
}

/// Where scenes go.
#[async_trait]
pub trait SceneSink: Send + 'static {
  async fn present(&mut self, scene: &Scene) -> Result<()>;

  /// The entrance highlight of `cue` has run its course.
  async fn clear_entrance(&mut self, _cue: EntranceCue) -> Result<()> {
    Ok(())
  }
}

/// Photo data read from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
  path: PathBuf
}

impl FileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

#[async_trait]
impl PhotoSource for FileSource {
  async fn fetch(&self) -> Result<Snapshot> {
    let bytes = tokio::fs::read(&self.path).await
      .map_err(|e| Error::unavailable(format!("{}: {e}", self.path.display())))?;
    Ok(Snapshot::new(bytes))
  }
}

/// In-memory photo data, replaceable while a view is running. Clones share the data.
#[derive(Debug, Clone)]
pub struct StaticSource {
  current: Arc<Mutex<Option<Snapshot>>>
}

impl StaticSource {
  pub fn new(snapshot: Snapshot) -> Self {
    Self { current: Arc::new(Mutex::new(Some(snapshot))) }
  }

  /// A source whose fetches fail until [`StaticSource::set`] is called.
  pub fn unavailable() -> Self {
    Self { current: Arc::new(Mutex::new(None)) }
  }

  pub async fn set(&self, snapshot: Snapshot) {
    *self.current.lock().await = Some(snapshot);
  }

  pub async fn clear(&self) {
    *self.current.lock().await = None;
  }
}

#[async_trait]
impl PhotoSource for StaticSource {
  async fn fetch(&self) -> Result<Snapshot> {
    self.current.lock().await.clone()
      .ok_or_else(|| Error::unavailable("no photo data"))
  }
}

#[derive(Debug)]
enum Command {
  Refresh,
  Resize,
  Shutdown
}

/// Control over a running view. Dropping it stops the view without waiting.
#[derive(Debug)]
pub struct ViewHandle {
  commands: mpsc::UnboundedSender<Command>,
  task: Option<JoinHandle<()>>
}

impl ViewHandle {
  /// Fetch and draw now, e.g. right after an upload.
  pub fn refresh(&self) {
    self.send(Command::Refresh)
  }

  /// The viewport changed. Bursts are collapsed into one redraw after `view.resize_quiet_ms`.
  pub fn resize(&self) {
    self.send(Command::Resize)
  }

  /// Stop polling and wait for an in-flight render to finish.
  pub async fn teardown(mut self) {
    self.send(Command::Shutdown);
    if let Some(task) = self.task.take() {
      if let Err(e) = task.await {
        error!("view task ended abnormally: {e}");
      }
    }
  }

  fn send(&self, command: Command) {
    if self.commands.send(command).is_err() {
      debug!("view already stopped");
    }
  }
}

impl Drop for ViewHandle {
  fn drop(&mut self) {
    if let Some(task) = self.task.take() {
      task.abort();
    }
  }
}

/// Start a view: derive the seed once, render immediately, then poll.
///
/// Must be called from within a tokio runtime.
pub fn initialize<S, K>(
  config: Config,
  source: S,
  sink: K,
  seed_fn: impl FnOnce() -> Seed
) -> Result<ViewHandle>
  where S: PhotoSource,
        K: SceneSink
{
  config.validate()?;
  let seed = seed_fn();
  info!(seed, poll_interval_ms = config.view.poll_interval_ms, "starting view");
  let (commands, inbox) = mpsc::unbounded_channel();
  let driver = Driver {
    view: config.view.clone(),
    session: RenderSession::new(config, seed),
    source,
    sink,
    cue_deadline: None
  };
  Ok(ViewHandle {
    commands,
    task: Some(tokio::spawn(driver.run(inbox)))
  })
}

struct Driver<S, K> {
  view: ViewConfig,
  session: RenderSession,
  source: S,
  sink: K,
  cue_deadline: Option<(Instant, EntranceCue)>
}

impl<S: PhotoSource, K: SceneSink> Driver<S, K> {
  async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Command>) {
    let period = self.view.poll_interval();
    let mut poll = time::interval_at(Instant::now() + period, period);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut resize_deadline: Option<Instant> = None;

    self.fetch_and_render(Trigger::Initial).await;
    loop {
      tokio::select! {
        command = inbox.recv() => match command {
          Some(Command::Refresh) => self.fetch_and_render(Trigger::Refresh).await,
          Some(Command::Resize) => resize_deadline = Some(Instant::now() + self.view.resize_quiet()),
          Some(Command::Shutdown) | None => break
        },
        _ = poll.tick() => self.fetch_and_render(Trigger::Poll).await,
        _ = until(resize_deadline) => {
          resize_deadline = None;
          let rendered = self.session.rerender();
          self.present(rendered).await;
        },
        _ = until(self.cue_deadline.map(|(at, _)| at)) => {
          if let Some((_, cue)) = self.cue_deadline.take() {
            self.session.take_cue();
            if let Err(e) = self.sink.clear_entrance(cue).await {
              error!(index = cue.index, "clearing entrance cue: {e}");
            }
          }
        }
      }
    }
    debug!("view stopped");
  }

  async fn fetch_and_render(&mut self, trigger: Trigger) {
    let fetched = self.source.fetch().await;
    if let Ok(snapshot) = &fetched {
      debug!(?trigger, size = %snapshot.human_size(), "fetched photo data");
    }
    let rendered = self.session.render(trigger, fetched);
    self.present(rendered).await;
  }

  async fn present(&mut self, rendered: Result<Option<Scene>>) {
    let scene = match rendered {
      Ok(Some(scene)) => scene,
      Ok(None) => return,
      Err(e) => {
        error!("layout failed: {e}");
        return;
      }
    };
    self.cue_deadline = scene.entrance
      .map(|cue| (Instant::now() + cue.duration(), cue));
    if let Err(e) = self.sink.present(&scene).await {
      error!(count = scene.item_count(), "presenting scene: {e}");
    }
  }
}

async fn until(deadline: Option<Instant>) {
  match deadline {
    Some(deadline) => time::sleep_until(deadline).await,
    None => std::future::pending().await
  }
}
