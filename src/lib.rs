//! Deterministic placement of photo ornaments on a Christmas tree that grows with the
//! number of photos.
//!
//! The layout is a pure function of `(item_count, seed)`: the silhouette comes from the
//! item count alone ([`silhouette`]), ornament positions from a seeded PRNG stream
//! ([`placement`]), and the seed from the calendar date ([`seed`]). Everyone looking at
//! the tree on the same day sees the same arrangement; tomorrow it is reshuffled.
//!
//! # Basic usage
//! ```
//! # use ornament_tree::{config::Config, error::Result, scene::Scene, seed};
//! # fn main() -> Result<()> {
//! let seed = seed::seed_for_date(seed::parse_date("2025-12-25")?);
//! assert_eq!(seed, 20251225);
//!
//! let scene = Scene::compose(12, seed, &Config::default())?;
//! assert_eq!(scene.ornaments.len(), 12);
//! // the same inputs always give the same scene
//! assert_eq!(scene, Scene::compose(12, seed, &Config::default())?);
//!
//! let svg = scene.to_svg();
//! assert!(svg.starts_with("<svg"));
//! # Ok(())
//! # }
//! ```
//!
//! # Live view
//! [`view::initialize`] polls a [`PhotoSource`](view::PhotoSource), keeps a
//! [`RenderSession`](session::RenderSession) and pushes scenes into a
//! [`SceneSink`](view::SceneSink). Polls only redraw when the fetched bytes changed; when
//! the photo count grows, the newest ornament carries an
//! [`EntranceCue`](growth::EntranceCue) for one render.
//!
//! # Raster output
//! With the `drawing` feature, [`drawing::draw_scene`] rasterizes a scene with the photos
//! as ornament textures.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod config;
pub mod geometry;
pub mod prng;
pub mod seed;
pub mod silhouette;
pub mod placement;
pub mod scene;
pub mod growth;
pub mod photos;
pub mod session;
pub mod view;
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub mod drawing;
