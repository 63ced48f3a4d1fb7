//! Photo data as served by the storage collaborator.
//!
//! ```json
//! { "photos": [ { "id": "...", "imageData": "data:image/jpeg;base64,...",
//!                 "uploadedAt": "2025-12-01T10:00:00Z", "timestamp": 1764583200000 } ],
//!   "metadata": { "totalCount": 1, "maxPhotos": 130, "lastUpdated": "2025-12-01T10:00:00Z" } }
//! ```
//! Only the number of photos and `maxPhotos` matter to the layout; the rest is carried
//! through for whoever draws the ornaments.

use {
  crate::error::{Error, Result},
  serde::{Deserialize, Serialize}
};
#[cfg(feature = "drawing")]
use image::{DynamicImage, GenericImageView, imageops::FilterType};


/// Largest accepted upload, estimated from the base64 length.
pub const MAX_UPLOAD_KB: f64 = 200.0;
/// Side of the square an uploaded photo is cropped and scaled to.
pub const PHOTO_SIZE: u32 = 400;
pub const JPEG_QUALITY: u8 = 80;

const ACCEPTED_PREFIXES: [&str; 2] = ["data:image/jpeg;base64,", "data:image/png;base64,"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
  pub id: String,
  pub image_data: String,
  #[serde(default)]
  pub uploaded_at: String,
  /// milliseconds since the epoch
  #[serde(default)]
  pub timestamp: Option<u64>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
  pub total_count: usize,
  pub max_photos: usize,
  pub last_updated: Option<String>
}

impl Default for Metadata {
  fn default() -> Self {
    Self { total_count: 0, max_photos: 130, last_updated: None }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoData {
  pub photos: Vec<PhotoRecord>,
  pub metadata: Metadata
}

impl PhotoData {
  pub fn empty(max_photos: usize) -> Self {
    Self {
      photos: vec![],
      metadata: Metadata { max_photos, ..Default::default() }
    }
  }

  /// Malformed JSON is [`Error::DataUnavailable`].
  pub fn from_slice(bytes: &[u8]) -> Result<Self> {
    let data: PhotoData = serde_json::from_slice(bytes)?;
    if data.metadata.total_count != data.photos.len() {
      tracing::debug!(
        total_count = data.metadata.total_count,
        photos = data.photos.len(),
        "metadata count disagrees with photo list, using the list"
      );
    }
    Ok(data)
  }

  pub fn item_count(&self) -> usize {
    self.photos.len()
  }

  /// `maxPhotos`, or `fallback` when the collaborator reports zero.
  pub fn capacity_or(&self, fallback: usize) -> usize {
    match self.metadata.max_photos {
      0 => fallback,
      n => n
    }
  }

  /// Number of ornaments to draw: the photo count, clamped to the capacity with a warning.
  pub fn capacity_check(&self, fallback: usize) -> usize {
    let capacity = self.capacity_or(fallback);
    if self.photos.len() > capacity {
      tracing::warn!(photos = self.photos.len(), capacity, "more photos than the tree holds, drawing the first {capacity}");
      capacity
    } else {
      self.photos.len()
    }
  }

  /// No room left, with the same capacity the renderer uses.
  pub fn is_full(&self, fallback: usize) -> bool {
    self.photos.len() >= self.capacity_or(fallback)
  }

  /// Upload-side gate: the tree must have room and the payload must be a small JPEG/PNG data URL.
  pub fn can_accept(&self, image_data: &str, fallback: usize) -> Result<()> {
    if self.is_full(fallback) {
      return Err(Error::rejected("tree is full"));
    }
    validate_image_payload(image_data)
  }
}

/// Check an uploaded data URL without decoding it.
pub fn validate_image_payload(image_data: &str) -> Result<()> {
  let payload = ACCEPTED_PREFIXES.iter()
    .find_map(|prefix| image_data.strip_prefix(prefix))
    .ok_or_else(|| Error::rejected("expected a base64 JPEG or PNG data URL"))?;
  let estimated_kb = image_data.len() as f64 * 0.75 / 1024.0;
  if payload.is_empty() {
    return Err(Error::rejected("empty image"));
  }
  if estimated_kb > MAX_UPLOAD_KB {
    return Err(Error::rejected(format!("image too large ({estimated_kb:.0}KB, max {MAX_UPLOAD_KB:.0}KB)")));
  }
  Ok(())
}

/// Raw bytes of one fetch. Two fetches are the same data only if byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
  bytes: Vec<u8>
}

impl Snapshot {
  pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
    Self { bytes: bytes.into() }
  }

  pub fn bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  pub fn parse(&self) -> Result<PhotoData> {
    PhotoData::from_slice(&self.bytes)
  }

  pub fn human_size(&self) -> String {
    use humansize::{FileSize, file_size_opts};
    self.bytes.len().file_size(file_size_opts::CONVENTIONAL)
      .unwrap_or_else(|_| format!("{} B", self.bytes.len()))
  }
}

impl From<&PhotoData> for Snapshot {
  fn from(data: &PhotoData) -> Self {
    // serializing plain structs of strings and integers cannot fail
    Snapshot::new(serde_json::to_vec(data).unwrap_or_default())
  }
}

/// Decode a `data:image/...;base64,` URL.
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub fn decode_data_url(image_data: &str) -> Result<DynamicImage> {
  use base64::Engine;
  let (_, payload) = image_data.split_once(";base64,")
    .ok_or_else(|| Error::unavailable("image is not a base64 data URL"))?;
  let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())
    .map_err(|e| Error::unavailable(format!("image payload: {e}")))?;
  Ok(image::load_from_memory(&bytes)?)
}

/// Center-crop to a square and scale to `size` x `size`.
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub fn prepare_image(image: &DynamicImage, size: u32) -> DynamicImage {
  let (width, height) = image.dimensions();
  let side = width.min(height);
  image
    .crop_imm((width - side) / 2, (height - side) / 2, side, side)
    .resize_exact(size, size, FilterType::Triangle)
}

/// [`prepare_image`] then encode as a JPEG data URL, ready to upload.
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub fn encode_data_url(image: &DynamicImage) -> Result<String> {
  use base64::Engine;
  let prepared = prepare_image(image, PHOTO_SIZE).to_rgb8();
  let mut buf = vec![];
  image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
    .encode_image(&prepared)?;
  Ok(format!("data:image/jpeg;base64,{}", base64::engine::general_purpose::STANDARD.encode(buf)))
}
