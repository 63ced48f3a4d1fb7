//! Seeded pseudo-random stream.
//!
//! [`Mulberry32`] is a 32-bit state generator with a multiply-xorshift output permutation,
//! bit-exact with the browser implementation the layout was first published with, so a
//! layout computed here matches one computed by the page for the same seed.

use rand::{RngCore, SeedableRng};


const GOLDEN: u32 = 0x6D2B79F5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
  state: u32,
  draws: u64
}

#[inline]
fn permute(state: u32) -> u32 {
  let mut t = (state ^ (state >> 15)).wrapping_mul(1 | state);
  t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
  t ^ (t >> 14)
}

impl Mulberry32 {
  pub fn new(seed: u32) -> Self {
    Self { state: seed, draws: 0 }
  }

  /// Value in `[0, 1)`, advances the stream by one.
  #[inline]
  pub fn next_unit(&mut self) -> f64 {
    self.next_u32() as f64 / 4294967296.0
  }

  /// `next_unit` mapped to `[-half_band, half_band)`.
  #[inline]
  pub fn next_signed(&mut self, half_band: f64) -> f64 {
    (self.next_unit() - 0.5) * 2.0 * half_band
  }

  /// Uniform index in `0..len`. `len` must be non-zero.
  #[inline]
  pub fn next_index(&mut self, len: usize) -> usize {
    ((self.next_unit() * len as f64) as usize).min(len - 1)
  }

  /// Number of values drawn so far.
  pub fn draws(&self) -> u64 {
    self.draws
  }

  /// The `index`-th value (0-based) of the stream seeded with `seed`, without
  /// materializing the preceding ones.
  pub fn value_at(seed: u32, index: u64) -> f64 {
    let state = seed.wrapping_add(GOLDEN.wrapping_mul((index as u32).wrapping_add(1)));
    permute(state) as f64 / 4294967296.0
  }
}

impl RngCore for Mulberry32 {
  #[inline]
  fn next_u32(&mut self) -> u32 {
    self.state = self.state.wrapping_add(GOLDEN);
    self.draws += 1;
    permute(self.state)
  }

  /// Low word first.
  fn next_u64(&mut self) -> u64 {
    let low = self.next_u32() as u64;
    let high = self.next_u32() as u64;
    (high << 32) | low
  }

  fn fill_bytes(&mut self, dest: &mut [u8]) {
    for chunk in dest.chunks_mut(4) {
      let bytes = self.next_u32().to_le_bytes();
      chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
  }

  fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
    self.fill_bytes(dest);
    Ok(())
  }
}

impl SeedableRng for Mulberry32 {
  type Seed = [u8; 4];

  fn from_seed(seed: Self::Seed) -> Self {
    Self::new(u32::from_le_bytes(seed))
  }

  /// Truncates to the low 32 bits, so `seed_from_u64(20251225)` equals `new(20251225)`.
  fn seed_from_u64(state: u64) -> Self {
    Self::new(state as u32)
  }
}
