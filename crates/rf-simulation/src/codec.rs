//! Byte encoding of the fluid field for transmission.
//!
//! Every cell becomes one byte, row-major: the level is scaled by
//! [`SENSITIVITY`], clamped to `0..=255`, and truncated. Byte 0 always means
//! "no fluid". Snapshots can optionally be run-length encoded; decoding the
//! runs gives back exactly the raw bytes.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Bytes per unit of fluid level.
pub const SENSITIVITY: f32 = 25.5;

/// Level at and above which a cell encodes as 255.
pub const SATURATION_LEVEL: f32 = 255.0 / SENSITIVITY;

/// Longest run a single RLE pair can describe.
pub const MAX_RUN: usize = u8::MAX as usize;

/// Quantize one level to a byte. Negative and NaN levels give 0.
pub fn quantize(level: f32) -> u8 {
    // `as` saturates and maps NaN to 0.
    (level * SENSITIVITY).clamp(0.0, 255.0) as u8
}

/// Approximate level a receiver reconstructs from a byte.
pub fn dequantize(byte: u8) -> f32 {
    f32::from(byte) / SENSITIVITY
}

/// Quantize `levels` into `out`, element by element.
///
/// Writes `min(levels.len(), out.len())` bytes.
pub fn encode_into(levels: &[f32], out: &mut [u8]) {
    for (byte, &level) in out.iter_mut().zip(levels) {
        *byte = quantize(level);
    }
}

/// Quantize a whole field.
pub fn encode(levels: &[f32]) -> Vec<u8> {
    levels.iter().copied().map(quantize).collect()
}

/// Reconstruct approximate levels for a grid of `expected_len` cells.
///
/// Buffers shorter than the grid are rejected; trailing bytes past the grid
/// are ignored.
pub fn decode(bytes: &[u8], expected_len: usize) -> SimResult<Vec<f32>> {
    if bytes.len() < expected_len {
        return Err(SimError::TruncatedSnapshot {
            expected: expected_len,
            actual: bytes.len(),
        });
    }
    Ok(bytes[..expected_len].iter().copied().map(dequantize).collect())
}

/// Run-length encode as `(run, value)` pairs with runs in `1..=255`.
pub fn encode_rle(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut rest = bytes;
    while let Some(&value) = rest.first() {
        let run = rest
            .iter()
            .take(MAX_RUN)
            .take_while(|&&b| b == value)
            .count();
        out.push(run as u8);
        out.push(value);
        rest = &rest[run..];
    }
    out
}

/// Expand `(run, value)` pairs, checking the result covers exactly
/// `expected_len` cells.
pub fn decode_rle(data: &[u8], expected_len: usize) -> SimResult<Vec<u8>> {
    let pairs = data.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return Err(SimError::MalformedRle(format!(
            "odd length {}",
            data.len()
        )));
    }
    let mut out = Vec::with_capacity(expected_len);
    for (pair, chunk) in pairs.enumerate() {
        let (run, value) = (usize::from(chunk[0]), chunk[1]);
        if run == 0 {
            return Err(SimError::MalformedRle(format!("zero-length run at pair {pair}")));
        }
        if out.len() + run > expected_len {
            return Err(SimError::MalformedRle(format!(
                "runs overflow a grid of {expected_len} cells"
            )));
        }
        out.resize(out.len() + run, value);
    }
    if out.len() != expected_len {
        return Err(SimError::MalformedRle(format!(
            "runs cover {} cells, expected {expected_len}",
            out.len()
        )));
    }
    Ok(out)
}

/// One exported fluid snapshot: a quantized byte per cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot(Vec<u8>);

impl Snapshot {
    /// Wrap raw snapshot bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// An all-empty snapshot of `len` cells.
    pub fn empty(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// Expand a run-length encoded snapshot of `len` cells.
    pub fn from_rle(data: &[u8], len: usize) -> SimResult<Self> {
        decode_rle(data, len).map(Self)
    }

    /// The raw bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take ownership of the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot covers no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of cells carrying any fluid.
    pub fn occupied(&self) -> usize {
        self.0.iter().filter(|&&b| b != 0).count()
    }

    /// Run-length encoded form.
    pub fn to_rle(&self) -> Vec<u8> {
        encode_rle(&self.0)
    }
}

impl AsRef<[u8]> for Snapshot {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
