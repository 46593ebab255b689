//! Binary path blob.
//!
//! Little-endian, f32 components:
//!
//! ```text
//! offset  size  field
//! 0       1     easing (0 = Linear, 1 = Bezier, 2 = CubicSpline)
//! 1       4     delay    (i32, seconds)
//! 5       4     interval (i32)
//! 9       4     position count N (i32)
//! 13      12*N  positions x, y, z
//! 13+12N  4     rotation count M (i32)
//! 17+12N  8*M   rotations x, y
//! ```
//!
//! Decoding never generates; callers regenerate explicitly.

use std::io::{Cursor, Read};

use crate::data::{EasingMode, PathDefinition, Vec2, Vec3};
use crate::error::{PathError, PathResult};

/// Size of a blob with no positions and no rotations.
pub const MIN_ENCODED_LEN: usize = 1 + 4 + 4 + 4 + 4;

const POSITION_LEN: usize = 12;
const ROTATION_LEN: usize = 8;

pub fn encode(def: &PathDefinition) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        MIN_ENCODED_LEN + def.positions.len() * POSITION_LEN + def.rotations.len() * ROTATION_LEN,
    );
    out.push(def.easing.as_byte());
    out.extend_from_slice(&def.delay.to_le_bytes());
    out.extend_from_slice(&def.interval.to_le_bytes());

    out.extend_from_slice(&count_prefix(def.positions.len()));
    for p in &def.positions {
        for c in [p.x, p.y, p.z] {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }

    out.extend_from_slice(&count_prefix(def.rotations.len()));
    for r in &def.rotations {
        for c in [r.x, r.y] {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    out
}

/// Signed little-endian element count. Paths are capped far below `i32::MAX`.
fn count_prefix(len: usize) -> [u8; 4] {
    debug_assert!(len <= i32::MAX as usize, "sequence too long to encode: {len}");
    i32::try_from(len).unwrap_or(i32::MAX).to_le_bytes()
}

pub fn decode(bytes: &[u8]) -> PathResult<PathDefinition> {
    if bytes.len() < MIN_ENCODED_LEN {
        return Err(PathError::TruncatedData {
            len: bytes.len(),
            min: MIN_ENCODED_LEN,
        });
    }
    let mut reader = BlobReader::new(bytes);

    let easing_byte = reader.u8()?;
    let easing = EasingMode::from_byte(easing_byte).ok_or_else(|| PathError::MalformedData {
        reason: format!("unknown easing mode {easing_byte}"),
    })?;
    let delay = reader.i32()?;
    let interval = reader.i32()?;

    let n = reader.count(POSITION_LEN, "position")?;
    let mut positions = Vec::with_capacity(n);
    for _ in 0..n {
        positions.push(Vec3::new(reader.f32()?, reader.f32()?, reader.f32()?));
    }

    let m = reader.count(ROTATION_LEN, "rotation")?;
    let mut rotations = Vec::with_capacity(m);
    for _ in 0..m {
        rotations.push(Vec2::new(reader.f32()?, reader.f32()?));
    }

    if reader.remaining() > 0 {
        log::debug!("ignoring {} trailing bytes in path blob", reader.remaining());
    }

    Ok(PathDefinition {
        easing,
        delay,
        interval,
        positions,
        rotations,
    })
}

struct BlobReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BlobReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    fn array<const N: usize>(&mut self) -> PathResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.cursor.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn u8(&mut self) -> PathResult<u8> {
        Ok(self.array::<1>()?[0])
    }

    fn i32(&mut self) -> PathResult<i32> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn f32(&mut self) -> PathResult<f32> {
        Ok(f32::from_le_bytes(self.array()?))
    }

    /// Read an element count and check the remaining bytes can hold it.
    fn count(&mut self, element_len: usize, what: &str) -> PathResult<usize> {
        let raw = self.i32()?;
        let count = usize::try_from(raw).map_err(|_| PathError::MalformedData {
            reason: format!("negative {what} count {raw}"),
        })?;
        let needed = count.saturating_mul(element_len);
        if needed > self.remaining() {
            return Err(PathError::MalformedData {
                reason: format!(
                    "{what} count {count} needs {needed} bytes, {} remain",
                    self.remaining()
                ),
            });
        }
        Ok(count)
    }
}
