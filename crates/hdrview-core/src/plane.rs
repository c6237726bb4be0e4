//! Single-plane sample buffer with explicit row stride.

use half::f16;

use crate::{Error, Result};

/// Per-sample bit width of a plane.
///
/// `Ten` means 10 significant bits stored in the upper bits of a 16-bit
/// word ("P010"-style); `Sixteen` means decoder-produced binary16 floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 8-bit unsigned samples.
    Eight,
    /// 10-bit samples packed in 16-bit words.
    Ten,
    /// 16-bit float samples.
    Sixteen,
}

impl BitDepth {
    /// Storage bytes per sample.
    #[inline]
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            BitDepth::Eight => 1,
            BitDepth::Ten | BitDepth::Sixteen => 2,
        }
    }
}

/// One rectangular grid of decoded samples.
///
/// `row_stride` is in bytes and may exceed `width * bytes_per_sample` when
/// the decoder pads rows for alignment. `data` is owned and in native byte
/// order.
///
/// # Invariants
///
/// - `row_stride >= width * bytes_per_sample`
/// - `data.len() >= row_stride * height`
///
/// Both are checked by [`PlaneBuffer::new`].
#[derive(Debug, Clone)]
pub struct PlaneBuffer {
    width: u32,
    height: u32,
    row_stride: usize,
    bit_depth: BitDepth,
    data: Vec<u8>,
}

impl PlaneBuffer {
    /// Creates a plane over an owned byte buffer, validating geometry.
    pub fn new(
        width: u32,
        height: u32,
        row_stride: usize,
        bit_depth: BitDepth,
        data: Vec<u8>,
    ) -> Result<Self> {
        let bps = bit_depth.bytes_per_sample();
        if row_stride < width as usize * bps {
            return Err(Error::StrideTooSmall {
                row_stride,
                width,
                bytes_per_sample: bps,
            });
        }
        let required = row_stride * height as usize;
        if data.len() < required {
            return Err(Error::BufferTooShort {
                required,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            row_stride,
            bit_depth,
            data,
        })
    }

    /// Creates a tightly-packed 8-bit plane from samples, row-major.
    pub fn from_u8(width: u32, height: u32, samples: &[u8]) -> Result<Self> {
        Self::new(
            width,
            height,
            width as usize,
            BitDepth::Eight,
            samples.to_vec(),
        )
    }

    /// Creates a tightly-packed 10-in-16-bit plane from 16-bit words.
    ///
    /// Samples are expected already shifted into the upper 10 bits
    /// (video range [16*256, 235*256] for luma).
    pub fn from_u16(width: u32, height: u32, samples: &[u16]) -> Result<Self> {
        let mut data = Vec::with_capacity(samples.len() * 2);
        for s in samples {
            data.extend_from_slice(&s.to_ne_bytes());
        }
        Self::new(width, height, width as usize * 2, BitDepth::Ten, data)
    }

    /// Creates a tightly-packed 16-bit-float plane from f32 samples.
    pub fn from_f16(width: u32, height: u32, samples: &[f32]) -> Result<Self> {
        let mut data = Vec::with_capacity(samples.len() * 2);
        for s in samples {
            data.extend_from_slice(&f16::from_f32(*s).to_ne_bytes());
        }
        Self::new(width, height, width as usize * 2, BitDepth::Sixteen, data)
    }

    /// Plane width in samples.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Plane height in rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the start of consecutive rows.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Per-sample bit width.
    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Row length in samples, stride included (texels to program into
    /// the upload row length).
    #[inline]
    pub fn stride_samples(&self) -> u32 {
        (self.row_stride / self.bit_depth.bytes_per_sample()) as u32
    }

    /// Raw backing bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// One row of bytes, padding excluded.
    #[inline]
    pub fn row_bytes(&self, row: u32) -> &[u8] {
        let start = row as usize * self.row_stride;
        let len = self.width as usize * self.bit_depth.bytes_per_sample();
        &self.data[start..start + len]
    }

    /// One row of 8-bit samples. Panics if the plane is not 8-bit.
    pub fn row_u8(&self, row: u32) -> &[u8] {
        assert_eq!(self.bit_depth, BitDepth::Eight);
        self.row_bytes(row)
    }

    /// One row of 16-bit words, decoded from native byte order.
    ///
    /// Panics if the plane stores 8-bit samples.
    pub fn row_u16(&self, row: u32) -> Vec<u16> {
        assert_ne!(self.bit_depth, BitDepth::Eight);
        self.row_bytes(row)
            .chunks_exact(2)
            .map(|c| u16::from_ne_bytes([c[0], c[1]]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tight_plane() {
        let p = PlaneBuffer::from_u8(4, 2, &[7; 8]).unwrap();
        assert_eq!(p.row_stride(), 4);
        assert_eq!(p.stride_samples(), 4);
        assert_eq!(p.row_u8(1), &[7, 7, 7, 7]);
    }

    #[test]
    fn test_stride_too_small() {
        let err = PlaneBuffer::new(4, 2, 3, BitDepth::Eight, vec![0; 8]).unwrap_err();
        assert!(matches!(err, Error::StrideTooSmall { .. }));
    }

    #[test]
    fn test_buffer_too_short() {
        let err = PlaneBuffer::new(4, 2, 4, BitDepth::Eight, vec![0; 7]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferTooShort {
                required: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn test_padded_rows() {
        // 4 samples per row, stride 6: two pad bytes per row must be skipped.
        let mut data = vec![0u8; 12];
        data[6] = 9;
        let p = PlaneBuffer::new(4, 2, 6, BitDepth::Eight, data).unwrap();
        assert_eq!(p.row_u8(1)[0], 9);
        assert_eq!(p.stride_samples(), 6);
    }

    #[test]
    fn test_u16_roundtrip() {
        let p = PlaneBuffer::from_u16(2, 1, &[16 * 256, 235 * 256]).unwrap();
        assert_eq!(p.row_u16(0), vec![16 * 256, 235 * 256]);
    }
}
