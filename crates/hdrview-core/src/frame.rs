//! Decoded frame layouts.

use crate::{BitDepth, Error, PlaneBuffer, Result};

/// How the frame's samples are encoded, derived from its planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// 8-bit planar YUV 4:2:0, video range.
    Narrow8,
    /// Decoder-produced 16-bit-float planes, already normalized to [0, 1].
    Float16,
    /// 10-bit-in-16-bit semi-planar ("P010"), video range.
    P010,
}

/// A decoded video frame.
///
/// Owns its planes exclusively: the decoder hands the frame over and must
/// not touch the buffers afterwards. A frame is drawn once and discarded,
/// never cached across draws.
#[derive(Debug, Clone)]
pub enum Frame {
    /// Three independent planes; chroma at half resolution.
    Planar {
        /// Full-resolution luma.
        y: PlaneBuffer,
        /// Half-resolution Cb.
        u: PlaneBuffer,
        /// Half-resolution Cr.
        v: PlaneBuffer,
    },
    /// Luma plane plus one half-resolution plane of interleaved Cb/Cr pairs.
    ///
    /// The `uv` plane counts individual samples, so its width is twice the
    /// chroma pixel width.
    SemiPlanar {
        /// Full-resolution luma.
        y: PlaneBuffer,
        /// Interleaved chroma, 2 samples per pixel.
        uv: PlaneBuffer,
    },
}

impl Frame {
    /// Builds a planar frame, validating chroma geometry and depths.
    pub fn planar(y: PlaneBuffer, u: PlaneBuffer, v: PlaneBuffer) -> Result<Self> {
        let frame = Self::Planar { y, u, v };
        frame.validate()?;
        Ok(frame)
    }

    /// Builds a semi-planar frame, validating chroma geometry and depths.
    pub fn semi_planar(y: PlaneBuffer, uv: PlaneBuffer) -> Result<Self> {
        let frame = Self::SemiPlanar { y, uv };
        frame.validate()?;
        Ok(frame)
    }

    /// Frame width in pixels (luma width).
    #[inline]
    pub fn width(&self) -> u32 {
        self.luma().width()
    }

    /// Frame height in pixels (luma height).
    #[inline]
    pub fn height(&self) -> u32 {
        self.luma().height()
    }

    /// The luma plane.
    #[inline]
    pub fn luma(&self) -> &PlaneBuffer {
        match self {
            Self::Planar { y, .. } | Self::SemiPlanar { y, .. } => y,
        }
    }

    /// Sample encoding of this frame.
    pub fn source_kind(&self) -> SourceKind {
        match self {
            Self::Planar { y, .. } => match y.bit_depth() {
                BitDepth::Eight => SourceKind::Narrow8,
                _ => SourceKind::Float16,
            },
            Self::SemiPlanar { .. } => SourceKind::P010,
        }
    }

    /// Checks plane dimension and depth consistency.
    pub fn validate(&self) -> Result<()> {
        let (cw, ch) = (self.width().div_ceil(2), self.height().div_ceil(2));
        match self {
            Self::Planar { y, u, v } => {
                for (name, p) in [("U", u), ("V", v)] {
                    if p.width() != cw || p.height() != ch {
                        return Err(Error::PlaneMismatch {
                            plane: name,
                            got_w: p.width(),
                            got_h: p.height(),
                            want_w: cw,
                            want_h: ch,
                        });
                    }
                    if p.bit_depth() != y.bit_depth() {
                        return Err(Error::UnsupportedLayout(
                            "planar chroma depth differs from luma",
                        ));
                    }
                }
                if y.bit_depth() == BitDepth::Ten {
                    return Err(Error::UnsupportedLayout(
                        "10-bit frames must be semi-planar",
                    ));
                }
                Ok(())
            }
            Self::SemiPlanar { y, uv } => {
                if y.bit_depth() != BitDepth::Ten || uv.bit_depth() != BitDepth::Ten {
                    return Err(Error::UnsupportedLayout(
                        "semi-planar frames must be 10-bit-in-16-bit",
                    ));
                }
                if uv.width() != cw * 2 || uv.height() != ch {
                    return Err(Error::PlaneMismatch {
                        plane: "UV",
                        got_w: uv.width(),
                        got_h: uv.height(),
                        want_w: cw * 2,
                        want_h: ch,
                    });
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_planar(w: u32, h: u32) -> Frame {
        let y = PlaneBuffer::from_u8(w, h, &vec![128; (w * h) as usize]).unwrap();
        let cw = w.div_ceil(2);
        let ch = h.div_ceil(2);
        let u = PlaneBuffer::from_u8(cw, ch, &vec![128; (cw * ch) as usize]).unwrap();
        let v = PlaneBuffer::from_u8(cw, ch, &vec![128; (cw * ch) as usize]).unwrap();
        Frame::planar(y, u, v).unwrap()
    }

    #[test]
    fn test_planar_geometry() {
        let f = gray_planar(5, 3);
        assert_eq!(f.width(), 5);
        assert_eq!(f.height(), 3);
        assert_eq!(f.source_kind(), SourceKind::Narrow8);
    }

    #[test]
    fn test_chroma_mismatch() {
        let y = PlaneBuffer::from_u8(4, 4, &[0; 16]).unwrap();
        let u = PlaneBuffer::from_u8(4, 4, &[0; 16]).unwrap();
        let v = PlaneBuffer::from_u8(2, 2, &[0; 4]).unwrap();
        assert!(matches!(
            Frame::planar(y, u, v),
            Err(Error::PlaneMismatch { plane: "U", .. })
        ));
    }

    #[test]
    fn test_semi_planar_p010() {
        let y = PlaneBuffer::from_u16(4, 4, &[16 * 256; 16]).unwrap();
        // uv plane: 2 chroma pixels wide, 2 samples per pixel = 4 u16 per row.
        let uv = PlaneBuffer::from_u16(4, 2, &[128 * 256; 8]).unwrap();
        let f = Frame::semi_planar(y, uv).unwrap();
        assert_eq!(f.source_kind(), SourceKind::P010);
    }

    #[test]
    fn test_semi_planar_rejects_8bit() {
        let y = PlaneBuffer::from_u8(4, 4, &[0; 16]).unwrap();
        let uv = PlaneBuffer::from_u8(4, 2, &[0; 8]).unwrap();
        assert!(Frame::semi_planar(y, uv).is_err());
    }
}
