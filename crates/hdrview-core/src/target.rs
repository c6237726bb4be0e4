//! Output target description.

use crate::{Error, Result};

/// Output color space of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpaceTag {
    /// sRGB primaries and transfer, 8-bit.
    Srgb,
    /// Display P3 primaries, sRGB-shaped transfer, 8-bit.
    DisplayP3,
    /// scRGB: sRGB primaries, linear light, 16-bit float.
    ScrgbLinear,
    /// BT.2020 primaries, HLG transfer, 10-bit.
    Bt2020Hlg,
    /// BT.2020 primaries, PQ transfer, 10-bit.
    Bt2020Pq,
}

impl ColorSpaceTag {
    /// All five target spaces, in shader-index order.
    pub const ALL: [Self; 5] = [
        Self::Srgb,
        Self::DisplayP3,
        Self::ScrgbLinear,
        Self::Bt2020Hlg,
        Self::Bt2020Pq,
    ];

    /// Short lowercase name used in logs and the CLI.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::DisplayP3 => "display-p3",
            Self::ScrgbLinear => "scrgb-linear",
            Self::Bt2020Hlg => "bt2020-hlg",
            Self::Bt2020Pq => "bt2020-pq",
        }
    }
}

/// Fixed-point or floating-point surface channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Unsigned normalized channels.
    Fixed,
    /// IEEE half-float channels.
    Float,
}

/// Requested output surface description.
///
/// # Invariant
///
/// `component == Float` exactly when `channel_bits == 16`; scRGB-linear is
/// the only floating-point target in this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSpec {
    /// Bits per RGB channel (8, 10 or 16).
    pub channel_bits: u8,
    /// Output color space tag, attached to the surface, not the format.
    pub colorspace: ColorSpaceTag,
    /// Fixed- or floating-point channels.
    pub component: ComponentType,
}

impl TargetSpec {
    /// Builds a spec, rejecting the float/bit-depth mismatch.
    pub fn new(channel_bits: u8, colorspace: ColorSpaceTag, component: ComponentType) -> Result<Self> {
        let float_ok = (component == ComponentType::Float) == (channel_bits == 16);
        if !float_ok {
            return Err(Error::InvalidTargetSpec {
                channel_bits,
                component: match component {
                    ComponentType::Fixed => "Fixed",
                    ComponentType::Float => "Float",
                },
            });
        }
        Ok(Self {
            channel_bits,
            colorspace,
            component,
        })
    }

    /// The canonical spec for a color space tag: sRGB and P3 render at
    /// 8-bit fixed, HLG and PQ at 10-bit fixed, scRGB at 16-bit float.
    pub const fn for_tag(tag: ColorSpaceTag) -> Self {
        let (bits, component) = match tag {
            ColorSpaceTag::Srgb | ColorSpaceTag::DisplayP3 => (8, ComponentType::Fixed),
            ColorSpaceTag::ScrgbLinear => (16, ComponentType::Float),
            ColorSpaceTag::Bt2020Hlg | ColorSpaceTag::Bt2020Pq => (10, ComponentType::Fixed),
        };
        Self {
            channel_bits: bits,
            colorspace: tag,
            component,
        }
    }

    /// Integer selector dispatched to the transform shader.
    pub const fn shader_index(&self) -> u32 {
        match self.colorspace {
            ColorSpaceTag::Srgb => 0,
            ColorSpaceTag::DisplayP3 => 1,
            ColorSpaceTag::ScrgbLinear => 2,
            ColorSpaceTag::Bt2020Hlg => 3,
            ColorSpaceTag::Bt2020Pq => 4,
        }
    }

    /// Alpha channel size filling a 64-bit-aligned pixel:
    /// `(64 - 3 * channel_bits) mod 32`.
    ///
    /// Saturates to 0 for channel sizes past the 64-bit pixel budget;
    /// such specs are representable and rejected later, at surface
    /// format matching.
    pub const fn alpha_bits(&self) -> u8 {
        (64u32.saturating_sub(3 * self.channel_bits as u32) % 32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_iff_16bit() {
        assert!(TargetSpec::new(16, ColorSpaceTag::ScrgbLinear, ComponentType::Float).is_ok());
        assert!(TargetSpec::new(16, ColorSpaceTag::ScrgbLinear, ComponentType::Fixed).is_err());
        assert!(TargetSpec::new(8, ColorSpaceTag::Srgb, ComponentType::Float).is_err());
        assert!(TargetSpec::new(10, ColorSpaceTag::Bt2020Pq, ComponentType::Fixed).is_ok());
    }

    #[test]
    fn test_alpha_bits() {
        assert_eq!(TargetSpec::for_tag(ColorSpaceTag::Srgb).alpha_bits(), 8);
        assert_eq!(TargetSpec::for_tag(ColorSpaceTag::Bt2020Hlg).alpha_bits(), 2);
        assert_eq!(TargetSpec::for_tag(ColorSpaceTag::ScrgbLinear).alpha_bits(), 16);
    }

    #[test]
    fn test_alpha_bits_saturates_past_pixel_budget() {
        // A hand-built 22-bit spec exceeds 3*bits = 64; alpha saturates
        // to zero instead of wrapping.
        let spec = TargetSpec {
            channel_bits: 22,
            colorspace: ColorSpaceTag::Srgb,
            component: ComponentType::Fixed,
        };
        assert_eq!(spec.alpha_bits(), 0);
        let spec = TargetSpec {
            channel_bits: 32,
            colorspace: ColorSpaceTag::Srgb,
            component: ComponentType::Fixed,
        };
        assert_eq!(spec.alpha_bits(), 0);
    }

    #[test]
    fn test_shader_index_order() {
        for (i, tag) in ColorSpaceTag::ALL.iter().enumerate() {
            assert_eq!(TargetSpec::for_tag(*tag).shader_index(), i as u32);
        }
    }

    #[test]
    fn test_canonical_specs_valid() {
        for tag in ColorSpaceTag::ALL {
            let spec = TargetSpec::for_tag(tag);
            assert!(TargetSpec::new(spec.channel_bits, tag, spec.component).is_ok());
        }
    }
}
