//! Part variants and width-dependent register values.
//!
//! The AD7792 and AD7793 share one register map; they differ only in the
//! width of the data, offset and full-scale registers (16 vs 24 bits). The
//! identity register tells them apart, and the detected [`Model`] decides how
//! many payload bytes every later data/calibration exchange carries.

// Shift amounts below are 8 or 16 and the masked values fit their targets.
#![allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

use crate::registers::{
    AD7792_PART_ID, AD7793_PART_ID, FULLSCALE_RESET_16, FULLSCALE_RESET_24, ID_PART_MASK,
    OFFSET_RESET_16, OFFSET_RESET_24,
};

/// Width of the data, offset and full-scale registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    /// 16 bits, 2 bytes on the wire.
    Bits16,
    /// 24 bits, 3 bytes on the wire.
    Bits24,
}

impl DataWidth {
    /// Payload bytes per register exchange.
    #[must_use]
    pub const fn byte_count(self) -> usize {
        match self {
            Self::Bits16 => 2,
            Self::Bits24 => 3,
        }
    }

    /// Number of significant bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits16 => 16,
            Self::Bits24 => 24,
        }
    }

    /// Mask of the significant bits in a right-aligned `u32`.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::Bits16 => 0x0000_FFFF,
            Self::Bits24 => 0x00FF_FFFF,
        }
    }

    /// Leading zero bytes of a right-aligned value in a big-endian `[u8; 4]`.
    const fn padding(self) -> usize {
        match self {
            Self::Bits16 => 2,
            Self::Bits24 => 1,
        }
    }
}

/// Detected converter part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Model {
    /// AD7792, 16-bit conversion results.
    Ad7792,
    /// AD7793, 24-bit conversion results.
    Ad7793,
}

impl Model {
    /// Resolve the identity register byte. Only the low nibble is compared.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id & ID_PART_MASK {
            AD7792_PART_ID => Some(Self::Ad7792),
            AD7793_PART_ID => Some(Self::Ad7793),
            _ => None,
        }
    }

    /// Part identifier in the ID register low nibble.
    #[must_use]
    pub const fn part_id(self) -> u8 {
        match self {
            Self::Ad7792 => AD7792_PART_ID,
            Self::Ad7793 => AD7793_PART_ID,
        }
    }

    /// Conversion / calibration register width.
    #[must_use]
    pub const fn data_width(self) -> DataWidth {
        match self {
            Self::Ad7792 => DataWidth::Bits16,
            Self::Ad7793 => DataWidth::Bits24,
        }
    }

    /// Offset register value after reset.
    #[must_use]
    pub const fn offset_reset(self) -> RawValue {
        match self {
            Self::Ad7792 => RawValue::new(OFFSET_RESET_16, DataWidth::Bits16),
            Self::Ad7793 => RawValue::new(OFFSET_RESET_24, DataWidth::Bits24),
        }
    }

    /// Full-scale register value after reset.
    #[must_use]
    pub const fn fullscale_reset(self) -> RawValue {
        match self {
            Self::Ad7792 => RawValue::new(FULLSCALE_RESET_16, DataWidth::Bits16),
            Self::Ad7793 => RawValue::new(FULLSCALE_RESET_24, DataWidth::Bits24),
        }
    }

    /// Part name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ad7792 => "AD7792",
            Self::Ad7793 => "AD7793",
        }
    }
}

/// Outcome of the last [`crate::Ad779x::initialize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupState {
    /// `initialize` has not run yet.
    #[default]
    NotStarted,
    /// The identity read did not match a supported part.
    NoHardware,
    /// A part was detected and the default registers were written.
    Active,
}

/// A data, offset or full-scale register value in the width of its part.
///
/// Stored right-aligned. The alignment accessors are separate because
/// downstream scaling depends on which alignment is used:
///
/// | Accessor           | AD7792 `0x1234` | AD7793 `0x123456` |
/// |--------------------|-----------------|-------------------|
/// | [`value`]          | `0x1234`        | `0x12_3456`       |
/// | [`to_u16`]         | `0x1234`        | `0x1234`          |
/// | [`to_u24`]         | `0x12_3400`     | `0x12_3456`       |
/// | [`left_aligned`]   | `0x1234_0000`   | `0x1234_5600`     |
///
/// [`value`]: RawValue::value
/// [`to_u16`]: RawValue::to_u16
/// [`to_u24`]: RawValue::to_u24
/// [`left_aligned`]: RawValue::left_aligned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawValue {
    value: u32,
    width: DataWidth,
}

impl RawValue {
    /// Wrap a right-aligned value; bits above `width` are dropped.
    #[must_use]
    pub const fn new(value: u32, width: DataWidth) -> Self {
        Self {
            value: value & width.mask(),
            width,
        }
    }

    /// Assemble big-endian wire bytes (most significant byte first).
    ///
    /// Returns `None` unless `bytes` holds exactly `width.byte_count()` bytes.
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8], width: DataWidth) -> Option<Self> {
        let mut buf = [0u8; 4];
        let dst = buf.get_mut(width.padding()..)?;
        if dst.len() != bytes.len() {
            return None;
        }
        dst.copy_from_slice(bytes);
        Some(Self {
            value: u32::from_be_bytes(buf),
            width,
        })
    }

    /// Register width.
    #[must_use]
    pub const fn width(self) -> DataWidth {
        self.width
    }

    /// Right-aligned value in the native width.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// 16-bit view: 24-bit values drop their least significant byte.
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        match self.width {
            DataWidth::Bits16 => self.value as u16,
            DataWidth::Bits24 => (self.value >> 8) as u16,
        }
    }

    /// 24-bit view: 16-bit values gain a zero least significant byte.
    #[must_use]
    pub const fn to_u24(self) -> u32 {
        match self.width {
            DataWidth::Bits16 => self.value << 8,
            DataWidth::Bits24 => self.value,
        }
    }

    /// Value shifted so its most significant bit is bit 31.
    #[must_use]
    pub const fn left_aligned(self) -> u32 {
        self.value << (32 - self.width.bits())
    }

    /// Raw four-byte view, big-endian, right-aligned.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    /// Wire payload for a register write, most significant byte first.
    pub fn payload(self) -> impl Iterator<Item = u8> {
        self.to_be_bytes().into_iter().skip(self.width.padding())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn detect_by_low_nibble() {
        assert_eq!(Model::from_id(0x0A), Some(Model::Ad7792));
        assert_eq!(Model::from_id(0x0B), Some(Model::Ad7793));
        assert_eq!(Model::from_id(0x4A), Some(Model::Ad7792));
        assert_eq!(Model::from_id(0xFB), Some(Model::Ad7793));
        assert_eq!(Model::from_id(0x00), None);
        assert_eq!(Model::from_id(0xFF), None);
        assert_eq!(Model::from_id(0x0C), None);
    }

    #[test]
    fn only_two_ids_resolve() {
        let hits = (0..=u8::MAX).filter(|id| Model::from_id(*id).is_some()).count();
        // 16 high nibbles × 2 part ids
        assert_eq!(hits, 32);
    }

    #[test]
    fn width_per_model() {
        assert_eq!(Model::Ad7792.data_width().byte_count(), 2);
        assert_eq!(Model::Ad7793.data_width().byte_count(), 3);
    }

    #[test]
    fn reset_constants() {
        assert_eq!(Model::Ad7793.offset_reset().value(), 0x80_0000);
        assert_eq!(Model::Ad7793.fullscale_reset().value(), 0x50_0000);
        assert_eq!(Model::Ad7792.offset_reset().value(), 0x8000);
        assert_eq!(Model::Ad7792.fullscale_reset().value(), 0x5000);
    }

    #[test]
    fn assemble_16_bit() {
        let v = RawValue::from_be_bytes(&[0x12, 0x34], DataWidth::Bits16);
        assert_eq!(v.map(RawValue::value), Some(0x1234));
    }

    #[test]
    fn assemble_24_bit_alignments() {
        let Some(v) = RawValue::from_be_bytes(&[0x12, 0x34, 0x56], DataWidth::Bits24) else {
            panic!("three bytes must assemble");
        };
        assert_eq!(v.value(), 0x12_3456);
        assert_eq!(v.to_u16(), 0x1234);
        assert_eq!(v.to_u24(), 0x12_3456);
        assert_eq!(v.left_aligned(), 0x1234_5600);
    }

    #[test]
    fn sixteen_bit_alignments() {
        let v = RawValue::new(0x1234, DataWidth::Bits16);
        assert_eq!(v.to_u16(), 0x1234);
        assert_eq!(v.to_u24(), 0x12_3400);
        assert_eq!(v.left_aligned(), 0x1234_0000);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(RawValue::from_be_bytes(&[0x12], DataWidth::Bits16).is_none());
        assert!(RawValue::from_be_bytes(&[0x12, 0x34], DataWidth::Bits24).is_none());
        assert!(RawValue::from_be_bytes(&[1, 2, 3, 4], DataWidth::Bits24).is_none());
    }

    #[test]
    fn new_masks_to_width() {
        assert_eq!(RawValue::new(0xFF12_3456, DataWidth::Bits24).value(), 0x12_3456);
        assert_eq!(RawValue::new(0x0012_3456, DataWidth::Bits16).value(), 0x3456);
    }

    #[test]
    fn payload_is_msb_first_in_native_width() {
        let p: std::vec::Vec<u8> = RawValue::new(0x80_0000, DataWidth::Bits24).payload().collect();
        assert_eq!(p, [0x80, 0x00, 0x00]);
        let p: std::vec::Vec<u8> = RawValue::new(0x5000, DataWidth::Bits16).payload().collect();
        assert_eq!(p, [0x50, 0x00]);
    }
}
