//! Configuration register (16 bits): bias, coding, gain, reference, buffer,
//! channel.
//!
//! | Bits  | Field         | Type            |
//! |-------|---------------|-----------------|
//! | 15:14 | VBIAS1:0      | [`BiasVoltage`] |
//! | 13    | BO            | `bool`          |
//! | 12    | U/B           | [`Polarity`]    |
//! | 11    | BOOST         | `bool`          |
//! | 10:8  | G2:G0         | [`Gain`]        |
//! | 7     | REFSEL        | [`Reference`]   |
//! | 6:5   | —             | reserved, 0     |
//! | 4     | BUF           | `bool`          |
//! | 3     | —             | reserved, 0     |
//! | 2:0   | CH2:CH0       | [`Channel`]     |
//!
//! The driver writes this register as an opaque `u16`; [`ConfigRegister`]
//! is a typed way to build and inspect that value.

// Field values are at most 3 bits wide and every shift stays inside the u16.
#![allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

use crate::registers::{
    CONFIG_BO, CONFIG_BOOST, CONFIG_BUF, CONFIG_CHANNEL_MASK, CONFIG_GAIN_MASK, CONFIG_GAIN_SHIFT,
    CONFIG_POWER_ON, CONFIG_REFSEL, CONFIG_UNIPOLAR, CONFIG_VBIAS_MASK, CONFIG_VBIAS_SHIFT,
    CONFIG_WRITE_MASK,
};

/// VBIAS1:VBIAS0 bias voltage generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BiasVoltage {
    /// Bias generator off.
    Disabled = 0,
    /// Bias voltage on AIN1(−).
    Ain1Neg = 1,
    /// Bias voltage on AIN2(−).
    Ain2Neg = 2,
    /// Reserved code.
    Reserved = 3,
}

impl BiasVoltage {
    /// Decode a 2-bit field value (upper bits ignored).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Disabled,
            1 => Self::Ain1Neg,
            2 => Self::Ain2Neg,
            _ => Self::Reserved,
        }
    }
}

/// U/B output coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Offset binary, zero differential input = mid-scale.
    Bipolar,
    /// Straight binary, zero differential input = zero code.
    Unipolar,
}

/// G2:G0 in-amp gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    /// ×1 (in-amp bypassed).
    X1 = 0,
    /// ×2 (in-amp bypassed).
    X2 = 1,
    /// ×4.
    X4 = 2,
    /// ×8.
    X8 = 3,
    /// ×16.
    X16 = 4,
    /// ×32.
    X32 = 5,
    /// ×64.
    X64 = 6,
    /// ×128.
    X128 = 7,
}

impl Gain {
    /// Decode a 3-bit field value (upper bits ignored).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::X1,
            1 => Self::X2,
            2 => Self::X4,
            3 => Self::X8,
            4 => Self::X16,
            5 => Self::X32,
            6 => Self::X64,
            _ => Self::X128,
        }
    }

    /// Numeric gain factor.
    #[must_use]
    pub const fn factor(self) -> u8 {
        1 << (self as u8)
    }
}

/// REFSEL reference source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// External reference between REFIN(+) and REFIN(−).
    External,
    /// Internal 1.17 V reference.
    Internal,
}

/// CH2:CH0 input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    /// AIN1(+) − AIN1(−), calibration pair 0.
    Ain1 = 0,
    /// AIN2(+) − AIN2(−), calibration pair 1.
    Ain2 = 1,
    /// AIN3(+) − AIN3(−), calibration pair 2.
    Ain3 = 2,
    /// AIN1(−) − AIN1(−), calibration pair 0 (noise test).
    Ain1Shorted = 3,
    /// Reserved code 4.
    Reserved4 = 4,
    /// Reserved code 5.
    Reserved5 = 5,
    /// Temperature sensor (forces gain 1 and internal reference).
    TempSensor = 6,
    /// AVDD monitor (forces gain 1/6 and 1.17 V reference).
    AvddMonitor = 7,
}

impl Channel {
    /// Decode a 3-bit field value (upper bits ignored).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Ain1,
            1 => Self::Ain2,
            2 => Self::Ain3,
            3 => Self::Ain1Shorted,
            4 => Self::Reserved4,
            5 => Self::Reserved5,
            6 => Self::TempSensor,
            _ => Self::AvddMonitor,
        }
    }
}

/// Typed view of the 16-bit configuration register.
///
/// Holds the raw value; reserved bits are always clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ConfigRegister(u16);

impl ConfigRegister {
    /// Chip power-on value (`0x0710`): bipolar, gain 128, external
    /// reference, buffered, AIN1.
    pub const POWER_ON: Self = Self(CONFIG_POWER_ON);

    /// Wrap a raw value, clearing reserved bits.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & CONFIG_WRITE_MASK)
    }

    /// Raw register value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Big-endian wire bytes.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    const fn flag(self, mask: u16) -> bool {
        self.0 & mask != 0
    }

    const fn with_flag(self, mask: u16, on: bool) -> Self {
        if on {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }

    const fn with_field(self, mask: u16, shift: u16, value: u8) -> Self {
        Self((self.0 & !mask) | (((value as u16) << shift) & mask))
    }

    /// Bias voltage generator setting.
    #[must_use]
    pub const fn bias(self) -> BiasVoltage {
        BiasVoltage::from_bits(((self.0 & CONFIG_VBIAS_MASK) >> CONFIG_VBIAS_SHIFT) as u8)
    }

    /// Replace the bias voltage setting.
    #[must_use]
    pub const fn with_bias(self, bias: BiasVoltage) -> Self {
        self.with_field(CONFIG_VBIAS_MASK, CONFIG_VBIAS_SHIFT, bias as u8)
    }

    /// Burnout currents enabled.
    #[must_use]
    pub const fn burnout(self) -> bool {
        self.flag(CONFIG_BO)
    }

    /// Enable or disable burnout currents.
    #[must_use]
    pub const fn with_burnout(self, on: bool) -> Self {
        self.with_flag(CONFIG_BO, on)
    }

    /// Output coding.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        if self.flag(CONFIG_UNIPOLAR) {
            Polarity::Unipolar
        } else {
            Polarity::Bipolar
        }
    }

    /// Replace the output coding.
    #[must_use]
    pub const fn with_polarity(self, polarity: Polarity) -> Self {
        self.with_flag(CONFIG_UNIPOLAR, matches!(polarity, Polarity::Unipolar))
    }

    /// Bias generator boost.
    #[must_use]
    pub const fn boost(self) -> bool {
        self.flag(CONFIG_BOOST)
    }

    /// Enable or disable bias generator boost.
    #[must_use]
    pub const fn with_boost(self, on: bool) -> Self {
        self.with_flag(CONFIG_BOOST, on)
    }

    /// In-amp gain.
    #[must_use]
    pub const fn gain(self) -> Gain {
        Gain::from_bits(((self.0 & CONFIG_GAIN_MASK) >> CONFIG_GAIN_SHIFT) as u8)
    }

    /// Replace the gain.
    #[must_use]
    pub const fn with_gain(self, gain: Gain) -> Self {
        self.with_field(CONFIG_GAIN_MASK, CONFIG_GAIN_SHIFT, gain as u8)
    }

    /// Reference source.
    #[must_use]
    pub const fn reference(self) -> Reference {
        if self.flag(CONFIG_REFSEL) {
            Reference::Internal
        } else {
            Reference::External
        }
    }

    /// Replace the reference source.
    #[must_use]
    pub const fn with_reference(self, reference: Reference) -> Self {
        self.with_flag(CONFIG_REFSEL, matches!(reference, Reference::Internal))
    }

    /// Buffered mode.
    #[must_use]
    pub const fn buffered(self) -> bool {
        self.flag(CONFIG_BUF)
    }

    /// Enable or disable buffered mode.
    #[must_use]
    pub const fn with_buffered(self, on: bool) -> Self {
        self.with_flag(CONFIG_BUF, on)
    }

    /// Selected input channel.
    #[must_use]
    pub const fn channel(self) -> Channel {
        Channel::from_bits((self.0 & CONFIG_CHANNEL_MASK) as u8)
    }

    /// Replace the input channel.
    #[must_use]
    pub const fn with_channel(self, channel: Channel) -> Self {
        self.with_field(CONFIG_CHANNEL_MASK, 0, channel as u8)
    }
}

impl Default for ConfigRegister {
    fn default() -> Self {
        Self::POWER_ON
    }
}

impl From<ConfigRegister> for u16 {
    fn from(reg: ConfigRegister) -> Self {
        reg.raw()
    }
}

impl From<u16> for ConfigRegister {
    fn from(raw: u16) -> Self {
        Self::from_raw(raw)
    }
}
