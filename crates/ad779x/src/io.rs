//! IO register (8 bits): excitation current sources.
//!
//! | Bits | Field            | Type                     |
//! |------|------------------|--------------------------|
//! | 7:4  | —                | reserved, 0              |
//! | 3:2  | IEXCDIR1:0       | [`ExcitationDirection`]  |
//! | 1:0  | IEXCEN1:0        | [`ExcitationCurrent`]    |

use crate::registers::{IO_IEXCDIR_MASK, IO_IEXCDIR_SHIFT, IO_IEXCEN_MASK};

/// IEXCEN1:IEXCEN0 excitation current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ExcitationCurrent {
    /// Current sources off.
    Disabled = 0,
    /// 10 µA.
    Ua10 = 1,
    /// 210 µA.
    Ua210 = 2,
    /// 1 mA.
    Ma1 = 3,
}

impl ExcitationCurrent {
    /// Decode a 2-bit field value (upper bits ignored).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Disabled,
            1 => Self::Ua10,
            2 => Self::Ua210,
            _ => Self::Ma1,
        }
    }

    /// Nominal current per source in microamps.
    #[must_use]
    pub const fn microamps(self) -> u16 {
        match self {
            Self::Disabled => 0,
            Self::Ua10 => 10,
            Self::Ua210 => 210,
            Self::Ma1 => 1000,
        }
    }
}

/// IEXCDIR1:IEXCDIR0 routing of the two current sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ExcitationDirection {
    /// IEXC1 → IOUT1, IEXC2 → IOUT2.
    Normal = 0,
    /// IEXC1 → IOUT2, IEXC2 → IOUT1.
    Inverse = 1,
    /// Both sources → IOUT1 (10 µA and 210 µA only).
    BothToOut1 = 2,
    /// Both sources → IOUT2 (10 µA and 210 µA only).
    BothToOut2 = 3,
}

impl ExcitationDirection {
    /// Decode a 2-bit field value (upper bits ignored).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Normal,
            1 => Self::Inverse,
            2 => Self::BothToOut1,
            _ => Self::BothToOut2,
        }
    }
}

/// Typed view of the 8-bit IO register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoRegister {
    /// Excitation current value.
    pub current: ExcitationCurrent,
    /// Excitation current routing.
    pub direction: ExcitationDirection,
}

impl IoRegister {
    /// Power-on value: excitation disabled, normal routing.
    pub const DEFAULT: Self = Self {
        current: ExcitationCurrent::Disabled,
        direction: ExcitationDirection::Normal,
    };

    /// Encode into the raw register value. Reserved bits are zero.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn to_raw(self) -> u8 {
        let dir = ((self.direction as u8) << IO_IEXCDIR_SHIFT) & IO_IEXCDIR_MASK;
        dir | ((self.current as u8) & IO_IEXCEN_MASK)
    }

    /// Decode a raw register value. Reserved bits are ignored.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            current: ExcitationCurrent::from_bits(raw & IO_IEXCEN_MASK),
            direction: ExcitationDirection::from_bits((raw & IO_IEXCDIR_MASK) >> IO_IEXCDIR_SHIFT),
        }
    }
}

impl Default for IoRegister {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<IoRegister> for u8 {
    fn from(reg: IoRegister) -> Self {
        reg.to_raw()
    }
}

impl From<u8> for IoRegister {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}
