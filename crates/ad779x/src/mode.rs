//! Mode register (16 bits): operating mode, clock source, filter update rate.
//!
//! | Bits  | Field   | Type             |
//! |-------|---------|------------------|
//! | 15:13 | MD2:MD0 | [`OperatingMode`] |
//! | 12:8  | —       | reserved, 0      |
//! | 7:6   | CLK1:0  | [`ClockSource`]  |
//! | 5:4   | —       | reserved, 0      |
//! | 3:0   | FS3:FS0 | [`UpdateRate`]   |

use crate::registers::{MODE_CLK_MASK, MODE_CLK_SHIFT, MODE_FS_MASK, MODE_MD_MASK, MODE_MD_SHIFT};

/// MD2:MD0 operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatingMode {
    /// Continuous conversion.
    Continuous = 0,
    /// Single conversion, then power-down.
    Single = 1,
    /// Idle: modulator and filter held in reset.
    Idle = 2,
    /// Power-down.
    PowerDown = 3,
    /// Internal zero-scale calibration.
    InternalZeroCal = 4,
    /// Internal full-scale calibration.
    InternalFullCal = 5,
    /// System zero-scale calibration.
    SystemZeroCal = 6,
    /// System full-scale calibration.
    SystemFullCal = 7,
}

impl OperatingMode {
    /// Decode a 3-bit field value (upper bits ignored).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Continuous,
            1 => Self::Single,
            2 => Self::Idle,
            3 => Self::PowerDown,
            4 => Self::InternalZeroCal,
            5 => Self::InternalFullCal,
            6 => Self::SystemZeroCal,
            _ => Self::SystemFullCal,
        }
    }

    /// `true` for the four calibration modes.
    #[must_use]
    pub const fn is_calibration(self) -> bool {
        matches!(
            self,
            Self::InternalZeroCal | Self::InternalFullCal | Self::SystemZeroCal | Self::SystemFullCal
        )
    }
}

/// CLK1:CLK0 clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockSource {
    /// Internal 64 kHz clock, not available at the CLK pin.
    Internal = 0,
    /// Internal 64 kHz clock, driven out on the CLK pin.
    InternalWithOutput = 1,
    /// External 64 kHz clock on the CLK pin.
    External = 2,
    /// External clock divided by 2 inside the chip.
    ExternalDiv2 = 3,
}

impl ClockSource {
    /// Decode a 2-bit field value (upper bits ignored).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Internal,
            1 => Self::InternalWithOutput,
            2 => Self::External,
            _ => Self::ExternalDiv2,
        }
    }
}

/// FS3:FS0 filter update rate.
///
/// Names carry the output data rate and, for the low rates, the simultaneous
/// 50/60 Hz rejection the datasheet specifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum UpdateRate {
    /// Code 0 is reserved.
    Reserved = 0,
    /// 500 Hz.
    Hz500 = 1,
    /// 250 Hz.
    Hz250 = 2,
    /// 125 Hz.
    Hz125 = 3,
    /// 62.5 Hz.
    Hz62_5 = 4,
    /// 50 Hz.
    Hz50 = 5,
    /// 39.2 Hz.
    Hz39_2 = 6,
    /// 33.3 Hz.
    Hz33_3 = 7,
    /// 19.6 Hz, 90 dB rejection (60 Hz only).
    Hz19_6Rej90dB = 8,
    /// 16.7 Hz, 80 dB rejection (50 Hz only).
    Hz16_7Rej80dB = 9,
    /// 16.7 Hz, 65 dB rejection (50/60 Hz).
    Hz16_7Rej65dB = 10,
    /// 12.5 Hz, 66 dB rejection (50/60 Hz).
    Hz12_5Rej66dB = 11,
    /// 10 Hz, 69 dB rejection (50/60 Hz).
    Hz10Rej69dB = 12,
    /// 8.33 Hz, 70 dB rejection (50/60 Hz).
    Hz8_33Rej70dB = 13,
    /// 6.25 Hz, 72 dB rejection (50/60 Hz).
    Hz6_25Rej72dB = 14,
    /// 4.17 Hz, 74 dB rejection (50/60 Hz).
    Hz4_17Rej74dB = 15,
}

/// Datasheet row for one update rate: (output rate in mHz, settling time in ms,
/// rejection in dB).
type RateRow = (u32, u16, Option<u8>);

impl UpdateRate {
    /// All sixteen codes in order.
    pub const ALL: [Self; 16] = [
        Self::Reserved,
        Self::Hz500,
        Self::Hz250,
        Self::Hz125,
        Self::Hz62_5,
        Self::Hz50,
        Self::Hz39_2,
        Self::Hz33_3,
        Self::Hz19_6Rej90dB,
        Self::Hz16_7Rej80dB,
        Self::Hz16_7Rej65dB,
        Self::Hz12_5Rej66dB,
        Self::Hz10Rej69dB,
        Self::Hz8_33Rej70dB,
        Self::Hz6_25Rej72dB,
        Self::Hz4_17Rej74dB,
    ];

    /// Decode a 4-bit field value (upper bits ignored).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0 => Self::Reserved,
            1 => Self::Hz500,
            2 => Self::Hz250,
            3 => Self::Hz125,
            4 => Self::Hz62_5,
            5 => Self::Hz50,
            6 => Self::Hz39_2,
            7 => Self::Hz33_3,
            8 => Self::Hz19_6Rej90dB,
            9 => Self::Hz16_7Rej80dB,
            10 => Self::Hz16_7Rej65dB,
            11 => Self::Hz12_5Rej66dB,
            12 => Self::Hz10Rej69dB,
            13 => Self::Hz8_33Rej70dB,
            14 => Self::Hz6_25Rej72dB,
            _ => Self::Hz4_17Rej74dB,
        }
    }

    const fn row(self) -> Option<RateRow> {
        match self {
            Self::Reserved => None,
            Self::Hz500 => Some((500_000, 4, None)),
            Self::Hz250 => Some((250_000, 8, None)),
            Self::Hz125 => Some((125_000, 16, None)),
            Self::Hz62_5 => Some((62_500, 32, None)),
            Self::Hz50 => Some((50_000, 40, None)),
            Self::Hz39_2 => Some((39_200, 48, None)),
            Self::Hz33_3 => Some((33_300, 60, None)),
            Self::Hz19_6Rej90dB => Some((19_600, 101, Some(90))),
            Self::Hz16_7Rej80dB => Some((16_700, 120, Some(80))),
            Self::Hz16_7Rej65dB => Some((16_700, 120, Some(65))),
            Self::Hz12_5Rej66dB => Some((12_500, 160, Some(66))),
            Self::Hz10Rej69dB => Some((10_000, 200, Some(69))),
            Self::Hz8_33Rej70dB => Some((8_330, 240, Some(70))),
            Self::Hz6_25Rej72dB => Some((6_250, 320, Some(72))),
            Self::Hz4_17Rej74dB => Some((4_170, 480, Some(74))),
        }
    }

    /// Output data rate in millihertz, `None` for the reserved code.
    #[must_use]
    pub const fn output_rate_mhz(self) -> Option<u32> {
        match self.row() {
            Some((rate, _, _)) => Some(rate),
            None => None,
        }
    }

    /// Settling time in milliseconds (two conversion periods).
    #[must_use]
    pub const fn settling_time_ms(self) -> Option<u16> {
        match self.row() {
            Some((_, t, _)) => Some(t),
            None => None,
        }
    }

    /// Simultaneous 50/60 Hz rejection in dB, where the datasheet specifies one.
    #[must_use]
    pub const fn rejection_db(self) -> Option<u8> {
        match self.row() {
            Some((_, _, rej)) => rej,
            None => None,
        }
    }
}

/// Typed view of the 16-bit mode register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeRegister {
    /// Operating mode.
    pub mode: OperatingMode,
    /// Clock source.
    pub clock: ClockSource,
    /// Filter update rate.
    pub rate: UpdateRate,
}

impl ModeRegister {
    /// Value written by [`crate::Ad779x::initialize`]: idle, internal clock,
    /// 16.7 Hz with 65 dB 50/60 Hz rejection.
    pub const DEFAULT: Self = Self {
        mode: OperatingMode::Idle,
        clock: ClockSource::Internal,
        rate: UpdateRate::Hz16_7Rej65dB,
    };

    /// Encode into the raw register value. Reserved bits are zero.
    #[must_use]
    // Field values are at most 3 bits wide; the shifts land inside the u16.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn to_raw(self) -> u16 {
        let md = ((self.mode as u16) << MODE_MD_SHIFT) & MODE_MD_MASK;
        let clk = ((self.clock as u16) << MODE_CLK_SHIFT) & MODE_CLK_MASK;
        let fs = (self.rate as u16) & MODE_FS_MASK;
        md | clk | fs
    }

    /// Decode a raw register value. Reserved bits are ignored.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            mode: OperatingMode::from_bits(((raw & MODE_MD_MASK) >> MODE_MD_SHIFT) as u8),
            clock: ClockSource::from_bits(((raw & MODE_CLK_MASK) >> MODE_CLK_SHIFT) as u8),
            rate: UpdateRate::from_bits((raw & MODE_FS_MASK) as u8),
        }
    }

    /// Big-endian wire bytes.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.to_raw().to_be_bytes()
    }
}

impl Default for ModeRegister {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<ModeRegister> for u16 {
    fn from(reg: ModeRegister) -> Self {
        reg.to_raw()
    }
}

impl From<u16> for ModeRegister {
    fn from(raw: u16) -> Self {
        Self::from_raw(raw)
    }
}
