//! AD7792 / AD7793 register map and protocol constants.
//!
//! Reference: Analog Devices AD7792/AD7793 datasheet Rev. B, "On-Chip
//! Registers" section.
//!
//! # Key serial-interface constraints
//!
//! ## Every access starts with a communications-register write
//! The communications register is the only register the chip listens to
//! between transactions. Its value selects the target register (RS2:RS0) and
//! the direction (R/W) of the next operation. Bit 7 (WEN) must be 0, and bits
//! 1:0 must be 0 for correct operation; [`COMM_MASK`] clears all three.
//!
//! ## Reserved bits
//! Reserved fields in MODE, CONFIG and IO must be written as 0. The
//! `*_WRITE_MASK` constants are the complement of the reserved bits and are
//! applied by every raw conversion in this crate.
//!
//! ## Serial interface reset
//! Writing 32 consecutive 1s with CS low resets the serial interface and all
//! on-chip registers to their power-on values. Allow at least 500 µs before
//! the next access.

// ---------------------------------------------------------------------------
// Register addresses (RS2:RS0, unshifted)
// ---------------------------------------------------------------------------

/// Communications register (write) / Status register (read) — 8 bits.
pub const REG_COMM_STATUS: u8 = 0;
/// Mode register — 16 bits, R/W.
pub const REG_MODE: u8 = 1;
/// Configuration register — 16 bits, R/W.
pub const REG_CONFIG: u8 = 2;
/// Data register — 16 bits (AD7792) or 24 bits (AD7793), read only.
pub const REG_DATA: u8 = 3;
/// ID register — 8 bits, read only.
pub const REG_ID: u8 = 4;
/// IO register — 8 bits, R/W.
pub const REG_IO: u8 = 5;
/// Offset register — 16/24 bits, R/W.
pub const REG_OFFSET: u8 = 6;
/// Full-scale register — 16/24 bits, R/W.
pub const REG_FULLSCALE: u8 = 7;

/// Bit position of RS2:RS0 inside the communications byte.
pub const COMM_RS_SHIFT: u8 = 3;

// ---------------------------------------------------------------------------
// Communications register
// ---------------------------------------------------------------------------

/// R/W bit value for a write operation.
pub const COMM_WRITE: u8 = 0x00;
/// R/W bit value for a read operation.
pub const COMM_READ: u8 = 0x40;
/// CREAD bit: continuous read of the data register.
pub const COMM_CREAD: u8 = 0x04;
/// Mask applied to every command byte (clears WEN and bits 1:0).
pub const COMM_MASK: u8 = 0x7C;

// ---------------------------------------------------------------------------
// Status register
// ---------------------------------------------------------------------------

/// RDY: cleared when new data is written to the data register.
pub const STATUS_RDY: u8 = 0x80;
/// ERR: data register result was clamped to all 0s or all 1s.
pub const STATUS_ERR: u8 = 0x40;
/// Reserved bits, read as 0.
pub const STATUS_RESERVED: u8 = 0x30;
/// Part identifier bit: 0 = AD7792, 1 = AD7793.
pub const STATUS_PART: u8 = 0x08;
/// Channel currently being converted.
pub const STATUS_CHANNEL: u8 = 0x07;

// ---------------------------------------------------------------------------
// ID register
// ---------------------------------------------------------------------------

/// Low nibble of the ID register that carries the part identifier.
pub const ID_PART_MASK: u8 = 0x0F;
/// Part identifier of the 16-bit AD7792.
pub const AD7792_PART_ID: u8 = 0x0A;
/// Part identifier of the 24-bit AD7793.
pub const AD7793_PART_ID: u8 = 0x0B;

// ---------------------------------------------------------------------------
// Mode register
// ---------------------------------------------------------------------------

/// MD2:MD0 — mode select.
pub const MODE_MD_MASK: u16 = 0xE000;
/// MD2:MD0 bit position.
pub const MODE_MD_SHIFT: u16 = 13;
/// CLK1:CLK0 — clock source select.
pub const MODE_CLK_MASK: u16 = 0x00C0;
/// CLK1:CLK0 bit position.
pub const MODE_CLK_SHIFT: u16 = 6;
/// FS3:FS0 — filter update rate select.
pub const MODE_FS_MASK: u16 = 0x000F;
/// Bits that may be non-zero in a mode register write.
pub const MODE_WRITE_MASK: u16 = MODE_MD_MASK | MODE_CLK_MASK | MODE_FS_MASK;
/// Power-on value of the mode register (continuous, internal, 16.7 Hz).
pub const MODE_POWER_ON: u16 = 0x000A;

// ---------------------------------------------------------------------------
// Configuration register
// ---------------------------------------------------------------------------

/// VBIAS1:VBIAS0 — bias voltage generator.
pub const CONFIG_VBIAS_MASK: u16 = 0xC000;
/// VBIAS bit position.
pub const CONFIG_VBIAS_SHIFT: u16 = 14;
/// BO — burnout current enable.
pub const CONFIG_BO: u16 = 0x2000;
/// U/B — unipolar coding when set.
pub const CONFIG_UNIPOLAR: u16 = 0x1000;
/// BOOST — bias generator current boost.
pub const CONFIG_BOOST: u16 = 0x0800;
/// G2:G0 — gain select.
pub const CONFIG_GAIN_MASK: u16 = 0x0700;
/// Gain bit position.
pub const CONFIG_GAIN_SHIFT: u16 = 8;
/// REFSEL — internal reference when set.
pub const CONFIG_REFSEL: u16 = 0x0080;
/// BUF — buffered mode.
pub const CONFIG_BUF: u16 = 0x0010;
/// CH2:CH0 — channel select.
pub const CONFIG_CHANNEL_MASK: u16 = 0x0007;
/// Bits that may be non-zero in a configuration register write.
pub const CONFIG_WRITE_MASK: u16 = 0xFF97;
/// Power-on value of the configuration register (gain 128, buffered, AIN1).
pub const CONFIG_POWER_ON: u16 = 0x0710;

// ---------------------------------------------------------------------------
// IO register
// ---------------------------------------------------------------------------

/// IEXCDIR1:IEXCDIR0 — excitation current direction.
pub const IO_IEXCDIR_MASK: u8 = 0x0C;
/// IEXCDIR bit position.
pub const IO_IEXCDIR_SHIFT: u8 = 2;
/// IEXCEN1:IEXCEN0 — excitation current value.
pub const IO_IEXCEN_MASK: u8 = 0x03;
/// Bits that may be non-zero in an IO register write.
pub const IO_WRITE_MASK: u8 = IO_IEXCDIR_MASK | IO_IEXCEN_MASK;
/// Power-on value of the IO register (excitation disabled).
pub const IO_POWER_ON: u8 = 0x00;

// ---------------------------------------------------------------------------
// Calibration register reset values
// ---------------------------------------------------------------------------

/// Offset register power-on value, AD7793 (24-bit).
pub const OFFSET_RESET_24: u32 = 0x80_0000;
/// Offset register power-on value, AD7792 (16-bit).
pub const OFFSET_RESET_16: u32 = 0x8000;
/// Full-scale register power-on value, AD7793 (24-bit).
pub const FULLSCALE_RESET_24: u32 = 0x50_0000;
/// Full-scale register power-on value, AD7792 (16-bit).
pub const FULLSCALE_RESET_16: u32 = 0x5000;

// ---------------------------------------------------------------------------
// Serial interface reset
// ---------------------------------------------------------------------------

/// Number of `0xFF` bytes clocked out to reset the serial interface (32 ones).
pub const RESET_SEQUENCE_LEN: usize = 4;
/// Fill byte of the reset sequence.
pub const RESET_FILL: u8 = 0xFF;
