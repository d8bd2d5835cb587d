//! Communications-register command codec.
//!
//! Every transaction begins with one command byte written to the
//! communications register. The byte carries the target register address in
//! bits 5:3 and the direction in bit 6; [`COMM_MASK`] keeps bits 7, 1 and 0
//! at zero.
//!
//! | Register     | Write  | Read   |
//! |--------------|--------|--------|
//! | Comm/Status  | `0x00` | `0x40` |
//! | Mode         | `0x08` | `0x48` |
//! | Config       | `0x10` | `0x50` |
//! | Data         | `0x18` | `0x58` |
//! | ID           | `0x20` | `0x60` |
//! | IO           | `0x28` | `0x68` |
//! | Offset       | `0x30` | `0x70` |
//! | Full-scale   | `0x38` | `0x78` |

use crate::registers::{
    COMM_CREAD, COMM_MASK, COMM_READ, COMM_RS_SHIFT, COMM_WRITE, REG_COMM_STATUS, REG_CONFIG,
    REG_DATA, REG_FULLSCALE, REG_ID, REG_IO, REG_MODE, REG_OFFSET,
};

/// On-chip register selected by a command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Communications register on write, status register on read.
    CommStatus,
    /// Mode register.
    Mode,
    /// Configuration register.
    Config,
    /// Conversion data register.
    Data,
    /// Identity register.
    Id,
    /// IO (excitation current) register.
    Io,
    /// Offset calibration register.
    Offset,
    /// Full-scale calibration register.
    FullScale,
}

impl Register {
    /// All registers in address order.
    pub const ALL: [Self; 8] = [
        Self::CommStatus,
        Self::Mode,
        Self::Config,
        Self::Data,
        Self::Id,
        Self::Io,
        Self::Offset,
        Self::FullScale,
    ];

    /// RS2:RS0 address of the register (unshifted).
    #[must_use]
    pub const fn address(self) -> u8 {
        match self {
            Self::CommStatus => REG_COMM_STATUS,
            Self::Mode => REG_MODE,
            Self::Config => REG_CONFIG,
            Self::Data => REG_DATA,
            Self::Id => REG_ID,
            Self::Io => REG_IO,
            Self::Offset => REG_OFFSET,
            Self::FullScale => REG_FULLSCALE,
        }
    }
}

/// Direction of the operation that follows the command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Host writes the register payload.
    Write,
    /// Host reads the register payload.
    Read,
}

impl Access {
    const fn bit(self) -> u8 {
        match self {
            Self::Write => COMM_WRITE,
            Self::Read => COMM_READ,
        }
    }
}

/// A communications-register command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Command(u8);

impl Command {
    /// Build the command that selects `register` for `access`.
    #[must_use]
    pub const fn new(register: Register, access: Access) -> Self {
        // address() is at most 7, so the shift stays inside the byte.
        #[allow(clippy::arithmetic_side_effects)]
        let field = register.address() << COMM_RS_SHIFT;
        Self((field | access.bit()) & COMM_MASK)
    }

    /// Shorthand for a write command.
    #[must_use]
    pub const fn write(register: Register) -> Self {
        Self::new(register, Access::Write)
    }

    /// Shorthand for a read command.
    #[must_use]
    pub const fn read(register: Register) -> Self {
        Self::new(register, Access::Read)
    }

    /// Read of the data register with CREAD set (continuous read mode entry).
    #[must_use]
    pub const fn continuous_read() -> Self {
        Self((Self::read(Register::Data).0 | COMM_CREAD) & COMM_MASK)
    }

    /// The byte placed on the wire.
    #[must_use]
    pub const fn byte(self) -> u8 {
        self.0
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd.byte()
    }
}

/// Command byte for `register` and `access`.
#[must_use]
pub const fn command_byte(register: Register, access: Access) -> u8 {
    Command::new(register, access).byte()
}
