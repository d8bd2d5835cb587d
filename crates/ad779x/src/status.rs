//! Status register (8 bits, read only).

use crate::registers::{STATUS_CHANNEL, STATUS_ERR, STATUS_PART, STATUS_RDY};

use crate::config::Channel;

/// Decoded status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct StatusRegister(u8);

impl StatusRegister {
    /// Wrap a raw status byte.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw status byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// New conversion data is available (RDY bit clear).
    #[must_use]
    pub const fn is_ready(self) -> bool {
        self.0 & STATUS_RDY == 0
    }

    /// The last result was clamped to all 0s or all 1s.
    #[must_use]
    pub const fn has_error(self) -> bool {
        self.0 & STATUS_ERR != 0
    }

    /// Part identifier bit: `true` for the 24-bit AD7793.
    #[must_use]
    pub const fn is_24_bit_part(self) -> bool {
        self.0 & STATUS_PART != 0
    }

    /// Channel being converted.
    #[must_use]
    pub const fn channel(self) -> Channel {
        Channel::from_bits(self.0 & STATUS_CHANNEL)
    }
}

impl From<u8> for StatusRegister {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_iff_bit_7_clear() {
        for raw in 0..=u8::MAX {
            assert_eq!(StatusRegister::from_raw(raw).is_ready(), raw & 0x80 == 0, "{raw:#04x}");
        }
    }

    #[test]
    fn decodes_fields() {
        let st = StatusRegister::from_raw(0b0100_1010);
        assert!(st.is_ready());
        assert!(st.has_error());
        assert!(st.is_24_bit_part());
        assert_eq!(st.channel(), Channel::Ain3);
    }
}
