//! Startup settings applied by [`crate::Ad779x::initialize_with`].

use crate::config::ConfigRegister;
use crate::io::IoRegister;
use crate::mode::ModeRegister;

/// Register values written once a part has been detected.
///
/// `Default` matches what [`crate::Ad779x::initialize`] writes: idle mode,
/// internal clock, 16.7 Hz / 65 dB, excitation off. `config` is `None` by
/// default, leaving the configuration register at its power-on value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Mode register value.
    pub mode: ModeRegister,
    /// IO register value.
    pub io: IoRegister,
    /// Configuration register value, written when `Some`.
    pub config: Option<ConfigRegister>,
}

impl Settings {
    /// Replace the mode register value.
    #[must_use]
    pub const fn with_mode(mut self, mode: ModeRegister) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the IO register value.
    #[must_use]
    pub const fn with_io(mut self, io: IoRegister) -> Self {
        self.io = io;
        self
    }

    /// Also write the configuration register during initialization.
    #[must_use]
    pub const fn with_config(mut self, config: ConfigRegister) -> Self {
        self.config = Some(config);
        self
    }
}
