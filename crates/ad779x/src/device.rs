//! AD7792 / AD7793 device driver.
//!
//! [`Ad779x`] owns one converter's [`Transport`], remembers which part was
//! detected and mirrors the registers it has written. Every bus operation is
//! one chip-select window:
//!
//! ```text
//! CS low → command byte → payload (MSB first, written or read) → CS high
//! ```
//!
//! Only [`Ad779x::reset`], [`Ad779x::read_id`] and [`Ad779x::detect_variant`]
//! talk to the chip before a part has been detected. Everything else returns
//! [`Error::NotDetected`] without touching the bus.
//!
//! # Startup
//!
//! ```text
//! reset()          32 × 1 on DIN, wait ≥ 500 µs
//! initialize()     ID read  → MODE 0x400A → IO 0x00
//! calibrate        start_zero_scale_calibration(), wait_ready()
//!                  start_full_scale_calibration(), wait_ready()
//! convert          set_mode(Single) / set_mode(Continuous), wait_ready(),
//!                  read_data_sample()
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::command::{Command, Register};
use crate::config::{Channel, ConfigRegister, Gain, Polarity};
use crate::error::Error;
use crate::io::{ExcitationCurrent, ExcitationDirection, IoRegister};
use crate::mode::{ClockSource, ModeRegister, OperatingMode, UpdateRate};
use crate::registers::{RESET_FILL, RESET_SEQUENCE_LEN};
use crate::settings::Settings;
use crate::status::StatusRegister;
use crate::transport::{ChipSelect, Transport};
use crate::variant::{DataWidth, Model, RawValue, StartupState};

/// One AD7792 or AD7793 converter.
pub struct Ad779x<T> {
    transport: T,
    model: Option<Model>,
    startup_state: StartupState,
    mode: ModeRegister,
    io: IoRegister,
    config: ConfigRegister,
    offset: Option<RawValue>,
    fullscale: Option<RawValue>,
}

impl<T: Transport> Ad779x<T> {
    /// Wrap a transport. Nothing is sent until the first operation.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            model: None,
            startup_state: StartupState::NotStarted,
            mode: ModeRegister::DEFAULT,
            io: IoRegister::DEFAULT,
            config: ConfigRegister::POWER_ON,
            offset: None,
            fullscale: None,
        }
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    // -----------------------------------------------------------------------
    // Cached state
    // -----------------------------------------------------------------------

    /// Part found by the last identity read.
    pub fn model(&self) -> Option<Model> {
        self.model
    }

    /// Outcome of the last `initialize` call.
    pub fn startup_state(&self) -> StartupState {
        self.startup_state
    }

    /// Last mode register value written.
    pub fn mode(&self) -> ModeRegister {
        self.mode
    }

    /// Last IO register value written.
    pub fn io(&self) -> IoRegister {
        self.io
    }

    /// Last configuration register value written (power-on value until then).
    pub fn config(&self) -> ConfigRegister {
        self.config
    }

    /// Cached offset register, `None` until a part is known.
    pub fn offset(&self) -> Option<RawValue> {
        self.offset
    }

    /// Cached full-scale register, `None` until a part is known.
    pub fn fullscale(&self) -> Option<RawValue> {
        self.fullscale
    }

    // -----------------------------------------------------------------------
    // Startup
    // -----------------------------------------------------------------------

    /// Detect the part and write the default mode and IO registers.
    ///
    /// See [`Self::initialize_with`].
    pub fn initialize(&mut self) -> Result<Model, Error<T::Error>> {
        self.initialize_with(&Settings::default())
    }

    /// Detect the part and write `settings`.
    ///
    /// On success the cached offset / full-scale values are set to the
    /// part's reset values and the startup state becomes
    /// [`StartupState::Active`]. If the identity byte is not recognised the
    /// state becomes [`StartupState::NoHardware`], no register is written and
    /// [`Error::NotDetected`] is returned.
    pub fn initialize_with(&mut self, settings: &Settings) -> Result<Model, Error<T::Error>> {
        let Some(model) = self.detect_variant()? else {
            self.startup_state = StartupState::NoHardware;
            #[cfg(feature = "defmt")]
            defmt::warn!("AD779x: no supported part, registers left untouched");
            return Err(Error::NotDetected);
        };
        // Active only once the writes below have all gone out.
        self.startup_state = StartupState::NotStarted;

        self.write_mode_register(settings.mode)?;
        self.write_io_register(settings.io)?;
        if let Some(config) = settings.config {
            self.write_config(config)?;
        }
        self.offset = Some(model.offset_reset());
        self.fullscale = Some(model.fullscale_reset());
        self.startup_state = StartupState::Active;

        #[cfg(feature = "defmt")]
        defmt::info!("AD779x: {=str} initialised", model.name());
        Ok(model)
    }

    /// Reset the serial interface and all registers with 32 consecutive 1s.
    ///
    /// Allowed before detection. Does not wait; the chip needs 500 µs before
    /// the next access. The register mirrors are not touched.
    pub fn reset(&mut self) -> Result<(), Error<T::Error>> {
        self.transaction(|t| {
            for _ in 0..RESET_SEQUENCE_LEN {
                t.transmit(RESET_FILL)?;
            }
            Ok(())
        })
    }

    /// Raw identity register byte.
    pub fn read_id(&mut self) -> Result<u8, Error<T::Error>> {
        let [id] = self.read_bytes(Register::Id)?;
        Ok(id)
    }

    /// Read the identity register and remember the result.
    ///
    /// An unrecognised identity clears any earlier detection. A change of
    /// part drops the cached calibration values.
    pub fn detect_variant(&mut self) -> Result<Option<Model>, Error<T::Error>> {
        let id = self.read_id()?;
        let model = Model::from_id(id);

        #[cfg(feature = "defmt")]
        match model {
            Some(m) => defmt::info!("AD779x: id {=u8:#x}, {=str}", id, m.name()),
            None => defmt::warn!("AD779x: id {=u8:#x} not recognised", id),
        }

        if model != self.model {
            self.offset = None;
            self.fullscale = None;
        }
        self.model = model;
        Ok(model)
    }

    // -----------------------------------------------------------------------
    // Register writes
    // -----------------------------------------------------------------------

    /// Write the mode register (2 bytes).
    pub fn write_mode_register(&mut self, mode: ModeRegister) -> Result<(), Error<T::Error>> {
        self.require_model()?;
        self.mode = mode;
        self.write_bytes(Register::Mode, &mode.to_be_bytes())
    }

    /// Write the configuration register (2 bytes). Reserved bits are cleared.
    pub fn write_config_register(&mut self, raw: u16) -> Result<(), Error<T::Error>> {
        self.write_config(ConfigRegister::from_raw(raw))
    }

    /// Write a typed configuration register value.
    pub fn write_config(&mut self, config: ConfigRegister) -> Result<(), Error<T::Error>> {
        self.require_model()?;
        self.config = config;
        self.write_bytes(Register::Config, &config.to_be_bytes())
    }

    /// Write the IO register (1 byte).
    pub fn write_io_register(&mut self, io: IoRegister) -> Result<(), Error<T::Error>> {
        self.require_model()?;
        self.io = io;
        self.write_bytes(Register::Io, &[io.to_raw()])
    }

    /// Write the offset register in the part's width. Extra high bits are
    /// dropped.
    pub fn write_offset_register(&mut self, value: u32) -> Result<(), Error<T::Error>> {
        let width = self.require_model()?.data_width();
        let value = RawValue::new(value, width);
        self.offset = Some(value);
        self.write_value(Register::Offset, value)
    }

    /// Write the full-scale register in the part's width. Extra high bits
    /// are dropped.
    pub fn write_fullscale_register(&mut self, value: u32) -> Result<(), Error<T::Error>> {
        let width = self.require_model()?.data_width();
        let value = RawValue::new(value, width);
        self.fullscale = Some(value);
        self.write_value(Register::FullScale, value)
    }

    // -----------------------------------------------------------------------
    // Field setters (read-modify-write against the cached registers)
    // -----------------------------------------------------------------------

    /// Change the operating mode.
    pub fn set_mode(&mut self, mode: OperatingMode) -> Result<(), Error<T::Error>> {
        self.write_mode_register(ModeRegister { mode, ..self.mode })
    }

    /// Change the clock source.
    pub fn set_clock_source(&mut self, clock: ClockSource) -> Result<(), Error<T::Error>> {
        self.write_mode_register(ModeRegister { clock, ..self.mode })
    }

    /// Change the filter update rate.
    pub fn set_update_rate(&mut self, rate: UpdateRate) -> Result<(), Error<T::Error>> {
        self.write_mode_register(ModeRegister { rate, ..self.mode })
    }

    /// Set excitation current value and routing in one write.
    pub fn set_excitation_current(
        &mut self,
        current: ExcitationCurrent,
        direction: ExcitationDirection,
    ) -> Result<(), Error<T::Error>> {
        self.write_io_register(IoRegister { current, direction })
    }

    /// Change the excitation current value, keeping the routing.
    pub fn set_excitation_current_value(
        &mut self,
        current: ExcitationCurrent,
    ) -> Result<(), Error<T::Error>> {
        self.write_io_register(IoRegister { current, ..self.io })
    }

    /// Change the excitation current routing, keeping the value.
    pub fn set_excitation_current_direction(
        &mut self,
        direction: ExcitationDirection,
    ) -> Result<(), Error<T::Error>> {
        self.write_io_register(IoRegister { direction, ..self.io })
    }

    /// Select the input channel.
    pub fn set_channel(&mut self, channel: Channel) -> Result<(), Error<T::Error>> {
        self.write_config(self.config.with_channel(channel))
    }

    /// Set the in-amp gain.
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Error<T::Error>> {
        self.write_config(self.config.with_gain(gain))
    }

    /// Select unipolar or bipolar coding.
    pub fn set_polarity(&mut self, polarity: Polarity) -> Result<(), Error<T::Error>> {
        self.write_config(self.config.with_polarity(polarity))
    }

    /// Enable or disable the input buffer.
    pub fn set_buffered(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.write_config(self.config.with_buffered(on))
    }

    // ---- Calibration ----

    /// Start an internal zero-scale calibration on the selected channel.
    pub fn start_zero_scale_calibration(&mut self) -> Result<(), Error<T::Error>> {
        self.set_mode(OperatingMode::InternalZeroCal)
    }

    /// Start an internal full-scale calibration on the selected channel.
    pub fn start_full_scale_calibration(&mut self) -> Result<(), Error<T::Error>> {
        self.set_mode(OperatingMode::InternalFullCal)
    }

    /// Start a system zero-scale calibration. The zero-scale input must be
    /// applied to the selected channel.
    pub fn start_system_zero_scale_calibration(&mut self) -> Result<(), Error<T::Error>> {
        self.set_mode(OperatingMode::SystemZeroCal)
    }

    /// Start a system full-scale calibration. The full-scale input must be
    /// applied to the selected channel.
    pub fn start_system_full_scale_calibration(&mut self) -> Result<(), Error<T::Error>> {
        self.set_mode(OperatingMode::SystemFullCal)
    }

    // -----------------------------------------------------------------------
    // Status and readiness
    // -----------------------------------------------------------------------

    /// Raw status register byte.
    pub fn get_status(&mut self) -> Result<u8, Error<T::Error>> {
        self.require_model()?;
        let [status] = self.read_bytes(Register::CommStatus)?;
        Ok(status)
    }

    /// Decoded status register.
    pub fn read_status(&mut self) -> Result<StatusRegister, Error<T::Error>> {
        self.get_status().map(StatusRegister::from_raw)
    }

    /// `true` if the status register's RDY bit is clear.
    pub fn check_ready_by_status(&mut self) -> Result<bool, Error<T::Error>> {
        self.read_status().map(StatusRegister::is_ready)
    }

    /// `true` if DOUT/RDY is low, sampled inside a chip-select window.
    pub fn check_ready_by_signal(&mut self) -> Result<bool, Error<T::Error>> {
        self.require_model()?;
        let level = self.transaction(T::ready_level)?;
        Ok(level == PinState::Low)
    }

    /// Poll [`Self::check_ready_by_signal`] every `poll_ms` until it reports
    /// ready, at most `max_polls` times. No delay follows the last poll.
    ///
    /// Use after a reset, a calibration start or a single conversion.
    pub fn wait_ready<D: DelayNs>(
        &mut self,
        delay: &mut D,
        poll_ms: u32,
        max_polls: u32,
    ) -> Result<(), Error<T::Error>> {
        self.require_model()?;
        for poll in 1..=max_polls {
            if self.check_ready_by_signal()? {
                return Ok(());
            }
            if poll < max_polls {
                delay.delay_ms(poll_ms);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("AD779x: not ready after {=u32} polls", max_polls);
        Err(Error::Timeout)
    }

    // -----------------------------------------------------------------------
    // Conversion data
    // -----------------------------------------------------------------------

    /// Read the data register in the part's native width.
    pub fn read_data_sample(&mut self) -> Result<RawValue, Error<T::Error>> {
        let width = self.require_model()?.data_width();
        self.read_value(Register::Data, width)
    }

    /// Read a sample as 16 bits. AD7793 results lose their low byte.
    pub fn read_data_sample_16(&mut self) -> Result<u16, Error<T::Error>> {
        self.read_data_sample().map(RawValue::to_u16)
    }

    /// Read a sample as 24 bits. AD7792 results gain a zero low byte.
    pub fn read_data_sample_24(&mut self) -> Result<u32, Error<T::Error>> {
        self.read_data_sample().map(RawValue::to_u24)
    }

    /// Read a sample with its most significant bit at bit 31.
    pub fn read_data_sample_left_aligned(&mut self) -> Result<u32, Error<T::Error>> {
        self.read_data_sample().map(RawValue::left_aligned)
    }

    // -----------------------------------------------------------------------
    // Register reads
    // -----------------------------------------------------------------------

    /// Read the offset register and refresh the cache.
    pub fn read_offset_register(&mut self) -> Result<RawValue, Error<T::Error>> {
        let width = self.require_model()?.data_width();
        let value = self.read_value(Register::Offset, width)?;
        self.offset = Some(value);
        Ok(value)
    }

    /// Read the full-scale register and refresh the cache.
    pub fn read_fullscale_register(&mut self) -> Result<RawValue, Error<T::Error>> {
        let width = self.require_model()?.data_width();
        let value = self.read_value(Register::FullScale, width)?;
        self.fullscale = Some(value);
        Ok(value)
    }

    /// Read back the mode register. The cache is not touched.
    pub fn read_mode_register(&mut self) -> Result<ModeRegister, Error<T::Error>> {
        self.require_model()?;
        let raw = self.read_bytes(Register::Mode)?;
        Ok(ModeRegister::from_raw(u16::from_be_bytes(raw)))
    }

    /// Read back the configuration register. The cache is not touched.
    pub fn read_config_register(&mut self) -> Result<ConfigRegister, Error<T::Error>> {
        self.require_model()?;
        let raw = self.read_bytes(Register::Config)?;
        Ok(ConfigRegister::from_raw(u16::from_be_bytes(raw)))
    }

    /// Read back the IO register. The cache is not touched.
    pub fn read_io_register(&mut self) -> Result<IoRegister, Error<T::Error>> {
        self.require_model()?;
        let [raw] = self.read_bytes(Register::Io)?;
        Ok(IoRegister::from_raw(raw))
    }

    // -----------------------------------------------------------------------
    // Wire helpers
    // -----------------------------------------------------------------------

    fn require_model(&self) -> Result<Model, Error<T::Error>> {
        self.model.ok_or(Error::NotDetected)
    }

    /// Run `body` inside one chip-select window. CS is released whatever
    /// `body` returns; the first error wins.
    fn transaction<R>(
        &mut self,
        body: impl FnOnce(&mut T) -> Result<R, T::Error>,
    ) -> Result<R, Error<T::Error>> {
        self.transport.set_chip_select(ChipSelect::Asserted)?;
        let result = body(&mut self.transport);
        let released = self.transport.set_chip_select(ChipSelect::Released);
        let value = result?;
        released?;
        Ok(value)
    }

    fn write_bytes(&mut self, register: Register, payload: &[u8]) -> Result<(), Error<T::Error>> {
        let command = Command::write(register).byte();
        self.transaction(|t| {
            t.transmit(command)?;
            payload.iter().try_for_each(|b| t.transmit(*b))
        })
    }

    fn read_bytes<const N: usize>(&mut self, register: Register) -> Result<[u8; N], Error<T::Error>> {
        let command = Command::read(register).byte();
        self.transaction(|t| {
            t.transmit(command)?;
            let mut buf = [0u8; N];
            for b in &mut buf {
                *b = t.receive()?;
            }
            Ok(buf)
        })
    }

    fn write_value(&mut self, register: Register, value: RawValue) -> Result<(), Error<T::Error>> {
        let command = Command::write(register).byte();
        self.transaction(|t| {
            t.transmit(command)?;
            value.payload().try_for_each(|b| t.transmit(b))
        })
    }

    fn read_value(&mut self, register: Register, width: DataWidth) -> Result<RawValue, Error<T::Error>> {
        let command = Command::read(register).byte();
        self.transaction(|t| {
            t.transmit(command)?;
            // MSB first; at most 3 bytes, so nothing is shifted out.
            let mut value = 0u32;
            for _ in 0..width.byte_count() {
                value = value.wrapping_shl(8) | u32::from(t.receive()?);
            }
            Ok(RawValue::new(value, width))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mocks::{BusEvent, MockError, MockTransport};
    use embedded_hal_mock::eh1::delay::NoopDelay;

    const ID_AD7792: u8 = 0x0A;
    const ID_AD7793: u8 = 0x0B;

    /// Device with a detected part and an empty event log.
    fn detected(id: u8) -> Ad779x<MockTransport> {
        let mut adc = Ad779x::new(MockTransport::with_rx(&[id]));
        assert!(adc.detect_variant().unwrap().is_some());
        adc.transport.clear();
        adc
    }

    fn transactions(adc: &Ad779x<MockTransport>) -> std::vec::Vec<std::vec::Vec<u8>> {
        adc.transport.transactions()
    }

    // ---- Startup ----

    #[test]
    fn initialize_ad7793_writes_defaults() {
        let mut adc = Ad779x::new(MockTransport::with_rx(&[ID_AD7793]));
        assert_eq!(adc.initialize(), Ok(Model::Ad7793));

        assert_eq!(
            transactions(&adc),
            [std::vec![0x60], std::vec![0x08, 0x40, 0x0A], std::vec![0x28, 0x00]]
        );
        assert_eq!(adc.startup_state(), StartupState::Active);
        assert_eq!(adc.offset().map(RawValue::value), Some(0x80_0000));
        assert_eq!(adc.fullscale().map(RawValue::value), Some(0x50_0000));
        assert_eq!(adc.mode().to_raw(), 0x400A);
        assert!(adc.transport.chip_select_balanced());
    }

    #[test]
    fn initialize_ad7792_uses_16_bit_reset_values() {
        let mut adc = Ad779x::new(MockTransport::with_rx(&[0x4A]));
        assert_eq!(adc.initialize(), Ok(Model::Ad7792));
        assert_eq!(adc.offset().map(RawValue::value), Some(0x8000));
        assert_eq!(adc.fullscale().map(RawValue::value), Some(0x5000));
        assert_eq!(adc.offset().map(RawValue::width), Some(DataWidth::Bits16));
    }

    #[test]
    fn failed_reinitialize_is_not_active() {
        let mut adc = Ad779x::new(MockTransport::with_rx(&[ID_AD7793]));
        assert!(adc.initialize().is_ok());

        // A different part answers, then the mode write's command byte fails.
        adc.transport.queue_rx(&[ID_AD7792]);
        adc.transport.fail_at(5);
        assert_eq!(adc.initialize(), Err(Error::Transport(MockError::Injected)));

        assert_eq!(adc.startup_state(), StartupState::NotStarted);
        assert_eq!(adc.model(), Some(Model::Ad7792));
        assert_eq!(adc.offset(), None);
        assert_eq!(adc.fullscale(), None);
    }

    #[test]
    fn unknown_identity_writes_nothing() {
        let mut adc = Ad779x::new(MockTransport::with_rx(&[0x00]));
        assert_eq!(adc.initialize(), Err(Error::NotDetected));

        assert_eq!(adc.startup_state(), StartupState::NoHardware);
        assert_eq!(adc.model(), None);
        // Only the identity read went out.
        assert_eq!(transactions(&adc), [std::vec![0x60]]);
        assert_eq!(adc.offset(), None);
    }

    #[test]
    fn initialize_with_settings_writes_config() {
        let settings = Settings::default()
            .with_io(IoRegister {
                current: ExcitationCurrent::Ua210,
                direction: ExcitationDirection::Normal,
            })
            .with_config(ConfigRegister::POWER_ON.with_gain(Gain::X16));
        let mut adc = Ad779x::new(MockTransport::with_rx(&[ID_AD7793]));
        assert!(adc.initialize_with(&settings).is_ok());

        assert_eq!(
            transactions(&adc),
            [
                std::vec![0x60],
                std::vec![0x08, 0x40, 0x0A],
                std::vec![0x28, 0x02],
                std::vec![0x10, 0x04, 0x10],
            ]
        );
        assert_eq!(adc.config().gain(), Gain::X16);
    }

    #[test]
    fn reset_sends_32_ones_before_detection() {
        let mut adc = Ad779x::new(MockTransport::new());
        assert!(adc.reset().is_ok());
        assert_eq!(transactions(&adc), [std::vec![0xFF, 0xFF, 0xFF, 0xFF]]);
    }

    #[test]
    fn failed_detection_clears_previous_model() {
        let mut adc = detected(ID_AD7793);
        adc.transport.queue_rx(&[0xFF]);
        assert_eq!(adc.detect_variant(), Ok(None));
        assert_eq!(adc.model(), None);
        assert_eq!(adc.read_data_sample(), Err(Error::NotDetected));
    }

    // ---- Guards and errors ----

    #[test]
    fn undetected_device_sends_nothing() {
        let mut adc = Ad779x::new(MockTransport::with_rx(&[0x00, 0x00, 0x00]));

        assert_eq!(adc.write_mode_register(ModeRegister::DEFAULT), Err(Error::NotDetected));
        assert_eq!(adc.write_config_register(0x0710), Err(Error::NotDetected));
        assert_eq!(adc.set_update_rate(UpdateRate::Hz500), Err(Error::NotDetected));
        assert_eq!(adc.write_offset_register(0), Err(Error::NotDetected));
        assert_eq!(adc.get_status(), Err(Error::NotDetected));
        assert_eq!(adc.check_ready_by_signal(), Err(Error::NotDetected));
        assert_eq!(adc.read_data_sample(), Err(Error::NotDetected));
        assert_eq!(adc.read_fullscale_register(), Err(Error::NotDetected));
        assert_eq!(adc.read_io_register(), Err(Error::NotDetected));
        assert_eq!(
            adc.wait_ready(&mut NoopDelay::new(), 1, 10),
            Err(Error::NotDetected)
        );

        assert!(adc.transport.events().is_empty());
        // Rejected writes leave the cache alone.
        assert_eq!(adc.mode(), ModeRegister::DEFAULT);
        assert_eq!(adc.config(), ConfigRegister::POWER_ON);
    }

    #[test]
    fn chip_select_released_when_transmit_fails() {
        let mut adc = detected(ID_AD7793);
        // op 0 asserts CS, op 1 is the command byte
        adc.transport.fail_at(1);
        assert_eq!(
            adc.write_mode_register(ModeRegister::DEFAULT),
            Err(Error::Transport(MockError::Injected))
        );
        assert_eq!(
            adc.transport.events().last(),
            Some(&BusEvent::Select(ChipSelect::Released))
        );
        assert!(adc.transport.chip_select_balanced());
    }

    #[test]
    fn chip_select_released_when_receive_fails() {
        let mut adc = detected(ID_AD7793);
        // two bytes queued, three needed
        adc.transport.queue_rx(&[0x12, 0x34]);
        assert_eq!(adc.read_data_sample(), Err(Error::Transport(MockError::NoData)));
        assert!(adc.transport.chip_select_balanced());
    }

    #[test]
    fn cache_updated_before_transmit() {
        let mut adc = detected(ID_AD7793);
        adc.transport.fail_at(0);
        assert!(adc.set_update_rate(UpdateRate::Hz500).is_err());
        assert_eq!(adc.mode().rate, UpdateRate::Hz500);
    }

    // ---- Writes ----

    #[test]
    fn register_write_commands() {
        let mut adc = detected(ID_AD7793);
        adc.write_mode_register(ModeRegister::DEFAULT).unwrap();
        adc.write_config_register(0x0710).unwrap();
        adc.write_io_register(IoRegister::DEFAULT).unwrap();
        adc.write_offset_register(0x80_0000).unwrap();
        adc.write_fullscale_register(0x50_0000).unwrap();

        assert_eq!(
            transactions(&adc),
            [
                std::vec![0x08, 0x40, 0x0A],
                std::vec![0x10, 0x07, 0x10],
                std::vec![0x28, 0x00],
                std::vec![0x30, 0x80, 0x00, 0x00],
                std::vec![0x38, 0x50, 0x00, 0x00],
            ]
        );
    }

    #[test]
    fn config_write_clears_reserved_bits() {
        let mut adc = detected(ID_AD7793);
        adc.write_config_register(0xFFFF).unwrap();
        assert_eq!(transactions(&adc), [std::vec![0x10, 0xFF, 0x97]]);
        assert_eq!(adc.config().raw(), 0xFF97);
    }

    #[test]
    fn calibration_writes_follow_part_width() {
        let mut adc = detected(ID_AD7792);
        adc.write_offset_register(0x12_3456).unwrap();
        assert_eq!(transactions(&adc), [std::vec![0x30, 0x34, 0x56]]);
        assert_eq!(adc.offset().map(RawValue::value), Some(0x3456));
    }

    #[test]
    fn set_update_rate_is_idempotent() {
        let mut adc = detected(ID_AD7793);
        adc.set_mode(OperatingMode::Continuous).unwrap();
        adc.set_clock_source(ClockSource::External).unwrap();
        adc.transport.clear();

        adc.set_update_rate(UpdateRate::Hz4_17Rej74dB).unwrap();
        adc.set_update_rate(UpdateRate::Hz4_17Rej74dB).unwrap();

        let tx = transactions(&adc);
        assert_eq!(tx.len(), 2);
        assert_eq!(tx.first(), tx.get(1));
        assert_eq!(tx.first(), Some(&std::vec![0x08, 0x00, 0x8F]));
        assert_eq!(adc.mode().mode, OperatingMode::Continuous);
        assert_eq!(adc.mode().clock, ClockSource::External);
    }

    #[test]
    fn excitation_setters_keep_other_field() {
        let mut adc = detected(ID_AD7793);
        adc.set_excitation_current(ExcitationCurrent::Ua10, ExcitationDirection::Inverse)
            .unwrap();
        adc.set_excitation_current_value(ExcitationCurrent::Ma1).unwrap();
        adc.set_excitation_current_direction(ExcitationDirection::BothToOut2)
            .unwrap();

        assert_eq!(
            transactions(&adc),
            [std::vec![0x28, 0x05], std::vec![0x28, 0x07], std::vec![0x28, 0x0F]]
        );
    }

    #[test]
    fn config_setters_modify_cached_value() {
        let mut adc = detected(ID_AD7793);
        adc.set_gain(Gain::X1).unwrap();
        adc.set_channel(Channel::Ain2).unwrap();
        adc.set_polarity(Polarity::Unipolar).unwrap();
        adc.set_buffered(false).unwrap();

        assert_eq!(
            transactions(&adc),
            [
                std::vec![0x10, 0x00, 0x10],
                std::vec![0x10, 0x00, 0x11],
                std::vec![0x10, 0x10, 0x11],
                std::vec![0x10, 0x10, 0x01],
            ]
        );
    }

    #[test]
    fn calibration_modes() {
        let mut adc = detected(ID_AD7793);
        adc.start_zero_scale_calibration().unwrap();
        adc.start_full_scale_calibration().unwrap();
        adc.start_system_zero_scale_calibration().unwrap();
        adc.start_system_full_scale_calibration().unwrap();

        assert_eq!(
            transactions(&adc),
            [
                std::vec![0x08, 0x80, 0x0A],
                std::vec![0x08, 0xA0, 0x0A],
                std::vec![0x08, 0xC0, 0x0A],
                std::vec![0x08, 0xE0, 0x0A],
            ]
        );
    }

    // ---- Reads ----

    #[test]
    fn sample_16_bit_part_reads_two_bytes() {
        let mut adc = detected(ID_AD7792);
        adc.transport.queue_rx(&[0x12, 0x34, 0x99]);
        let sample = adc.read_data_sample().unwrap();

        assert_eq!(sample.value(), 0x1234);
        assert_eq!(transactions(&adc), [std::vec![0x58]]);
        assert_eq!(adc.transport.pending_rx(), 1);
    }

    #[test]
    fn sample_24_bit_part_reads_three_bytes() {
        let mut adc = detected(ID_AD7793);
        adc.transport.queue_rx(&[0x12, 0x34, 0x56]);
        let sample = adc.read_data_sample().unwrap();

        assert_eq!(sample.to_u16(), 0x1234);
        assert_eq!(sample.to_u24(), 0x12_3456);
        assert_eq!(sample.left_aligned(), 0x1234_5600);
        assert_eq!(adc.transport.pending_rx(), 0);
    }

    #[test]
    fn sample_alignment_operations() {
        let mut adc = detected(ID_AD7793);
        adc.transport.queue_rx(&[0x12, 0x34, 0x56]);
        assert_eq!(adc.read_data_sample_16(), Ok(0x1234));
        adc.transport.queue_rx(&[0x12, 0x34, 0x56]);
        assert_eq!(adc.read_data_sample_24(), Ok(0x12_3456));
        adc.transport.queue_rx(&[0x12, 0x34, 0x56]);
        assert_eq!(adc.read_data_sample_left_aligned(), Ok(0x1234_5600));

        let mut adc = detected(ID_AD7792);
        adc.transport.queue_rx(&[0x12, 0x34]);
        assert_eq!(adc.read_data_sample_16(), Ok(0x1234));
        adc.transport.queue_rx(&[0x12, 0x34]);
        assert_eq!(adc.read_data_sample_24(), Ok(0x12_3400));
        adc.transport.queue_rx(&[0x12, 0x34]);
        assert_eq!(adc.read_data_sample_left_aligned(), Ok(0x1234_0000));
    }

    #[test]
    fn calibration_reads_refresh_cache() {
        let mut adc = detected(ID_AD7793);
        adc.transport.queue_rx(&[0x7F, 0xFF, 0xF0, 0x55, 0x44, 0x33]);
        assert_eq!(adc.read_offset_register().map(RawValue::value), Ok(0x7F_FFF0));
        assert_eq!(adc.read_fullscale_register().map(RawValue::value), Ok(0x55_4433));

        assert_eq!(adc.offset().map(RawValue::value), Some(0x7F_FFF0));
        assert_eq!(adc.fullscale().map(RawValue::value), Some(0x55_4433));
        assert_eq!(adc.transport.commands(), [0x70, 0x78]);
    }

    #[test]
    fn calibration_reads_on_16_bit_part_take_two_bytes() {
        let mut adc = detected(ID_AD7792);
        adc.transport.queue_rx(&[0x80, 0x01, 0x99]);
        let offset = adc.read_offset_register().unwrap();
        assert_eq!(offset.value(), 0x8001);
        assert_eq!(offset.width(), DataWidth::Bits16);
        assert_eq!(adc.transport.pending_rx(), 1);

        adc.transport.queue_rx(&[0x50, 0x02]);
        let fullscale = adc.read_fullscale_register().unwrap();
        assert_eq!(fullscale.value(), 0x9950);
        assert_eq!(fullscale.width(), DataWidth::Bits16);
        assert_eq!(adc.transport.pending_rx(), 1);

        assert_eq!(adc.offset(), Some(offset));
        assert_eq!(adc.fullscale(), Some(fullscale));
        assert_eq!(adc.transport.commands(), [0x70, 0x78]);
    }

    #[test]
    fn register_reads_decode_without_touching_cache() {
        let mut adc = detected(ID_AD7793);
        adc.transport.queue_rx(&[0x00, 0x01, 0x07, 0x10, 0x0B]);

        let mode = adc.read_mode_register().unwrap();
        assert_eq!(mode.mode, OperatingMode::Continuous);
        assert_eq!(mode.rate, UpdateRate::Hz500);
        assert_eq!(adc.read_config_register().map(ConfigRegister::raw), Ok(0x0710));
        let io = adc.read_io_register().unwrap();
        assert_eq!(io.current, ExcitationCurrent::Ma1);
        assert_eq!(io.direction, ExcitationDirection::BothToOut1);

        assert_eq!(adc.transport.commands(), [0x48, 0x50, 0x68]);
        assert_eq!(adc.mode(), ModeRegister::DEFAULT);
        assert_eq!(adc.io(), IoRegister::DEFAULT);
    }

    #[test]
    fn read_id_is_allowed_before_detection() {
        let mut adc = Ad779x::new(MockTransport::with_rx(&[0x4B]));
        assert_eq!(adc.read_id(), Ok(0x4B));
        assert_eq!(adc.model(), None);
    }

    // ---- Readiness ----

    #[test]
    fn ready_by_status_all_bytes() {
        let mut adc = detected(ID_AD7793);
        for status in 0..=u8::MAX {
            adc.transport.queue_rx(&[status]);
            let ready = adc.check_ready_by_status().unwrap();
            assert_eq!(ready, status & 0x80 == 0, "status {status:#04x}");
        }
        let commands = adc.transport.commands();
        assert_eq!(commands.len(), 256);
        assert!(commands.iter().all(|c| *c == 0x40));
    }

    #[test]
    fn ready_by_signal_samples_inside_chip_select() {
        let mut adc = detected(ID_AD7793);
        adc.transport.set_ready(PinState::Low);
        assert_eq!(adc.check_ready_by_signal(), Ok(true));
        adc.transport.set_ready(PinState::High);
        assert_eq!(adc.check_ready_by_signal(), Ok(false));

        assert_eq!(
            adc.transport.events(),
            [
                BusEvent::Select(ChipSelect::Asserted),
                BusEvent::Ready(PinState::Low),
                BusEvent::Select(ChipSelect::Released),
                BusEvent::Select(ChipSelect::Asserted),
                BusEvent::Ready(PinState::High),
                BusEvent::Select(ChipSelect::Released),
            ]
        );
    }

    #[test]
    fn wait_ready_returns_when_low() {
        let mut adc = detected(ID_AD7793);
        adc.transport.set_ready(PinState::Low);
        assert_eq!(adc.wait_ready(&mut NoopDelay::new(), 10, 5), Ok(()));
    }

    #[test]
    fn wait_ready_times_out() {
        let mut adc = detected(ID_AD7793);
        adc.transport.set_ready(PinState::High);
        assert_eq!(adc.wait_ready(&mut NoopDelay::new(), 10, 5), Err(Error::Timeout));

        let polls = adc
            .transport
            .events()
            .iter()
            .filter(|e| matches!(e, BusEvent::Ready(_)))
            .count();
        assert_eq!(polls, 5);
    }

    /// Counts `delay_ms` calls.
    #[derive(Default)]
    struct CountingDelay {
        calls: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, _ns: u32) {
            self.calls = self.calls.saturating_add(1);
        }

        fn delay_ms(&mut self, _ms: u32) {
            self.calls = self.calls.saturating_add(1);
        }
    }

    #[test]
    fn wait_ready_sleeps_only_between_polls() {
        let mut adc = detected(ID_AD7793);
        adc.transport.set_ready(PinState::High);
        let mut delay = CountingDelay::default();
        assert_eq!(adc.wait_ready(&mut delay, 10, 3), Err(Error::Timeout));
        assert_eq!(delay.calls, 2);

        let mut delay = CountingDelay::default();
        assert_eq!(adc.wait_ready(&mut delay, 10, 0), Err(Error::Timeout));
        assert_eq!(delay.calls, 0);

        adc.transport.set_ready(PinState::Low);
        let mut delay = CountingDelay::default();
        assert_eq!(adc.wait_ready(&mut delay, 10, 3), Ok(()));
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn status_decoding() {
        let mut adc = detected(ID_AD7793);
        adc.transport.queue_rx(&[0x4A]);
        let status = adc.read_status().unwrap();
        assert!(status.is_ready());
        assert!(status.has_error());
        assert!(status.is_24_bit_part());
        assert_eq!(status.channel(), Channel::Ain3);
    }

    #[test]
    fn release_returns_transport() {
        let adc = detected(ID_AD7793);
        let mock = adc.release();
        assert!(mock.events().is_empty());
    }
}
