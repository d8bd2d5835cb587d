//! Bus transport capability.
//!
//! The driver never touches pins or peripherals directly. Each device owns a
//! [`Transport`] that provides the four primitives the serial protocol needs:
//! chip-select control, single-byte transmit and receive, and the level of
//! the DOUT/RDY line.
//!
//! [`HalTransport`] implements the capability on top of the `embedded-hal`
//! 1.0 blocking traits:
//!
//! | Signal  | Trait                          | Direction      |
//! |---------|--------------------------------|----------------|
//! | SCLK    | `SpiBus` (mode 3)              | Host → ADC     |
//! | DIN     | `SpiBus` MOSI                  | Host → ADC     |
//! | DOUT    | `SpiBus` MISO                  | ADC → Host     |
//! | CS      | `OutputPin`, active low        | Host → ADC     |
//! | RDY     | `InputPin` on the DOUT line    | ADC → Host     |

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use embedded_hal::spi::SpiBus;

/// Chip-select request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipSelect {
    /// Address the converter (CS low).
    Asserted,
    /// Release the converter (CS high).
    Released,
}

/// Byte-level access to one converter.
///
/// Implementations block until each operation completes and report failures
/// through `Self::Error`; the driver never retries.
pub trait Transport {
    /// Error type
    type Error: core::fmt::Debug;

    /// Drive chip select.
    fn set_chip_select(&mut self, state: ChipSelect) -> Result<(), Self::Error>;

    /// Send one byte.
    fn transmit(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Receive one byte.
    fn receive(&mut self) -> Result<u8, Self::Error>;

    /// Level of the DOUT/RDY line. Only meaningful while CS is asserted;
    /// low means a conversion result is waiting.
    fn ready_level(&mut self) -> Result<PinState, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn set_chip_select(&mut self, state: ChipSelect) -> Result<(), Self::Error> {
        (**self).set_chip_select(state)
    }

    fn transmit(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).transmit(byte)
    }

    fn receive(&mut self) -> Result<u8, Self::Error> {
        (**self).receive()
    }

    fn ready_level(&mut self) -> Result<PinState, Self::Error> {
        (**self).ready_level()
    }
}

/// Errors returned by [`HalTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError<S, C, R> {
    /// SPI bus error.
    Spi(S),
    /// Chip-select pin error.
    ChipSelect(C),
    /// Ready pin error.
    Ready(R),
}

impl<S: core::fmt::Debug, C: core::fmt::Debug, R: core::fmt::Debug> core::fmt::Display
    for HalError<S, C, R>
{
    // Transport errors are opaque generics; Debug is all they offer.
    #[allow(clippy::use_debug)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::ChipSelect(e) => write!(f, "chip-select pin error: {e:?}"),
            Self::Ready(e) => write!(f, "ready pin error: {e:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<S: core::fmt::Debug, C: core::fmt::Debug, R: core::fmt::Debug> std::error::Error
    for HalError<S, C, R>
{
}

/// [`Transport`] over an exclusive `SpiBus`, a CS output and a RDY input.
///
/// The bus must be configured for SPI mode 3, MSB first. CS is driven by
/// this adapter, so `SPI` is a bus, not an `SpiDevice`.
pub struct HalTransport<SPI, CS, RDY> {
    spi: SPI,
    cs: CS,
    rdy: RDY,
}

impl<SPI, CS, RDY> HalTransport<SPI, CS, RDY>
where
    SPI: SpiBus,
    CS: OutputPin,
    RDY: InputPin,
{
    /// Wrap the bus and pins. CS is not touched until the first transaction.
    pub fn new(spi: SPI, cs: CS, rdy: RDY) -> Self {
        Self { spi, cs, rdy }
    }

    /// Give back the bus and pins.
    pub fn release(self) -> (SPI, CS, RDY) {
        (self.spi, self.cs, self.rdy)
    }
}

impl<SPI, CS, RDY> Transport for HalTransport<SPI, CS, RDY>
where
    SPI: SpiBus,
    CS: OutputPin,
    RDY: InputPin,
{
    type Error = HalError<SPI::Error, CS::Error, RDY::Error>;

    fn set_chip_select(&mut self, state: ChipSelect) -> Result<(), Self::Error> {
        match state {
            ChipSelect::Asserted => self.cs.set_low().map_err(HalError::ChipSelect),
            ChipSelect::Released => {
                // Words may still be in flight; CS must stay low until they are out.
                let flushed = self.spi.flush().map_err(HalError::Spi);
                self.cs.set_high().map_err(HalError::ChipSelect)?;
                flushed
            }
        }
    }

    fn transmit(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.spi.write(&[byte]).map_err(HalError::Spi)
    }

    fn receive(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8];
        self.spi.read(&mut buf).map_err(HalError::Spi)?;
        let [byte] = buf;
        Ok(byte)
    }

    fn ready_level(&mut self) -> Result<PinState, Self::Error> {
        let high = self.rdy.is_high().map_err(HalError::Ready)?;
        Ok(PinState::from(high))
    }
}
