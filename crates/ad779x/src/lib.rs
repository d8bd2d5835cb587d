//! Register-level driver for the Analog Devices AD7792 / AD7793 sigma-delta
//! ADCs.
//!
//! The two parts share one register map and serial protocol; the AD7792
//! returns 16-bit results, the AD7793 24-bit. The driver reads the identity
//! register once and sizes every later data, offset and full-scale exchange
//! to match.
//!
//! # Architecture
//!
//! ```text
//! Application
//!     ↓
//! Ad779x<T>            (device: cached registers, variant, startup state)
//!     ↓
//! Command / registers  (pure encoding: command byte, typed bit fields)
//!     ↓
//! Transport            (CS, byte tx/rx, RDY level; HalTransport or a mock)
//! ```
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls and the [`mocks`] module
//! - `defmt`: `defmt::Format` derives and driver logging
//!
//! # Example
//!
//! ```no_run
//! use ad779x::{Ad779x, Gain, HalTransport, UpdateRate};
//! # use embedded_hal::{digital::{InputPin, OutputPin}, spi::SpiBus};
//! # type E<S, C, R> = ad779x::Error<ad779x::HalError<S, C, R>>;
//! # fn example<S: SpiBus, C: OutputPin, R: InputPin>(
//! #     spi: S,
//! #     cs: C,
//! #     rdy: R,
//! # ) -> Result<u32, E<S::Error, C::Error, R::Error>> {
//! let mut adc = Ad779x::new(HalTransport::new(spi, cs, rdy));
//! adc.initialize()?;
//! adc.set_gain(Gain::X16)?;
//! adc.set_update_rate(UpdateRate::Hz50)?;
//! let sample = adc.read_data_sample()?;
//! # Ok(sample.value())
//! # }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register and pin names in doc comments
#![allow(clippy::must_use_candidate)] // register accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod io;
pub mod mocks;
pub mod mode;
pub mod registers;
pub mod settings;
pub mod status;
pub mod transport;
pub mod variant;

pub use command::{command_byte, Access, Command, Register};
pub use config::{BiasVoltage, Channel, ConfigRegister, Gain, Polarity, Reference};
pub use device::Ad779x;
pub use error::Error;
pub use io::{ExcitationCurrent, ExcitationDirection, IoRegister};
pub use mode::{ClockSource, ModeRegister, OperatingMode, UpdateRate};
pub use settings::Settings;
pub use status::StatusRegister;
pub use transport::{ChipSelect, HalError, HalTransport, Transport};
pub use variant::{DataWidth, Model, RawValue, StartupState};
