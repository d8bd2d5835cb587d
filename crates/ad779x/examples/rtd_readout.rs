//! PT100 readout on an AD7793, run against the recording mock transport.
//!
//! Shows the usual ratiometric RTD setup: 210 µA excitation through the RTD
//! and a reference resistor, unipolar coding, gain 16, 16.7 Hz filter. The
//! mock answers the identity read and one conversion, then the example
//! prints every chip-select window the driver produced.
//!
//! Run with: cargo run -p ad779x --example rtd_readout --features std

#![allow(clippy::print_stdout, clippy::cast_precision_loss)]

use ad779x::mocks::MockTransport;
use ad779x::{
    Ad779x, Channel, ConfigRegister, ExcitationCurrent, ExcitationDirection, Gain, IoRegister,
    Polarity, Settings,
};
use embedded_hal::digital::PinState;

/// Reference resistor between REFIN(+) and REFIN(−).
const R_REF_OHMS: f64 = 5_110.0;
/// PT100 nominal resistance at 0 °C.
const R0_OHMS: f64 = 100.0;
/// PT100 temperature coefficient (IEC 60751), per °C.
const ALPHA: f64 = 0.003_85;

fn main() -> Result<(), ad779x::Error<ad779x::mocks::MockError>> {
    // ID register, then one 24-bit sample of roughly 109.7 Ω (~25 °C).
    let mut transport = MockTransport::with_rx(&[0x4B, 0x57, 0xF6, 0x6B]);
    transport.set_ready(PinState::Low);

    let gain = Gain::X16;
    let settings = Settings::default()
        .with_io(IoRegister {
            current: ExcitationCurrent::Ua210,
            direction: ExcitationDirection::Normal,
        })
        .with_config(
            ConfigRegister::POWER_ON
                .with_polarity(Polarity::Unipolar)
                .with_gain(gain)
                .with_channel(Channel::Ain1),
        );

    let mut adc = Ad779x::new(transport);
    let model = adc.initialize_with(&settings)?;
    println!("detected {}", model.name());

    adc.set_mode(ad779x::OperatingMode::Single)?;
    adc.wait_ready(&mut embedded_hal_mock::eh1::delay::NoopDelay::new(), 10, 20)?;
    let sample = adc.read_data_sample()?;

    let full_scale = f64::from(model.data_width().mask()) + 1.0;
    let ohms = f64::from(sample.value()) / full_scale * R_REF_OHMS / f64::from(gain.factor());
    let celsius = (ohms / R0_OHMS - 1.0) / ALPHA;
    println!(
        "code {:#08x} -> {ohms:.2} ohm -> {celsius:.1} degC",
        sample.value()
    );

    let transport = adc.release();
    for (i, window) in transport.transactions().iter().enumerate() {
        println!("CS window {i}: {window:02x?}");
    }
    Ok(())
}
