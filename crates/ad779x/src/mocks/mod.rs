//! Mock transport for testing
//!
//! [`MockTransport`] records every bus operation the driver performs and
//! replays queued receive bytes, so tests can check exact wire sequences
//! without hardware.

#![cfg(any(test, feature = "std"))]

use std::collections::VecDeque;

use embedded_hal::digital::PinState;

use crate::transport::{ChipSelect, Transport};

/// One recorded bus operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// Chip select driven.
    Select(ChipSelect),
    /// Byte transmitted by the driver.
    Tx(u8),
    /// Byte handed to the driver.
    Rx(u8),
    /// Ready line sampled.
    Ready(PinState),
}

/// Mock transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// `receive` called with an empty receive queue.
    NoData,
    /// Failure injected with [`MockTransport::fail_at`].
    Injected,
}

/// Recording transport.
pub struct MockTransport {
    rx: VecDeque<u8>,
    ready: PinState,
    events: Vec<BusEvent>,
    ops: usize,
    fail_at: Option<usize>,
}

impl MockTransport {
    /// Create a mock with an empty receive queue and the ready line high.
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            ready: PinState::High,
            events: Vec::new(),
            ops: 0,
            fail_at: None,
        }
    }

    /// Create a mock whose receive queue holds `bytes`.
    pub fn with_rx(bytes: &[u8]) -> Self {
        let mut mock = Self::new();
        mock.queue_rx(bytes);
        mock
    }

    /// Append bytes to the receive queue.
    pub fn queue_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Level reported by `ready_level`.
    pub fn set_ready(&mut self, level: PinState) {
        self.ready = level;
    }

    /// Make the `n`-th transport operation from now (0-based) fail.
    pub fn fail_at(&mut self, n: usize) {
        self.fail_at = Some(self.ops.saturating_add(n));
    }

    /// All recorded events.
    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    /// Bytes transmitted by the driver, in order.
    pub fn transmitted(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Tx(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Bytes transmitted inside each chip-select window.
    pub fn transactions(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut current: Option<Vec<u8>> = None;
        for e in &self.events {
            match e {
                BusEvent::Select(ChipSelect::Asserted) => current = Some(Vec::new()),
                BusEvent::Select(ChipSelect::Released) => {
                    if let Some(tx) = current.take() {
                        out.push(tx);
                    }
                }
                BusEvent::Tx(b) => {
                    if let Some(tx) = current.as_mut() {
                        tx.push(*b);
                    }
                }
                BusEvent::Rx(_) | BusEvent::Ready(_) => {}
            }
        }
        out
    }

    /// First byte of every chip-select window (the command bytes).
    pub fn commands(&self) -> Vec<u8> {
        self.transactions()
            .iter()
            .filter_map(|tx| tx.first().copied())
            .collect()
    }

    /// `true` if every assert is followed by a release before the next assert.
    pub fn chip_select_balanced(&self) -> bool {
        let mut selected = false;
        for e in &self.events {
            match e {
                BusEvent::Select(ChipSelect::Asserted) if selected => return false,
                BusEvent::Select(ChipSelect::Asserted) => selected = true,
                BusEvent::Select(ChipSelect::Released) => selected = false,
                _ => {}
            }
        }
        !selected
    }

    /// Receive bytes not consumed yet.
    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn step(&mut self) -> Result<(), MockError> {
        let op = self.ops;
        self.ops = self.ops.saturating_add(1);
        if self.fail_at == Some(op) {
            self.fail_at = None;
            return Err(MockError::Injected);
        }
        Ok(())
    }

    fn record(&mut self, event: BusEvent) {
        self.events.push(event);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn set_chip_select(&mut self, state: ChipSelect) -> Result<(), Self::Error> {
        self.step()?;
        self.record(BusEvent::Select(state));
        Ok(())
    }

    fn transmit(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.step()?;
        self.record(BusEvent::Tx(byte));
        Ok(())
    }

    fn receive(&mut self) -> Result<u8, Self::Error> {
        self.step()?;
        let byte = self.rx.pop_front().ok_or(MockError::NoData)?;
        self.record(BusEvent::Rx(byte));
        Ok(byte)
    }

    fn ready_level(&mut self) -> Result<PinState, Self::Error> {
        self.step()?;
        let level = self.ready;
        self.record(BusEvent::Ready(level));
        Ok(level)
    }
}
