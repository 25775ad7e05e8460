//! Recording bus mocks used by the unit tests.
extern crate std;

use std::collections::VecDeque;
use std::vec::Vec;

use embassy_time::{Duration, MockDriver};

use crate::BusAdapter;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BusEvent {
    Enable(bool),
    Backlight(bool),
    Write { rs: bool, data: u8 },
    Read { rs: bool },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MockBusError;

/// Bus that records every transaction. Reads are served from a script; once it runs out, every
/// read returns `idle_read`. Each read advances the mock time driver by `read_time_us`.
#[derive(Debug, Default)]
pub struct MockBus {
    pub events: Vec<BusEvent>,
    pub reads: VecDeque<u8>,
    pub idle_read: u8,
    pub read_time_us: u64,
}

impl MockBus {
    pub fn with_reads(reads: &[u8]) -> Self {
        Self {
            reads: reads.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Only the raw writes, as `(register_select, data)`.
    pub fn writes(&self) -> Vec<(bool, u8)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BusEvent::Write { rs, data } => Some((*rs, *data)),
                _ => None,
            })
            .collect()
    }

    pub fn read_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, BusEvent::Read { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BusAdapter for MockBus {
    type Error = MockBusError;

    async fn set_enable(&mut self, state: bool) -> Result<(), Self::Error> {
        self.events.push(BusEvent::Enable(state));
        Ok(())
    }

    async fn set_backlight(&mut self, state: bool) -> Result<(), Self::Error> {
        self.events.push(BusEvent::Backlight(state));
        Ok(())
    }

    async fn raw_write(&mut self, register_select: bool, data: u8) -> Result<(), Self::Error> {
        self.events.push(BusEvent::Write {
            rs: register_select,
            data,
        });
        Ok(())
    }

    async fn raw_read(&mut self, register_select: bool) -> Result<u8, Self::Error> {
        self.events.push(BusEvent::Read { rs: register_select });
        if self.read_time_us > 0 {
            MockDriver::get().advance(Duration::from_micros(self.read_time_us));
        }
        Ok(self.reads.pop_front().unwrap_or(self.idle_read))
    }
}

/// Bus whose every transaction fails.
#[derive(Debug, Default)]
pub struct FailingBus;

impl BusAdapter for FailingBus {
    type Error = MockBusError;

    async fn set_enable(&mut self, _state: bool) -> Result<(), Self::Error> {
        Err(MockBusError)
    }

    async fn set_backlight(&mut self, _state: bool) -> Result<(), Self::Error> {
        Err(MockBusError)
    }

    async fn raw_write(&mut self, _register_select: bool, _data: u8) -> Result<(), Self::Error> {
        Err(MockBusError)
    }

    async fn raw_read(&mut self, _register_select: bool) -> Result<u8, Self::Error> {
        Err(MockBusError)
    }
}
