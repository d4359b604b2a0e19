//! Test doubles shared by the unit tests.

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

/// Replays a fixed list of values in a loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scripted<'a> {
    values: &'a [u32],
    next: usize,
}

impl<'a> Scripted<'a> {
    pub const fn new(values: &'a [u32]) -> Self {
        Self { values, next: 0 }
    }
}

impl RngCore for Scripted<'_> {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Returns immediately and remembers every requested wait, in milliseconds.
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
