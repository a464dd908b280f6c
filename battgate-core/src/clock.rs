//! Millisecond delays measured against a free-running hardware counter.

/// A counter that increments on its own at a fixed rate and wraps at `2^BITS`.
pub trait FreeRunningCounter {
    /// Counter width. Readings are masked to this many bits.
    const BITS: u32;
    /// Counter increments per millisecond.
    const TICKS_PER_MS: u32;

    fn ticks(&mut self) -> u32;
}

/// Blocking delay service built on a [`FreeRunningCounter`].
pub struct Clock<C> {
    counter: C,
}

impl<C: FreeRunningCounter> Clock<C> {
    const MASK: u32 = if C::BITS >= 32 {
        u32::MAX
    } else {
        (1 << C::BITS) - 1
    };

    // Longest single wait; keeps a wrapped target well clear of the start value
    const MAX_CHUNK: u32 = Self::MASK / 2;

    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    /// Busy-wait for approximately `ms` milliseconds.
    pub fn delay_ms(&mut self, ms: u32) {
        let mut remaining = u64::from(ms) * u64::from(C::TICKS_PER_MS);
        while remaining > 0 {
            let chunk = remaining.min(u64::from(Self::MAX_CHUNK)) as u32;
            self.wait_ticks(chunk);
            remaining -= u64::from(chunk);
        }
    }

    fn now(&mut self) -> u32 {
        self.counter.ticks() & Self::MASK
    }

    fn wait_ticks(&mut self, ticks: u32) {
        let start = self.now();
        let target = start.wrapping_add(ticks) & Self::MASK;

        if target < start {
            // Target lies past the wrap: let the counter pass through zero first
            while self.now() >= start {}
        }
        while self.now() < target {}
    }
}
