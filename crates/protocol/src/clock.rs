//! Seam to the execution environment's clock.

/// Provides the current chain height for batch timeout checks.
pub trait ChainClock {
    fn current_height(&self) -> u64;
}

/// A clock pinned at a fixed height.
#[derive(Copy, Clone, Debug)]
pub struct FixedClock(pub u64);

impl ChainClock for FixedClock {
    fn current_height(&self) -> u64 {
        self.0
    }
}
