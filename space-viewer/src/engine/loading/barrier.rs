/// Releases exactly once, when `arrived` reaches `expected`.
///
/// Arrivals are never taken back, so a load that fails simply never arrives.
#[derive(Debug, Default, Clone)]
pub struct ReadinessBarrier {
    expected: usize,
    arrived: usize,
    released: bool,
}

impl ReadinessBarrier {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            arrived: 0,
            released: false,
        }
    }

    /// Records one arrival. Returns true only for the arrival that releases the barrier.
    pub fn arrive(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.arrived += 1;
        self.try_release()
    }

    /// Releases a barrier whose count is already met. A zero-count barrier
    /// releases on its first check.
    pub fn try_release(&mut self) -> bool {
        if self.released || self.arrived < self.expected {
            return false;
        }
        self.released = true;
        true
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn arrived(&self) -> usize {
        self.arrived
    }
}
