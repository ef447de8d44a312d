use crate::scheduler::TimerId;

/// Seconds left in the round plus the countdown timer driving it.
///
/// Holding the timer id here is what guarantees a single countdown per
/// controller: starting again hands back the previous id for cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundClock {
    remaining: u32,
    countdown: Option<TimerId>,
}

impl RoundClock {
    /// Arm the clock, returning the countdown it replaces.
    pub fn start(&mut self, seconds: u32, countdown: TimerId) -> Option<TimerId> {
        self.remaining = seconds;
        self.countdown.replace(countdown)
    }

    /// Count down one second. Saturates at zero.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Disarm, returning the countdown to cancel. Remaining time is kept for display.
    pub fn stop(&mut self) -> Option<TimerId> {
        self.countdown.take()
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.countdown.is_some()
    }

    #[must_use]
    pub fn countdown(&self) -> Option<TimerId> {
        self.countdown
    }
}
