//! The win celebration as an ordered list of `(delay_from_previous, stage)`.

use std::time::Duration;

use keepsake_types::{CelebrationStage, CelebrationTiming};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelebrationStep {
    /// Gap after the previous step (after the win, for the first).
    pub delay: Duration,
    pub stage: CelebrationStage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelebrationPlan {
    steps: Vec<CelebrationStep>,
}

impl CelebrationPlan {
    #[must_use]
    pub fn from_timing(timing: &CelebrationTiming) -> Self {
        let delays = [
            Duration::ZERO,
            timing.envelope_open,
            timing.letter_reveal,
            timing.message_show,
            timing.action_buttons,
        ];
        let steps = delays
            .into_iter()
            .zip(CelebrationStage::ORDER)
            .map(|(delay, stage)| CelebrationStep { delay, stage })
            .collect();
        Self { steps }
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<CelebrationStep> {
        self.steps.get(index).copied()
    }

    #[must_use]
    pub fn steps(&self) -> &[CelebrationStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Cumulative offset of every stage from the win.
    #[must_use]
    pub fn offsets(&self) -> Vec<(Duration, CelebrationStage)> {
        let mut at = Duration::ZERO;
        self.steps
            .iter()
            .map(|step| {
                at += step.delay;
                (at, step.stage)
            })
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|step| step.delay).sum()
    }
}

impl Default for CelebrationPlan {
    fn default() -> Self {
        Self::from_timing(&CelebrationTiming::default())
    }
}
