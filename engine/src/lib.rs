//! Round engine for Keepsake.
//!
//! [`RoundController`] owns the round lifecycle on top of
//! `keepsake_core::GameState`: the one-second countdown, the delayed
//! match/mismatch resolution and the chained win celebration. All timing
//! runs on a virtual clock the host advances, and every visible effect goes
//! through a [`PresentationSurface`].

mod celebration;
mod clock;
mod controller;
mod scheduler;
mod surface;

pub use celebration::{CelebrationPlan, CelebrationStep};
pub use clock::RoundClock;
pub use controller::{RoundController, RoundTimer};
pub use scheduler::{Fired, Scheduler, TimerId};
pub use surface::{PresentationSurface, SurfaceError};
