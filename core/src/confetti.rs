//! Win confetti: a one-shot batch of self-expiring particles.
//!
//! Every particle picks its own lifetime when spawned, so a burst needs no
//! coordination after creation. Advancing the burst drops expired particles.

use std::time::Duration;

use rand::Rng;
use rand::distr::{Distribution, StandardUniform};

use keepsake_types::ui::EffectTimer;

/// Palette the particles draw from, as `0xRRGGBB`.
pub const CONFETTI_COLORS: [u32; 5] = [0xff_85_63, 0xff_ce_47, 0xa5_dd_9b, 0x60_c1_e8, 0xf5_88_eb];

/// Bounds on a particle's lifetime.
pub const LIFETIME_RANGE: (Duration, Duration) = (Duration::from_secs(2), Duration::from_secs(5));

const SIZE_RANGE: (f32, f32) = (5.0, 15.0);
const OPACITY_RANGE: (f32, f32) = (0.3, 1.0);

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    StandardUniform.sample(rng)
}

fn lerp(range: (f32, f32), t: f32) -> f32 {
    range.0 + (range.1 - range.0) * t
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiParticle {
    /// Horizontal launch position, `0.0..1.0` of the surface width.
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    pub round: bool,
    pub opacity: f32,
    /// Degrees.
    pub rotation: f32,
    lifetime: EffectTimer,
}

impl ConfettiParticle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = unit(rng);
        let width = lerp(SIZE_RANGE, unit(rng));
        let height = lerp(SIZE_RANGE, unit(rng));
        let color_index =
            ((unit(rng) * CONFETTI_COLORS.len() as f32) as usize).min(CONFETTI_COLORS.len() - 1);
        let round = unit(rng) < 0.5;
        let opacity = lerp(OPACITY_RANGE, unit(rng));
        let rotation = unit(rng) * 360.0;
        let (min, max) = LIFETIME_RANGE;
        let lifetime = min + (max - min).mul_f32(unit(rng));

        Self {
            x,
            width,
            height,
            color: CONFETTI_COLORS[color_index],
            round,
            opacity,
            rotation,
            lifetime: EffectTimer::new(lifetime),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.lifetime.advance(delta);
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.lifetime.is_finished()
    }

    /// Fall progress, `0.0` at spawn to `1.0` at expiry.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.lifetime.progress()
    }

    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.lifetime.duration()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfettiBurst {
    particles: Vec<ConfettiParticle>,
}

impl ConfettiBurst {
    pub fn spawn<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| ConfettiParticle::random(rng)).collect();
        Self { particles }
    }

    pub fn advance(&mut self, delta: Duration) {
        for particle in &mut self.particles {
            particle.advance(delta);
        }
        self.particles.retain(|particle| !particle.is_expired());
    }

    #[must_use]
    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
