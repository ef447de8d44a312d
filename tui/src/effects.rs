//! Celebration animation effects.

use ratatui::layout::{Position, Rect};

use keepsake_core::ConfettiParticle;
use keepsake_types::CelebrationStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEffect {
    /// Grow from the center.
    PopScale,
    /// Rise into place from below.
    SlideUp,
    None,
}

impl StageEffect {
    #[must_use]
    pub fn for_stage(stage: CelebrationStage) -> Self {
        match stage {
            CelebrationStage::Opening | CelebrationStage::ActionButtons => Self::PopScale,
            CelebrationStage::LetterReveal => Self::SlideUp,
            CelebrationStage::EnvelopeOpen | CelebrationStage::MessageShow => Self::None,
        }
    }
}

/// Transform `base` for an entrance animation at `progress` (0..=1).
#[must_use]
pub fn apply_stage_effect(effect: StageEffect, progress: f32, base: Rect, viewport: Rect) -> Rect {
    match effect {
        StageEffect::PopScale => {
            let t = ease_out_cubic(progress);
            let scale = 0.6 + 0.4 * t;
            scale_rect(base, scale)
        }
        StageEffect::SlideUp => {
            let t = ease_out_cubic(progress);
            let viewport_bottom = viewport.y.saturating_add(viewport.height);
            let base_bottom = base.y.saturating_add(base.height);
            let max_offset = viewport_bottom.saturating_sub(base_bottom);
            let offset = max_offset.min(base.height.saturating_div(2)).min(6);
            let y_offset = ((1.0 - t) * f32::from(offset)).round() as u16;
            Rect {
                y: base.y.saturating_add(y_offset),
                ..base
            }
        }
        StageEffect::None => base,
    }
}

/// Screen cell a falling particle occupies; `None` for an empty `area`.
#[must_use]
pub fn confetti_position(particle: &ConfettiParticle, area: Rect) -> Option<Position> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let max_x = f32::from(area.width - 1);
    let max_y = f32::from(area.height - 1);
    // Particles drift sideways a little as they fall, one way or the other by rotation.
    let drift = if particle.rotation < 180.0 { 1.0 } else { -1.0 };
    let fall = ease_in_quad(particle.progress());
    let x = (particle.x.clamp(0.0, 1.0) * max_x + drift * 3.0 * fall).clamp(0.0, max_x);
    let y = fall * max_y;
    let position = Position::new(area.x + x.round() as u16, area.y + y.round() as u16);
    area.contains(position).then_some(position)
}

fn scale_rect(base: Rect, scale: f32) -> Rect {
    let width = (f32::from(base.width) * scale).round() as u16;
    let height = (f32::from(base.height) * scale).round() as u16;
    let width = width.max(1).min(base.width);
    let height = height.max(1).min(base.height);
    let x = base.x + (base.width.saturating_sub(width) / 2);
    let y = base.y + (base.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

fn ease_in_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}
