use serde::{Deserialize, Serialize};

/// One visual step of the win celebration, in the order they play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationStage {
    /// Board hidden, envelope shown, win cue and confetti.
    Opening,
    /// Envelope flap opens, with the envelope cue.
    EnvelopeOpen,
    /// Letter slides out of the envelope.
    LetterReveal,
    /// Letter message becomes readable.
    MessageShow,
    /// Play-again / menu buttons appear.
    ActionButtons,
}

impl CelebrationStage {
    pub const ORDER: [CelebrationStage; 5] = [
        CelebrationStage::Opening,
        CelebrationStage::EnvelopeOpen,
        CelebrationStage::LetterReveal,
        CelebrationStage::MessageShow,
        CelebrationStage::ActionButtons,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::EnvelopeOpen => "envelope_open",
            Self::LetterReveal => "letter_reveal",
            Self::MessageShow => "message_show",
            Self::ActionButtons => "action_buttons",
        }
    }
}
