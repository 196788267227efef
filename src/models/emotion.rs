use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Happy,
    Sad,
    Angry,
    Calm,
    Anxious,
    Excited,
    Tired,
    Loved,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 8] = [
        Self::Happy,
        Self::Sad,
        Self::Angry,
        Self::Calm,
        Self::Anxious,
        Self::Excited,
        Self::Tired,
        Self::Loved,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Calm => "calm",
            Self::Anxious => "anxious",
            Self::Excited => "excited",
            Self::Tired => "tired",
            Self::Loved => "loved",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Sad => "😢",
            Self::Angry => "😠",
            Self::Calm => "😌",
            Self::Anxious => "😰",
            Self::Excited => "🤩",
            Self::Tired => "😴",
            Self::Loved => "🥰",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Calm => "Calm",
            Self::Anxious => "Anxious",
            Self::Excited => "Excited",
            Self::Tired => "Tired",
            Self::Loved => "Loved",
        }
    }

    /// Case-insensitive lookup by key (`"happy"`) or display name.
    pub fn from_key(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.key().eq_ignore_ascii_case(raw))
    }
}

/// An emotion as it arrives from a caller: either one of the known labels or
/// free text that the renderer draws with the default palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emotion {
    Known(EmotionLabel),
    Unrecognized(String),
}

impl Emotion {
    pub fn parse(raw: &str) -> Self {
        match EmotionLabel::from_key(raw) {
            Some(label) => Self::Known(label),
            None => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            Self::Known(label) => label.icon(),
            Self::Unrecognized(_) => "🎨",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Known(label) => label.name(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<EmotionLabel> for Emotion {
    fn from(label: EmotionLabel) -> Self {
        Self::Known(label)
    }
}
