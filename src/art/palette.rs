use serde::Serialize;

use crate::models::emotion::{Emotion, EmotionLabel};

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const INK: Rgb = Rgb::new(0.2, 0.2, 0.2);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, channels clamped and rounded.
    pub fn to_hex(self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

pub const PALETTE_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Palette(pub [Rgb; PALETTE_SIZE]);

impl Palette {
    pub fn colors(&self) -> &[Rgb] {
        &self.0
    }
}

const fn rgb(r: f64, g: f64, b: f64) -> Rgb {
    Rgb::new(r, g, b)
}

static HAPPY: Palette = Palette([
    rgb(1.0, 0.85, 0.3),
    rgb(1.0, 0.7, 0.2),
    rgb(1.0, 0.95, 0.6),
    rgb(0.98, 0.6, 0.35),
    rgb(1.0, 0.8, 0.5),
]);

static SAD: Palette = Palette([
    rgb(0.25, 0.4, 0.7),
    rgb(0.4, 0.55, 0.8),
    rgb(0.2, 0.3, 0.5),
    rgb(0.55, 0.65, 0.85),
    rgb(0.35, 0.45, 0.6),
]);

static ANGRY: Palette = Palette([
    rgb(0.85, 0.15, 0.15),
    rgb(0.95, 0.3, 0.2),
    rgb(0.6, 0.1, 0.1),
    rgb(1.0, 0.45, 0.3),
    rgb(0.75, 0.2, 0.25),
]);

static CALM: Palette = Palette([
    rgb(0.5, 0.8, 0.7),
    rgb(0.6, 0.85, 0.8),
    rgb(0.4, 0.7, 0.65),
    rgb(0.7, 0.9, 0.85),
    rgb(0.55, 0.75, 0.6),
]);

static ANXIOUS: Palette = Palette([
    rgb(0.6, 0.5, 0.7),
    rgb(0.5, 0.4, 0.6),
    rgb(0.7, 0.6, 0.75),
    rgb(0.45, 0.45, 0.55),
    rgb(0.65, 0.55, 0.8),
]);

static EXCITED: Palette = Palette([
    rgb(1.0, 0.4, 0.6),
    rgb(1.0, 0.6, 0.2),
    rgb(0.95, 0.3, 0.8),
    rgb(1.0, 0.8, 0.3),
    rgb(0.9, 0.5, 0.9),
]);

static TIRED: Palette = Palette([
    rgb(0.6, 0.6, 0.6),
    rgb(0.5, 0.5, 0.55),
    rgb(0.7, 0.68, 0.65),
    rgb(0.45, 0.42, 0.4),
    rgb(0.65, 0.62, 0.7),
]);

static LOVED: Palette = Palette([
    rgb(1.0, 0.6, 0.7),
    rgb(0.95, 0.45, 0.6),
    rgb(1.0, 0.75, 0.8),
    rgb(0.9, 0.35, 0.5),
    rgb(1.0, 0.85, 0.9),
]);

pub static DEFAULT_PALETTE: Palette = Palette([
    rgb(0.7, 0.7, 0.8),
    rgb(0.6, 0.7, 0.8),
    rgb(0.8, 0.75, 0.7),
    rgb(0.65, 0.65, 0.7),
    rgb(0.75, 0.8, 0.85),
]);

pub fn label_palette(label: EmotionLabel) -> &'static Palette {
    match label {
        EmotionLabel::Happy => &HAPPY,
        EmotionLabel::Sad => &SAD,
        EmotionLabel::Angry => &ANGRY,
        EmotionLabel::Calm => &CALM,
        EmotionLabel::Anxious => &ANXIOUS,
        EmotionLabel::Excited => &EXCITED,
        EmotionLabel::Tired => &TIRED,
        EmotionLabel::Loved => &LOVED,
    }
}

pub fn palette_for(emotion: &Emotion) -> &'static Palette {
    match emotion {
        Emotion::Known(label) => label_palette(*label),
        Emotion::Unrecognized(_) => &DEFAULT_PALETTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_channel_in_unit_range() {
        let palettes = EmotionLabel::ALL
            .into_iter()
            .map(label_palette)
            .chain(std::iter::once(&DEFAULT_PALETTE));
        for palette in palettes {
            for c in palette.colors() {
                for channel in [c.r, c.g, c.b] {
                    assert!((0.0..=1.0).contains(&channel));
                }
            }
        }
    }

    #[test]
    fn test_unrecognized_emotion_gets_default_palette() {
        let emotion = Emotion::parse("melancholic");
        assert_eq!(palette_for(&emotion), &DEFAULT_PALETTE);
    }

    #[test]
    fn test_known_emotion_gets_own_palette() {
        let emotion = Emotion::Known(EmotionLabel::Angry);
        assert_eq!(palette_for(&emotion), &ANGRY);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgb::WHITE.to_hex(), "#ffffff");
        assert_eq!(Rgb::new(1.0, 0.0, 0.5).to_hex(), "#ff0080");
        assert_eq!(Rgb::new(1.4, -0.2, 0.0).to_hex(), "#ff0000");
    }
}
