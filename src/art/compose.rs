use rand::Rng;
use serde::Serialize;

use super::blob::{blob, Point};
use super::palette::{label_palette, palette_for, Rgb};
use super::seed::{derive_seed, seeded_rng, WEEKLY_SEED};
use super::ArtError;
use crate::models::emotion::{Emotion, EmotionLabel};
use crate::models::entry::EmotionEntry;

pub const BLOB_POINTS: usize = 64;
pub const NOTE_EXCERPT_CHARS: usize = 50;
pub const WEEK_TITLE: &str = "This Week's Emotions";
pub const SUMMARY_SEPARATOR: &str = " • ";

const ENTRY_CANVAS: Canvas = Canvas {
    width: 800,
    height: 800,
};
const WEEK_CANVAS: Canvas = Canvas {
    width: 1200,
    height: 800,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// One filled blob. Coordinates are in the unit square, origin bottom-left.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Shape {
    pub points: Vec<Point>,
    pub fill: Rgb,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub position: Point,
    pub size: f64,
    pub anchor: TextAnchor,
    pub italic: bool,
    pub color: Rgb,
}

impl TextOverlay {
    fn new(text: impl Into<String>, x: f64, y: f64, size: f64, anchor: TextAnchor) -> Self {
        Self {
            text: text.into(),
            position: Point::new(x, y),
            size,
            anchor,
            italic: false,
            color: Rgb::INK,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Composition {
    pub canvas: Canvas,
    pub background: Rgb,
    pub shapes: Vec<Shape>,
    pub texts: Vec<TextOverlay>,
}

/// Inputs for a single diary entry's art.
#[derive(Debug, Clone)]
pub struct EntryArt<'a> {
    pub emotion: Emotion,
    pub date_label: &'a str,
    pub note: Option<&'a str>,
    pub intensity: u8,
}

impl<'a> EntryArt<'a> {
    pub fn from_entry(entry: &'a EmotionEntry, date_label: &'a str) -> Self {
        Self {
            emotion: Emotion::Known(entry.emotion),
            date_label,
            note: entry.note.as_deref(),
            intensity: entry.intensity,
        }
    }

    /// Seed used when the caller does not pin one: a hash of the date label,
    /// so the same day always replays the same art.
    pub fn default_seed(&self) -> u64 {
        derive_seed([self.date_label])
    }
}

struct LayerStyle {
    radius: (f64, f64),
    wobble: f64,
    opacity: (f64, f64),
}

pub fn layer_count(intensity: u8) -> usize {
    // floor(5 + 1.5 * intensity) in integer arithmetic
    5 + (3 * intensity as usize) / 2
}

pub fn entry_wobble(intensity: u8) -> f64 {
    0.1 + (intensity as f64 / 10.0) * 0.3
}

/// Quoted excerpt of a diary note, cut at 50 characters.
pub fn note_excerpt(note: &str) -> String {
    let mut chars = note.chars();
    let head: String = chars.by_ref().take(NOTE_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("\"{head}...\"")
    } else {
        format!("\"{head}\"")
    }
}

fn draw_layers<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    colors: &[Rgb],
    style: &LayerStyle,
) -> Result<Vec<Shape>, ArtError> {
    if colors.is_empty() {
        return Err(ArtError::InvalidParameter("color pool is empty".into()));
    }

    let mut shapes = Vec::with_capacity(count);
    for _ in 0..count {
        let center = Point::new(rng.gen(), rng.gen());
        let radius = rng.gen_range(style.radius.0..=style.radius.1);
        let points = blob(rng, center, radius, BLOB_POINTS, style.wobble)?;
        let fill = colors[rng.gen_range(0..colors.len())];
        let opacity = rng.gen_range(style.opacity.0..=style.opacity.1);
        shapes.push(Shape {
            points,
            fill,
            opacity,
        });
    }
    Ok(shapes)
}

/// Compose the art for one entry, drawing from the supplied random stream.
pub fn compose_entry<R: Rng + ?Sized>(
    art: &EntryArt<'_>,
    rng: &mut R,
) -> Result<Composition, ArtError> {
    if !(1..=10).contains(&art.intensity) {
        return Err(ArtError::InvalidParameter(format!(
            "intensity must be between 1 and 10, got {}",
            art.intensity
        )));
    }

    let style = LayerStyle {
        radius: (0.15, 0.45),
        wobble: entry_wobble(art.intensity),
        opacity: (0.3, 0.6),
    };
    let palette = palette_for(&art.emotion);
    let shapes = draw_layers(rng, layer_count(art.intensity), palette.colors(), &style)?;

    let mut texts = vec![
        TextOverlay::new(art.date_label, 0.05, 0.95, 14.0, TextAnchor::Start),
        TextOverlay::new(
            format!("{} {}", art.emotion.icon(), art.emotion.name()),
            0.05,
            0.90,
            12.0,
            TextAnchor::Start,
        ),
    ];
    if let Some(note) = art.note.filter(|n| !n.trim().is_empty()) {
        texts.push(TextOverlay {
            italic: true,
            ..TextOverlay::new(note_excerpt(note), 0.5, 0.05, 10.0, TextAnchor::Middle)
        });
    }

    Ok(Composition {
        canvas: ENTRY_CANVAS,
        background: Rgb::WHITE,
        shapes,
        texts,
    })
}

/// [`compose_entry`] with a ChaCha stream seeded from `seed`, or from the
/// date label when `seed` is `None`.
pub fn compose_entry_seeded(
    art: &EntryArt<'_>,
    seed: Option<u64>,
) -> Result<Composition, ArtError> {
    let seed = seed.unwrap_or_else(|| art.default_seed());
    compose_entry(art, &mut seeded_rng(seed))
}

/// `icon count` per distinct emotion, in first-seen order.
pub fn emotion_summary(entries: &[EmotionEntry]) -> String {
    let mut counts: Vec<(EmotionLabel, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(label, _)| *label == entry.emotion) {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.emotion, 1)),
        }
    }

    counts
        .iter()
        .map(|(label, n)| format!("{} {}", label.icon(), n))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

/// Compose the merged art for several entries. Returns `None` for an empty
/// slice.
pub fn compose_week<R: Rng + ?Sized>(
    entries: &[EmotionEntry],
    rng: &mut R,
) -> Result<Option<Composition>, ArtError> {
    if entries.is_empty() {
        return Ok(None);
    }

    let pool: Vec<Rgb> = entries
        .iter()
        .flat_map(|e| label_palette(e.emotion).colors().iter().copied())
        .collect();

    let style = LayerStyle {
        radius: (0.1, 0.3),
        wobble: 0.2,
        opacity: (0.2, 0.5),
    };
    let shapes = draw_layers(rng, 3 * entries.len(), &pool, &style)?;

    let texts = vec![
        TextOverlay::new(WEEK_TITLE, 0.5, 0.95, 18.0, TextAnchor::Middle),
        TextOverlay::new(emotion_summary(entries), 0.5, 0.05, 14.0, TextAnchor::Middle),
    ];

    Ok(Some(Composition {
        canvas: WEEK_CANVAS,
        background: Rgb::WHITE,
        shapes,
        texts,
    }))
}

/// [`compose_week`] on the fixed weekly stream.
pub fn compose_week_seeded(entries: &[EmotionEntry]) -> Result<Option<Composition>, ArtError> {
    compose_week(entries, &mut seeded_rng(WEEKLY_SEED))
}
