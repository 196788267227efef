//! Emotion art renderer.
//!
//! Every composition is a pure function of its inputs and a seeded random
//! stream, so a diary entry's art can be replayed instead of stored.

pub mod blob;
pub mod compose;
pub mod palette;
pub mod seed;
pub mod svg;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ArtError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
