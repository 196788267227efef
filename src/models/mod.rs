pub mod emotion;
pub mod entry;
pub mod scene;
