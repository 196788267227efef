pub mod art;
pub mod entries;
pub mod health;
pub mod scenes;
pub mod sessions;
