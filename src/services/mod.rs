pub mod claude;
pub mod scene;
