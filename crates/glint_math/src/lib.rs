// Re-export glam for convenience
pub use glam::*;

// glint math types
mod ray;
pub use ray::Ray;
