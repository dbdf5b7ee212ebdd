pub mod neighborhood;
pub mod texture;

pub use neighborhood::Neighborhood;
pub use texture::{compute_texture, TextureComputer};
