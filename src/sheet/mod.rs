mod color_key;
mod extract;
mod frame;
mod loader;
mod scale;

pub use color_key::ColorKey;
pub use frame::Frame;
pub use loader::SpriteSheet;
pub use scale::scale_by_factor;
