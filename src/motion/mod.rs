pub mod ease;
pub mod timeline;

#[cfg(target_arch = "wasm32")]
pub mod player;
#[cfg(target_arch = "wasm32")]
pub mod raf;

pub use ease::Ease;
pub use timeline::{Playback, Stagger, Timeline};

#[cfg(target_arch = "wasm32")]
pub use player::{play, TimelineHandle};
