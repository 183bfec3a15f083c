//! Texture references and asynchronous loading.
//!
//! A [`TextureRef`] starts life as a 1x1 placeholder and is resolved in place
//! once its image finishes decoding. Sprites hold a copyable [`TextureId`]
//! into the owning [`TextureStore`]; they never release or mutate it.
//!
//! Decoding runs off the render thread. Completion events are only applied at
//! frame boundaries (see [`TextureLoader::poll`]), so a reference never
//! changes while a frame is being drawn.

mod loader;
mod store;

pub use loader::{TextureEvent, TextureLoader, TextureSource};
pub use store::{TextureId, TextureRef, TextureState, TextureStore, PLACEHOLDER_PIXEL};
