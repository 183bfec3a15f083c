use super::TextureEvent;

/// RGBA of the stand-in pixel shown until an image arrives (opaque blue).
pub const PLACEHOLDER_PIXEL: [u8; 4] = [0, 0, 255, 255];

/// Index of a texture inside a [`TextureStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TextureId(u32);

impl TextureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Load status of a texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureState {
    /// Still showing the 1x1 placeholder; the load is in flight.
    Pending,
    /// Real pixel data has been delivered.
    Loaded,
    /// Loading failed; the placeholder is kept for good.
    Failed,
}

/// CPU-side record of a texture's pixel size.
///
/// GPU resources live in the renderer, keyed by [`TextureId`]; they are
/// replaced when the scene hands the decoded image to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    pub width: u32,
    pub height: u32,
    pub state: TextureState,
    label: String,
}

impl TextureRef {
    fn placeholder(label: String) -> Self {
        Self {
            width: 1,
            height: 1,
            state: TextureState::Pending,
            label,
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Pixel size as floats, the form the draw math consumes.
    #[inline]
    pub fn size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.state != TextureState::Loaded
    }
}

/// Owner of every [`TextureRef`]. Ids are never reused or removed.
#[derive(Debug, Default)]
pub struct TextureStore {
    textures: Vec<TextureRef>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new 1x1 placeholder and returns its id.
    pub fn insert_placeholder(&mut self, label: impl Into<String>) -> TextureId {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(TextureRef::placeholder(label.into()));
        id
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&TextureRef> {
        self.textures.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = TextureId> + '_ {
        (0..self.textures.len() as u32).map(TextureId)
    }

    /// Applies a completion event to the matching reference.
    ///
    /// Must only be called between frames.
    pub fn apply(&mut self, event: &TextureEvent) {
        let id = event.id();
        let Some(tex) = self.textures.get_mut(id.index()) else {
            log::warn!("texture event for unknown id {id:?} ignored");
            return;
        };

        match event {
            TextureEvent::Loaded { image, .. } => {
                tex.width = image.width().max(1);
                tex.height = image.height().max(1);
                tex.state = TextureState::Loaded;
                log::info!("texture '{}' loaded ({}x{})", tex.label, tex.width, tex.height);
            }
            TextureEvent::Failed { error, .. } => {
                tex.state = TextureState::Failed;
                log::warn!("texture '{}' failed to load, keeping placeholder: {error:#}", tex.label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(id: TextureId, w: u32, h: u32) -> TextureEvent {
        TextureEvent::Loaded {
            id,
            image: image::RgbaImage::new(w, h),
        }
    }

    #[test]
    fn new_texture_is_one_pixel_placeholder() {
        let mut store = TextureStore::new();
        let id = store.insert_placeholder("a");
        let tex = store.get(id).unwrap();
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.state, TextureState::Pending);
        assert!(tex.is_placeholder());
    }

    #[test]
    fn ids_are_sequential() {
        let mut store = TextureStore::new();
        let a = store.insert_placeholder("a");
        let b = store.insert_placeholder("b");
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn loaded_event_updates_size_in_place() {
        let mut store = TextureStore::new();
        let id = store.insert_placeholder("a");
        store.apply(&loaded(id, 64, 32));

        let tex = store.get(id).unwrap();
        assert_eq!((tex.width, tex.height), (64, 32));
        assert_eq!(tex.state, TextureState::Loaded);
        assert_eq!(tex.size(), glam::Vec2::new(64.0, 32.0));
    }

    #[test]
    fn failed_event_keeps_placeholder_size() {
        let mut store = TextureStore::new();
        let id = store.insert_placeholder("a");
        store.apply(&TextureEvent::Failed {
            id,
            error: anyhow::anyhow!("boom"),
        });

        let tex = store.get(id).unwrap();
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.state, TextureState::Failed);
    }

    #[test]
    fn event_for_unknown_id_is_ignored() {
        let mut other = TextureStore::new();
        other.insert_placeholder("x");
        let foreign = other.insert_placeholder("y");

        let mut store = TextureStore::new();
        store.insert_placeholder("a");
        store.apply(&loaded(foreign, 8, 8));
        assert_eq!(store.get(foreign), None);
    }
}
