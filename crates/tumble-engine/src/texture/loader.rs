use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use image::RgbaImage;

use super::{TextureId, TextureStore};

/// Where a texture's pixels come from.
#[derive(Debug, Clone)]
pub enum TextureSource {
    /// Image file decoded on a background thread.
    Path(PathBuf),
    /// Pixels already in memory; delivered on the next poll.
    Image { label: String, image: RgbaImage },
}

impl TextureSource {
    pub fn image(label: impl Into<String>, image: RgbaImage) -> Self {
        TextureSource::Image {
            label: label.into(),
            image,
        }
    }

    fn label(&self) -> String {
        match self {
            TextureSource::Path(path) => path.display().to_string(),
            TextureSource::Image { label, .. } => label.clone(),
        }
    }
}

impl From<PathBuf> for TextureSource {
    fn from(path: PathBuf) -> Self {
        TextureSource::Path(path)
    }
}

impl From<&Path> for TextureSource {
    fn from(path: &Path) -> Self {
        TextureSource::Path(path.to_path_buf())
    }
}

/// Completion of a texture request.
#[derive(Debug)]
pub enum TextureEvent {
    Loaded { id: TextureId, image: RgbaImage },
    Failed { id: TextureId, error: anyhow::Error },
}

impl TextureEvent {
    pub fn id(&self) -> TextureId {
        match self {
            TextureEvent::Loaded { id, .. } | TextureEvent::Failed { id, .. } => *id,
        }
    }
}

/// Issues texture requests and collects their completions.
///
/// `request` returns immediately with a placeholder id. Decoding happens on a
/// worker thread and the result travels back over a channel; nothing reaches
/// the [`TextureStore`] until the owner calls [`poll`](Self::poll) between
/// frames and applies the events.
pub struct TextureLoader {
    tx: Sender<TextureEvent>,
    rx: Receiver<TextureEvent>,
}

impl TextureLoader {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Registers a placeholder in `store` and starts loading `source` into it.
    pub fn request(
        &mut self,
        store: &mut TextureStore,
        source: impl Into<TextureSource>,
    ) -> TextureId {
        let source = source.into();
        let id = store.insert_placeholder(source.label());

        match source {
            TextureSource::Image { image, .. } => {
                // The receiver lives in `self`, so this send cannot fail.
                let _ = self.tx.send(TextureEvent::Loaded { id, image });
            }
            TextureSource::Path(path) => {
                log::debug!("texture {id:?}: decoding {}", path.display());
                let tx = self.tx.clone();
                let spawned = thread::Builder::new()
                    .name(format!("tumble texture {}", id.index()))
                    .spawn(move || {
                        let event = match decode_rgba(&path) {
                            Ok(image) => TextureEvent::Loaded { id, image },
                            Err(error) => TextureEvent::Failed { id, error },
                        };
                        // Receiver gone means the scene was dropped; nothing to do.
                        let _ = tx.send(event);
                    });

                if let Err(e) = spawned {
                    let _ = self.tx.send(TextureEvent::Failed {
                        id,
                        error: anyhow::Error::new(e).context("failed to spawn texture decode thread"),
                    });
                }
            }
        }

        id
    }

    /// Drains every completion that has arrived, without blocking.
    pub fn poll(&mut self) -> Vec<TextureEvent> {
        self.rx.try_iter().collect()
    }

    /// Blocks for at most `timeout` waiting for the next completion.
    pub fn wait(&mut self, timeout: Duration) -> Option<TextureEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?;
    let rgba = image.to_rgba8();
    anyhow::ensure!(
        rgba.width() > 0 && rgba.height() > 0,
        "image {} has zero size",
        path.display()
    );
    Ok(rgba)
}
