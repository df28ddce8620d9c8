//! Startup texture loading: parallel image decode with a join barrier.
//!
//! Each configured texture is decoded on its own thread; the caller blocks
//! until every decode has reported in or the deadline passes. Any single
//! failure fails the whole join — the scene must never be built from a
//! partial texture set. Threads still decoding after a timeout are
//! abandoned; their results are discarded with the channel.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};

/// A decoded RGBA8 image ready for GPU upload.
#[derive(Debug)]
pub struct DecodedTexture {
    /// The configured texture key.
    pub name: String,
    /// Tightly packed RGBA8 pixel rows.
    pub pixels: Vec<u8>,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
}

/// Errors from the startup texture join.
#[derive(Debug, thiserror::Error)]
pub enum TextureLoadError {
    /// Reading or decoding one image failed; the whole join fails.
    #[error("failed to load texture {name:?} from {path}: {source}")]
    Decode {
        name: String,
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// The deadline passed with loads still outstanding.
    #[error("texture load timed out; still pending: {pending:?}")]
    Timeout { pending: Vec<String> },

    /// A decode worker disappeared without reporting a result.
    #[error("texture load worker lost; still pending: {pending:?}")]
    WorkerLost { pending: Vec<String> },
}

type LoadMessage = (String, Result<DecodedTexture, TextureLoadError>);

/// Decode every configured texture in parallel and join with a deadline.
///
/// Returns the decoded images in arrival order; the caller registers them
/// under their names, so ordering carries no meaning.
pub fn load_all(
    sources: &HashMap<String, PathBuf>,
    timeout: Duration,
) -> Result<Vec<DecodedTexture>, TextureLoadError> {
    let deadline = Instant::now() + timeout;
    let (tx, rx) = bounded::<LoadMessage>(sources.len());

    for (name, path) in sources {
        let tx = tx.clone();
        let name = name.clone();
        let path = path.clone();
        std::thread::spawn(move || {
            let result = decode_one(&name, &path);
            // The receiver may already have given up on us; that's fine.
            let _ = tx.send((name, result));
        });
    }
    drop(tx);

    join_loaded(&rx, sources.keys().cloned().collect(), deadline)
}

/// Decode a single image file into tightly packed RGBA8.
fn decode_one(name: &str, path: &std::path::Path) -> Result<DecodedTexture, TextureLoadError> {
    let image = image::open(path)
        .map_err(|source| TextureLoadError::Decode {
            name: name.to_string(),
            path: path.display().to_string(),
            source,
        })?
        .to_rgba8();

    let (width, height) = image.dimensions();
    Ok(DecodedTexture {
        name: name.to_string(),
        pixels: image.into_raw(),
        width,
        height,
    })
}

/// Collect one result per expected name, or fail the whole join.
fn join_loaded(
    rx: &Receiver<LoadMessage>,
    mut pending: Vec<String>,
    deadline: Instant,
) -> Result<Vec<DecodedTexture>, TextureLoadError> {
    let mut loaded = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        match rx.recv_deadline(deadline) {
            Ok((name, Ok(texture))) => {
                pending.retain(|n| n != &name);
                loaded.push(texture);
            }
            Ok((_, Err(err))) => return Err(err),
            Err(RecvTimeoutError::Timeout) => {
                pending.sort();
                return Err(TextureLoadError::Timeout { pending });
            }
            Err(RecvTimeoutError::Disconnected) => {
                pending.sort();
                return Err(TextureLoadError::WorkerLost { pending });
            }
        }
    }

    Ok(loaded)
}
