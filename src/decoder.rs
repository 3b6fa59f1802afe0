use crate::error::DecodeError;
use image::RgbaImage;
use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

/// Outcome of one background decode, delivered back on the UI loop.
pub struct DecodeOutcome {
    pub id: Uuid,
    pub result: Result<Arc<RgbaImage>, DecodeError>,
}

/// Decodes image bytes off the UI thread.
///
/// Fire-and-forget: requests are never cancelled, a late completion simply
/// shows up in a later [`poll`](Decoder::poll). Completions queue up behind
/// a mutex and are drained synchronously by the event loop, so scene
/// mutation stays single-threaded.
pub struct Decoder {
    completed: Arc<Mutex<Vec<DecodeOutcome>>>,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            completed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn request(&self, id: Uuid, bytes: Arc<[u8]>) {
        debug!("decode requested for {id} ({} bytes)", bytes.len());
        let completed = Arc::clone(&self.completed);
        thread::spawn(move || {
            let result = image::load_from_memory(&bytes)
                .map(|decoded| Arc::new(decoded.to_rgba8()))
                .map_err(DecodeError::from);
            if let Err(err) = &result {
                warn!("decode of {id} failed: {err}");
            }
            completed.lock().push(DecodeOutcome { id, result });
        });
    }

    /// Drain all completions that arrived since the last poll.
    pub fn poll(&self) -> Vec<DecodeOutcome> {
        std::mem::take(&mut *self.completed.lock())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
