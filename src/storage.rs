//! Durable local cart. One JSON file holds the serialized cart lines; it is
//! read once at startup and rewritten on every cart mutation. This is the
//! only state that survives a restart without a remote round-trip.

use crate::models::Cart;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// A missing or corrupt file yields an empty cart rather than an error;
    /// the cart is a convenience cache, not a source of truth.
    pub fn load(&self) -> Cart {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(cart) => cart,
                Err(e) => {
                    log::warn!("Discarding unreadable cart file {:?}: {e}", self.path);
                    Cart::default()
                }
            },
            Err(_) => Cart::default(),
        }
    }

    /// Write failures are logged and swallowed; a cart mutation never fails
    /// because the disk does.
    pub fn save(&self, cart: &Cart) {
        let raw = match serde_json::to_string(cart) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("Failed to serialize cart: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, raw) {
            log::error!("Failed to persist cart to {:?}: {e}", self.path);
        }
    }
}
