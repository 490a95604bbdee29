//! # Frontdesk History
//!
//! Append-only conversation log in a single pretty-printed JSON file.
//! The log is read and written per request but never consulted during
//! answer generation.
//!
//! All file access goes through one async mutex, so concurrent requests
//! serialize their load/append/save cycles instead of corrupting the file.

use std::path::PathBuf;

use frontdesk_core::error::HistoryError;
use frontdesk_core::history::Exchange;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// A file-backed conversation log.
pub struct HistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryStore {
    /// Create a store over the given file path.
    ///
    /// The file is created on first write; a missing file reads as empty.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Load the full history.
    ///
    /// A missing or corrupt file yields an empty sequence with a warning,
    /// never an error.
    pub async fn load(&self) -> Vec<Exchange> {
        let _guard = self.lock.lock().await;
        self.read_file()
    }

    /// Overwrite the history file with the given sequence.
    pub async fn save(&self, exchanges: &[Exchange]) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        self.write_file(exchanges)
    }

    /// Record one completed exchange: load, append, save — atomically with
    /// respect to other calls on this store.
    pub async fn record(&self, query: &str, answer: &str) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        let mut exchanges = self.read_file();
        exchanges.push(Exchange::new(query, answer));
        self.write_file(&exchanges)?;
        debug!(total = exchanges.len(), "Exchange recorded");
        Ok(())
    }

    fn read_file(&self) -> Vec<Exchange> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(), // File doesn't exist yet — start empty
        };

        match serde_json::from_str::<Vec<Exchange>>(&content) {
            Ok(exchanges) => exchanges,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt history file, starting empty");
                Vec::new()
            }
        }
    }

    fn write_file(&self, exchanges: &[Exchange]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    HistoryError::Storage(format!("Failed to create history directory: {e}"))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(exchanges)
            .map_err(|e| HistoryError::Storage(format!("Failed to serialize history: {e}")))?;

        std::fs::write(&self.path, content)
            .map_err(|e| HistoryError::Storage(format!("Failed to write history file: {e}")))
    }
}
