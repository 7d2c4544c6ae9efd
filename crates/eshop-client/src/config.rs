//! # Client Configuration
//!
//! Where the client keeps its local data. Everything lives under a single
//! data directory: the SQLite database file and the session pointer blob.
//!
//! ## Environment Variables
//!
//! | Variable         | Default        | Purpose                       |
//! |------------------|----------------|-------------------------------|
//! | `ESHOP_DATA_DIR` | `./eshop-data` | Root of all client-side state |

use std::path::{Path, PathBuf};

/// Client-side paths and knobs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory holding the database file and the session pointer.
    pub data_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            data_dir: PathBuf::from("./eshop-data"),
        }
    }
}

impl ClientConfig {
    /// Builds a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("ESHOP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./eshop-data"));

        ClientConfig { data_dir }
    }

    /// Roots all state under the given directory.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        ClientConfig {
            data_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the SQLite database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("eshop.db")
    }

    /// Path of the persisted session pointer.
    pub fn session_pointer_path(&self) -> PathBuf {
        self.data_dir.join("currentUser.json")
    }

    /// Creates the data directory if it does not exist yet.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}
