//! Data directory layout: file names, first-run initialization, and opening all stores.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::StorageError;
use crate::json_store::{read_file, write_file, JsonStore};
use crate::models::PrayerRequest;

pub const ADMINS_FILE: &str = "admins.json";
pub const GROUPS_FILE: &str = "groups.json";
pub const USERS_FILE: &str = "users.json";
pub const PRAYERS_FILE: &str = "prayers.json";
pub const EVENTS_FILE: &str = "events.json";

/// Files created with `[]` on first run.
pub const INITIAL_FILES: [&str; 4] = [ADMINS_FILE, GROUPS_FILE, PRAYERS_FILE, EVENTS_FILE];

/// Creates `dir` and the initial files. Missing files are written as `[]`; files that are not a
/// JSON array are overwritten with `[]` (their content is lost, and a warning is logged).
/// Per-file write failures are logged; only failure to create `dir` is returned.
pub async fn init_data_dir(dir: &Path) -> Result<(), StorageError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| StorageError::Io(format!("{}: {}", dir.display(), e)))?;

    let empty: [serde_json::Value; 0] = [];
    for name in INITIAL_FILES {
        let path = dir.join(name);
        match read_file::<serde_json::Value>(&path).await {
            Ok(_) => continue,
            Err(StorageError::NotFound(_)) => match write_file(&path, &empty).await {
                Ok(()) => info!(path = %path.display(), "Created data file with default value"),
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to initialize data file"),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Data file corrupted; reinitializing");
                if let Err(e) = write_file(&path, &empty).await {
                    warn!(path = %path.display(), error = %e, "Failed to reinitialize data file");
                }
            }
        }
    }
    Ok(())
}

/// All repositories of the bot, each owning one file under the data directory.
#[derive(Clone)]
pub struct Stores {
    pub admins: Arc<JsonStore<String>>,
    pub groups: Arc<JsonStore<String>>,
    pub users: Arc<JsonStore<String>>,
    pub prayers: Arc<JsonStore<PrayerRequest>>,
    pub events: Arc<JsonStore<String>>,
}

impl Stores {
    /// Opens every store under `dir`. Call [`init_data_dir`] first on a fresh install.
    pub async fn open(dir: &Path) -> Self {
        Self {
            admins: Arc::new(JsonStore::open(dir.join(ADMINS_FILE)).await),
            groups: Arc::new(JsonStore::open(dir.join(GROUPS_FILE)).await),
            users: Arc::new(JsonStore::open(dir.join(USERS_FILE)).await),
            prayers: Arc::new(JsonStore::open(dir.join(PRAYERS_FILE)).await),
            events: Arc::new(JsonStore::open(dir.join(EVENTS_FILE)).await),
        }
    }

    /// Adds each configured admin id; ids already present are left alone.
    pub async fn seed_admins<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            let id = id.into();
            if self.admins.add(id.clone()).await {
                info!(admin_id = %id, "Seeded admin from config");
            }
        }
    }
}
