//! Builder for creating and configuring Itinerary instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::Itinerary;
use crate::{
    db::Database,
    error::{Result, TrekError},
    identity::{Identity, StaticIdentity},
};

/// Builder for creating and configuring Itinerary instances.
#[derive(Clone)]
pub struct ItineraryBuilder {
    database_path: Option<PathBuf>,
    identity: Arc<dyn Identity>,
}

impl ItineraryBuilder {
    /// Creates a new builder with default settings and nobody signed in.
    pub fn new() -> Self {
        Self {
            database_path: None,
            identity: Arc::new(StaticIdentity::anonymous()),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/trek/trek.db` or `~/.local/share/trek/trek.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets who is acting on the itinerary.
    pub fn with_identity<I: Identity + 'static>(mut self, identity: I) -> Self {
        self.identity = Arc::new(identity);
        self
    }

    /// Builds the configured itinerary.
    ///
    /// # Errors
    ///
    /// Returns `TrekError::FileSystem` if the database directory cannot be
    /// created, `TrekError::XdgDirectory` if no default location exists, and
    /// `TrekError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Itinerary> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrekError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TrekError>(())
        })
        .await
        .map_err(|e| TrekError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Itinerary::new(db_path, self.identity))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("trek")
            .place_data_file("trek.db")
            .map_err(|e| TrekError::XdgDirectory(e.to_string()))
    }
}

impl Default for ItineraryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
