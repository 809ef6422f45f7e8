use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{info, warn};
use thiserror::Error;

use crate::{parser, table::WatchEventTable};

/// The file name the export uses and the tools look for by default.
pub const DEFAULT_HISTORY_PATH: &str = "watch-history.html";

#[derive(Debug, Error)]
#[error("Could not read {path:?}: {source}")]
pub struct SourceUnavailable {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Reads the whole file, then extracts it. The file is closed before parsing.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<WatchEventTable, SourceUnavailable> {
    let path = path.as_ref();
    let markup = fs_err::read_to_string(path).map_err(|source| SourceUnavailable {
        path: path.to_owned(),
        source,
    })?;
    let table = WatchEventTable::new(parser::extract(&markup));
    info!("Loaded {} watch events from {path:?}", table.len());
    Ok(table)
}

/// Parsed histories keyed by the path they were loaded from.
///
/// An entry lives as long as the cache. Changes to the file on disk are not
/// noticed. Failed loads are not stored, so a later call retries the read.
#[derive(Default)]
pub struct HistoryCache {
    entries: HashMap<PathBuf, Arc<WatchEventTable>>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<Arc<WatchEventTable>, SourceUnavailable> {
        let path = path.as_ref();
        if let Some(table) = self.entries.get(path) {
            info!("Using cached history for {path:?}");
            return Ok(table.clone());
        }
        let table = match load_history(path) {
            Ok(table) => Arc::new(table),
            Err(e) => {
                warn!("{e}");
                return Err(e);
            }
        };
        self.entries.insert(path.to_owned(), table.clone());
        Ok(table)
    }

    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
