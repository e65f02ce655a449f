/*
 *  assets.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Icon asset store: `icons/<name>.bmp` addressed by classifier output.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {0:?} not found")]
    NotFound(String),
    #[error("asset {name:?} unreadable: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capability seam for icon bitmaps. `name` carries no extension or
/// directory - the store owns the addressing scheme. A missing asset is
/// an expected condition the layout engine falls back from, not a fault.
pub trait AssetStore: Send {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Filesystem store reading `<root>/<name>.bmp`.
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetStore for DirAssetStore {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(format!("{name}.bmp"));
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound(name.to_string()),
            _ => AssetError::Io {
                name: name.to_string(),
                source: e,
            },
        })
    }
}

/// In-memory store for tests and embedded default assets.
#[derive(Debug, Clone, Default)]
pub struct MemAssetStore {
    assets: HashMap<String, Vec<u8>>,
}

impl MemAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.assets.insert(name.into(), data);
    }
}

impl AssetStore for MemAssetStore {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_store_reports_missing_assets() {
        let store = DirAssetStore::new("/nonexistent/icons");
        match store.load("partlycloudy") {
            Err(AssetError::NotFound(name)) => assert_eq!(name, "partlycloudy"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn mem_store_round_trips() {
        let mut store = MemAssetStore::new();
        store.insert("clear", vec![1, 2, 3]);
        assert_eq!(store.load("clear").unwrap(), vec![1, 2, 3]);
        assert!(store.load("rain").is_err());
    }
}
