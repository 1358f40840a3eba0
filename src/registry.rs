use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::MapError;
use crate::map::Map;

/// An index of loaded maps keyed by their declared class name.
///
/// Starts unloaded; a successful [`MapRegistry::load`] scans the base
/// directory, loads every `.tmx` file and swaps the finished index in
/// atomically. A failed load leaves the previous state in place.
pub struct MapRegistry {
    base_dir: PathBuf,
    state: State,
}

enum State {
    Unloaded,
    Loaded(HashMap<String, Map>),
}

impl MapRegistry {
    /// Creates an unloaded registry rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        MapRegistry {
            base_dir: base_dir.into(),
            state: State::Unloaded,
        }
    }

    /// Recursively scans the base directory for `.tmx` files and loads
    /// all of them. One bad file fails the whole load.
    ///
    /// Files are visited in sorted path order; when two maps declare
    /// the same class name the later one wins.
    pub fn load(&mut self) -> Result<(), MapError> {
        let files = find_map_files(&self.base_dir)?;

        let mut index = HashMap::with_capacity(files.len());
        for file in files {
            let map = Map::load_from_file(&file)?;
            let class = map.class.clone();
            if let Some(prev) = index.insert(class.clone(), map) {
                log::warn!(
                    "map class '{}' declared by both {} and {}, keeping the latter",
                    class,
                    prev.source.display(),
                    file.display()
                );
            }
        }

        log::debug!(
            "map registry loaded {} map(s) from {}",
            index.len(),
            self.base_dir.display()
        );
        self.state = State::Loaded(index);
        Ok(())
    }

    /// Whether a load has completed successfully.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Returns the map with the given class name.
    pub fn get_by_name(&self, name: &str) -> Result<&Map, MapError> {
        match &self.state {
            State::Unloaded => Err(MapError::RegistryNotLoaded),
            State::Loaded(maps) => maps
                .get(name)
                .ok_or_else(|| MapError::MapNotFound(name.to_owned())),
        }
    }

    /// Iterates over every loaded map, unordered. Empty before a load.
    pub fn maps(&self) -> impl Iterator<Item = &Map> {
        match &self.state {
            State::Unloaded => None,
            State::Loaded(maps) => Some(maps.values()),
        }
        .into_iter()
        .flatten()
    }
}

fn find_map_files(dir: &Path) -> Result<Vec<PathBuf>, MapError> {
    let mut files = Vec::new();
    walk(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), MapError> {
    let entries = fs::read_dir(dir).map_err(|source| MapError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| MapError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("tmx") {
            out.push(path);
        }
    }
    Ok(())
}
