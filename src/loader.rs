use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::decode::decode_layer;
use crate::error::MapError;
use crate::gid::Gid;
use crate::map::{Layer, Map, Object, ObjectGroup, PolyLine, Polygon, Property, Tileset};
use crate::raw::{RawMap, RawObject, RawObjectGroup, RawProperties};

impl Map {
    /// Loads and fully decodes a TMX map from a file.
    ///
    /// Thin wrapper over [`Map::load_from_reader`]; the file handle is
    /// released on every exit path.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Map, MapError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Map::load_from_reader(path, file)
    }

    /// Loads a TMX map from any byte stream. `source` is recorded on
    /// the map and its parent directory anchors relative tileset paths.
    pub fn load_from_reader(
        source: impl AsRef<Path>,
        mut reader: impl Read,
    ) -> Result<Map, MapError> {
        let source = source.as_ref();
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|err| MapError::Io {
                path: source.to_path_buf(),
                source: err,
            })?;
        Map::load_from_str(source, &text)
    }

    /// Loads a TMX map from an in-memory document.
    pub fn load_from_str(source: impl AsRef<Path>, text: &str) -> Result<Map, MapError> {
        let source = source.as_ref();
        let raw: RawMap = quick_xml::de::from_str(text).map_err(|err| MapError::DocumentParse {
            path: source.to_path_buf(),
            source: err,
        })?;
        build_map(raw, source)
    }
}

fn build_map(raw: RawMap, source: &Path) -> Result<Map, MapError> {
    if raw.width == 0 || raw.height == 0 || raw.tile_width == 0 || raw.tile_height == 0 {
        return Err(MapError::InvalidDimensions(source.display().to_string()));
    }

    let base_dir = source
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    // Descending first_gid order: the resolver takes the first tileset
    // whose range starts at or below the queried GID. Stable sort keeps
    // document order among equal keys.
    let mut tilesets: Vec<Tileset> = raw
        .tilesets
        .into_iter()
        .map(|ts| Tileset {
            first_gid: ts.first_gid,
            // An empty source means an embedded tileset with no
            // external asset; leave it untouched.
            source: if ts.source.is_empty() {
                PathBuf::new()
            } else {
                base_dir.join(&ts.source)
            },
        })
        .collect();
    tilesets.sort_by(|a, b| b.first_gid.cmp(&a.first_gid));

    let mut layers = Vec::with_capacity(raw.layers.len());
    for l in raw.layers {
        let width = l.width.unwrap_or(raw.width);
        let height = l.height.unwrap_or(raw.height);
        // Any decode failure aborts the whole load; no partial map
        // ever escapes.
        let tiles = decode_layer(&l.name, &l.data, width as usize * height as usize)?;
        let empty = tiles.iter().all(|&gid| gid == Gid::NONE);
        layers.push(Layer {
            name: l.name,
            width,
            height,
            offset_x: l.offset_x,
            offset_y: l.offset_y,
            opacity: l.opacity,
            visible: l.visible,
            properties: properties(l.properties),
            tiles,
            empty,
        });
    }

    let map = Map {
        source: source.to_path_buf(),
        base_dir,
        version: raw.version,
        class: raw.class,
        orientation: raw.orientation,
        width: raw.width,
        height: raw.height,
        tile_width: raw.tile_width,
        tile_height: raw.tile_height,
        properties: properties(raw.properties),
        tilesets,
        layers,
        object_groups: raw.object_groups.into_iter().map(object_group).collect(),
    };
    log::debug!(
        "loaded map class '{}' from {} ({} layers)",
        map.class,
        map.source.display(),
        map.layers.len()
    );
    Ok(map)
}

fn object_group(raw: RawObjectGroup) -> ObjectGroup {
    ObjectGroup {
        name: raw.name,
        color: raw.color,
        opacity: raw.opacity,
        visible: raw.visible,
        properties: properties(raw.properties),
        objects: raw.objects.into_iter().map(object).collect(),
    }
}

fn object(raw: RawObject) -> Object {
    Object {
        name: raw.name,
        kind: raw.kind,
        x: raw.x,
        y: raw.y,
        width: raw.width,
        height: raw.height,
        gid: raw.gid,
        visible: raw.visible,
        polygons: raw
            .polygons
            .into_iter()
            .map(|p| Polygon { points: p.points })
            .collect(),
        polylines: raw
            .polylines
            .into_iter()
            .map(|p| PolyLine { points: p.points })
            .collect(),
        properties: properties(raw.properties),
    }
}

fn properties(raw: RawProperties) -> Vec<Property> {
    raw.items
        .into_iter()
        .map(|p| Property {
            name: p.name,
            value: p.value,
        })
        .collect()
}
