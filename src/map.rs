use std::path::PathBuf;

use crate::decode::decode_points;
use crate::error::MapError;
use crate::gid::Gid;

/// A fully decoded tile map.
///
/// Built once by the loader and read-only afterwards; every field is
/// public, treat them as immutable.
#[derive(Debug)]
pub struct Map {
    /// Path the map was loaded from.
    pub source: PathBuf,
    /// Directory of `source`; relative resource paths resolve against it.
    pub base_dir: PathBuf,
    /// TMX format version string.
    pub version: String,
    /// The map's declared class name, used as its registry key.
    pub class: String,
    /// Orientation tag ("orthogonal", "isometric", ...).
    pub orientation: String,
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Map-level properties, document order.
    pub properties: Vec<Property>,
    /// Tilesets, sorted by `first_gid` descending.
    pub tilesets: Vec<Tileset>,
    /// Tile layers, document order.
    pub layers: Vec<Layer>,
    /// Object groups, document order.
    pub object_groups: Vec<ObjectGroup>,
}

impl Map {
    /// Returns the first layer with the given name.
    pub fn layer(&self, name: &str) -> Result<&Layer, MapError> {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| MapError::LayerNotFound(name.to_owned()))
    }

    /// Resolves a raw GID to its owning tileset and tileset-relative
    /// tile index. Flip flags are ignored for the range comparison.
    ///
    /// `None` means "empty cell, nothing to draw": the GID is zero or
    /// below every tileset's `first_gid`. Callers branch on it, it is
    /// not an error.
    pub fn resolve_gid(&self, gid: Gid) -> Option<(&Tileset, u32)> {
        let clean = gid.clean();
        if clean == 0 {
            return None;
        }
        // Tilesets are sorted by first_gid descending, so the first
        // match is the tightest-fitting range.
        self.tilesets
            .iter()
            .find(|ts| ts.first_gid.raw() <= clean)
            .map(|ts| (ts, clean - ts.first_gid.raw()))
    }

    /// First-match lookup in the map-level properties.
    pub fn property(&self, name: &str) -> Option<&str> {
        find_property(&self.properties, name)
    }
}

/// Reference to a tileset owning a contiguous range of GIDs.
#[derive(Debug, Clone)]
pub struct Tileset {
    /// Smallest GID owned by this tileset.
    pub first_gid: Gid,
    /// External tileset path, already joined onto the map's directory.
    /// Empty for embedded tilesets.
    pub source: PathBuf,
}

/// One drawable plane of the map: a row-major grid of GIDs.
#[derive(Debug)]
pub struct Layer {
    /// Layer name; lookup key for [`Map::layer`].
    pub name: String,
    /// Width in tiles. Defaults to the map's width.
    pub width: u32,
    /// Height in tiles. Defaults to the map's height.
    pub height: u32,
    /// Horizontal pixel offset applied when positioning tiles.
    pub offset_x: i32,
    /// Vertical pixel offset applied when positioning tiles.
    pub offset_y: i32,
    /// Layer opacity, 0.0 to 1.0.
    pub opacity: f32,
    /// Whether the layer should be drawn.
    pub visible: bool,
    /// Layer properties, document order.
    pub properties: Vec<Property>,
    /// Decoded tile GIDs, exactly `width * height` entries, row-major
    /// (`index = y * width + x`). Flip flags are preserved.
    pub tiles: Vec<Gid>,
    /// True when every cell of the layer is [`Gid::NONE`].
    pub empty: bool,
}

impl Layer {
    /// Pixel position of the tile at `index`, using this layer's offset
    /// and the map's tile dimensions.
    pub fn tile_position(&self, index: usize, map: &Map) -> (i32, i32) {
        let x = (index as u32 % self.width) as i32;
        let y = (index as u32 / self.width) as i32;
        (
            self.offset_x + x * map.tile_width as i32,
            self.offset_y + y * map.tile_height as i32,
        )
    }

    /// First-match lookup in the layer properties.
    pub fn property(&self, name: &str) -> Option<&str> {
        find_property(&self.properties, name)
    }
}

/// A named collection of placed objects, not grid-aligned.
#[derive(Debug)]
pub struct ObjectGroup {
    /// Group name.
    pub name: String,
    /// Display color hint from the editor, may be empty.
    pub color: String,
    /// Group opacity, 0.0 to 1.0.
    pub opacity: f32,
    /// Whether the group should be drawn.
    pub visible: bool,
    /// Group properties, document order.
    pub properties: Vec<Property>,
    /// Objects in document order.
    pub objects: Vec<Object>,
}

impl ObjectGroup {
    /// First-match lookup in the group properties.
    pub fn property(&self, name: &str) -> Option<&str> {
        find_property(&self.properties, name)
    }
}

/// A placed object: position, size, optional tile reference and
/// optional polygon/polyline geometry.
#[derive(Debug)]
pub struct Object {
    /// Object name.
    pub name: String,
    /// The object's `type` attribute.
    pub kind: String,
    /// X position in pixels.
    pub x: f64,
    /// Y position in pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Tile reference for tile objects.
    pub gid: Option<Gid>,
    /// Whether the object should be drawn.
    pub visible: bool,
    /// Polygon shapes attached to this object.
    pub polygons: Vec<Polygon>,
    /// Polyline shapes attached to this object.
    pub polylines: Vec<PolyLine>,
    /// Object properties, document order.
    pub properties: Vec<Property>,
}

impl Object {
    /// First-match lookup in the object properties.
    pub fn property(&self, name: &str) -> Option<&str> {
        find_property(&self.properties, name)
    }
}

/// A closed polygon shape. Points stay undecoded until asked for.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Raw `points` attribute, relative to the owning object.
    pub points: String,
}

impl Polygon {
    /// Decodes the points string. Re-parses on every call.
    pub fn decode(&self) -> Result<Vec<Point>, MapError> {
        decode_points(&self.points)
    }
}

/// An open polyline shape. Points stay undecoded until asked for.
#[derive(Debug, Clone)]
pub struct PolyLine {
    /// Raw `points` attribute, relative to the owning object.
    pub points: String,
}

impl PolyLine {
    /// Decodes the points string. Re-parses on every call.
    pub fn decode(&self) -> Result<Vec<Point>, MapError> {
        decode_points(&self.points)
    }
}

/// A name/value pair. Names are not required to be unique; lookups
/// take the first match.
#[derive(Debug, Clone)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Property value, always kept as its source string.
    pub value: String,
}

/// An integer point, relative to the owning object's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// X coordinate in pixels.
    pub x: i32,
    /// Y coordinate in pixels.
    pub y: i32,
}

fn find_property<'a>(props: &'a [Property], name: &str) -> Option<&'a str> {
    props
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.value.as_str())
}
