#![warn(missing_docs)]

//! Tiled TMX map loader.
//!
//! Parses a TMX document into an immutable [`Map`], decodes every
//! layer's tile data (inline records, csv, or base64 with optional
//! gzip/zlib compression) into flat row-major GID grids, and resolves
//! GIDs back to their owning tilesets. [`MapRegistry`] scans a
//! directory tree and indexes loaded maps by their class name.

mod decode;
mod error;
mod gid;
mod loader;
mod map;
mod raw;
mod registry;

pub use decode::decode_points;
pub use error::MapError;
pub use gid::{Gid, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub use map::{Layer, Map, Object, ObjectGroup, Point, PolyLine, Polygon, Property, Tileset};
pub use registry::MapRegistry;
