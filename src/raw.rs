//! 1:1 serde mirror of the TMX document, consumed by the loader.
//!
//! Attribute and element names map declaratively onto these fields;
//! nothing here survives past [`crate::Map`] construction.

use serde::Deserialize;

use crate::gid::Gid;

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}

#[derive(Deserialize)]
pub(crate) struct RawMap {
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(rename = "@class", default)]
    pub class: String,
    #[serde(rename = "@orientation", default)]
    pub orientation: String,
    #[serde(rename = "@width")]
    pub width: u32,
    #[serde(rename = "@height")]
    pub height: u32,
    #[serde(rename = "@tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "@tileheight")]
    pub tile_height: u32,
    #[serde(default)]
    pub properties: RawProperties,
    #[serde(rename = "tileset", default)]
    pub tilesets: Vec<RawTileset>,
    #[serde(rename = "layer", default)]
    pub layers: Vec<RawLayer>,
    #[serde(rename = "objectgroup", default)]
    pub object_groups: Vec<RawObjectGroup>,
}

#[derive(Deserialize, Default)]
pub(crate) struct RawProperties {
    #[serde(rename = "property", default)]
    pub items: Vec<RawProperty>,
}

#[derive(Deserialize)]
pub(crate) struct RawProperty {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value", default)]
    pub value: String,
}

#[derive(Deserialize)]
pub(crate) struct RawTileset {
    #[serde(rename = "@firstgid")]
    pub first_gid: Gid,
    #[serde(rename = "@source", default)]
    pub source: String,
}

#[derive(Deserialize)]
pub(crate) struct RawLayer {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@width")]
    pub width: Option<u32>,
    #[serde(rename = "@height")]
    pub height: Option<u32>,
    #[serde(rename = "@offsetx", default)]
    pub offset_x: i32,
    #[serde(rename = "@offsety", default)]
    pub offset_y: i32,
    #[serde(rename = "@opacity", default = "one")]
    pub opacity: f32,
    #[serde(rename = "@visible", default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub properties: RawProperties,
    pub data: RawData,
}

/// Undecoded layer payload. Either `text` (csv / base64 encodings) or
/// `tiles` (inline per-tile records) carries the data.
#[derive(Deserialize)]
pub(crate) struct RawData {
    #[serde(rename = "@encoding", default)]
    pub encoding: String,
    #[serde(rename = "@compression", default)]
    pub compression: String,
    #[serde(rename = "$text", default)]
    pub text: String,
    #[serde(rename = "tile", default)]
    pub tiles: Vec<RawDataTile>,
}

#[derive(Deserialize)]
pub(crate) struct RawDataTile {
    #[serde(rename = "@gid", default)]
    pub gid: Gid,
}

#[derive(Deserialize)]
pub(crate) struct RawObjectGroup {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@color", default)]
    pub color: String,
    #[serde(rename = "@opacity", default = "one")]
    pub opacity: f32,
    #[serde(rename = "@visible", default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub properties: RawProperties,
    #[serde(rename = "object", default)]
    pub objects: Vec<RawObject>,
}

#[derive(Deserialize)]
pub(crate) struct RawObject {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@type", default)]
    pub kind: String,
    #[serde(rename = "@x", default)]
    pub x: f64,
    #[serde(rename = "@y", default)]
    pub y: f64,
    #[serde(rename = "@width", default)]
    pub width: f64,
    #[serde(rename = "@height", default)]
    pub height: f64,
    #[serde(rename = "@gid")]
    pub gid: Option<Gid>,
    #[serde(rename = "@visible", default = "default_true")]
    pub visible: bool,
    #[serde(rename = "polygon", default)]
    pub polygons: Vec<RawPoints>,
    #[serde(rename = "polyline", default)]
    pub polylines: Vec<RawPoints>,
    #[serde(default)]
    pub properties: RawProperties,
}

#[derive(Deserialize)]
pub(crate) struct RawPoints {
    #[serde(rename = "@points", default)]
    pub points: String,
}
