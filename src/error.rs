use std::path::PathBuf;
use std::{error, fmt, io};

/// Error type for map loading, layer decoding and registry lookups.
#[derive(Debug)]
pub enum MapError {
    /// The TMX document is not well-formed or structurally invalid.
    DocumentParse {
        /// Source the document was read from.
        path: PathBuf,
        /// Underlying deserializer error.
        source: quick_xml::DeError,
    },
    /// File open/read failure.
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Map width/height or tile width/height is zero.
    InvalidDimensions(String),
    /// A layer declares an encoding outside `{"", "csv", "base64"}`.
    UnknownEncoding(String),
    /// A layer declares a compression outside `{"", "gzip", "zlib"}`.
    UnknownCompression(String),
    /// Malformed base64 in a layer payload.
    Encoding(base64::DecodeError),
    /// Malformed gzip/zlib stream in a layer payload.
    Compression(io::Error),
    /// Decoded tile count or byte count does not match the declared grid.
    LengthMismatch {
        /// Name of the offending layer.
        layer: String,
        /// Expected element count.
        expected: usize,
        /// Count actually decoded.
        actual: usize,
    },
    /// A delimited-text token failed to parse as an unsigned integer.
    MalformedNumber(String),
    /// A polygon/polyline points entry is not two comma-separated integers.
    MalformedPoints(String),
    /// No layer with the requested name exists.
    LayerNotFound(String),
    /// The registry was queried before a successful load.
    RegistryNotLoaded,
    /// No map with the requested class name is indexed.
    MapNotFound(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::DocumentParse { path, source } => {
                write!(f, "failed to parse map document {}: {}", path.display(), source)
            }
            MapError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            MapError::InvalidDimensions(source) => {
                write!(f, "map '{}' declares a zero grid or tile dimension", source)
            }
            MapError::UnknownEncoding(tag) => write!(f, "unknown layer encoding '{}'", tag),
            MapError::UnknownCompression(tag) => write!(f, "unknown layer compression '{}'", tag),
            MapError::Encoding(err) => write!(f, "invalid base64 layer data: {}", err),
            MapError::Compression(err) => write!(f, "invalid compressed layer data: {}", err),
            MapError::LengthMismatch {
                layer,
                expected,
                actual,
            } => write!(
                f,
                "layer '{}' decoded to {} elements, expected {}",
                layer, actual, expected
            ),
            MapError::MalformedNumber(token) => write!(f, "invalid tile id token '{}'", token),
            MapError::MalformedPoints(pair) => write!(f, "invalid points entry '{}'", pair),
            MapError::LayerNotFound(name) => write!(f, "layer '{}' not found", name),
            MapError::RegistryNotLoaded => write!(f, "map registry is not loaded"),
            MapError::MapNotFound(name) => write!(f, "map '{}' not found", name),
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MapError::DocumentParse { source, .. } => Some(source),
            MapError::Io { source, .. } => Some(source),
            MapError::Encoding(err) => Some(err),
            MapError::Compression(err) => Some(err),
            _ => None,
        }
    }
}

impl From<base64::DecodeError> for MapError {
    fn from(err: base64::DecodeError) -> Self {
        MapError::Encoding(err)
    }
}
