//! Layer payload decoding and geometry-point decoding.
//!
//! Three payload strategies, dispatched on the layer's `encoding`
//! attribute: inline per-tile records, comma-separated text, and
//! base64 with optional gzip/zlib compression. Each strategy returns a
//! freshly owned GID vector; nothing is shared between strategies. Flip
//! flags pass through untouched, masking is the resolver's job.

use std::io::Read;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use flate2::read::{GzDecoder, ZlibDecoder};

use crate::error::MapError;
use crate::gid::Gid;
use crate::map::Point;
use crate::raw::RawData;

/// Decodes a layer's raw payload into exactly `expected` GIDs.
/// `layer` is only used for error context.
pub(crate) fn decode_layer(
    layer: &str,
    data: &RawData,
    expected: usize,
) -> Result<Vec<Gid>, MapError> {
    match data.encoding.as_str() {
        "" => decode_inline(layer, data, expected),
        "csv" => decode_csv(layer, &data.text, expected),
        "base64" => decode_base64(layer, &data.text, &data.compression, expected),
        other => Err(MapError::UnknownEncoding(other.to_owned())),
    }
}

/// Inline-record payload: the document decoder already split the data
/// into `<tile gid="..."/>` records, in row-major order.
fn decode_inline(layer: &str, data: &RawData, expected: usize) -> Result<Vec<Gid>, MapError> {
    if data.tiles.len() != expected {
        return Err(MapError::LengthMismatch {
            layer: layer.to_owned(),
            expected,
            actual: data.tiles.len(),
        });
    }
    Ok(data.tiles.iter().map(|t| t.gid).collect())
}

/// Delimited-text payload. Everything that is not a digit or a comma is
/// stripped first; authoring tools pad the text with newlines and
/// indentation.
fn decode_csv(layer: &str, text: &str, expected: usize) -> Result<Vec<Gid>, MapError> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();

    let gids = cleaned
        .split(',')
        .map(|token| {
            token
                .parse::<u32>()
                .map(Gid)
                .map_err(|_| MapError::MalformedNumber(token.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if gids.len() != expected {
        return Err(MapError::LengthMismatch {
            layer: layer.to_owned(),
            expected,
            actual: gids.len(),
        });
    }
    Ok(gids)
}

/// Base64 payload with optional compression. The decompressed bytes are
/// `expected * 4` little-endian u32 values, already row-major.
fn decode_base64(
    layer: &str,
    text: &str,
    compression: &str,
    expected: usize,
) -> Result<Vec<Gid>, MapError> {
    let decoded = BASE64_STANDARD.decode(text.trim().as_bytes())?;

    let bytes = match compression {
        "" => decoded,
        "gzip" => {
            let mut out = Vec::new();
            GzDecoder::new(decoded.as_slice())
                .read_to_end(&mut out)
                .map_err(MapError::Compression)?;
            out
        }
        "zlib" => {
            let mut out = Vec::new();
            ZlibDecoder::new(decoded.as_slice())
                .read_to_end(&mut out)
                .map_err(MapError::Compression)?;
            out
        }
        other => return Err(MapError::UnknownCompression(other.to_owned())),
    };

    if bytes.len() != expected * 4 {
        return Err(MapError::LengthMismatch {
            layer: layer.to_owned(),
            expected: expected * 4,
            actual: bytes.len(),
        });
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|b| Gid(u32::from_le_bytes([b[0], b[1], b[2], b[3]])))
        .collect())
}

/// Decodes a polygon/polyline points string ("x1,y1 x2,y2 ...") into
/// integer points relative to the owning object.
pub fn decode_points(s: &str) -> Result<Vec<Point>, MapError> {
    s.split(' ')
        .map(|pair| {
            let mut coords = pair.split(',');
            let (Some(x), Some(y), None) = (coords.next(), coords.next(), coords.next()) else {
                return Err(MapError::MalformedPoints(pair.to_owned()));
            };
            let x = x
                .parse()
                .map_err(|_| MapError::MalformedPoints(pair.to_owned()))?;
            let y = y
                .parse()
                .map_err(|_| MapError::MalformedPoints(pair.to_owned()))?;
            Ok(Point { x, y })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use flate2::Compression;
    use std::io::Write;

    fn raw(encoding: &str, compression: &str, text: &str) -> RawData {
        RawData {
            encoding: encoding.to_owned(),
            compression: compression.to_owned(),
            text: text.to_owned(),
            tiles: Vec::new(),
        }
    }

    fn le_bytes(gids: &[u32]) -> Vec<u8> {
        gids.iter().flat_map(|g| g.to_le_bytes()).collect()
    }

    #[test]
    fn csv_decodes_two_by_two() {
        let data = raw("csv", "", "1,2,3,4");
        let gids = decode_layer("L", &data, 4).expect("decode");
        assert_eq!(gids, vec![Gid(1), Gid(2), Gid(3), Gid(4)]);
    }

    #[test]
    fn csv_strips_incidental_whitespace() {
        let data = raw("csv", "", "\n  1,2,\n  3,4\n");
        let gids = decode_layer("L", &data, 4).expect("decode");
        assert_eq!(gids, vec![Gid(1), Gid(2), Gid(3), Gid(4)]);
    }

    #[test]
    fn csv_short_data_is_length_mismatch() {
        let data = raw("csv", "", "1,2,3");
        let err = decode_layer("L", &data, 4).unwrap_err();
        assert!(matches!(
            err,
            MapError::LengthMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn csv_empty_token_is_malformed_number() {
        let data = raw("csv", "", "1,,3,4");
        let err = decode_layer("L", &data, 4).unwrap_err();
        assert!(matches!(err, MapError::MalformedNumber(_)));
    }

    #[test]
    fn base64_uncompressed_round_trip() {
        let gids = [1u32, 0, 0x8000_0096, 4];
        let text = BASE64_STANDARD.encode(le_bytes(&gids));
        let data = raw("base64", "", &text);
        let out = decode_layer("L", &data, 4).expect("decode");
        assert_eq!(out, gids.map(Gid).to_vec());
        assert!(out[2].flip_h());
    }

    #[test]
    fn base64_gzip_round_trip() {
        let gids = [9u32, 8, 7, 6];
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&le_bytes(&gids)).expect("compress");
        let text = BASE64_STANDARD.encode(enc.finish().expect("finish"));
        let data = raw("base64", "gzip", &text);
        assert_eq!(decode_layer("L", &data, 4).expect("decode"), gids.map(Gid).to_vec());
    }

    #[test]
    fn base64_zlib_round_trip() {
        let gids = [5u32, 0, 0, 5];
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&le_bytes(&gids)).expect("compress");
        let text = BASE64_STANDARD.encode(enc.finish().expect("finish"));
        let data = raw("base64", "zlib", &text);
        assert_eq!(decode_layer("L", &data, 4).expect("decode"), gids.map(Gid).to_vec());
    }

    #[test]
    fn base64_tolerates_surrounding_whitespace() {
        let text = format!("\n  {}  \n", BASE64_STANDARD.encode(le_bytes(&[1, 2, 3, 4])));
        let data = raw("base64", "", &text);
        assert_eq!(
            decode_layer("L", &data, 4).expect("decode"),
            vec![Gid(1), Gid(2), Gid(3), Gid(4)]
        );
    }

    #[test]
    fn base64_garbage_is_encoding_error() {
        let data = raw("base64", "", "@@@not base64@@@");
        assert!(matches!(
            decode_layer("L", &data, 4).unwrap_err(),
            MapError::Encoding(_)
        ));
    }

    #[test]
    fn base64_bad_gzip_stream_is_compression_error() {
        // Valid base64, but not a gzip stream.
        let text = BASE64_STANDARD.encode([0u8; 16]);
        let data = raw("base64", "gzip", &text);
        assert!(matches!(
            decode_layer("L", &data, 4).unwrap_err(),
            MapError::Compression(_)
        ));
    }

    #[test]
    fn base64_truncated_payload_is_length_mismatch() {
        let text = BASE64_STANDARD.encode(le_bytes(&[1, 2, 3]));
        let data = raw("base64", "", &text);
        assert!(matches!(
            decode_layer("L", &data, 4).unwrap_err(),
            MapError::LengthMismatch { .. }
        ));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let data = raw("foo", "", "1,2,3,4");
        assert!(matches!(
            decode_layer("L", &data, 4).unwrap_err(),
            MapError::UnknownEncoding(tag) if tag == "foo"
        ));
    }

    #[test]
    fn unknown_compression_is_rejected() {
        let text = BASE64_STANDARD.encode(le_bytes(&[1, 2, 3, 4]));
        let data = raw("base64", "lzma", &text);
        assert!(matches!(
            decode_layer("L", &data, 4).unwrap_err(),
            MapError::UnknownCompression(tag) if tag == "lzma"
        ));
    }

    #[test]
    fn inline_records_decode_in_document_order() {
        use crate::raw::RawDataTile;
        let data = RawData {
            encoding: String::new(),
            compression: String::new(),
            text: String::new(),
            tiles: vec![
                RawDataTile { gid: Gid(3) },
                RawDataTile { gid: Gid(0) },
                RawDataTile { gid: Gid(1) },
                RawDataTile { gid: Gid(2) },
            ],
        };
        assert_eq!(
            decode_layer("L", &data, 4).expect("decode"),
            vec![Gid(3), Gid(0), Gid(1), Gid(2)]
        );
    }

    #[test]
    fn inline_record_count_is_validated() {
        let data = raw("", "", "");
        assert!(matches!(
            decode_layer("L", &data, 4).unwrap_err(),
            MapError::LengthMismatch {
                expected: 4,
                actual: 0,
                ..
            }
        ));
    }

    #[test]
    fn points_decode() {
        let points = decode_points("0,0 10,0 10,10").expect("decode");
        assert_eq!(
            points,
            vec![
                Point { x: 0, y: 0 },
                Point { x: 10, y: 0 },
                Point { x: 10, y: 10 }
            ]
        );
    }

    #[test]
    fn points_accept_negative_coordinates() {
        let points = decode_points("-16,-8 0,0").expect("decode");
        assert_eq!(points[0], Point { x: -16, y: -8 });
    }

    #[test]
    fn points_missing_coordinate_is_malformed() {
        assert!(matches!(
            decode_points("0,0 10").unwrap_err(),
            MapError::MalformedPoints(pair) if pair == "10"
        ));
    }

    #[test]
    fn points_extra_coordinate_is_malformed() {
        assert!(matches!(
            decode_points("0,0,0").unwrap_err(),
            MapError::MalformedPoints(_)
        ));
    }
}
