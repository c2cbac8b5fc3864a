//! Encoded polyline codec
//!
//! The compact ASCII format used by mapping APIs for route geometry:
//! coordinates are scaled by 1e5, delta-encoded against the previous
//! point, zig-zag signed, and emitted as 5-bit chunks offset by 63 with
//! bit 0x20 marking continuation.

use geoquote_core::error::{QuoteError, Result};
use geoquote_core::models::GeoPoint;

const CONTINUATION_BIT: i64 = 0x20;
const DATA_MASK: i64 = 0x1f;

// 7 chunks carry 35 bits, more than any coordinate delta at 1e-5
// precision can need; a longer run means corrupt input, not a big value.
const MAX_CHUNK_BITS: u32 = 35;

/// Decode an encoded polyline into a sequence of points.
///
/// The whole string is consumed; trailing garbage, a truncated value, or
/// a byte outside the polyline alphabet fails instead of silently
/// producing a shorter route.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut pos = 0usize;
    let mut lat = 0i64;
    let mut lon = 0i64;

    while pos < bytes.len() {
        lat += decode_value(bytes, &mut pos)?;
        lon += decode_value(bytes, &mut pos)?;
        points.push(GeoPoint::new(lat as f64 / 1e5, lon as f64 / 1e5));
    }

    Ok(points)
}

/// Encode a sequence of points into the polyline format.
pub fn encode(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lon = 0i64;

    for point in points {
        let lat = (point.lat * 1e5).round() as i64;
        let lon = (point.lon * 1e5).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn decode_value(bytes: &[u8], pos: &mut usize) -> Result<i64> {
    let start = *pos;
    let mut result = 0i64;
    let mut shift = 0u32;

    loop {
        let raw = *bytes.get(*pos).ok_or_else(|| QuoteError::PolylineDecode {
            offset: start,
            reason: "input ends in the middle of a value".to_string(),
        })?;
        if !(63..=126).contains(&raw) {
            return Err(QuoteError::PolylineDecode {
                offset: *pos,
                reason: format!("byte 0x{:02x} outside the polyline alphabet", raw),
            });
        }
        *pos += 1;

        let chunk = i64::from(raw - 63);
        result |= (chunk & DATA_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
        if shift >= MAX_CHUNK_BITS {
            return Err(QuoteError::PolylineDecode {
                offset: start,
                reason: "continuation run too long".to_string(),
            });
        }
    }

    // Undo zig-zag: bit 0 is the sign
    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}

fn encode_value(value: i64, out: &mut String) {
    // Zig-zag so small negative deltas stay short
    let mut v = (value << 1) ^ (value >> 63);
    loop {
        let mut chunk = (v & DATA_MASK) as u8;
        v >>= 5;
        if v != 0 {
            chunk |= CONTINUATION_BIT as u8;
        }
        out.push(char::from(chunk + 63));
        if v == 0 {
            break;
        }
    }
}
