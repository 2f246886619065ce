//! Resolve/Adobe `.cube` 3D LUT reader.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "Look"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Data lines are red-fastest. `LUT_3D_INPUT_RANGE lo hi` is accepted as a
//! uniform domain. 1D cube files are rejected.

use crate::{Lut3D, LutError, LutResult};
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

/// Largest grid accepted; 256^3 entries is already ~200 MB.
const MAX_SIZE: usize = 256;

/// Reads a 3D LUT from a `.cube` file.
///
/// # Errors
///
/// - [`LutError::Io`] if the file cannot be read
/// - [`LutError::Invalid`] for malformed content
pub fn read_cube<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LutError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lut = parse_cube(bytes.as_slice())?;
    debug!(path = %path.display(), size = lut.size(), "loaded cube LUT");
    Ok(lut)
}

/// Parses a 3D LUT from a reader.
///
/// # Errors
///
/// [`LutError::Invalid`] for a missing or bad `LUT_3D_SIZE`, unparsable
/// numbers, unknown keywords, a degenerate domain, or a value count other
/// than `size^3`.
pub fn parse_cube<R: BufRead>(reader: R) -> LutResult<Lut3D> {
    let mut size: Option<usize> = None;
    let mut domain_min = [0.0_f32; 3];
    let mut domain_max = [1.0_f32; 3];
    let mut data: Vec<[f32; 3]> = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LutError::invalid(format!("line {}: {e}", n + 1)))?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            continue;
        };
        let rest: Vec<&str> = parts.collect();

        match head {
            "TITLE" | "LUT_IN_VIDEO_RANGE" | "LUT_OUT_VIDEO_RANGE" => {}
            "LUT_3D_SIZE" => {
                if size.is_some() {
                    return Err(LutError::invalid("LUT_3D_SIZE given twice"));
                }
                size = Some(parse_size(&rest)?);
                if let Some(s) = size {
                    data.reserve(s * s * s);
                }
            }
            "LUT_1D_SIZE" => {
                return Err(LutError::invalid("1D cube LUTs are not supported"));
            }
            "DOMAIN_MIN" => domain_min = parse_triple(&rest, "DOMAIN_MIN")?,
            "DOMAIN_MAX" => domain_max = parse_triple(&rest, "DOMAIN_MAX")?,
            "LUT_3D_INPUT_RANGE" => {
                let [lo, hi] = parse_pair(&rest, "LUT_3D_INPUT_RANGE")?;
                domain_min = [lo; 3];
                domain_max = [hi; 3];
            }
            kw if kw.starts_with(|c: char| c.is_ascii_alphabetic()) => {
                return Err(LutError::invalid(format!("line {}: unknown keyword {kw}", n + 1)));
            }
            _ => {
                let mut values = Vec::with_capacity(3);
                values.push(head);
                values.extend_from_slice(&rest);
                let rgb = parse_triple(&values, "data")
                    .map_err(|_| LutError::invalid(format!("line {}: bad data line {line:?}", n + 1)))?;
                data.push(rgb);
            }
        }
    }

    let size = size.ok_or_else(|| LutError::invalid("missing LUT_3D_SIZE"))?;
    let expected = size * size * size;
    if data.len() != expected {
        return Err(LutError::invalid(format!(
            "expected {} values for LUT_3D_SIZE {}, found {}",
            expected,
            size,
            data.len()
        )));
    }

    Lut3D::from_data(data, size)?.with_domain(domain_min, domain_max)
}

fn parse_size(parts: &[&str]) -> LutResult<usize> {
    let [value] = parts else {
        return Err(LutError::invalid("LUT_3D_SIZE needs exactly one value"));
    };
    let size: usize = value
        .parse()
        .map_err(|_| LutError::invalid(format!("bad LUT_3D_SIZE {value:?}")))?;
    if !(2..=MAX_SIZE).contains(&size) {
        return Err(LutError::invalid(format!(
            "LUT_3D_SIZE {size} outside 2..={MAX_SIZE}"
        )));
    }
    Ok(size)
}

fn parse_float(s: &str, what: &str) -> LutResult<f32> {
    let v: f32 = s
        .parse()
        .map_err(|_| LutError::invalid(format!("{what}: bad number {s:?}")))?;
    if !v.is_finite() {
        return Err(LutError::invalid(format!("{what}: non-finite value {s:?}")));
    }
    Ok(v)
}

fn parse_triple(parts: &[&str], what: &str) -> LutResult<[f32; 3]> {
    let [r, g, b] = parts else {
        return Err(LutError::invalid(format!("{what}: expected 3 values, found {}", parts.len())));
    };
    Ok([parse_float(r, what)?, parse_float(g, what)?, parse_float(b, what)?])
}

fn parse_pair(parts: &[&str], what: &str) -> LutResult<[f32; 2]> {
    let [lo, hi] = parts else {
        return Err(LutError::invalid(format!("{what}: expected 2 values, found {}", parts.len())));
    };
    Ok([parse_float(lo, what)?, parse_float(hi, what)?])
}
