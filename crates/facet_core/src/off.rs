//! OFF (Object File Format) reader.
//!
//! # Supported Syntax
//!
//! ```text
//! OFF
//! # comments anywhere
//! <vertex count> <face count> <edge count>
//! x y z [ignored extra columns, e.g. colors]
//! ...
//! n i0 i1 ... i(n-1) [ignored extra columns]
//! ...
//! ```
//!
//! The counts may also follow the keyword on the header line (`OFF 8 6 0`).
//! Polygons with more than three corners are fan-triangulated around their
//! first corner. OFF files carry no normals; the mesh computes them.

use std::path::Path;

use facet_math::Vec3;
use thiserror::Error;

use crate::mesh::{Mesh, MeshError};

/// Errors that can occur while reading an OFF file.
#[derive(Error, Debug)]
pub enum OffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing OFF header")]
    MissingHeader,

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unexpected end of file: expected {0}")]
    UnexpectedEof(&'static str),

    #[error("Invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}

/// Result type for OFF reading.
pub type OffResult<T> = Result<T, OffError>;

/// Read an OFF file from disk.
pub fn load_off<P: AsRef<Path>>(path: P) -> OffResult<Mesh> {
    let content = std::fs::read_to_string(path)?;
    parse_off(&content)
}

/// Parse OFF text into a mesh.
pub fn parse_off(content: &str) -> OffResult<Mesh> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, strip_comment(line).trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(OffError::MissingHeader)?;
    let mut header_tokens = header.split_whitespace();
    if header_tokens.next() != Some("OFF") {
        return Err(OffError::MissingHeader);
    }

    // Counts are either on the header line or on the next one
    let remaining: Vec<&str> = header_tokens.collect();
    let (counts_line, counts) = if remaining.is_empty() {
        let (n, line) = lines.next().ok_or(OffError::UnexpectedEof("element counts"))?;
        (n, line.split_whitespace().collect::<Vec<_>>())
    } else {
        (header_line, remaining)
    };

    if counts.len() < 2 {
        return Err(OffError::Parse {
            line: counts_line,
            message: "expected '<vertices> <faces> [edges]'".to_string(),
        });
    }
    let vertex_count: usize = parse_token(counts[0], counts_line)?;
    let face_count: usize = parse_token(counts[1], counts_line)?;

    // Header counts are untrusted; a short file ends in UnexpectedEof
    let mut positions = Vec::new();
    for _ in 0..vertex_count {
        let (n, line) = lines.next().ok_or(OffError::UnexpectedEof("vertex"))?;
        let coords: Vec<&str> = line.split_whitespace().take(3).collect();
        if coords.len() < 3 {
            return Err(OffError::Parse {
                line: n,
                message: format!("vertex needs 3 coordinates, found {}", coords.len()),
            });
        }
        positions.push(Vec3::new(
            parse_token(coords[0], n)?,
            parse_token(coords[1], n)?,
            parse_token(coords[2], n)?,
        ));
    }

    let mut indices = Vec::new();
    for _ in 0..face_count {
        let (n, line) = lines.next().ok_or(OffError::UnexpectedEof("face"))?;
        let mut tokens = line.split_whitespace();
        let corner_count: usize = match tokens.next() {
            Some(token) => parse_token(token, n)?,
            None => return Err(OffError::UnexpectedEof("face")),
        };
        if corner_count < 3 {
            return Err(OffError::Parse {
                line: n,
                message: format!("face has {} corners, need at least 3", corner_count),
            });
        }

        let corners = tokens
            .take(corner_count)
            .map(|token| parse_token::<u32>(token, n))
            .collect::<OffResult<Vec<u32>>>()?;
        if corners.len() < corner_count {
            return Err(OffError::Parse {
                line: n,
                message: format!("face declares {} corners but lists {}", corner_count, corners.len()),
            });
        }

        // Fan triangulation around the first corner
        for i in 1..corner_count - 1 {
            indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
        }
    }

    let mesh = Mesh::new(positions, indices, None)?;
    log::debug!(
        "Parsed OFF: {} vertices, {} faces -> {} triangles",
        vertex_count,
        face_count,
        mesh.triangle_count()
    );

    Ok(mesh)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_token<T: std::str::FromStr>(token: &str, line: usize) -> OffResult<T> {
    token.parse().map_err(|_| OffError::Parse {
        line,
        message: format!("invalid number '{}'", token),
    })
}
