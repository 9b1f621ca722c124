// vehicle-mapview
// Copyright (c) 2024 Matthew Costa <ucosty@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Result, ViewError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

/// How to treat a path file that is missing or contains lines that are not `x y` pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPolicy {
    /// Missing file gives an empty path, bad lines are skipped
    Lenient,
    /// Missing file or any bad line fails the load
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclePath {
    points: Vec<PathPoint>,
}

impl VehiclePath {
    pub fn new(points: Vec<PathPoint>) -> VehiclePath {
        VehiclePath { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PathPoint> {
        self.points.get(index).copied()
    }
}

fn parse_point(line: &str) -> Option<PathPoint> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse::<f64>().ok()?;
    let y = tokens.next()?.parse::<f64>().ok()?;
    Some(PathPoint { x, y })
}

pub fn parse_path<R: BufRead>(reader: R, policy: PathPolicy) -> Result<VehiclePath> {
    let mut points = Vec::<PathPoint>::new();

    // Lines are decoded lossily so invalid UTF-8 is skipped like any other bad line
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let line_number = index + 1;
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) if policy == PathPolicy::Lenient => {
                warn!("Stopped reading path at line {}: {}", line_number, e);
                break;
            }
            Err(source) => {
                return Err(ViewError::PathLineRead {
                    line: line_number,
                    source,
                })
            }
        };
        let line = String::from_utf8_lossy(&bytes).trim_end_matches('\r').to_string();

        if line.trim().is_empty() {
            continue;
        }

        match parse_point(&line) {
            Some(point) => points.push(point),
            None if policy == PathPolicy::Lenient => {
                warn!("Skipping malformed path line {}: {:?}", line_number, line);
            }
            None => {
                return Err(ViewError::MalformedPath {
                    line: line_number,
                    content: line,
                })
            }
        }
    }

    Ok(VehiclePath::new(points))
}

pub fn load_path(path: &Path, policy: PathPolicy) -> Result<VehiclePath> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if policy == PathPolicy::Lenient => {
            warn!("Path file {:?} unavailable ({}), vehicle will not be drawn", path, e);
            return Ok(VehiclePath::default());
        }
        Err(source) => {
            return Err(ViewError::PathRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let vehicle_path = parse_path(BufReader::new(file), policy)?;
    info!("Loaded {} path points from {:?}", vehicle_path.len(), path);
    Ok(vehicle_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_one_point_per_line() {
        let path = parse_path(Cursor::new("0.0 0.0\n0.5 0.5\n1.0 1.0"), PathPolicy::Strict).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.get(1), Some(PathPoint { x: 0.5, y: 0.5 }));
        assert_eq!(path.get(3), None);
    }

    #[test]
    fn tolerates_tabs_blank_lines_and_extra_tokens() {
        let source = "-0.25\t0.75\n\n   \n0.1   -0.2 ignored\r\n";
        let path = parse_path(Cursor::new(source), PathPolicy::Strict).unwrap();
        assert_eq!(
            path,
            VehiclePath::new(vec![
                PathPoint { x: -0.25, y: 0.75 },
                PathPoint { x: 0.1, y: -0.2 },
            ])
        );
    }

    #[test]
    fn lenient_policy_skips_bad_lines() {
        let source = "0.0 0.0\n0.5\nabc def\n1.0 1.0\n";
        let path = parse_path(Cursor::new(source), PathPolicy::Lenient).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.get(1), Some(PathPoint { x: 1.0, y: 1.0 }));
    }

    #[test]
    fn lenient_policy_skips_invalid_utf8_and_keeps_reading() {
        let source: &[u8] = b"0.0 0.0\n\xff\xfe garbage\n0.5 0.5\n1.0 1.0\n";
        let path = parse_path(Cursor::new(source), PathPolicy::Lenient).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.get(2), Some(PathPoint { x: 1.0, y: 1.0 }));
    }

    #[test]
    fn strict_policy_rejects_invalid_utf8() {
        let source: &[u8] = b"0.0 0.0\n\xff 1.0\n";
        assert!(matches!(
            parse_path(Cursor::new(source), PathPolicy::Strict),
            Err(ViewError::MalformedPath { line: 2, .. })
        ));
    }

    #[test]
    fn strict_policy_reports_the_offending_line() {
        let source = "0.0 0.0\n0.5\n";
        match parse_path(Cursor::new(source), PathPolicy::Strict) {
            Err(ViewError::MalformedPath { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "0.5");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_file_depends_on_policy() {
        let missing = Path::new("/nonexistent/vehicle-mapview/path.txt");

        let path = load_path(missing, PathPolicy::Lenient).unwrap();
        assert!(path.is_empty());

        assert!(matches!(
            load_path(missing, PathPolicy::Strict),
            Err(ViewError::PathRead { .. })
        ));
    }

    #[test]
    fn loads_from_disk() {
        let file = std::env::temp_dir().join(format!("vehicle-mapview-path-{}.txt", std::process::id()));
        std::fs::write(&file, "0.0 0.0\n0.5 0.5\n1.0 1.0\n").unwrap();

        let path = load_path(&file, PathPolicy::Strict).unwrap();
        std::fs::remove_file(&file).unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.get(2), Some(PathPoint { x: 1.0, y: 1.0 }));
    }
}
