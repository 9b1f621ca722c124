// vehicle-mapview
// Copyright (c) 2024 Matthew Costa <ucosty@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::time::Duration;

use crate::path::PathPolicy;

pub struct ViewConfig {
    pub title: String,
    pub window_size: (u32, u32),

    pub map_image: PathBuf,
    pub vehicle_image: PathBuf,
    pub path_file: PathBuf,
    /// Lenient by default; set `PathPolicy::Strict` here to make a bad path file fatal
    pub path_policy: PathPolicy,

    pub tick_interval: Duration,

    /// Scale change per wheel notch
    pub zoom_step: f64,
    /// Logical units panned per pixel dragged
    pub pan_factor: f64,

    /// Icon scale relative to the map, applied to a quad of `vehicle_half_extent`
    pub vehicle_scale: (f32, f32),
    pub vehicle_half_extent: f32,

    pub placeholder_size: u32,
    pub placeholder_rgba: [u8; 4],
    pub clear_rgba: [f32; 4],
}

impl ViewConfig {
    /// Points all three input files at `dir`, keeping the default file names
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> ViewConfig {
        let dir = dir.into();
        self.map_image = dir.join("map.png");
        self.vehicle_image = dir.join("vehicle.png");
        self.path_file = dir.join("path.txt");
        self
    }
}

impl Default for ViewConfig {
    fn default() -> ViewConfig {
        ViewConfig {
            title: "Vehicle Map Viewer".to_string(),
            window_size: (920, 600),
            map_image: PathBuf::from("res/map.png"),
            vehicle_image: PathBuf::from("res/vehicle.png"),
            path_file: PathBuf::from("res/path.txt"),
            path_policy: PathPolicy::Lenient,
            tick_interval: Duration::from_millis(100),
            zoom_step: 0.02,
            pan_factor: 0.001,
            vehicle_scale: (0.4, 0.8),
            vehicle_half_extent: 0.1,
            placeholder_size: 16,
            placeholder_rgba: [0x00, 0xff, 0x00, 0xff],
            clear_rgba: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_dir_rewrites_all_inputs() {
        let config = ViewConfig::default().with_assets_dir("/data/demo");
        assert_eq!(config.map_image, PathBuf::from("/data/demo/map.png"));
        assert_eq!(config.vehicle_image, PathBuf::from("/data/demo/vehicle.png"));
        assert_eq!(config.path_file, PathBuf::from("/data/demo/path.txt"));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
    }
}
