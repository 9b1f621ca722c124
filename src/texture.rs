// vehicle-mapview
// Copyright (c) 2024 Matthew Costa <ucosty@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::path::Path;

use tracing::{info, warn};

use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::scene::Canvas;

/// Tightly packed 8-bit RGBA pixels, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    pub fn decode(path: &Path) -> Result<TextureImage> {
        let decoded = image::open(path).map_err(|source| ViewError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(TextureImage {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    pub fn solid(size: u32, rgba: [u8; 4]) -> TextureImage {
        let pixels = rgba.repeat((size * size) as usize);
        TextureImage {
            width: size,
            height: size,
            pixels,
        }
    }

    /// Decodes `path`, substituting a solid placeholder if the file can't be read
    pub fn decode_or_placeholder(path: &Path, config: &ViewConfig) -> TextureImage {
        match TextureImage::decode(path) {
            Ok(image) => {
                info!("Loaded {:?} ({}x{})", path, image.width, image.height);
                image
            }
            Err(e) => {
                warn!("{}, using placeholder texture", e);
                TextureImage::solid(config.placeholder_size, config.placeholder_rgba)
            }
        }
    }
}

/// Decode failures never reach the caller; only a failed GPU upload does
pub fn load_texture<C: Canvas>(canvas: &mut C, path: &Path, config: &ViewConfig) -> Result<C::Texture> {
    let image = TextureImage::decode_or_placeholder(path, config);
    canvas.create_texture(&image)
}
