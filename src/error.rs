// vehicle-mapview
// Copyright (c) 2024 Matthew Costa <ucosty@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Failed to read path file {path:?}: {source}")]
    PathRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read path line {line}: {source}")]
    PathLineRead {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Malformed path entry on line {line}: {content:?}")]
    MalformedPath { line: usize, content: String },

    #[error("Failed to decode image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to upload texture: {0}")]
    TextureUpload(String),
}

pub type Result<T> = std::result::Result<T, ViewError>;
