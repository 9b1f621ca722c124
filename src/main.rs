// vehicle-mapview
// Copyright (c) 2024 Matthew Costa <ucosty@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::error::Error;

use speedy2d::dimen::UVec2;
use speedy2d::window::{WindowCreationOptions, WindowPosition, WindowSize};
use speedy2d::Window;

use crate::config::ViewConfig;
use crate::viewer::{MapViewEvent, MapViewer};

mod config;
mod error;
mod path;
mod scene;
mod texture;
mod viewer;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    // Enforce x11 mode for now
    std::env::set_var("WINIT_UNIX_BACKEND", "x11");

    let config = ViewConfig::default().with_assets_dir("res");

    let window = Window::<MapViewEvent>::new_with_user_events(
        &config.title,
        WindowCreationOptions::new_windowed(
            WindowSize::PhysicalPixels(UVec2::from(config.window_size)),
            Option::from(WindowPosition::Center),
        ),
    )?;

    let event_sender = window.create_user_event_sender();

    let map_viewer = MapViewer::new(config, event_sender);

    window.run_loop(map_viewer)
}
