// vehicle-mapview
// Copyright (c) 2024 Matthew Costa <ucosty@gmail.com>
//
// SPDX-License-Identifier: MIT

use tracing::{debug, info, warn};

use crate::config::ViewConfig;
use crate::error::Result;
use crate::path::{load_path, VehiclePath};
use crate::texture::{load_texture, TextureImage};

/// The draw counter runs 0..=FLICKER_PERIOD-1, the last step is drawn fully opaque
const FLICKER_PERIOD: u32 = 11;

/// Rectangle in window pixels, y growing downwards.
/// Left may exceed right (and top exceed bottom) when the scale is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Disabled,
    Enabled,
}

/// The drawing surface the view renders onto
pub trait Canvas {
    type Texture;

    fn create_texture(&mut self, image: &TextureImage) -> Result<Self::Texture>;

    fn clear(&mut self, rgba: [f32; 4]);

    fn draw_textured_quad(&mut self, texture: &Self::Texture, rect: ScreenRect, opacity: f32, blend: Blend);
}

/// Orthographic projection of logical [-1, 1] x [-1, 1] onto the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn project(&self, x: f64, y: f64) -> (f32, f32) {
        let px = (x as f32 + 1.0) * 0.5 * self.width;
        let py = (1.0 - y as f32) * 0.5 * self.height;
        (px, py)
    }

    fn project_rect(&self, center: (f64, f64), half_extent: (f64, f64)) -> ScreenRect {
        let (left, top) = self.project(center.0 - half_extent.0, center.1 + half_extent.1);
        let (right, bottom) = self.project(center.0 + half_extent.0, center.1 - half_extent.1);
        ScreenRect {
            left,
            top,
            right,
            bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Positive,
    Negative,
    None,
}

impl WheelDirection {
    pub fn from_delta(delta: f64) -> WheelDirection {
        if delta > 0.0 {
            WheelDirection::Positive
        } else if delta < 0.0 {
            WheelDirection::Negative
        } else {
            WheelDirection::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Reset,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Close,
    Reset,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Default,
    Grab,
}

struct Textures<T> {
    map: T,
    vehicle: T,
}

pub struct MapView<T> {
    config: ViewConfig,
    textures: Option<Textures<T>>,
    path: VehiclePath,
    viewport: Viewport,

    offset: (f64, f64),
    scale: f64,
    position: usize,
    last_pointer: (f64, f64),
    draw_counter: u32,
    cursor: CursorStyle,
}

impl<T> MapView<T> {
    pub fn new(config: ViewConfig) -> MapView<T> {
        let viewport = Viewport {
            width: config.window_size.0 as f32,
            height: config.window_size.1 as f32,
        };

        MapView {
            config,
            textures: None,
            path: VehiclePath::default(),
            viewport,
            offset: (0.0, 0.0),
            scale: 1.0,
            position: 0,
            last_pointer: (0.0, 0.0),
            draw_counter: 0,
            cursor: CursorStyle::Default,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.textures.is_some()
    }

    /// Uploads both textures and reads the vehicle path
    pub fn initialize<C: Canvas<Texture = T>>(&mut self, canvas: &mut C) -> Result<()> {
        let map = load_texture(canvas, &self.config.map_image, &self.config)?;
        let vehicle = load_texture(canvas, &self.config.vehicle_image, &self.config)?;
        self.path = load_path(&self.config.path_file, self.config.path_policy)?;
        self.textures = Some(Textures { map, vehicle });

        if self.path.is_empty() {
            warn!("No path points loaded, the vehicle will not be drawn");
        }
        info!("Map view ready, {} path points", self.path.len());
        Ok(())
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport {
            width: width as f32,
            height: height as f32,
        };
    }

    pub fn render<C: Canvas<Texture = T>>(&mut self, canvas: &mut C) {
        canvas.clear(self.config.clear_rgba);

        let counter = self.draw_counter;
        self.draw_counter = (self.draw_counter + 1) % FLICKER_PERIOD;

        let textures = match &self.textures {
            Some(textures) => textures,
            None => return,
        };

        // Pan is applied before scale, so the offset is never scaled
        let map_rect = self.viewport.project_rect(self.offset, (self.scale, self.scale));
        canvas.draw_textured_quad(&textures.map, map_rect, 1.0, Blend::Disabled);

        if let Some(point) = self.path.get(self.position) {
            let center = (
                self.offset.0 + point.x * self.scale,
                self.offset.1 + point.y * self.scale,
            );
            let half_extent = self.config.vehicle_half_extent as f64;
            let (sx, sy) = self.config.vehicle_scale;
            let vehicle_rect = self.viewport.project_rect(
                center,
                (
                    half_extent * sx as f64 * self.scale,
                    half_extent * sy as f64 * self.scale,
                ),
            );

            canvas.draw_textured_quad(&textures.vehicle, vehicle_rect, flicker_opacity(counter), Blend::Enabled);
        }
    }

    pub fn on_tick(&mut self) {
        if self.position + 1 < self.path.len() {
            self.position += 1;
        }
    }

    pub fn on_wheel(&mut self, direction: WheelDirection) {
        match direction {
            WheelDirection::Positive => self.scale += self.config.zoom_step,
            WheelDirection::Negative => self.scale -= self.config.zoom_step,
            WheelDirection::None => {}
        }
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.last_pointer = (x, y);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, primary_held: bool) {
        if !primary_held {
            return;
        }

        self.set_cursor(CursorStyle::Grab);

        // Window y grows downwards, the map's y axis points up
        self.offset.0 += (x - self.last_pointer.0) * self.config.pan_factor;
        self.offset.1 -= (y - self.last_pointer.1) * self.config.pan_factor;
        self.last_pointer = (x, y);
    }

    pub fn on_pointer_up(&mut self) {
        self.set_cursor(CursorStyle::Default);
    }

    pub fn on_key_down(&mut self, key: Key) -> KeyAction {
        match key {
            Key::Escape => KeyAction::Close,
            Key::Reset => {
                self.reset();
                KeyAction::Reset
            }
            Key::Other => KeyAction::None,
        }
    }

    pub fn reset(&mut self) {
        self.offset = (0.0, 0.0);
        self.scale = 1.0;
        self.position = 0;
        debug!("View reset");
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        if self.cursor != cursor {
            debug!("Cursor changed to {:?}", cursor);
            self.cursor = cursor;
        }
    }
}

#[cfg(test)]
impl<T> MapView<T> {
    pub fn set_path(&mut self, path: VehiclePath) {
        self.path = path;
        self.position = 0;
    }

    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn draw_counter(&self) -> u32 {
        self.draw_counter
    }
}

/// Opacity of the vehicle icon for a given draw counter value
pub fn flicker_opacity(counter: u32) -> f32 {
    if counter + 1 >= FLICKER_PERIOD {
        1.0
    } else {
        counter as f32 / 10.0
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear([f32; 4]),
        Quad {
            texture: usize,
            rect: ScreenRect,
            opacity: f32,
            blend: Blend,
        },
    }

    /// Canvas that keeps uploaded images and records every draw call
    #[derive(Default)]
    pub struct RecordingCanvas {
        pub textures: Vec<TextureImage>,
        pub calls: Vec<DrawCall>,
    }

    impl RecordingCanvas {
        pub fn quads(&self) -> Vec<(usize, ScreenRect, f32, Blend)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::Quad {
                        texture,
                        rect,
                        opacity,
                        blend,
                    } => Some((*texture, *rect, *opacity, *blend)),
                    DrawCall::Clear(_) => None,
                })
                .collect()
        }
    }

    impl Canvas for RecordingCanvas {
        type Texture = usize;

        fn create_texture(&mut self, image: &TextureImage) -> Result<usize> {
            self.textures.push(image.clone());
            Ok(self.textures.len() - 1)
        }

        fn clear(&mut self, rgba: [f32; 4]) {
            self.calls.push(DrawCall::Clear(rgba));
        }

        fn draw_textured_quad(&mut self, texture: &usize, rect: ScreenRect, opacity: f32, blend: Blend) {
            self.calls.push(DrawCall::Quad {
                texture: *texture,
                rect,
                opacity,
                blend,
            });
        }
    }
}
