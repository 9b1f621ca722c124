// vehicle-mapview
// Copyright (c) 2024 Matthew Costa <ucosty@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::thread;

use speedy2d::color::Color;
use speedy2d::dimen::{UVec2, Vec2};
use speedy2d::image::{ImageDataType, ImageHandle, ImageSmoothingMode};
use speedy2d::shape::Rectangle;
use speedy2d::window::{
    KeyScancode, MouseButton, MouseScrollDistance, UserEventSender, VirtualKeyCode, WindowHandler, WindowHelper,
    WindowStartupInfo,
};
use speedy2d::Graphics2D;
use tracing::{debug, error, info};

use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::scene::{Blend, Canvas, Key, KeyAction, MapView, ScreenRect, WheelDirection};
use crate::texture::TextureImage;

#[derive(Debug)]
pub enum MapViewEvent {
    Tick,
}

struct GraphicsCanvas<'a> {
    graphics: &'a mut Graphics2D,
}

impl Canvas for GraphicsCanvas<'_> {
    type Texture = ImageHandle;

    fn create_texture(&mut self, image: &TextureImage) -> Result<ImageHandle> {
        self.graphics
            .create_image_from_raw_pixels(
                ImageDataType::RGBA,
                ImageSmoothingMode::NearestNeighbor,
                (image.width, image.height),
                image.pixels.as_slice(),
            )
            .map_err(|e| ViewError::TextureUpload(format!("{}", e)))
    }

    fn clear(&mut self, rgba: [f32; 4]) {
        self.graphics.clear_screen(Color::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]));
    }

    fn draw_textured_quad(&mut self, texture: &ImageHandle, rect: ScreenRect, opacity: f32, blend: Blend) {
        let tint = match blend {
            Blend::Disabled => Color::WHITE,
            Blend::Enabled => Color::from_rgba(1.0, 1.0, 1.0, opacity),
        };

        let rectangle = Rectangle::new(Vec2::new(rect.left, rect.top), Vec2::new(rect.right, rect.bottom));
        self.graphics.draw_rectangle_image_tinted(rectangle, tint, texture);
    }
}

pub struct MapViewer {
    view: MapView<ImageHandle>,
    event_sender: UserEventSender<MapViewEvent>,
    mouse_position: Vec2,
    primary_held: bool,
}

impl MapViewer {
    pub fn new(config: ViewConfig, event_sender: UserEventSender<MapViewEvent>) -> MapViewer {
        MapViewer {
            view: MapView::new(config),
            event_sender,
            mouse_position: Vec2::new(0.0, 0.0),
            primary_held: false,
        }
    }

    fn start_ticker(&self) {
        let sender = self.event_sender.clone();
        let interval = self.view.config().tick_interval;

        thread::spawn(move || loop {
            thread::sleep(interval);
            // The event loop is gone once sending fails
            if sender.send_event(MapViewEvent::Tick).is_err() {
                break;
            }
        });

        info!("Ticking every {:?}", interval);
    }
}

fn key_from_code(code: VirtualKeyCode) -> Key {
    match code {
        VirtualKeyCode::Escape => Key::Escape,
        VirtualKeyCode::R => Key::Reset,
        _ => Key::Other,
    }
}

fn vertical_scroll(distance: &MouseScrollDistance) -> f64 {
    match distance {
        MouseScrollDistance::Lines { y, .. } => *y,
        MouseScrollDistance::Pixels { y, .. } => *y,
        MouseScrollDistance::Pages { y, .. } => *y,
    }
}

impl WindowHandler<MapViewEvent> for MapViewer {
    fn on_start(&mut self, _helper: &mut WindowHelper<MapViewEvent>, info: WindowStartupInfo) {
        let size = info.viewport_size_pixels();
        self.view.on_resize(size.x, size.y);
        self.start_ticker();
    }

    fn on_user_event(&mut self, helper: &mut WindowHelper<MapViewEvent>, event: MapViewEvent) {
        match event {
            MapViewEvent::Tick => {
                self.view.on_tick();
                helper.request_redraw();
            }
        }
    }

    fn on_resize(&mut self, helper: &mut WindowHelper<MapViewEvent>, size_pixels: UVec2) {
        self.view.on_resize(size_pixels.x, size_pixels.y);
        helper.request_redraw();
    }

    fn on_draw(&mut self, helper: &mut WindowHelper<MapViewEvent>, graphics: &mut Graphics2D) {
        let mut canvas = GraphicsCanvas { graphics };

        if !self.view.is_initialized() {
            if let Err(e) = self.view.initialize(&mut canvas) {
                error!("Failed to initialize map view: {}", e);
                helper.terminate_loop();
                return;
            }
        }

        self.view.render(&mut canvas);
    }

    // Input never requests a redraw, the pulse advances once per tick
    fn on_mouse_move(&mut self, _helper: &mut WindowHelper<MapViewEvent>, position: Vec2) {
        self.mouse_position = position;
        self.view
            .on_pointer_move(position.x as f64, position.y as f64, self.primary_held);
    }

    fn on_mouse_button_down(&mut self, _helper: &mut WindowHelper<MapViewEvent>, button: MouseButton) {
        if matches!(button, MouseButton::Left) {
            self.primary_held = true;
        }
        self.view
            .on_pointer_down(self.mouse_position.x as f64, self.mouse_position.y as f64);
    }

    fn on_mouse_button_up(&mut self, _helper: &mut WindowHelper<MapViewEvent>, button: MouseButton) {
        if matches!(button, MouseButton::Left) {
            self.primary_held = false;
        }
        self.view.on_pointer_up();
    }

    fn on_mouse_wheel_scroll(&mut self, _helper: &mut WindowHelper<MapViewEvent>, distance: MouseScrollDistance) {
        self.view
            .on_wheel(WheelDirection::from_delta(vertical_scroll(&distance)));
    }

    fn on_key_down(
        &mut self,
        helper: &mut WindowHelper<MapViewEvent>,
        virtual_key_code: Option<VirtualKeyCode>,
        _scancode: KeyScancode,
    ) {
        if let Some(code) = virtual_key_code {
            if self.view.on_key_down(key_from_code(code)) == KeyAction::Close {
                debug!("Escape pressed, closing");
                helper.terminate_loop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_control_keys() {
        assert_eq!(key_from_code(VirtualKeyCode::Escape), Key::Escape);
        assert_eq!(key_from_code(VirtualKeyCode::R), Key::Reset);
        assert_eq!(key_from_code(VirtualKeyCode::O), Key::Other);
    }

    #[test]
    fn scroll_direction_follows_vertical_axis() {
        let up = MouseScrollDistance::Lines { x: 0.0, y: 1.0, z: 0.0 };
        let down = MouseScrollDistance::Pixels { x: 3.0, y: -12.0, z: 0.0 };
        let sideways = MouseScrollDistance::Pages { x: 1.0, y: 0.0, z: 0.0 };

        assert_eq!(WheelDirection::from_delta(vertical_scroll(&up)), WheelDirection::Positive);
        assert_eq!(WheelDirection::from_delta(vertical_scroll(&down)), WheelDirection::Negative);
        assert_eq!(WheelDirection::from_delta(vertical_scroll(&sideways)), WheelDirection::None);
    }
}
