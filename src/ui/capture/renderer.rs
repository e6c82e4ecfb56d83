// SPDX-License-Identifier: MPL-2.0
//! Alignment surface renderer: the overlay image composited onto a dark
//! backdrop with the current opacity, scale, rotation and offset applied
//! around the image centre.

use super::pointer::PointerMap;
use super::Message;
use crate::gesture::OverlayTransform;
use iced::widget::canvas::{self, Frame};
use iced::widget::Action;
use iced::{mouse, Color, Point, Rectangle, Size, Theme, Vector};

const BACKDROP: Color = Color::from_rgb(0.07, 0.07, 0.08);

/// Canvas program for the alignment surface. Pointer events are translated
/// into gesture messages and published to the capture screen; everything the
/// surface consumes is captured so the runtime does not double-handle it.
pub struct AlignmentSurface<'a> {
    pub handle: &'a iced::widget::image::Handle,
    pub image_size: Size<u32>,
    pub transform: OverlayTransform,
}

impl<'a> AlignmentSurface<'a> {
    /// Display size for the untransformed image, shrunk to fit the surface
    /// while keeping aspect ratio. Images smaller than the surface render at
    /// their natural size.
    fn base_size(&self, bounds: Rectangle) -> Size {
        let width = self.image_size.width as f32;
        let height = self.image_size.height as f32;
        if width <= 0.0 || height <= 0.0 {
            return Size::ZERO;
        }
        let fit = (bounds.width / width)
            .min(bounds.height / height)
            .min(1.0);
        Size::new(width * fit, height * fit)
    }
}

impl canvas::Program<Message> for AlignmentSurface<'_> {
    type State = PointerMap;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        state
            .map(event, bounds)
            .map(|message| Action::publish(Message::Pointer(message)).and_capture())
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKDROP);

        let base = self.base_size(bounds);
        if base.width > 0.0 && base.height > 0.0 {
            let transform = &self.transform;
            frame.with_save(|frame| {
                frame.translate(Vector::new(
                    bounds.width / 2.0 + transform.offset_x,
                    bounds.height / 2.0 + transform.offset_y,
                ));
                frame.scale(transform.scale);
                frame.rotate(transform.rotation_deg.to_radians());

                let rect = Rectangle::new(
                    Point::new(-base.width / 2.0, -base.height / 2.0),
                    base,
                );
                frame.draw_image(
                    rect,
                    canvas::Image::new(self.handle.clone()).opacity(transform.opacity),
                );
            });
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::image::Handle;

    fn surface(width: u32, height: u32) -> (Handle, Size<u32>) {
        (
            Handle::from_rgba(width, height, vec![0; (width * height * 4) as usize]),
            Size::new(width, height),
        )
    }

    #[test]
    fn large_image_is_shrunk_to_fit() {
        let (handle, image_size) = surface(2000, 1000);
        let renderer = AlignmentSurface {
            handle: &handle,
            image_size,
            transform: OverlayTransform::default(),
        };
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(500.0, 500.0));

        let base = renderer.base_size(bounds);
        assert_eq!(base, Size::new(500.0, 250.0));
    }

    #[test]
    fn small_image_keeps_natural_size() {
        let (handle, image_size) = surface(100, 80);
        let renderer = AlignmentSurface {
            handle: &handle,
            image_size,
            transform: OverlayTransform::default(),
        };
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(500.0, 500.0));

        let base = renderer.base_size(bounds);
        assert_eq!(base, Size::new(100.0, 80.0));
    }
}
