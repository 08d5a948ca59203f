//! Bitmap — draws a raw RGB565 image at the widget origin.

use atrium_core::scheme::Scheme;
use atrium_core::widget::{paint_background, Behavior, WidgetCommon};
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Image widget backed by static pixel data.
///
/// With no image set, only the common background and border paint, so the
/// widget doubles as a placeholder while assets load.
#[derive(Debug, Clone, Default)]
pub struct Bitmap {
    image: Option<ImageRaw<'static, Rgb565>>,
}

impl Bitmap {
    /// An empty bitmap widget.
    #[must_use]
    pub const fn new() -> Self {
        Self { image: None }
    }

    /// A bitmap widget showing `image`.
    #[must_use]
    pub const fn with_image(image: ImageRaw<'static, Rgb565>) -> Self {
        Self { image: Some(image) }
    }

    /// `true` if an image is set.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Replace the image (or clear it with `None`) and mark for repaint.
    pub fn set_image(
        &mut self,
        common: &mut WidgetCommon,
        image: Option<ImageRaw<'static, Rgb565>>,
    ) {
        self.image = image;
        common.mark_dirty();
    }
}

impl Behavior for Bitmap {
    fn paint<D>(
        &self,
        common: &WidgetCommon,
        frame: Rectangle,
        scheme: &Scheme,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        paint_background(common, frame, scheme, target)?;
        if let Some(raw) = &self.image {
            // Clip so an oversized asset cannot spill outside the widget.
            Image::new(raw, frame.top_left).draw(&mut target.clipped(&frame))?;
        }
        Ok(())
    }
}
