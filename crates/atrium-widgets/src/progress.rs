//! Progress bar — horizontal fill proportional to a percentage.

use atrium_core::scheme::Scheme;
use atrium_core::widget::{paint_background, Behavior, WidgetCommon};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::percent::percent_of;

/// Horizontal progress indicator, 0–100 percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressBar {
    percent: u8,
}

impl ProgressBar {
    /// An empty bar.
    #[must_use]
    pub const fn new() -> Self {
        Self { percent: 0 }
    }

    /// Current fill percentage.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        self.percent
    }

    /// Set the fill percentage; values above 100 clamp to 100.
    pub fn set_percent(&mut self, common: &mut WidgetCommon, percent: u8) {
        let percent = percent.min(100);
        if self.percent == percent {
            return;
        }
        self.percent = percent;
        common.mark_dirty();
    }
}

impl Behavior for ProgressBar {
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

        let fill_width = percent_of(frame.size.width, u32::from(self.percent));
        if fill_width > 0 {
            let color = if common.enabled {
                scheme.foreground
            } else {
                scheme.foreground_disabled
            };
            Rectangle::new(frame.top_left, Size::new(fill_width, frame.size.height))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)?;
        }
        Ok(())
    }
}
