//! Text measurement for diagram labels.
//!
//! Labels are centered on their anchor, and line labels paint an opaque
//! rectangle behind their content, so both need to know how large a piece of
//! text will render. Measurement is backed by cosmic-text so the metrics
//! account for real font shaping (kerning, ligatures) rather than a
//! per-character estimate.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use crate::geometry::Size;

/// The display font family used by the reference scenes.
pub const FONT_FAMILY: &str = "JetBrains Mono";

/// Measures the rendered size of `content` at the given font size.
///
/// Returns [`Size::default`] for empty content. The underlying font system is
/// initialized once and reused across calls.
///
/// # Examples
///
/// ```
/// # use figura_core::text::measure;
/// let size = measure("Bézier", 18);
/// assert!(size.width() > 0.0);
/// assert!(size.height() > 0.0);
/// ```
pub fn measure(content: &str, font_size: u16) -> Size {
    MEASURER.get_or_init(TextMeasurer::new).measure(content, font_size)
}

/// Holds the reusable cosmic-text [`FontSystem`] behind a lock.
///
/// Creating a `FontSystem` scans installed fonts and is expensive, so a
/// single instance is shared process-wide.
struct TextMeasurer {
    font_system: Mutex<FontSystem>,
}

static MEASURER: OnceLock<TextMeasurer> = OnceLock::new();

impl TextMeasurer {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn measure(&self, content: &str, font_size: u16) -> Size {
        if content.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .expect("failed to lock FontSystem");

        // Points to pixels, roughly 1.33x at standard DPI.
        let font_size_px = font_size as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(FONT_FAMILY));

        // Unlimited buffer size so the text flows naturally.
        buffer.set_size(None, None);
        buffer.set_text(content, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            // Fallback estimate if the requested family is unavailable.
            max_width = content.chars().count() as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height;
        } else {
            for run in &layout_runs {
                if let Some(last) = run.glyphs.last() {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        Size::new(max_width, total_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        let size = measure("", 18);
        assert!(size.is_zero());
    }

    #[test]
    fn test_measure_nonempty_is_positive() {
        let size = measure("A", 18);
        assert!(size.width() > 0.0);
        assert!(size.height() > 0.0);
    }

    #[test]
    fn test_measure_longer_text_is_wider() {
        let short = measure("ab", 18);
        let long = measure("abcdefgh", 18);
        assert!(long.width() > short.width());
    }

    #[test]
    fn test_measure_larger_font_is_larger() {
        let small = measure("label", 10);
        let large = measure("label", 30);
        assert!(large.width() > small.width());
        assert!(large.height() > small.height());
    }
}
