use unicode_width::UnicodeWidthStr;

use crate::core::constants::{BASELINE_INPUT_HEIGHT, INPUT_CONTENT_PADDING};

/// Measures the natural height of draft content for the attached UI layer.
///
/// The composer never assumes how the UI renders text; a DOM-backed layer can
/// read scroll heights, a terminal layer can count rows. The measurement must
/// depend only on the text, so repeated calls with unchanged content return
/// the same value.
pub trait ContentMeasure {
    /// Natural content height in logical pixels, without padding.
    fn content_height(&self, text: &str) -> u16;
}

/// Default measure: wrapped display lines times a fixed line height.
///
/// Lines wrap at `width` display columns, with wide (CJK, emoji) characters
/// counted at their terminal cell width.
#[derive(Debug, Clone, Copy)]
pub struct WrappedLineMeasure {
    pub width: u16,
    pub line_height: u16,
}

impl ContentMeasure for WrappedLineMeasure {
    fn content_height(&self, text: &str) -> u16 {
        let width = self.width.max(1) as usize;
        let mut rows: u16 = 0;
        for line in text.split('\n') {
            let cols = UnicodeWidthStr::width(line);
            let wrapped = cols.div_ceil(width).max(1);
            rows = rows.saturating_add(wrapped as u16);
        }
        rows.saturating_mul(self.line_height)
    }
}

/// Keeps the composer's visible height synced to its content.
///
/// `adjust_height` re-measures from scratch on every call rather than
/// adjusting incrementally, so stale heights cannot accumulate across edits.
#[derive(Debug, Clone, Copy)]
pub struct InputSizing {
    height: u16,
}

impl InputSizing {
    pub fn new() -> Self {
        Self {
            height: BASELINE_INPUT_HEIGHT,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Sync height to content: measured content height plus fixed padding.
    /// Call after initialization and after every content change.
    pub fn adjust_height(&mut self, text: &str, measure: &dyn ContentMeasure) {
        self.height = measure
            .content_height(text)
            .saturating_add(INPUT_CONTENT_PADDING);
    }

    /// Collapse back to the baseline height, used after submission.
    pub fn reset_height(&mut self) {
        self.height = BASELINE_INPUT_HEIGHT;
    }
}

impl Default for InputSizing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEASURE: WrappedLineMeasure = WrappedLineMeasure {
        width: 10,
        line_height: 16,
    };

    #[test]
    fn starts_at_baseline() {
        assert_eq!(InputSizing::new().height(), BASELINE_INPUT_HEIGHT);
    }

    #[test]
    fn adjust_height_tracks_content_plus_padding() {
        let mut sizing = InputSizing::new();
        sizing.adjust_height("hello", &MEASURE);
        assert_eq!(sizing.height(), 16 + INPUT_CONTENT_PADDING);

        sizing.adjust_height("hello\nworld", &MEASURE);
        assert_eq!(sizing.height(), 32 + INPUT_CONTENT_PADDING);
    }

    #[test]
    fn adjust_height_is_idempotent() {
        let mut sizing = InputSizing::new();
        let text = "a line that wraps across several rows when narrow";
        sizing.adjust_height(text, &MEASURE);
        let first = sizing.height();
        sizing.adjust_height(text, &MEASURE);
        assert_eq!(sizing.height(), first);
    }

    #[test]
    fn reset_height_returns_to_baseline() {
        let mut sizing = InputSizing::new();
        sizing.adjust_height("hello\nworld\nagain", &MEASURE);
        assert_ne!(sizing.height(), BASELINE_INPUT_HEIGHT);
        sizing.reset_height();
        assert_eq!(sizing.height(), BASELINE_INPUT_HEIGHT);
    }

    #[test]
    fn empty_content_still_occupies_one_row() {
        assert_eq!(MEASURE.content_height(""), 16);
        assert_eq!(MEASURE.content_height("\n"), 32);
    }

    #[test]
    fn long_lines_wrap_and_wide_chars_count_double() {
        // 25 columns at width 10 -> 3 rows.
        assert_eq!(MEASURE.content_height(&"x".repeat(25)), 48);
        // 6 CJK chars are 12 columns -> 2 rows.
        assert_eq!(MEASURE.content_height("漢字漢字漢字"), 32);
    }
}
