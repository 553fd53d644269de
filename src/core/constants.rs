//! Shared constants used across the composer

/// Collapsed input height in logical pixels, applied after submission and at
/// startup before any content measurement.
pub const BASELINE_INPUT_HEIGHT: u16 = 98;

/// Fixed padding added on top of the measured content height.
pub const INPUT_CONTENT_PADDING: u16 = 2;

/// Viewports wider than this refocus the input after submission. Narrow
/// viewports skip the refocus so an on-screen keyboard does not pop up.
pub const MOBILE_BREAKPOINT: u16 = 768;

/// Fixed key of the single durable draft slot.
pub const DRAFT_SLOT_KEY: &str = "input";
