//! Reading progress: scroll position → completion and time remaining.
//!
//! [`compute_progress`] is a pure function of three scalar scroll metrics and
//! a word count. It is cheap enough to run on every scroll event and returns
//! the same output for the same input.
//!
//! [`ProgressTracker`] is the view-side half: created when an article view
//! mounts, fed every scroll change, dropped on unmount. It keeps nothing but
//! the last computed value.

use serde::Serialize;

/// Default reading speed in words per minute.
pub const READING_RATE: u32 = 200;

/// Lower bound on the scrollable distance, so content shorter than the
/// viewport never divides by zero.
const MIN_SCROLLABLE: f64 = 1e-6;

/// Progress percentage above which the floating indicator is shown.
const INDICATOR_THRESHOLD: f64 = 5.0;

/// Viewport-relative scroll metrics, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_offset: f64,
    pub content_height: f64,
    pub viewport_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    /// Percentage in `0.0..=100.0`.
    pub progress: f64,
    /// Whole minutes left at the configured reading rate.
    pub estimated_time_left: u32,
    pub words_read: usize,
    pub total_words: usize,
}

impl ReadingProgress {
    /// State before any scroll event has been seen.
    pub fn start(total_words: usize, words_per_minute: u32) -> Self {
        Self {
            progress: 0.0,
            estimated_time_left: minutes_for(total_words, words_per_minute),
            words_read: 0,
            total_words,
        }
    }

    /// Label for the floating indicator.
    pub fn label(&self) -> String {
        if self.estimated_time_left > 0 {
            format!("{} min", self.estimated_time_left)
        } else {
            "Done!".to_string()
        }
    }

    pub fn show_indicator(&self) -> bool {
        self.progress > INDICATOR_THRESHOLD
    }
}

fn minutes_for(words: usize, words_per_minute: u32) -> u32 {
    if words == 0 || words_per_minute == 0 {
        return 0;
    }
    words.div_ceil(words_per_minute as usize) as u32
}

/// Map a scroll position to reading progress.
///
/// - `fraction = clamp(offset / max(content - viewport, ε), 0, 1)`
/// - `progress = fraction × 100`
/// - `words_read = ⌊total × fraction⌋`
/// - `estimated_time_left = ⌈(total − words_read) / rate⌉`, never negative
pub fn compute_progress(
    metrics: ScrollMetrics,
    total_words: usize,
    words_per_minute: u32,
) -> ReadingProgress {
    let scrollable = (metrics.content_height - metrics.viewport_height).max(MIN_SCROLLABLE);
    let raw = metrics.scroll_offset / scrollable;
    // NaN offsets count as the top of the page.
    let fraction = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };

    let words_read = ((total_words as f64) * fraction).floor() as usize;
    let words_left = total_words.saturating_sub(words_read);

    ReadingProgress {
        progress: fraction * 100.0,
        estimated_time_left: minutes_for(words_left, words_per_minute),
        words_read,
        total_words,
    }
}

/// Per-view progress subscription.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total_words: usize,
    words_per_minute: u32,
    current: ReadingProgress,
}

impl ProgressTracker {
    pub fn new(total_words: usize, words_per_minute: u32) -> Self {
        Self {
            total_words,
            words_per_minute,
            current: ReadingProgress::start(total_words, words_per_minute),
        }
    }

    /// Recompute from the latest scroll metrics.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> &ReadingProgress {
        self.current = compute_progress(metrics, self.total_words, self.words_per_minute);
        &self.current
    }

    pub fn current(&self) -> &ReadingProgress {
        &self.current
    }
}
