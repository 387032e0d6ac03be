//! Formatting utilities for terminal output

use crate::core::{Hint, Score};
use indicatif::{ProgressBar, ProgressStyle};

/// Format a score as colored squares, one per slot
#[must_use]
pub fn hint_tiles(score: Score, num_slots: usize) -> String {
    score
        .hints(num_slots)
        .into_iter()
        .map(|hint| match hint {
            Hint::Correct => '🟩',
            Hint::Present => '🟪',
            Hint::Absent => '⬛',
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Terminal progress bar for long-running loops over `len` items
#[must_use]
pub fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_follow_slot_order() {
        let score = Score::from_hint_string("?---?-").unwrap();
        assert_eq!(hint_tiles(score, 6), "🟪⬛⬛⬛🟪⬛");
    }

    #[test]
    fn tiles_all_correct() {
        assert_eq!(hint_tiles(Score::all_correct(5), 5), "🟩🟩🟩🟩🟩");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn terminal_progress_bar_length() {
        let pb = progress_bar(42);
        assert_eq!(pb.length(), Some(42));
    }
}
