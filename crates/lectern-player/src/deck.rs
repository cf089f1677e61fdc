//! Slide state machine.

use crate::command::UiCommand;

/// Logical slide width in pixels; content is authored against this size.
pub const SLIDE_WIDTH: f64 = 704.0;
/// Logical slide height in pixels.
pub const SLIDE_HEIGHT: f64 = 396.0;
/// Tolerance for timestamp and scale comparisons.
pub const EPSILON: f64 = 1e-6;

/// Measured size of the slide display area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Tracks the active slide and drives navigation state.
///
/// Slide timestamps are immutable once loaded; the measured widths live in
/// a separate cache keyed by slide index, so rescale decisions are a pure
/// function of (previous width, current measurement).
#[derive(Debug)]
pub struct SlideDeck {
    /// Authored appear-timestamps, one per slide; `None` when absent.
    times: Vec<Option<f64>>,
    /// Last measured width per slide.
    widths: Vec<Option<f64>>,
    index: usize,
    has_lecture: bool,
}

impl SlideDeck {
    pub fn new(slide_count: usize, has_lecture: bool) -> Self {
        Self {
            times: vec![None; slide_count],
            widths: vec![None; slide_count],
            index: 0,
            has_lecture,
        }
    }

    /// Load authored timestamps; entries beyond the slide count are
    /// ignored and missing ones stay undefined.
    pub fn set_times(&mut self, stamps: &[f64]) {
        for (slot, stamp) in self.times.iter_mut().zip(stamps) {
            *slot = if stamp.is_nan() { None } else { Some(*stamp) };
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn has_lecture(&self) -> bool {
        self.has_lecture
    }

    /// Timestamp of the given slide.
    pub fn time(&self, index: usize) -> Option<f64> {
        self.times.get(index).copied().flatten()
    }

    /// Nearest defined timestamp at or before `index`, or zero.
    pub(crate) fn baseline_for(&self, index: usize) -> f64 {
        (0..=index)
            .rev()
            .find_map(|i| self.time(i))
            .unwrap_or(0.0)
    }

    /// Commands displaying the current slide (initial render).
    pub fn refresh(&self) -> Vec<UiCommand> {
        let mut commands = vec![UiCommand::ShowSlide(self.index)];
        self.push_chrome(&mut commands);
        commands
    }

    /// Advance to the next slide. Rejected at the last index.
    pub fn next(&mut self) -> Vec<UiCommand> {
        if self.index + 1 >= self.times.len() {
            return Vec::new();
        }
        self.transition_to(self.index + 1)
    }

    /// Go back one slide. Rejected at index zero.
    pub fn prev(&mut self) -> Vec<UiCommand> {
        if self.index == 0 {
            return Vec::new();
        }
        self.transition_to(self.index - 1)
    }

    /// Jump to an arbitrary slide (lecture sync, query parameter).
    pub fn jump_to(&mut self, index: usize) -> Vec<UiCommand> {
        if index >= self.times.len() {
            return Vec::new();
        }
        self.transition_to(index)
    }

    fn transition_to(&mut self, index: usize) -> Vec<UiCommand> {
        let mut commands = vec![
            UiCommand::HideSlide(self.index),
            UiCommand::ShowSlide(index),
        ];
        self.index = index;
        self.push_chrome(&mut commands);
        commands
    }

    /// Button enablement, catch-up indicator, and counter text.
    fn push_chrome(&self, commands: &mut Vec<UiCommand>) {
        if self.time(self.index).is_none() {
            if self.has_lecture {
                commands.push(UiCommand::ShowStamp);
                commands.push(UiCommand::Pause);
            }
            commands.push(UiCommand::SetPlayEnabled(false));
        } else {
            if self.has_lecture {
                commands.push(UiCommand::HideStamp);
            }
            commands.push(UiCommand::SetPlayEnabled(true));
        }
        commands.push(UiCommand::SetPrevEnabled(self.index > 0));
        commands.push(UiCommand::SetNextEnabled(self.index + 1 < self.times.len()));
        commands.push(UiCommand::SetCounter(format!(
            "{}/{}",
            self.index + 1,
            self.times.len()
        )));
    }

    /// Rescale the current slide if its measured width changed.
    ///
    /// Returns `None` when the width is unchanged or the resulting scale
    /// is negligible, so redundant layout work is skipped.
    pub fn rescale(&mut self, viewport: Viewport) -> Option<UiCommand> {
        let cached = self.widths.get(self.index).copied().flatten();
        if cached == Some(viewport.width) {
            return None;
        }
        if let Some(slot) = self.widths.get_mut(self.index) {
            *slot = Some(viewport.width);
        }
        let scale = (viewport.width / SLIDE_WIDTH).min(viewport.height / SLIDE_HEIGHT);
        (scale > EPSILON).then_some(UiCommand::Rescale {
            slide: self.index,
            scale,
        })
    }
}

/// Parse the raw timing strip into one stamp per entry.
///
/// Unparseable entries become NaN and degrade to manual advance.
pub fn parse_times(text: &str) -> Vec<f64> {
    text.split_whitespace()
        .map(|word| word.parse().unwrap_or(f64::NAN))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_with_times(stamps: &[f64]) -> SlideDeck {
        let mut deck = SlideDeck::new(stamps.len(), true);
        deck.set_times(stamps);
        deck
    }

    #[test]
    fn next_walks_forward_and_stops_at_end() {
        let mut deck = SlideDeck::new(3, false);
        assert!(!deck.next().is_empty());
        assert!(!deck.next().is_empty());
        assert_eq!(deck.index(), 2);
        assert!(deck.next().is_empty());
        assert_eq!(deck.index(), 2);
    }

    #[test]
    fn prev_is_rejected_at_zero() {
        let mut deck = SlideDeck::new(3, false);
        assert!(deck.prev().is_empty());
        assert_eq!(deck.index(), 0);
    }

    #[test]
    fn transition_hides_old_and_shows_new() {
        let mut deck = SlideDeck::new(3, false);
        let commands = deck.next();
        assert_eq!(commands[0], UiCommand::HideSlide(0));
        assert_eq!(commands[1], UiCommand::ShowSlide(1));
    }

    #[test]
    fn buttons_disable_at_boundaries() {
        let mut deck = SlideDeck::new(2, false);
        let commands = deck.refresh();
        assert!(commands.contains(&UiCommand::SetPrevEnabled(false)));
        assert!(commands.contains(&UiCommand::SetNextEnabled(true)));

        let commands = deck.next();
        assert!(commands.contains(&UiCommand::SetPrevEnabled(true)));
        assert!(commands.contains(&UiCommand::SetNextEnabled(false)));
    }

    #[test]
    fn counter_is_one_based() {
        let mut deck = SlideDeck::new(4, false);
        let commands = deck.next();
        assert!(commands.contains(&UiCommand::SetCounter("2/4".to_owned())));
    }

    #[test]
    fn undefined_timestamp_shows_stamp_and_pauses() {
        let deck = deck_with_times(&[f64::NAN, 2.0]);
        let commands = deck.refresh();
        assert!(commands.contains(&UiCommand::ShowStamp));
        assert!(commands.contains(&UiCommand::Pause));
        assert!(commands.contains(&UiCommand::SetPlayEnabled(false)));
    }

    #[test]
    fn defined_timestamp_enables_play() {
        let mut deck = deck_with_times(&[f64::NAN, 2.0]);
        let commands = deck.jump_to(1);
        assert!(commands.contains(&UiCommand::HideStamp));
        assert!(commands.contains(&UiCommand::SetPlayEnabled(true)));
    }

    #[test]
    fn set_times_ignores_extra_entries() {
        let mut deck = SlideDeck::new(2, true);
        deck.set_times(&[1.0, 2.0, 3.0]);
        assert_eq!(deck.time(0), Some(1.0));
        assert_eq!(deck.time(1), Some(2.0));
    }

    #[test]
    fn baseline_skips_undefined_stamps() {
        let deck = deck_with_times(&[1.0, f64::NAN, f64::NAN, 4.0]);
        assert_eq!(deck.baseline_for(2), 1.0);
        assert_eq!(deck.baseline_for(3), 4.0);
    }

    #[test]
    fn baseline_defaults_to_zero() {
        let deck = deck_with_times(&[f64::NAN, 2.0]);
        assert_eq!(deck.baseline_for(0), 0.0);
    }

    #[test]
    fn rescale_skips_unchanged_width() {
        let mut deck = SlideDeck::new(1, false);
        let viewport = Viewport {
            width: 1408.0,
            height: 900.0,
        };
        let first = deck.rescale(viewport);
        assert!(matches!(
            first,
            Some(UiCommand::Rescale { slide: 0, scale }) if (scale - 2.0).abs() < EPSILON
        ));
        assert!(deck.rescale(viewport).is_none());
    }

    #[test]
    fn rescale_uses_limiting_dimension() {
        let mut deck = SlideDeck::new(1, false);
        let command = deck.rescale(Viewport {
            width: 7040.0,
            height: 396.0,
        });
        assert!(matches!(
            command,
            Some(UiCommand::Rescale { scale, .. }) if (scale - 1.0).abs() < EPSILON
        ));
    }

    #[test]
    fn rescale_caches_per_slide() {
        let mut deck = SlideDeck::new(2, false);
        let viewport = Viewport {
            width: 704.0,
            height: 396.0,
        };
        assert!(deck.rescale(viewport).is_some());
        deck.next();
        // The second slide has its own cache entry.
        assert!(deck.rescale(viewport).is_some());
    }

    #[test]
    fn parse_times_handles_bad_entries() {
        let stamps = parse_times("1.5  3.25\nnope 7");
        assert_eq!(stamps.len(), 4);
        assert_eq!(stamps[0], 1.5);
        assert!(stamps[2].is_nan());
        assert_eq!(stamps[3], 7.0);
    }
}
