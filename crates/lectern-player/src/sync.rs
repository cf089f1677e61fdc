//! Lecture sync protocol.
//!
//! Keeps the slide deck and the lecture video's playback position mutually
//! consistent. Seeks issued by the protocol itself are tracked with an
//! explicit state (`Idle -> AwaitingSelfSeek -> Idle`) so the resulting
//! position-change notification is recognized as self-inflicted and not
//! re-synced.
//!
//! Host contract: media notifications are delivered after the media
//! element settles (`on_seeked` once a seek completes, `on_time_update`
//! only while not seeking). Redundant notifications are harmless; a
//! position already in sync produces no commands.

use crate::command::UiCommand;
use crate::deck::{EPSILON, SlideDeck};

/// Whether a position-change notification is expected from our own seek.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SeekState {
    Idle,
    AwaitingSelfSeek,
}

/// Binds slide transitions to the lecture media position.
#[derive(Debug)]
pub struct LectureSync {
    seek: SeekState,
}

impl Default for LectureSync {
    fn default() -> Self {
        Self::new()
    }
}

impl LectureSync {
    pub fn new() -> Self {
        Self {
            seek: SeekState::Idle,
        }
    }

    /// Align the media with the current slide at page load.
    pub fn initial_seek(&mut self, deck: &SlideDeck) -> Vec<UiCommand> {
        vec![self.self_seek(deck.baseline_for(deck.index()))]
    }

    /// Manual forward navigation: advance the deck, then align the media
    /// with the new slide's timestamp when it has one.
    pub fn next(&mut self, deck: &mut SlideDeck) -> Vec<UiCommand> {
        let mut commands = deck.next();
        if commands.is_empty() {
            return commands;
        }
        if let Some(stamp) = deck.time(deck.index()) {
            commands.push(self.self_seek(stamp));
        }
        commands
    }

    /// Manual backward navigation: the media rewinds to the nearest
    /// defined timestamp at or before the new slide.
    pub fn prev(&mut self, deck: &mut SlideDeck) -> Vec<UiCommand> {
        let mut commands = deck.prev();
        if commands.is_empty() {
            return commands;
        }
        let baseline = deck.baseline_for(deck.index());
        commands.push(self.self_seek(baseline));
        commands
    }

    /// Playback progressed. Advances the deck when the position reaches
    /// the next slide's timestamp; an unstamped next slide never
    /// auto-advances.
    pub fn on_time_update(&mut self, deck: &mut SlideDeck, position: f64) -> Vec<UiCommand> {
        let next = deck.index() + 1;
        if next < deck.len() {
            if let Some(stamp) = deck.time(next) {
                if position > stamp - EPSILON {
                    return deck.jump_to(next);
                }
            }
        }
        Vec::new()
    }

    /// A seek finished. Self-inflicted seeks are swallowed; user seeks
    /// re-sync the deck to the slide owning the new position.
    pub fn on_seeked(&mut self, deck: &mut SlideDeck, position: f64) -> Vec<UiCommand> {
        if self.seek == SeekState::AwaitingSelfSeek {
            self.seek = SeekState::Idle;
            return Vec::new();
        }
        if deck.is_empty() {
            return Vec::new();
        }

        let boundary = (0..deck.len())
            .find(|&i| deck.time(i).is_some_and(|stamp| stamp > position + EPSILON));

        match boundary {
            Some(index) => deck.jump_to(index.saturating_sub(1)),
            None => {
                // Past every timestamp: last slide, paused.
                let mut commands = vec![UiCommand::Pause];
                commands.extend(deck.jump_to(deck.len() - 1));
                commands
            }
        }
    }

    /// Playback ran off the end: pause, rewind, wrap to the first slide.
    pub fn on_ended(&mut self, deck: &mut SlideDeck) -> Vec<UiCommand> {
        let mut commands = vec![UiCommand::Pause, self.self_seek(0.0)];
        commands.extend(deck.jump_to(0));
        commands
    }

    fn self_seek(&mut self, position: f64) -> UiCommand {
        self.seek = SeekState::AwaitingSelfSeek;
        UiCommand::Seek(position)
    }
}
