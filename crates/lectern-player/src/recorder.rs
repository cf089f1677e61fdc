//! Timeline recorder.
//!
//! Active only in authoring mode (no lecture media bound). Records the
//! dwell time of each slide advance into the current take, maintains the
//! cumulative per-slide timestamp list, and serializes the result as the
//! timeline export document.
//!
//! The recorder has no clock of its own: navigation handlers pass the
//! current time in seconds, so transitions stay pure and testable.

use serde::Serialize;

/// Records navigation timing across recording sessions.
#[derive(Debug)]
pub struct TimelineRecorder {
    slide_count: usize,
    /// Cumulative per-slide timestamps; `None` for advances made while not
    /// recording.
    times: Vec<Option<f64>>,
    /// Closed takes: per-advance dwell durations of one recording session.
    timeline: Vec<Vec<f64>>,
    /// Dwells of the in-progress take, when recording.
    take: Option<Vec<f64>>,
    /// Clock reading of the last navigation or recording start.
    mark: f64,
    /// Running cumulative baseline for new timestamps.
    baseline: f64,
}

/// Serialized form of the export document.
#[derive(Serialize)]
struct TimelineExport<'a> {
    times: &'a [Option<f64>],
    timeline: &'a [Vec<f64>],
}

impl TimelineRecorder {
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            times: Vec::new(),
            timeline: Vec::new(),
            take: None,
            mark: 0.0,
            baseline: 0.0,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.take.is_some()
    }

    /// Whether every slide has a cumulative timestamp.
    pub fn is_complete(&self) -> bool {
        self.times.len() == self.slide_count
    }

    /// Toggle recording. Starting opens a new empty take; stopping closes
    /// it into the timeline and attempts an export.
    pub fn toggle(&mut self, now: f64) -> Option<String> {
        match self.take.take() {
            Some(take) => {
                self.timeline.push(take);
                self.export()
            }
            None => {
                self.take = Some(Vec::new());
                self.mark = now;
                None
            }
        }
    }

    /// Forward navigation happened.
    ///
    /// While recording, the elapsed dwell extends the cumulative baseline
    /// and the current take. Otherwise an undefined placeholder is
    /// appended and the partial data is exported immediately (a no-op
    /// until the data is complete).
    pub fn forward(&mut self, now: f64) -> Option<String> {
        if self.times.len() >= self.slide_count {
            return None;
        }
        match &mut self.take {
            Some(take) => {
                let dwell = now - self.mark;
                self.baseline += dwell;
                self.times.push(Some(self.baseline));
                take.push(dwell);
                self.mark = now;
                None
            }
            None => {
                self.times.push(None);
                self.export()
            }
        }
    }

    /// Backward navigation happened.
    ///
    /// While recording, the just-elapsed dwell still goes into the take;
    /// the most recent cumulative timestamp is dropped and the baseline
    /// recomputed from the nearest remaining defined timestamp.
    pub fn backward(&mut self, now: f64) {
        if let Some(take) = &mut self.take {
            take.push(now - self.mark);
            self.mark = now;
        }
        if self.times.pop().is_some() {
            self.baseline = self
                .times
                .iter()
                .rev()
                .find_map(|stamp| *stamp)
                .unwrap_or(0.0);
        }
    }

    /// Serialize the export document.
    ///
    /// Only produces output once every slide has a timestamp entry and at
    /// least one take has been closed; a no-op otherwise.
    pub fn export(&self) -> Option<String> {
        if self.timeline.is_empty() || self.times.len() != self.slide_count {
            return None;
        }
        serde_json::to_string_pretty(&TimelineExport {
            times: &self.times,
            timeline: &self.timeline,
        })
        .ok()
    }
}
