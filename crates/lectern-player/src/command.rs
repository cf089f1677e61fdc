//! UI effects emitted by the runtime state machines.

/// One observable effect of a state transition.
///
/// The commands returned by a transition form an atomic batch: the shell
/// applies all of them before processing the next input.
#[derive(Clone, Debug, PartialEq)]
pub enum UiCommand {
    /// Hide the slide at this index.
    HideSlide(usize),
    /// Show the slide at this index.
    ShowSlide(usize),
    /// Enable or disable the previous-slide button.
    SetPrevEnabled(bool),
    /// Enable or disable the next-slide button.
    SetNextEnabled(bool),
    /// Enable or disable the play button.
    SetPlayEnabled(bool),
    /// Replace the `i/N` counter text.
    SetCounter(String),
    /// Scale the slide's content to its viewport.
    Rescale { slide: usize, scale: f64 },
    /// Show the manual catch-up indicator.
    ShowStamp,
    /// Hide the manual catch-up indicator.
    HideStamp,
    /// Seek the lecture media to this position (a self-inflicted seek).
    Seek(f64),
    /// Pause lecture playback.
    Pause,
}
