//! Presentation runtime for compiled lectern pages.
//!
//! Pure, headless state machines driven by the page shell: the shell feeds
//! events in (navigation, media notifications, measured viewports, clock
//! readings) and applies the returned [`UiCommand`] batches to the DOM.
//! Every transition's commands form one atomic batch; the shell applies
//! them before handing over the next event.
//!
//! - [`SlideDeck`] tracks the active slide, button enablement, and content
//!   scaling.
//! - [`LectureSync`] keeps the deck and a lecture video's playback
//!   position mutually consistent, distinguishing its own seeks from
//!   user seeks.
//! - [`TimelineRecorder`] captures navigation timing in authoring mode and
//!   serializes it as the timeline export document.
//! - [`Stepper`] is the bounded frame navigator used by animation
//!   containers.

mod command;
mod deck;
mod query;
mod recorder;
mod stepper;
mod sync;

pub use command::UiCommand;
pub use deck::{EPSILON, SLIDE_HEIGHT, SLIDE_WIDTH, SlideDeck, Viewport, parse_times};
pub use query::initial_slide;
pub use recorder::TimelineRecorder;
pub use stepper::{Stepper, StepperView};
pub use sync::LectureSync;
