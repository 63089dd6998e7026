//! Session layer for the transcription dashboard.
//!
//! One [`DashboardSession`] per timeline being watched. Push-channel
//! segments, periodic flush ticks and fetch completions are all expressed
//! as [`SessionEvent`]s and consumed by a single dispatcher, so feed and
//! view state are only ever mutated from one place. Fetches carry a
//! per-region generation; completions that lost a navigation race are
//! dropped instead of overwriting a newer view.

pub mod events;
pub mod fetch;
pub mod runtime;
pub mod session;

pub use events::{
    DashboardData, DashboardView, SessionEvent, SummariesView, SummarySegmentsView,
    TranscriptsView,
};
pub use runtime::{DashboardRuntime, Region};
pub use session::{DashboardSession, FLUSH_INTERVAL};
