//! # Live-Transcript Feed Core
//!
//! The transcript feed is a stream of `(speaker, text, timestamp)` segments;
//! this crate decides how those segments become visual message blocks.
//!
//! ## Two consumption modes
//!
//! **Batch** — historical pages arrive as ordered segment lists.
//! [`grouper::group`] folds them into [`MessageBlock`]s lazily: a block
//! closes when the speaker changes or the time gap exceeds
//! [`grouper::GAP_THRESHOLD_MS`].
//!
//! **Live** — segments arrive one at a time with no end in sight.
//! [`LiveFeed`] appends raw fragments immediately (low-latency path) and
//! tracks how much of the accumulation has been shown, so a periodic
//! [`LiveFeed::flush`] can swap in the normalized form without re-emitting
//! text the reader already saw.

pub mod grouper;
pub mod id;
pub mod live;
pub mod normalize;
pub mod types;
pub mod view;

pub use grouper::{GAP_THRESHOLD_MS, NormalizePolicy, group, group_with_ids, starts_new_block};
pub use id::{IdGenerator, SequentialIdGen, UuidIdGen};
pub use live::{LiveFeed, LiveOutcome};
pub use normalize::normalize;
pub use types::{FeedFrame, FeedUpdate, MessageBlock, Segment};
pub use view::FeedView;
