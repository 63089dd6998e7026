use crate::id::{IdGenerator, UuidIdGen};
use crate::live::LiveFeed;
use crate::types::{FeedFrame, FeedUpdate, MessageBlock, Segment};

/// Stateful driver for the live tab: feeds segments, retains closed blocks
/// and exposes a complete [`FeedFrame`] snapshot on demand.
///
/// Use this when the renderer wants to read full current state (initial
/// paint, tests). Renderers that apply deltas as they stream can consume
/// the [`FeedUpdate`]s returned by [`FeedView::push`] directly.
pub struct FeedView<G = UuidIdGen> {
    live: LiveFeed<G>,
    blocks: Vec<MessageBlock>,
}

impl FeedView<UuidIdGen> {
    pub fn new() -> Self {
        Self::with_ids(UuidIdGen)
    }
}

impl Default for FeedView<UuidIdGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> FeedView<G> {
    pub fn with_ids(ids: G) -> Self {
        Self {
            live: LiveFeed::with_ids(ids),
            blocks: Vec::new(),
        }
    }

    /// Feed one live segment; returns renderer deltas in emission order.
    pub fn push(&mut self, segment: &Segment) -> Vec<FeedUpdate> {
        let outcome = self.live.push(segment);
        if let Some(block) = outcome.closed {
            self.blocks.push(block);
        }
        outcome.updates
    }

    /// Periodic buffer reconciliation; see [`LiveFeed::flush`].
    pub fn flush(&mut self) -> Option<FeedUpdate> {
        self.live.flush()
    }

    /// Session teardown: finalize the open block into the closed list.
    pub fn finish(&mut self) -> Vec<FeedUpdate> {
        let outcome = self.live.finish();
        if let Some(block) = outcome.closed {
            self.blocks.push(block);
        }
        outcome.updates
    }

    /// Complete snapshot for rendering the live tab.
    pub fn frame(&self) -> FeedFrame {
        FeedFrame {
            blocks: self.blocks.clone(),
            live: self.live.snapshot(),
        }
    }
}
