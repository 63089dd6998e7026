use chrono::{DateTime, Utc};

use crate::id::{IdGenerator, UuidIdGen};
use crate::normalize::normalize;
use crate::types::{FeedUpdate, MessageBlock, Segment};

/// What one call into the live feed produced.
///
/// `closed` carries the previous speaker's finalized block, when the call
/// ended a turn. `updates` are renderer deltas in emission order.
#[derive(Debug, Default)]
pub struct LiveOutcome {
    pub closed: Option<MessageBlock>,
    pub updates: Vec<FeedUpdate>,
}

/// Per-session live transcription buffer.
///
/// Tracks one "current" speaker at a time. Fragments are appended raw and
/// emitted incrementally — only the not-yet-shown suffix, so nothing is
/// ever re-emitted. [`LiveFeed::flush`] re-normalizes the full accumulation
/// and reconciles the displayed text, and is called both on speaker change
/// and from an external periodic timer; both paths share the same
/// semantics and both are no-ops when nothing is buffered.
///
/// The buffer is the source of truth; a renderer consuming [`FeedUpdate`]s
/// is a pure projection of it and is never read back.
pub struct LiveFeed<G = UuidIdGen> {
    ids: G,
    current: Option<LiveBlock>,
}

struct LiveBlock {
    id: String,
    speaker: String,
    started_at: DateTime<Utc>,
    /// Everything received for this speaker turn, with separator spacing.
    raw: String,
    /// Byte length of the prefix of `raw` already pushed to the view.
    displayed_len: usize,
}

impl LiveBlock {
    fn snapshot(&self) -> MessageBlock {
        MessageBlock {
            id: self.id.clone(),
            speaker: self.speaker.clone(),
            started_at: self.started_at,
            text: self.raw.clone(),
        }
    }
}

impl LiveFeed<UuidIdGen> {
    pub fn new() -> Self {
        Self::with_ids(UuidIdGen)
    }
}

impl Default for LiveFeed<UuidIdGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> LiveFeed<G> {
    pub fn with_ids(ids: G) -> Self {
        Self { ids, current: None }
    }

    /// Speaker currently being tracked, if any.
    pub fn speaker(&self) -> Option<&str> {
        self.current.as_ref().map(|b| b.speaker.as_str())
    }

    /// The in-progress block with its currently displayed text.
    pub fn snapshot(&self) -> Option<MessageBlock> {
        self.current.as_ref().map(LiveBlock::snapshot)
    }

    /// Feed one live segment.
    ///
    /// A speaker change flushes and closes the open buffer, then opens a
    /// fresh block for the new speaker. The fragment itself is appended raw
    /// and the unshown suffix is emitted immediately.
    pub fn push(&mut self, segment: &Segment) -> LiveOutcome {
        let mut outcome = LiveOutcome::default();

        let continues = self
            .current
            .as_ref()
            .is_some_and(|b| b.speaker == segment.speaker);

        if !continues {
            if let Some(update) = self.flush() {
                outcome.updates.push(update);
            }
            if let Some(block) = self.current.take() {
                outcome.closed = Some(block.snapshot());
            }

            let id = self.ids.next_id();
            outcome.updates.push(FeedUpdate::BlockOpened {
                block_id: id.clone(),
                speaker: segment.speaker.clone(),
                started_at: segment.timestamp,
            });
            self.current = Some(LiveBlock {
                id,
                speaker: segment.speaker.clone(),
                started_at: segment.timestamp,
                raw: String::new(),
                displayed_len: 0,
            });
        }

        let Some(block) = self.current.as_mut() else {
            return outcome;
        };

        if !block.raw.is_empty() && !block.raw.ends_with(char::is_whitespace) {
            block.raw.push(' ');
        }
        block.raw.push_str(&segment.text);

        let delta = &block.raw[block.displayed_len..];
        if !delta.is_empty() {
            outcome.updates.push(FeedUpdate::TextAppended {
                block_id: block.id.clone(),
                text: delta.to_string(),
            });
            block.displayed_len = block.raw.len();
        }

        outcome
    }

    /// Re-normalize the open buffer and reconcile the displayed text.
    ///
    /// Emits a replacement only when the normalized form differs from what
    /// is currently displayed, so repeated flushes with no arrivals in
    /// between are visible no-ops. Safe to call with no open buffer.
    pub fn flush(&mut self) -> Option<FeedUpdate> {
        let block = self.current.as_mut()?;
        if block.raw.is_empty() {
            return None;
        }

        let cleaned = normalize(&block.raw);
        if cleaned == block.raw[..block.displayed_len] {
            return None;
        }

        block.raw = cleaned.clone();
        block.displayed_len = block.raw.len();
        Some(FeedUpdate::TextReplaced {
            block_id: block.id.clone(),
            text: cleaned,
        })
    }

    /// Session teardown: flush and close the open block.
    pub fn finish(&mut self) -> LiveOutcome {
        let mut outcome = LiveOutcome::default();
        if let Some(update) = self.flush() {
            outcome.updates.push(update);
        }
        if let Some(block) = self.current.take() {
            outcome.closed = Some(block.snapshot());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGen;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn seg(speaker: &str, text: &str, offset_ms: i64) -> Segment {
        Segment {
            speaker: speaker.to_string(),
            text: text.to_string(),
            timestamp: t0() + Duration::milliseconds(offset_ms),
        }
    }

    fn feed() -> LiveFeed<SequentialIdGen> {
        LiveFeed::with_ids(SequentialIdGen::new())
    }

    fn appended(updates: &[FeedUpdate]) -> Vec<&str> {
        updates
            .iter()
            .filter_map(|u| match u {
                FeedUpdate::TextAppended { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_segment_opens_block_and_appends() {
        let mut feed = feed();
        let outcome = feed.push(&seg("A", "foo ", 0));

        assert!(outcome.closed.is_none());
        assert_eq!(outcome.updates.len(), 2);
        assert!(matches!(
            &outcome.updates[0],
            FeedUpdate::BlockOpened { speaker, .. } if speaker == "A"
        ));
        assert_eq!(appended(&outcome.updates), ["foo "]);
        assert_eq!(feed.speaker(), Some("A"));
    }

    #[test]
    fn incremental_emissions_never_repeat_shown_text() {
        let mut feed = feed();
        let first = feed.push(&seg("A", "foo ", 0));
        let second = feed.push(&seg("A", "bar", 100));

        assert_eq!(appended(&first.updates), ["foo "]);
        assert_eq!(appended(&second.updates), ["bar"]);
        assert!(second.closed.is_none());
        assert_eq!(feed.snapshot().unwrap().text, "foo bar");
    }

    #[test]
    fn separator_inserted_between_unspaced_fragments() {
        let mut feed = feed();
        feed.push(&seg("A", "foo", 0));
        let outcome = feed.push(&seg("A", "bar", 100));

        assert_eq!(appended(&outcome.updates), [" bar"]);
        assert_eq!(feed.snapshot().unwrap().text, "foo bar");
    }

    #[test]
    fn speaker_change_flushes_and_closes_previous_block() {
        let mut feed = feed();
        feed.push(&seg("A", "foo ", 0));
        feed.push(&seg("A", "bar", 100));

        let outcome = feed.push(&seg("B", "baz", 200));

        // Flush of A's buffer precedes B's open.
        assert!(matches!(
            &outcome.updates[0],
            FeedUpdate::TextReplaced { block_id, text } if block_id == "0" && text == "Foo bar"
        ));
        assert!(matches!(
            &outcome.updates[1],
            FeedUpdate::BlockOpened { block_id, speaker, .. } if block_id == "1" && speaker == "B"
        ));
        assert_eq!(appended(&outcome.updates), ["baz"]);

        let closed = outcome.closed.unwrap();
        assert_eq!(closed.speaker, "A");
        assert_eq!(closed.text, "Foo bar");
        assert_eq!(feed.speaker(), Some("B"));
    }

    #[test]
    fn flush_reconciles_display_once() {
        let mut feed = feed();
        feed.push(&seg("A", "hello   there", 0));

        let first = feed.flush();
        assert!(matches!(
            first,
            Some(FeedUpdate::TextReplaced { text, .. }) if text == "Hello there"
        ));

        // No arrivals since: already reconciled.
        assert!(feed.flush().is_none());
        assert_eq!(feed.snapshot().unwrap().text, "Hello there");
    }

    #[test]
    fn flush_with_no_buffer_is_noop() {
        let mut feed = feed();
        assert!(feed.flush().is_none());
    }

    #[test]
    fn flush_after_flush_and_new_arrival_reconciles_again() {
        let mut feed = feed();
        feed.push(&seg("A", "one.", 0));
        feed.flush();
        feed.push(&seg("A", "two.", 100));

        let update = feed.flush();
        assert!(matches!(
            update,
            Some(FeedUpdate::TextReplaced { text, .. }) if text == "One. Two."
        ));
    }

    #[test]
    fn finish_flushes_and_closes() {
        let mut feed = feed();
        feed.push(&seg("A", "so long", 0));

        let outcome = feed.finish();
        assert_eq!(outcome.closed.unwrap().text, "So long");
        assert!(feed.speaker().is_none());
        assert!(feed.snapshot().is_none());

        // Finishing an idle feed does nothing.
        let idle = feed.finish();
        assert!(idle.closed.is_none());
        assert!(idle.updates.is_empty());
    }

    #[test]
    fn empty_fragment_produces_no_append() {
        let mut feed = feed();
        let outcome = feed.push(&seg("A", "", 0));
        assert_eq!(outcome.updates.len(), 1); // just the open
        assert!(appended(&outcome.updates).is_empty());
    }

    #[test]
    fn empty_speaker_is_its_own_identity() {
        let mut feed = feed();
        feed.push(&seg("", "anonymous", 0));
        let outcome = feed.push(&seg("A", "named", 100));
        assert_eq!(outcome.closed.unwrap().speaker, "");
        assert_eq!(feed.speaker(), Some("A"));
    }
}
