use crate::id::{IdGenerator, UuidIdGen};
use crate::normalize::normalize;
use crate::types::{MessageBlock, Segment};

/// Maximum gap between two segments for them to share a block.
pub const GAP_THRESHOLD_MS: i64 = 60_000;

/// Grouping predicate shared by the batch and live paths.
///
/// A segment starts a new block when there is no block in progress, the
/// speaker changes, or the gap since the previous segment strictly exceeds
/// [`GAP_THRESHOLD_MS`].
pub fn starts_new_block(prev: Option<&Segment>, next: &Segment) -> bool {
    match prev {
        None => true,
        Some(prev) => {
            next.speaker != prev.speaker
                || (next.timestamp - prev.timestamp).num_milliseconds() > GAP_THRESHOLD_MS
        }
    }
}

/// When fragment text gets cleaned up.
///
/// The two historical rendering paths in the original dashboard disagreed:
/// one cleaned every fragment as it was appended, the other concatenated raw
/// fragments and cleaned once when the block closed. Intent is ambiguous, so
/// both behaviors are kept and the caller picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizePolicy {
    /// Normalize each fragment as it is appended.
    #[default]
    PerAppend,
    /// Concatenate raw fragments; normalize the block once on close.
    OnClose,
}

/// Fold an ordered segment sequence into message blocks, lazily.
///
/// Idempotent and restartable: re-running over the same input yields
/// identical blocks (module ids — use [`group_with_ids`] with a
/// [`crate::id::SequentialIdGen`] when ids must be stable too).
pub fn group<I>(segments: I, policy: NormalizePolicy) -> Blocks<I::IntoIter, UuidIdGen>
where
    I: IntoIterator<Item = Segment>,
{
    group_with_ids(segments, policy, UuidIdGen)
}

pub fn group_with_ids<I, G>(segments: I, policy: NormalizePolicy, ids: G) -> Blocks<I::IntoIter, G>
where
    I: IntoIterator<Item = Segment>,
    G: IdGenerator,
{
    Blocks {
        segments: segments.into_iter(),
        ids,
        policy,
        current: None,
    }
}

/// Lazy block iterator over an ordered segment sequence. See [`group`].
pub struct Blocks<I, G> {
    segments: I,
    ids: G,
    policy: NormalizePolicy,
    current: Option<Run>,
}

/// Block in progress plus the last segment appended to it — the predicate
/// compares against the last segment, not the block start.
struct Run {
    block: MessageBlock,
    last: Segment,
}

impl<I, G> Iterator for Blocks<I, G>
where
    I: Iterator<Item = Segment>,
    G: IdGenerator,
{
    type Item = MessageBlock;

    fn next(&mut self) -> Option<MessageBlock> {
        loop {
            let Some(segment) = self.segments.next() else {
                return self.current.take().map(|run| close(run, self.policy));
            };

            if starts_new_block(self.current.as_ref().map(|run| &run.last), &segment) {
                let closed = self.current.take().map(|run| close(run, self.policy));
                self.current = Some(open(segment, self.policy, &mut self.ids));
                if closed.is_some() {
                    return closed;
                }
            } else if let Some(run) = self.current.as_mut() {
                append(run, segment, self.policy);
            }
        }
    }
}

fn open<G: IdGenerator>(segment: Segment, policy: NormalizePolicy, ids: &mut G) -> Run {
    let text = match policy {
        NormalizePolicy::PerAppend => normalize(&segment.text),
        NormalizePolicy::OnClose => segment.text.clone(),
    };
    let block = MessageBlock {
        id: ids.next_id(),
        speaker: segment.speaker.clone(),
        started_at: segment.timestamp,
        text,
    };
    Run {
        block,
        last: segment,
    }
}

fn append(run: &mut Run, segment: Segment, policy: NormalizePolicy) {
    let fragment = match policy {
        NormalizePolicy::PerAppend => normalize(&segment.text),
        NormalizePolicy::OnClose => segment.text.trim().to_string(),
    };
    if !fragment.is_empty() {
        if !run.block.text.is_empty() && !run.block.text.ends_with(' ') {
            run.block.text.push(' ');
        }
        run.block.text.push_str(&fragment);
    }
    run.last = segment;
}

fn close(run: Run, policy: NormalizePolicy) -> MessageBlock {
    let mut block = run.block;
    if policy == NormalizePolicy::OnClose {
        block.text = normalize(&block.text);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGen;
    use chrono::{DateTime, Duration, Utc};

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

    fn blocks(segments: Vec<Segment>, policy: NormalizePolicy) -> Vec<MessageBlock> {
        group_with_ids(segments, policy, SequentialIdGen::new()).collect()
    }

    #[test]
    fn predicate_starts_on_missing_prev() {
        assert!(starts_new_block(None, &seg("A", "x", 0)));
    }

    #[test]
    fn predicate_starts_on_speaker_change() {
        let prev = seg("A", "x", 0);
        assert!(starts_new_block(Some(&prev), &seg("B", "y", 100)));
        assert!(!starts_new_block(Some(&prev), &seg("A", "y", 100)));
    }

    #[test]
    fn predicate_gap_is_strictly_greater_than_threshold() {
        let prev = seg("A", "x", 0);
        assert!(!starts_new_block(Some(&prev), &seg("A", "y", 60_000)));
        assert!(starts_new_block(Some(&prev), &seg("A", "y", 60_001)));
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(blocks(vec![], NormalizePolicy::OnClose).is_empty());
    }

    #[test]
    fn single_segment_yields_one_block() {
        let out = blocks(vec![seg("A", "hello", 0)], NormalizePolicy::OnClose);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].speaker, "A");
        assert_eq!(out[0].text, "Hello");
        assert_eq!(out[0].started_at, t0());
    }

    #[test]
    fn same_speaker_within_threshold_merges() {
        let out = blocks(
            vec![
                seg("A", "hi", 0),
                seg("A", "there", 500),
                seg("B", "hey", 600),
            ],
            NormalizePolicy::OnClose,
        );
        assert_eq!(out.len(), 2);
        assert_eq!((out[0].speaker.as_str(), out[0].text.as_str()), ("A", "Hi there"));
        assert_eq!((out[1].speaker.as_str(), out[1].text.as_str()), ("B", "Hey"));
    }

    #[test]
    fn same_speaker_beyond_threshold_splits() {
        let out = blocks(
            vec![seg("A", "x", 0), seg("A", "y", 61_000)],
            NormalizePolicy::OnClose,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].started_at, t0());
        assert_eq!(out[1].started_at, t0() + Duration::milliseconds(61_000));
    }

    #[test]
    fn gap_measured_against_last_segment_not_block_start() {
        // Each step stays under the threshold even though the block as a
        // whole spans longer than it.
        let out = blocks(
            vec![
                seg("A", "a", 0),
                seg("A", "b", 50_000),
                seg("A", "c", 100_000),
            ],
            NormalizePolicy::OnClose,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "A b c");
    }

    #[test]
    fn pre_grouped_input_is_not_double_emitted() {
        let out = blocks(
            vec![seg("A", "one two", 0), seg("A", "three four", 100)],
            NormalizePolicy::OnClose,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "One two three four");
    }

    #[test]
    fn per_append_normalizes_each_fragment() {
        // The historical rendered path cleans every fragment, so each one
        // comes out capitalized. Kept as observed behavior.
        let out = blocks(
            vec![seg("A", "hi", 0), seg("A", "there", 500)],
            NormalizePolicy::PerAppend,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Hi There");
    }

    #[test]
    fn no_double_space_when_fragment_already_spaced() {
        let out = blocks(
            vec![seg("A", "hi ", 0), seg("A", " there", 500)],
            NormalizePolicy::OnClose,
        );
        assert_eq!(out[0].text, "Hi there");
    }

    #[test]
    fn rerun_over_same_input_is_identical() {
        let input = vec![
            seg("A", "hi", 0),
            seg("A", "there", 500),
            seg("B", "hey", 600),
            seg("B", "again", 70_000),
        ];
        let a = blocks(input.clone(), NormalizePolicy::OnClose);
        let b = blocks(input, NormalizePolicy::OnClose);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!((&x.speaker, &x.text, x.started_at), (&y.speaker, &y.text, y.started_at));
        }
    }

    #[test]
    fn blocks_get_distinct_ids() {
        let out = blocks(
            vec![seg("A", "x", 0), seg("B", "y", 100), seg("A", "z", 200)],
            NormalizePolicy::OnClose,
        );
        assert_eq!(out.len(), 3);
        assert_eq!(
            out.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(),
            ["0", "1", "2"]
        );
    }
}
