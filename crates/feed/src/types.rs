use chrono::{DateTime, Utc};

/// One unit of speaker-attributed transcribed speech, as delivered by the
/// push channel (`new_segment`) and the paged transcript endpoints.
///
/// No field is validated on the way in; an empty `speaker` string is simply
/// its own speaker identity.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Segment {
    pub speaker: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A visually grouped run of consecutive same-speaker segments.
///
/// View-model only, never a wire entity. `text` is whatever the grouping
/// path has accumulated so far — normalized or raw depending on which path
/// produced it (see [`crate::grouper::NormalizePolicy`]).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct MessageBlock {
    pub id: String,
    pub speaker: String,
    pub started_at: DateTime<Utc>,
    pub text: String,
}

/// Delta event for a renderer tracking the live feed.
///
/// The block identified by `block_id` is created by `BlockOpened`, grown by
/// `TextAppended` (raw text, exactly the not-yet-shown suffix) and
/// reconciled by `TextReplaced` (full normalized text, replaces everything
/// shown so far for that block).
#[derive(Debug, Clone, serde::Serialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type")]
pub enum FeedUpdate {
    #[serde(rename = "blockOpened")]
    BlockOpened {
        block_id: String,
        speaker: String,
        started_at: DateTime<Utc>,
    },
    #[serde(rename = "textAppended")]
    TextAppended { block_id: String, text: String },
    #[serde(rename = "textReplaced")]
    TextReplaced { block_id: String, text: String },
}

/// Complete snapshot of the live feed at a point in time.
///
/// This is the rendering contract: everything a UI layer needs to draw one
/// frame. `blocks` are closed (speaker turn ended, text finalized); `live`
/// is the in-progress block with its currently displayed text.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct FeedFrame {
    pub blocks: Vec<MessageBlock>,
    pub live: Option<MessageBlock>,
}
