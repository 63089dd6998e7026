use murmur_feed::FeedUpdate;

use crate::events::{DashboardView, SummariesView, SummarySegmentsView, TranscriptsView};

/// View region a failure degrades. A failed fetch never takes down the
/// session; it replaces one region's content with an inert error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    Transcripts,
    Summaries,
    Dashboard,
    SummaryModal,
}

/// Host-side sink for everything the session wants shown.
///
/// The embedding UI (desktop event bridge, WebSocket push layer, test
/// recorder)
/// implements this and projects the payloads into its widgets.
pub trait DashboardRuntime: Send + Sync {
    fn emit_feed(&self, update: FeedUpdate);
    fn emit_transcripts(&self, view: TranscriptsView);
    fn emit_summaries(&self, view: SummariesView);
    fn emit_dashboard(&self, view: DashboardView);
    fn emit_summary_segments(&self, view: SummarySegmentsView);
    fn emit_region_error(&self, region: Region, message: String);
}
