use murmur_backend_client::{DashboardStats, Error, Summary, SummaryPage, TranscriptPage, WordCloudEntry};
use murmur_feed::{MessageBlock, Segment};

/// Inbound messages for the session dispatcher.
///
/// Push-channel arrivals, flush ticks and fetch completions all funnel
/// through this one type; their interleaving is whatever the host's event
/// loop produces, and the session is built to tolerate any order.
#[derive(Debug)]
pub enum SessionEvent {
    /// `new_segment` push-channel payload.
    Segment(Segment),
    /// Periodic live-buffer reconciliation tick.
    FlushTick,
    TranscriptsLoaded {
        generation: u64,
        result: Result<TranscriptPage, Error>,
    },
    SummariesLoaded {
        generation: u64,
        result: Result<SummaryPage, Error>,
    },
    DashboardLoaded {
        generation: u64,
        result: Result<DashboardData, Error>,
    },
    /// Segments backing one summary card, for the detail modal.
    SummarySegmentsLoaded {
        summary_id: i64,
        result: Result<Vec<Segment>, Error>,
    },
    Shutdown,
}

/// The three analytics payloads the dashboard tab fetches together.
#[derive(Debug)]
pub struct DashboardData {
    pub heatmap: Vec<u64>,
    pub word_cloud: Vec<WordCloudEntry>,
    pub stats: DashboardStats,
}

// ── Outbound view payloads ───────────────────────────────────────────────────

#[derive(Debug, Clone, serde::Serialize)]
pub struct TranscriptsView {
    pub blocks: Vec<MessageBlock>,
    pub current_page: u32,
    pub total_pages: u32,
}

/// An empty `summaries` list means "none for this date" — the renderer
/// shows its own placeholder; it is not an error.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SummariesView {
    pub summaries: Vec<Summary>,
    pub current_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardView {
    pub heatmap: Vec<u64>,
    pub word_cloud: Vec<WordCloudEntry>,
    pub stats: DashboardStats,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SummarySegmentsView {
    pub summary_id: i64,
    pub blocks: Vec<MessageBlock>,
}
