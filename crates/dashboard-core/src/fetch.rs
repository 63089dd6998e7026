//! Fetch tasks that feed their completions back into the session channel.
//!
//! Each loader is spawned per navigation, carries the generation the
//! session handed out when the navigation happened, and reports back with
//! exactly one [`SessionEvent`]. The session decides whether the result is
//! still current.

use chrono::NaiveDate;
use tokio::sync::mpsc;

use murmur_backend_client::BackendClient;
use murmur_http::HttpClient;

use crate::events::{DashboardData, SessionEvent};

/// Summaries per page, matching the card grid the renderer lays out.
pub const SUMMARIES_PER_PAGE: u32 = 6;

pub async fn load_transcripts<C: HttpClient>(
    client: &BackendClient<C>,
    date: NaiveDate,
    page: u32,
    hour: Option<u8>,
    generation: u64,
    events: &mpsc::Sender<SessionEvent>,
) {
    let result = client.get_transcripts(date, page, hour).await;
    send(events, SessionEvent::TranscriptsLoaded { generation, result }).await;
}

pub async fn load_summaries<C: HttpClient>(
    client: &BackendClient<C>,
    date: NaiveDate,
    page: u32,
    generation: u64,
    events: &mpsc::Sender<SessionEvent>,
) {
    let result = client.get_summaries(date, page, SUMMARIES_PER_PAGE).await;
    send(events, SessionEvent::SummariesLoaded { generation, result }).await;
}

/// The dashboard tab needs all three analytics payloads; fetch them
/// concurrently and report one combined completion. The first failure
/// wins, so the whole tab degrades as a unit.
pub async fn load_dashboard<C: HttpClient>(
    client: &BackendClient<C>,
    date: NaiveDate,
    generation: u64,
    events: &mpsc::Sender<SessionEvent>,
) {
    let (heatmap, word_cloud, stats) = tokio::join!(
        client.get_heatmap_data(date),
        client.get_word_cloud_data(date),
        client.get_dashboard_stats(date),
    );

    let result = heatmap.and_then(|heatmap| {
        let word_cloud = word_cloud?;
        let stats = stats?;
        Ok(DashboardData {
            heatmap,
            word_cloud,
            stats,
        })
    });
    send(events, SessionEvent::DashboardLoaded { generation, result }).await;
}

pub async fn load_summary_segments<C: HttpClient>(
    client: &BackendClient<C>,
    summary_id: i64,
    events: &mpsc::Sender<SessionEvent>,
) {
    let result = client.get_summary_transcripts(summary_id).await;
    send(events, SessionEvent::SummarySegmentsLoaded { summary_id, result }).await;
}

async fn send(events: &mpsc::Sender<SessionEvent>, event: SessionEvent) {
    if events.send(event).await.is_err() {
        tracing::debug!("session_channel_closed_before_fetch_completed");
    }
}
