use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use murmur_feed::{FeedFrame, FeedView, NormalizePolicy, group};

use crate::events::{
    DashboardView, SessionEvent, SummariesView, SummarySegmentsView, TranscriptsView,
};
use crate::runtime::{DashboardRuntime, Region};

/// Cadence of live-buffer reconciliation, independent of segment arrival.
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// One watched timeline: the live feed plus the three fetched view regions.
///
/// All mutation happens through [`DashboardSession::handle`], which the
/// async [`DashboardSession::run`] loop calls from a single task — no
/// locking, and a flush tick landing between two rapid same-speaker
/// arrivals (or a speaker change landing between two ticks) is safe by
/// construction.
pub struct DashboardSession {
    runtime: Arc<dyn DashboardRuntime>,
    feed: FeedView,
    transcripts_generation: u64,
    summaries_generation: u64,
    dashboard_generation: u64,
}

impl DashboardSession {
    pub fn new(runtime: Arc<dyn DashboardRuntime>) -> Self {
        Self {
            runtime,
            feed: FeedView::new(),
            transcripts_generation: 0,
            summaries_generation: 0,
            dashboard_generation: 0,
        }
    }

    /// Register a navigation to a new transcripts page/date/hour. Returns
    /// the generation the matching fetch completion must carry; any
    /// in-flight fetch started before this call is now stale.
    pub fn begin_transcripts_fetch(&mut self) -> u64 {
        self.transcripts_generation += 1;
        self.transcripts_generation
    }

    pub fn begin_summaries_fetch(&mut self) -> u64 {
        self.summaries_generation += 1;
        self.summaries_generation
    }

    pub fn begin_dashboard_fetch(&mut self) -> u64 {
        self.dashboard_generation += 1;
        self.dashboard_generation
    }

    /// Current render snapshot of the live feed.
    pub fn frame(&self) -> FeedFrame {
        self.feed.frame()
    }

    /// Dispatch one event. Returns `false` once the session should stop.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Segment(segment) => {
                for update in self.feed.push(&segment) {
                    self.runtime.emit_feed(update);
                }
            }
            SessionEvent::FlushTick => {
                if let Some(update) = self.feed.flush() {
                    self.runtime.emit_feed(update);
                }
            }
            SessionEvent::TranscriptsLoaded { generation, result } => {
                if generation != self.transcripts_generation {
                    tracing::debug!(
                        generation,
                        current = self.transcripts_generation,
                        "stale_transcripts_response_dropped"
                    );
                    return true;
                }
                match result {
                    Ok(page) => {
                        // Historical/rendered path: fragments cleaned per
                        // append, as the original dashboard did.
                        let blocks =
                            group(page.segments, NormalizePolicy::PerAppend).collect();
                        self.runtime.emit_transcripts(TranscriptsView {
                            blocks,
                            current_page: page.current_page,
                            total_pages: page.total_pages,
                        });
                    }
                    Err(error) => {
                        tracing::warn!(%error, "transcripts_fetch_failed");
                        self.runtime
                            .emit_region_error(Region::Transcripts, error.to_string());
                    }
                }
            }
            SessionEvent::SummariesLoaded { generation, result } => {
                if generation != self.summaries_generation {
                    tracing::debug!(
                        generation,
                        current = self.summaries_generation,
                        "stale_summaries_response_dropped"
                    );
                    return true;
                }
                match result {
                    Ok(page) => self.runtime.emit_summaries(SummariesView {
                        summaries: page.summaries,
                        current_page: page.current_page,
                        total_pages: page.total_pages,
                    }),
                    Err(error) => {
                        tracing::warn!(%error, "summaries_fetch_failed");
                        self.runtime
                            .emit_region_error(Region::Summaries, error.to_string());
                    }
                }
            }
            SessionEvent::DashboardLoaded { generation, result } => {
                if generation != self.dashboard_generation {
                    tracing::debug!(
                        generation,
                        current = self.dashboard_generation,
                        "stale_dashboard_response_dropped"
                    );
                    return true;
                }
                match result {
                    Ok(data) => self.runtime.emit_dashboard(DashboardView {
                        heatmap: data.heatmap,
                        word_cloud: data.word_cloud,
                        stats: data.stats,
                    }),
                    Err(error) => {
                        tracing::warn!(%error, "dashboard_fetch_failed");
                        self.runtime
                            .emit_region_error(Region::Dashboard, error.to_string());
                    }
                }
            }
            SessionEvent::SummarySegmentsLoaded { summary_id, result } => match result {
                Ok(segments) => {
                    let blocks = group(segments, NormalizePolicy::OnClose).collect();
                    self.runtime.emit_summary_segments(SummarySegmentsView {
                        summary_id,
                        blocks,
                    });
                }
                Err(error) => {
                    tracing::warn!(summary_id, %error, "summary_segments_fetch_failed");
                    self.runtime
                        .emit_region_error(Region::SummaryModal, error.to_string());
                }
            },
            SessionEvent::Shutdown => {
                for update in self.feed.finish() {
                    self.runtime.emit_feed(update);
                }
                tracing::info!("dashboard_session_ended");
                return false;
            }
        }
        true
    }

    /// Drive the session from an event channel plus the flush timer.
    ///
    /// Runs until a [`SessionEvent::Shutdown`] arrives or every sender is
    /// dropped. The timer runs for the whole session lifetime.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) {
        let mut flush = tokio::time::interval(FLUSH_INTERVAL);
        flush.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            let event = tokio::select! {
                _ = flush.tick() => SessionEvent::FlushTick,
                event = events.recv() => event.unwrap_or(SessionEvent::Shutdown),
            };
            if !self.handle(event) {
                break;
            }
        }
    }
}
