use chrono::NaiveDate;

use murmur_feed::Segment;
use murmur_http::HttpClient;

use crate::error::Error;
use crate::types::{DashboardStats, SummaryPage, TranscriptPage, WordCloudEntry, decode};

/// Typed consumer of the dashboard backend's read-only REST contract.
///
/// Dates are calendar days (`YYYY-MM-DD`); the backend resolves them to its
/// configured local day. No retries: a failed call degrades the one view
/// region that asked for it.
pub struct BackendClient<C> {
    http: C,
}

impl<C: HttpClient> BackendClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn get_transcripts(
        &self,
        date: NaiveDate,
        page: u32,
        hour: Option<u8>,
    ) -> Result<TranscriptPage, Error> {
        let mut path = format!("/get_transcripts?date={date}&page={page}");
        if let Some(hour) = hour {
            path.push_str(&format!("&hour={hour}"));
        }
        self.get(&path).await
    }

    pub async fn get_summaries(
        &self,
        date: NaiveDate,
        page: u32,
        per_page: u32,
    ) -> Result<SummaryPage, Error> {
        self.get(&format!(
            "/get_summaries?date={date}&page={page}&per_page={per_page}"
        ))
        .await
    }

    /// Segments backing one summary card. The backend answers with either a
    /// segment array or an `{"error": ...}` envelope; the latter becomes
    /// [`Error::Api`].
    pub async fn get_summary_transcripts(&self, summary_id: i64) -> Result<Vec<Segment>, Error> {
        self.get(&format!("/get_summary_transcripts/{summary_id}"))
            .await
    }

    /// 24 hour-indexed segment counts for the heatmap.
    pub async fn get_heatmap_data(&self, date: NaiveDate) -> Result<Vec<u64>, Error> {
        self.get(&format!("/get_heatmap_data?date={date}")).await
    }

    pub async fn get_word_cloud_data(&self, date: NaiveDate) -> Result<Vec<WordCloudEntry>, Error> {
        self.get(&format!("/get_word_cloud_data?date={date}")).await
    }

    pub async fn get_dashboard_stats(&self, date: NaiveDate) -> Result<DashboardStats, Error> {
        self.get(&format!("/get_dashboard_stats?date={date}")).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let bytes = self.http.get(path).await.map_err(Error::Http)?;
        decode(&bytes)
    }
}
