use std::future::Future;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Transport seam for the dashboard backend.
///
/// The backend contract is read-only, so only GET is modeled. Implement
/// this over your HTTP stack of choice; tests implement it with canned
/// responses and no network.
pub trait HttpClient: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}
