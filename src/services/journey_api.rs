//! Trait for fetching journey rows from the operations database facade.
//!
//! The facade serves the joined journeys ⋈ trains ⋈ schedules result set
//! over HTTP; the SQL behind it is not this tool's concern.

use anyhow::Result;

use raildash::model::JourneyRow;

/// Abstraction over a journey-row provider (e.g. the OpsDB HTTP facade).
#[async_trait::async_trait]
pub trait JourneyApi {
    /// Returns all journey rows the provider currently serves.
    async fn fetch_journeys(&self) -> Result<Vec<JourneyRow>>;
}
