use kalahasta_core::Session;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Counts shown on the artisan's dashboard
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub products: usize,
    pub recordings: usize,
    pub binned_recordings: usize,
    pub certifications: usize,
    pub approved_stories: usize,

    /// Sum of listed product prices
    pub catalog_value: i64,
}

impl DashboardSummary {
    pub async fn collect(state: &AppState, session: &Session) -> Result<Self, AppError> {
        let products = state.content.list_products(session).await?;
        let recordings = state.content.list_recordings(session).await?;
        let binned = state.content.list_binned(session).await?;
        let certifications = state.content.list_certifications(session).await?;

        Ok(Self {
            products: products.len(),
            recordings: recordings.len(),
            binned_recordings: binned.len(),
            certifications: certifications.len(),
            approved_stories: recordings.iter().filter(|r| r.approved).count(),
            catalog_value: products.iter().map(|p| p.price).sum(),
        })
    }
}
