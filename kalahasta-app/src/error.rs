use kalahasta_content::ContentError;
use kalahasta_core::{IdentityError, StoreError};
use kalahasta_feed::FeedError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    /// Errors the user can fix by changing their input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::Identity(
                IdentityError::InvalidOtp
                    | IdentityError::UserNotFound(_)
                    | IdentityError::EmailTaken(_)
                    | IdentityError::Validation(_)
            ) | AppError::Content(ContentError::NotFound { .. } | ContentError::Product(_))
                | AppError::Feed(_)
        )
    }
}
