use spendlog_advisor::AdvisorError;
use spendlog_database::StoreError;

#[derive(Debug)]
pub enum ServiceError {
    InvalidArgument(String),
    InvalidPagination,
    NotFound,
    Forbidden,
    AccountNotOwned,
    Conflict(String),
    Internal(String),
    Store(StoreError),
    Advice(AdvisorError),
}

impl ServiceError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::Duplicate(what) => Self::Conflict(format!("duplicate {what}")),
            other => Self::Store(other),
        }
    }
}

impl From<AdvisorError> for ServiceError {
    fn from(err: AdvisorError) -> Self {
        Self::Advice(err)
    }
}

impl From<ServiceError> for crate::ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidArgument(msg) => crate::ApiError::bad_request(&msg),
            ServiceError::InvalidPagination => {
                crate::ApiError::bad_request("page and per_page must be at least 1")
            }
            ServiceError::NotFound => crate::ApiError::not_found("Resource not found"),
            ServiceError::Forbidden => crate::ApiError::forbidden("Access denied"),
            ServiceError::AccountNotOwned => {
                crate::ApiError::forbidden("Account does not belong to the authenticated user")
            }
            ServiceError::Conflict(msg) => {
                crate::ApiError::new(axum::http::StatusCode::CONFLICT, &msg)
            }
            ServiceError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                crate::ApiError::internal_server_error("Internal error")
            }
            ServiceError::Store(store_err) => {
                tracing::error!("Storage error: {}", store_err);
                crate::ApiError::internal_server_error("Storage operation failed")
            }
            ServiceError::Advice(AdvisorError::ApiKeyMissing) => crate::ApiError::new(
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "Advice upstream is not configured",
            ),
            ServiceError::Advice(advice_err) => {
                tracing::error!("Advice upstream error: {}", advice_err);
                crate::ApiError::new(
                    axum::http::StatusCode::BAD_GATEWAY,
                    "Advice upstream request failed",
                )
            }
        }
    }
}
