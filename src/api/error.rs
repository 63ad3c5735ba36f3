use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::aggregator::AggregateError;

pub const FETCH_FAILED_MESSAGE: &str = "An error occurred while fetching the submissions.";
pub const INVALID_PAGINATION_MESSAGE: &str = "Invalid pagination parameters.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid {name}: {value:?}")]
    InvalidPagination { name: &'static str, value: String },

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

// 细节只写日志，调用方只看到固定提示
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidPagination { .. } => {
                warn!(error = %self, "分页参数不合法");
                (StatusCode::BAD_REQUEST, INVALID_PAGINATION_MESSAGE)
            }
            ApiError::Aggregate(e) => {
                error!(error = %e, "获取表单提交失败");
                (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
