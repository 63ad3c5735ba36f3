use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiError;
use crate::ax_state::AppState;
use crate::core::filter_spec::parse_filters;
use crate::models::page::{AggregationResult, PageRequest};

/// 拆分后的查询参数：分页窗口、过滤条件、其余透传给上游的参数
#[derive(Debug, Default, PartialEq)]
pub struct ResponsesQuery {
    pub page: PageRequest,
    pub filters: Option<String>,
    pub passthrough: Vec<(String, String)>,
}

impl ResponsesQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        let mut query = ResponsesQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "limit" => query.page.limit = parse_window("limit", value)?,
                "offset" => query.page.offset = parse_window("offset", value)?,
                "filters" => query.filters = Some(value),
                _ => query.passthrough.push((key, value)),
            }
        }
        Ok(query)
    }
}

fn parse_window(name: &'static str, value: String) -> Result<usize, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidPagination { name, value })
}

/// GET /{form_id}/filteredResponses
pub async fn filtered_responses(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AggregationResult>, ApiError> {
    let query = ResponsesQuery::from_pairs(pairs)?;
    info!(
        form_id = %form_id,
        limit = query.page.limit,
        offset = query.page.offset,
        "接收到过滤查询请求"
    );

    let filters = parse_filters(query.filters.as_deref());
    let result = state
        .aggregator
        .aggregate(&form_id, &query.passthrough, filters.as_ref(), query.page)
        .await?;

    Ok(Json(result))
}
