use serde::Serialize;

use crate::models::submission::Submission;

/// 调用方未指定时的返回条数
pub const DEFAULT_LIMIT: usize = 150;

/// 调用方可见的结果窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// 聚合结果，序列化字段名与对外接口保持一致
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    #[serde(rename = "responses")]
    pub records: Vec<Submission>,
    #[serde(rename = "totalResponses")]
    pub total_count: usize,
    /// `limit` 为 0 时没有意义，输出为 `null`
    #[serde(rename = "pageCount")]
    pub page_count: Option<usize>,
}
