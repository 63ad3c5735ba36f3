use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::core::criteria::filter_submissions;
use crate::infra::upstream::{SubmissionSource, UpstreamError};
use crate::models::filter::FilterSpec;
use crate::models::page::{AggregationResult, PageRequest};
use crate::models::submission::Submission;

/// 上游单页最大条数，也是内部分页步长
pub const UPSTREAM_PAGE_SIZE: usize = 150;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("upstream not exhausted after {0} pages")]
    PageLimitExceeded(usize),
}

/// 上游分页游标：每次调用顺序拉取下一页
///
/// 拿到一页不足 `UPSTREAM_PAGE_SIZE` 条的原始数据后视为耗尽。
pub struct UpstreamPages<'a> {
    source: &'a dyn SubmissionSource,
    form_id: &'a str,
    extra_params: &'a [(String, String)],
    offset: usize,
    fetched: usize,
    max_pages: Option<usize>,
    exhausted: bool,
}

impl<'a> UpstreamPages<'a> {
    pub fn new(
        source: &'a dyn SubmissionSource,
        form_id: &'a str,
        extra_params: &'a [(String, String)],
        max_pages: Option<usize>,
    ) -> Self {
        Self {
            source,
            form_id,
            extra_params,
            offset: 0,
            fetched: 0,
            max_pages,
            exhausted: false,
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<Submission>>, AggregateError> {
        if self.exhausted {
            return Ok(None);
        }
        if let Some(max) = self.max_pages {
            if self.fetched >= max {
                warn!(form_id = self.form_id, max_pages = max, "上游分页超过上限，终止聚合");
                return Err(AggregateError::PageLimitExceeded(max));
            }
        }

        let page = self
            .source
            .fetch_page(self.form_id, UPSTREAM_PAGE_SIZE, self.offset, self.extra_params)
            .await?;

        self.fetched += 1;
        self.offset += UPSTREAM_PAGE_SIZE;
        // 按原始页大小判断是否耗尽，与过滤结果无关
        if page.len() < UPSTREAM_PAGE_SIZE {
            self.exhausted = true;
        }
        debug!(page = self.fetched, size = page.len(), exhausted = self.exhausted, "拉取上游分页");

        Ok(Some(page))
    }
}

/// 拉取全部上游分页、过滤并按调用方窗口切片
pub struct Aggregator {
    source: Arc<dyn SubmissionSource>,
    max_pages: Option<usize>,
}

impl Aggregator {
    pub fn new(source: Arc<dyn SubmissionSource>) -> Self {
        Self {
            source,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[instrument(skip(self, extra_params, filters), fields(limit = page.limit, offset = page.offset))]
    pub async fn aggregate(
        &self,
        form_id: &str,
        extra_params: &[(String, String)],
        filters: Option<&FilterSpec>,
        page: PageRequest,
    ) -> Result<AggregationResult, AggregateError> {
        let mut pages = UpstreamPages::new(self.source.as_ref(), form_id, extra_params, self.max_pages);
        let mut buffer: Vec<Submission> = Vec::new();

        while let Some(raw) = pages.next_page().await? {
            buffer.extend(filter_submissions(raw, filters));
        }

        let total_count = buffer.len();
        let page_count = (page.limit > 0).then(|| total_count.div_ceil(page.limit));
        let records: Vec<Submission> = buffer
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();

        info!(total_count, returned = records.len(), "聚合完成");

        Ok(AggregationResult {
            records,
            total_count,
            page_count,
        })
    }
}
