use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, error};

use crate::infra::config::UpstreamConfig;
use crate::models::submission::{Submission, SubmissionsPage};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream responded with status {0}")]
    Status(StatusCode),

    #[error("upstream response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// 上游数据源：一次调用取一页原始提交记录
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    async fn fetch_page(
        &self,
        form_id: &str,
        limit: usize,
        offset: usize,
        extra_params: &[(String, String)],
    ) -> Result<Vec<Submission>, UpstreamError>;
}

/// Fillout 表单提交 API 客户端，不做重试
pub struct FilloutClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl FilloutClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/v1/api/forms/{form_id}/submissions`，form_id 作为单个路径段编码
    fn submissions_url(&self, form_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "api", "forms", form_id, "submissions"]);
        }
        url
    }
}

#[async_trait]
impl SubmissionSource for FilloutClient {
    async fn fetch_page(
        &self,
        form_id: &str,
        limit: usize,
        offset: usize,
        extra_params: &[(String, String)],
    ) -> Result<Vec<Submission>, UpstreamError> {
        let url = self.submissions_url(form_id);
        debug!(form_id, limit, offset, "请求上游提交记录");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&[("limit", limit), ("offset", offset)])
            .query(extra_params)
            .send()
            .await
            .map_err(|e| {
                error!(form_id, error = %e, "调用上游 API 失败");
                UpstreamError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(form_id, %status, "上游 API 返回错误状态");
            return Err(UpstreamError::Status(status));
        }

        let page: SubmissionsPage = response.json().await.map_err(|e| {
            error!(form_id, error = %e, "上游响应解析失败");
            UpstreamError::Decode(e)
        })?;

        Ok(page.responses)
    }
}
