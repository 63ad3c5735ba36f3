use anyhow::{bail, Context};
use reqwest::Url;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// 上游表单 API 的连接参数
#[derive(Clone)]
pub struct UpstreamConfig {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

// 凭证不进日志
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// 进程级配置，启动时构造一次，之后只读
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub upstream: UpstreamConfig,
    /// 单次聚合最多拉取的上游页数，`None` 表示不设上限
    pub max_pages: Option<usize>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_url = required(&lookup, "FILLOUT_API_URL")?;
        let base_url = Url::parse(raw_url.trim_end_matches('/'))
            .with_context(|| format!("FILLOUT_API_URL is not a valid URL: {raw_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("FILLOUT_API_URL cannot be used as a base URL: {raw_url}");
        }

        let api_key = required(&lookup, "FILLOUT_API_KEY")?;

        let port = optional(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);
        let timeout_secs =
            optional(&lookup, "UPSTREAM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        let max_pages: Option<usize> = optional(&lookup, "UPSTREAM_MAX_PAGES")?;
        if max_pages == Some(0) {
            bail!("UPSTREAM_MAX_PAGES must be at least 1");
        }

        Ok(Self {
            port,
            upstream: UpstreamConfig {
                base_url,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            max_pages,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<String> {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => bail!("{key} must be set"),
    }
}

fn optional<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value: {v}")),
        _ => Ok(None),
    }
}
