//! 测试辅助：内存数据源、提交记录构造和日志捕获

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use std::io;
use std::sync::{Arc, Mutex};

use crate::infra::upstream::{SubmissionSource, UpstreamError};
use crate::models::submission::{Question, Submission};

pub fn submission(id: &str, answers: &[(&str, Value)]) -> Submission {
    Submission {
        submission_id: Some(id.to_string()),
        questions: answers
            .iter()
            .map(|(qid, value)| Question {
                id: Value::from(*qid),
                value: value.clone(),
                extra: Map::new(),
            })
            .collect(),
        extra: Map::new(),
    }
}

/// ID 为 "0".."n-1"，q1 的值为序号
pub fn numbered_submissions(n: usize) -> Vec<Submission> {
    (0..n)
        .map(|i| submission(&i.to_string(), &[("q1", json!(i))]))
        .collect()
}

/// 按 limit/offset 切分内存记录的假数据源，记录每次调用
#[derive(Default)]
pub struct InMemorySource {
    records: Vec<Submission>,
    fail_at_offset: Option<usize>,
    calls: Mutex<Vec<(usize, usize)>>,
    last_form_id: Mutex<Option<String>>,
    last_extra_params: Mutex<Vec<(String, String)>>,
}

impl InMemorySource {
    pub fn new(records: Vec<Submission>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing_at_offset(mut self, offset: usize) -> Self {
        self.fail_at_offset = Some(offset);
        self
    }

    pub fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_form_id(&self) -> Option<String> {
        self.last_form_id.lock().unwrap().clone()
    }

    pub fn last_extra_params(&self) -> Vec<(String, String)> {
        self.last_extra_params.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionSource for InMemorySource {
    async fn fetch_page(
        &self,
        form_id: &str,
        limit: usize,
        offset: usize,
        extra_params: &[(String, String)],
    ) -> Result<Vec<Submission>, UpstreamError> {
        self.calls.lock().unwrap().push((limit, offset));
        *self.last_form_id.lock().unwrap() = Some(form_id.to_string());
        *self.last_extra_params.lock().unwrap() = extra_params.to_vec();

        if self.fail_at_offset == Some(offset) {
            return Err(UpstreamError::Status(StatusCode::BAD_GATEWAY));
        }
        Ok(self.records.iter().skip(offset).take(limit).cloned().collect())
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 在临时 subscriber 下运行 `f`，返回结果和期间输出的日志文本
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buf.0.lock().unwrap()).into_owned();
    (out, logs)
}
