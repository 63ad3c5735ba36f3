use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 上游返回的一条表单提交记录
///
/// 只解析过滤需要的 `questions`，其余字段原样保留，回传给调用方时不丢信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 提交中的一道题目（字段）及其答案
///
/// 上游的 `id` 不一定是字符串，按原始 JSON 值保存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Submission {
    /// 按题目 ID 严格相等查找字段，ID 在同一条提交内唯一
    ///
    /// null ID 不匹配任何题目。
    pub fn question(&self, id: &Value) -> Option<&Question> {
        if id.is_null() {
            return None;
        }
        self.questions.iter().find(|q| q.id == *id)
    }
}

/// 上游分页接口的响应体，只关心 `responses`
#[derive(Debug, Deserialize)]
pub struct SubmissionsPage {
    pub responses: Vec<Submission>,
}
