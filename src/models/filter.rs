use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 过滤条件的比较方式
///
/// 未识别的标签保留在 `Unsupported` 中，求值时按不匹配处理，而不是报错。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Unsupported(String),
}

impl Condition {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "equals" => Condition::Equals,
            "does_not_equal" => Condition::NotEquals,
            "greater_than" => Condition::GreaterThan,
            "less_than" => Condition::LessThan,
            other => Condition::Unsupported(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Condition::Equals => "equals",
            Condition::NotEquals => "does_not_equal",
            Condition::GreaterThan => "greater_than",
            Condition::LessThan => "less_than",
            Condition::Unsupported(tag) => tag,
        }
    }
}

impl From<String> for Condition {
    fn from(tag: String) -> Self {
        Condition::from_tag(&tag)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.as_tag().to_string()
    }
}

// 缺省的条件标签为空，同样按不支持处理
impl Default for Condition {
    fn default() -> Self {
        Condition::Unsupported(String::new())
    }
}

/// 非字符串的条件标签（数字、null 等）保留其 JSON 文本，按不支持处理
fn lenient_condition<'de, D>(deserializer: D) -> Result<Condition, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(tag) => Condition::from(tag),
        other => Condition::Unsupported(other.to_string()),
    })
}

/// 单个字段级过滤条件: `{ id, value, condition }`
///
/// 字段都可缺省：`id` 缺失（null）的条件不匹配任何题目，`condition`
/// 缺失或不是字符串时为 `Unsupported`。任何 JSON 对象都能解析成条件。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FilterCriterion {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub value: Value,
    #[serde(default, deserialize_with = "lenient_condition")]
    pub condition: Condition,
}

/// 按顺序 AND 组合的过滤条件列表
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct FilterSpec {
    criteria: Vec<FilterCriterion>,
}

impl FilterSpec {
    pub fn new(criteria: Vec<FilterCriterion>) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &[FilterCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
