use serde_json::Value;
use tracing::{debug, warn};

use crate::models::filter::{FilterCriterion, FilterSpec};

/// 解析调用方传入的 `filters` 查询参数
///
/// 返回 `None` 表示不做过滤。解析失败只记日志，从不向上抛错。
pub fn parse_filters(raw: Option<&str>) -> Option<FilterSpec> {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => {
            debug!("未提供过滤条件，跳过过滤");
            return None;
        }
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "过滤条件 JSON 解析失败，按不过滤处理");
            return None;
        }
    };

    match parsed {
        Value::Array(items) => Some(FilterSpec::new(items.into_iter().map(criterion_from).collect())),
        Value::Object(_) => {
            warn!("过滤条件不是列表，按不过滤处理");
            None
        }
        other => {
            warn!(value = %other, "过滤条件不是结构化对象，按不过滤处理");
            None
        }
    }
}

/// 列表中的单个条目
///
/// 不是对象的条目（字符串、数字、null）得到一个不匹配任何记录的条件，
/// 从而让整个 AND 组合排除所有记录，而不是被忽略。
fn criterion_from(item: Value) -> FilterCriterion {
    if !item.is_object() {
        warn!(entry = %item, "过滤条目不是对象，按不匹配处理");
        return FilterCriterion::default();
    }
    serde_json::from_value(item).unwrap_or_else(|e| {
        warn!(error = %e, "过滤条目格式不正确，按不匹配处理");
        FilterCriterion::default()
    })
}
