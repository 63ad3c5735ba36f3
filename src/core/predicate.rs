use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::warn;

use crate::models::filter::Condition;

/// 纯日期格式，取当天 UTC 零点
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// 无时区的日期时间格式，统一按 UTC 解释
const NAIVE_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// 对单个字段值与目标值做一次比较
///
/// 不支持的条件记一条 warn 日志并返回 `false`。
pub fn evaluate(field_value: &Value, target: &Value, condition: &Condition) -> bool {
    match condition {
        Condition::Equals => loose_eq(field_value, target),
        Condition::NotEquals => !loose_eq(field_value, target),
        Condition::GreaterThan => compare_timestamps(field_value, target) == Some(Ordering::Greater),
        Condition::LessThan => compare_timestamps(field_value, target) == Some(Ordering::Less),
        Condition::Unsupported(tag) => {
            warn!(condition = %tag, "不支持的过滤条件，按不匹配处理");
            false
        }
    }
}

/// 宽松相等
///
/// 双方都能读成数字时按数值比较（空白字符串读作 0）；布尔值只参与数值比较；
/// 其余比较字符串形式。null 只等于 null，两个复合值（数组/对象）按结构比较。
/// 关系是对称的。
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => a == b,
        _ => match (numeric_reading(a), numeric_reading(b)) {
            (Some(x), Some(y)) => x == y,
            _ if a.is_boolean() || b.is_boolean() => false,
            _ => string_form(a) == string_form(b),
        },
    }
}

fn numeric_reading(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => numeric_reading_str(s),
        Value::Array(_) => numeric_reading_str(&string_form(value)),
        _ => None,
    }
}

fn numeric_reading_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn string_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // 10.0 与 10 的字符串形式一致
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(string_form).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn compare_timestamps(a: &Value, b: &Value) -> Option<Ordering> {
    Some(parse_timestamp(a)?.cmp(&parse_timestamp(b)?))
}

/// 把值解析为时间点，无法解析时返回 `None`（无效时间，任何比较都不成立）
///
/// 数字按 Unix 毫秒时间戳处理。
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_f64()? as i64),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(date) = parse_date(s) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// `YYYY-MM-DD`、`YYYY/MM/DD`，以及省略日（`YYYY-MM`）或月日（`YYYY`）的写法
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&format!("{s}-01"), fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{s}/01"), "%Y/%m/%d").ok())
}
