use tracing::debug;

use crate::core::predicate::evaluate;
use crate::models::filter::FilterSpec;
use crate::models::submission::Submission;

/// 按条件过滤提交记录，所有条件为 AND 关系，保留原有顺序
///
/// 没有过滤条件（`None` 或空列表）时原样返回。
pub fn filter_submissions(submissions: Vec<Submission>, spec: Option<&FilterSpec>) -> Vec<Submission> {
    let spec = match spec {
        Some(s) if !s.is_empty() => s,
        _ => {
            debug!(count = submissions.len(), "无过滤条件，返回原始记录");
            return submissions;
        }
    };

    submissions
        .into_iter()
        .filter(|s| matches_all(s, spec))
        .collect()
}

/// 缺少被引用字段的记录直接排除，不视为满足
fn matches_all(submission: &Submission, spec: &FilterSpec) -> bool {
    spec.criteria().iter().all(|criterion| {
        submission
            .question(&criterion.id)
            .is_some_and(|q| evaluate(&q.value, &criterion.value, &criterion.condition))
    })
}
