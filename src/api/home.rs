use axum::{
    http::{header, HeaderMap},
    response::Html,
};

/// 首页示例链接使用的表单 ID
const SAMPLE_FORM_ID: &str = "cLZojxk94ous";

/// GET /，给出一个可直接点击的示例查询地址
pub async fn welcome(headers: HeaderMap) -> Html<String> {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let url = format!("{scheme}://{host}/{SAMPLE_FORM_ID}/filteredResponses");
    Html(format!(
        "<h3>Filtered responses service is running.<br/> Use this url to get responses: <a href=\"{url}\">{url}</a></h3>"
    ))
}
