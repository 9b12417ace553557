use once_cell::sync::Lazy;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, ORIGIN, REFERER,
};
use std::collections::HashMap;

const SITE_ORIGIN: &str = "https://eyedance.net";
const GENERIC_REFERER: &str = "https://eyedance.net/";

/// Per-model deviations from the base header set. New variants are added
/// here; the request path never branches on model ids.
#[derive(Debug, Clone, Copy)]
struct HeaderOverride {
    referer: &'static str,
    cookie: Option<&'static str>,
}

static HEADER_OVERRIDES: Lazy<HashMap<&'static str, HeaderOverride>> = Lazy::new(|| {
    let mut overrides = HashMap::new();
    // Flux-Krea is served from the Spanish locale page and expects the
    // matching locale cookie.
    overrides.insert(
        "Flux-Krea",
        HeaderOverride {
            referer: "https://eyedance.net/es/flux-krea",
            cookie: Some("NEXT_LOCALE=es; active_theme=default"),
        },
    );
    overrides
});

/// Build the complete outbound header set for a model.
pub fn build_headers(model: &str) -> HeaderMap {
    let header_override = HEADER_OVERRIDES.get(model);

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
    headers.insert(
        REFERER,
        HeaderValue::from_static(
            header_override
                .map(|o| o.referer)
                .unwrap_or(GENERIC_REFERER),
        ),
    );
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            r#""Google Chrome";v="141", "Not?A_Brand";v="8", "Chromium";v="141""#,
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));

    if let Some(cookie) = header_override.and_then(|o| o.cookie) {
        headers.insert(COOKIE, HeaderValue::from_static(cookie));
    }

    headers
}
