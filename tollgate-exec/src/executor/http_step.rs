use std::collections::BTreeMap;
use std::time::Duration;

use tollgate_core::expressions::{resolve_all, resolve_expression};
use tollgate_core::types::{AnyValue, HttpConfig, WorkflowContext};

use crate::executor::error::{ExternalCallError, StepError};
use crate::http::{HttpClient, HttpRequestParts, HttpResponseParts};
use crate::proxy::{HeaderCrypto, ProxyStore};

const JSON_CONTENT_TYPE: &str = "application/json";
const BODY_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];

pub(crate) struct HttpStepDeps<'a> {
    pub http: &'a dyn HttpClient,
    pub proxies: &'a dyn ProxyStore,
    pub header_crypto: &'a dyn HeaderCrypto,
    pub timeout: Duration,
    pub max_response_bytes: usize,
}

pub(crate) async fn run(
    cfg: &HttpConfig,
    ctx: &WorkflowContext,
    deps: &HttpStepDeps<'_>,
) -> Result<AnyValue, StepError> {
    let (url, method, proxy_headers) = resolve_call_source(cfg, ctx, deps).await?;

    // Later sources override earlier ones: defaults, then decrypted proxy
    // headers, then resolved step headers.
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
    headers.extend(proxy_headers);
    if let Some(step_headers) = &cfg.headers {
        for (name, value) in step_headers {
            let resolved = resolve_all(value, ctx)?;
            headers.insert(name.clone(), header_text(&resolved));
        }
    }

    let body = match &cfg.body_mapping {
        Some(mapping) if BODY_METHODS.contains(&method.as_str()) => {
            let resolved = resolve_all(mapping, ctx)?;
            serde_json::to_vec(&resolved)
                .map_err(|e| StepError::Configuration(format!("body serialization failed: {e}")))?
        }
        _ => Vec::new(),
    };

    let request = HttpRequestParts {
        method,
        url,
        headers,
        body,
    };
    let response = deps
        .http
        .send(request, deps.timeout, deps.max_response_bytes)
        .await
        .map_err(|e| StepError::ExternalCall(ExternalCallError::Http(e)))?;

    if !(200..300).contains(&response.status) {
        return Err(StepError::ExternalCall(ExternalCallError::Status {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }));
    }

    Ok(decode_body(&response))
}

async fn resolve_call_source(
    cfg: &HttpConfig,
    ctx: &WorkflowContext,
    deps: &HttpStepDeps<'_>,
) -> Result<(String, String, BTreeMap<String, String>), StepError> {
    match (&cfg.proxy_id, &cfg.url) {
        (Some(proxy_id), None) => {
            let proxy = deps
                .proxies
                .get_proxy(proxy_id)
                .await
                .map_err(ExternalCallError::Proxy)?
                .ok_or_else(|| StepError::Configuration(format!("unknown proxy: {proxy_id}")))?;
            let headers = match &proxy.encrypted_headers {
                Some(blob) => deps
                    .header_crypto
                    .decrypt_headers(blob)
                    .await
                    .map_err(ExternalCallError::Proxy)?,
                None => BTreeMap::new(),
            };
            Ok((proxy.target_url, proxy.http_method.to_uppercase(), headers))
        }
        (None, Some(url)) => {
            let url = match resolve_expression(url, ctx)? {
                AnyValue::String(s) => s,
                other => {
                    return Err(StepError::Configuration(format!(
                        "url must resolve to a string, got {other}"
                    )))
                }
            };
            let method = cfg
                .method
                .as_deref()
                .unwrap_or("GET")
                .to_uppercase();
            Ok((url, method, BTreeMap::new()))
        }
        _ => Err(StepError::Configuration(
            "exactly one of proxyId or url must be set".to_string(),
        )),
    }
}

fn decode_body(response: &HttpResponseParts) -> AnyValue {
    let text = String::from_utf8_lossy(&response.body).into_owned();
    let is_json = response.headers.iter().any(|(name, value)| {
        name.eq_ignore_ascii_case("content-type")
            && value.to_ascii_lowercase().contains(JSON_CONTENT_TYPE)
    });
    if is_json {
        if let Ok(parsed) = serde_json::from_str(&text) {
            return parsed;
        }
    }
    AnyValue::String(text)
}

fn header_text(value: &AnyValue) -> String {
    match value {
        AnyValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
