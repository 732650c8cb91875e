use super::{
    RawResponse,
    WithRawResponse,
    request_url,
    retry,
};
use crate::{
    auth::Auth,
    base_client::{
        BaseClientOptions,
        BaseRequestOptions,
        DEFAULT_MAX_RETRIES,
        DEFAULT_TIMEOUT,
    },
    errors::{
        Error,
        Result,
        TestOrgApiError,
        TestOrgApiTimeoutError,
    },
};
use rand::Rng;
use reqwest::{
    Method,
    header::{
        HeaderMap,
        HeaderName,
        HeaderValue,
        USER_AGENT,
    },
};
use serde::de::DeserializeOwned;
use std::{
    collections::BTreeMap,
    time::Duration,
};
use tokio_util::sync::CancellationToken;
use tracing::{
    debug,
    warn,
};
use url::Url;

const SDK_NAME: &str = env!("CARGO_PKG_NAME");
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One logical API call as described by a resource client
#[derive(Debug)]
pub(crate) struct FetchArgs<'a> {
    pub method: Method,
    pub path: &'a [&'a str],
    pub body: Option<serde_json::Value>,
    pub options: Option<BaseRequestOptions>,
}

impl<'a> FetchArgs<'a> {
    pub fn new(method: Method, path: &'a [&'a str]) -> Self {
        Self {
            method,
            path,
            body: None,
            options: None,
        }
    }

    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn options(mut self, options: Option<BaseRequestOptions>) -> Self {
        self.options = options;
        self
    }
}

/// Executes requests against one base URL with shared headers, timeout and
/// retry defaults
#[derive(Debug)]
pub(crate) struct Fetcher {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
}

impl Fetcher {
    pub fn new(options: &BaseClientOptions) -> Result<Self> {
        options.validate()?;

        let base_url = Url::parse(options.resolved_base_url())
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))?;

        let mut headers = sdk_headers()?;
        extend_headers(&mut headers, &options.headers)?;
        if let Some(token) = &options.token {
            Auth::add_auth_config(&mut headers, token)?;
        }

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            timeout: options.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_retries: options.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send the request, retrying retryable statuses, and decode a success
    /// body as `T`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        args: FetchArgs<'_>,
    ) -> Result<WithRawResponse<T>> {
        let options = args.options.unwrap_or_default();
        let url = request_url::build(&self.base_url, args.path, &options.query_params)?;
        let path = request_url::display_path(args.path);

        let timeout = options.timeout.unwrap_or(self.timeout);
        let max_retries = options.max_retries.unwrap_or(self.max_retries);
        let mut headers = HeaderMap::new();
        extend_headers(&mut headers, &options.headers)?;
        let signal = options.abort_signal.unwrap_or_default();

        let mut attempt: u32 = 0;
        loop {
            let mut request = self
                .http
                .request(args.method.clone(), url.clone())
                .headers(headers.clone())
                .timeout(timeout);
            if let Some(body) = &args.body {
                request = request.json(body);
            }

            debug!(
                target: "testorg_api_client::fetcher",
                method = %args.method,
                %url,
                attempt,
                "Sending request"
            );
            let response = tokio::select! {
                biased;
                _ = signal.cancelled() => return Err(TestOrgApiError::aborted().into()),
                result = request.send() => result,
            };
            let response = match response {
                Ok(response) => response,
                Err(e) if e.is_timeout() => {
                    return Err(TestOrgApiTimeoutError::for_request(&args.method, &path).into());
                }
                Err(e) => return Err(e.into()),
            };

            let status = response.status();
            debug!(
                target: "testorg_api_client::fetcher",
                method = %args.method,
                %url,
                status = status.as_u16(),
                "Received response"
            );

            if retry::is_retryable(status) && attempt < max_retries {
                let jitter: f64 = rand::rng().random();
                let delay =
                    retry::retry_delay(response.headers(), attempt, chrono::Utc::now(), jitter);
                warn!(
                    target: "testorg_api_client::fetcher",
                    method = %args.method,
                    %url,
                    status = status.as_u16(),
                    "Request failed (attempt {}/{}), retrying in {:?}",
                    attempt + 1,
                    max_retries + 1,
                    delay
                );
                drop(response);

                tokio::select! {
                    biased;
                    _ = signal.cancelled() => return Err(TestOrgApiError::aborted().into()),
                    _ = tokio::time::sleep(delay) => {}
                }
                attempt += 1;
                continue;
            }

            return read_response(response, &signal, &args.method, &path).await;
        }
    }
}

async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
    signal: &CancellationToken,
    method: &Method,
    path: &str,
) -> Result<WithRawResponse<T>> {
    let status = response.status();
    let raw_response = RawResponse::from_response(&response);

    let text = tokio::select! {
        biased;
        _ = signal.cancelled() => return Err(TestOrgApiError::aborted().into()),
        result = response.text() => result,
    };
    let text = text.map_err(|e| {
        if e.is_timeout() {
            Error::from(TestOrgApiTimeoutError::for_request(method, path))
        } else {
            Error::from(e)
        }
    })?;

    if status.is_success() {
        let data = if text.trim().is_empty() {
            serde_json::from_value(serde_json::Value::Null)?
        } else {
            serde_json::from_str(&text)?
        };
        return Ok(WithRawResponse { data, raw_response });
    }

    let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
    Err(TestOrgApiError::from_response(status.as_u16(), body, raw_response).into())
}

fn sdk_headers() -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert("x-fern-language", HeaderValue::from_static("Rust"));
    headers.insert("x-fern-sdk-name", HeaderValue::from_static(SDK_NAME));
    headers.insert("x-fern-sdk-version", HeaderValue::from_static(SDK_VERSION));
    let user_agent = format!("{SDK_NAME}/{SDK_VERSION}");
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&user_agent)
            .map_err(|e| Error::ConfigError(format!("Invalid user agent: {e}")))?,
    );
    Ok(headers)
}

/// Insert `extra` into `headers`, replacing values with the same name
fn extend_headers(headers: &mut HeaderMap, extra: &BTreeMap<String, String>) -> Result<()> {
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::ConfigError(format!("Invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::ConfigError(format!("Invalid value for header '{name}': {e}")))?;
        headers.insert(name, value);
    }
    Ok(())
}
