use std::collections::BTreeMap;

/// Metadata of the HTTP response behind a call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub url: String,
    /// Header names are lowercase; repeated headers are joined with ", "
    pub headers: BTreeMap<String, String>,
}

impl RawResponse {
    pub(crate) fn from_response(response: &reqwest::Response) -> Self {
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in response.headers() {
            let Ok(value) = value.to_str() else {
                continue;
            };
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }

        let status = response.status();
        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url: response.url().to_string(),
            headers,
        }
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// A decoded response body together with its [`RawResponse`]
#[derive(Debug, Clone, PartialEq)]
pub struct WithRawResponse<T> {
    pub data: T,
    pub raw_response: RawResponse,
}

impl<T> WithRawResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithRawResponse<U> {
        WithRawResponse {
            data: f(self.data),
            raw_response: self.raw_response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawResponse {
        RawResponse {
            status: 200,
            status_text: "OK".to_string(),
            url: "http://localhost/movies".to_string(),
            headers: BTreeMap::from([("x-request-id".to_string(), "abc".to_string())]),
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let raw = raw();
        assert_eq!(raw.header("X-Request-Id"), Some("abc"));
        assert_eq!(raw.header("x-request-id"), Some("abc"));
        assert_eq!(raw.header("missing"), None);
    }

    #[test]
    fn test_map_keeps_raw_response() {
        let response = WithRawResponse {
            data: 21,
            raw_response: raw(),
        };
        let mapped = response.map(|n| n * 2);
        assert_eq!(mapped.data, 42);
        assert_eq!(mapped.raw_response, raw());
        assert_eq!(mapped.into_data(), 42);
    }
}
