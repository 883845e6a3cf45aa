// Per-call request description
//
// A `PreparedRequest` is built fresh for every call, mutated in place by the
// auth helpers, and consumed by an `HttpExecutor`. Nothing in it is shared.

use std::collections::BTreeMap;

use reqwest::Method;

pub const CONTENT_TYPE: &str = "content-type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Raw request body plus the content type it is declared as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content: String,
    pub content_type: &'static str,
}

impl RequestBody {
    pub fn json(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: CONTENT_TYPE_JSON,
        }
    }
}

/// An HTTP request described as plain data.
///
/// Header names are stored lower-cased, so setting `Authorization` twice
/// leaves a single entry. The URL is kept as text and only parsed when the
/// request is executed.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
}

impl PreparedRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Attach `content` verbatim as a JSON body. The text is not validated.
    pub fn with_json_body(mut self, content: impl Into<String>) -> Self {
        self.body = Some(RequestBody::json(content));
        self
    }

    /// Insert or replace a header.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn body_text(&self) -> Option<&str> {
        self.body.as_ref().map(|b| b.content.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_unique_case_insensitively() {
        let mut req = PreparedRequest::get("https://host/api");
        req.set_header("Authorization", "Basic a");
        req.set_header("AUTHORIZATION", "Basic b");

        assert_eq!(req.headers().count(), 1);
        assert_eq!(req.header("authorization"), Some("Basic b"));
    }

    #[test]
    fn json_body_is_kept_verbatim() {
        let req = PreparedRequest::post("https://host/api").with_json_body("{\"foo\", \"bar\"}");
        let body = req.body.as_ref().unwrap();
        assert_eq!(body.content, "{\"foo\", \"bar\"}");
        assert_eq!(body.content_type, CONTENT_TYPE_JSON);
        assert_eq!(req.method, Method::POST);
    }

    #[test]
    fn get_has_no_body() {
        let req = PreparedRequest::get("https://host/api");
        assert!(req.body_text().is_none());
        assert_eq!(req.headers().count(), 0);
    }
}
