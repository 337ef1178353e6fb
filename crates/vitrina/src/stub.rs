//! Network request stubbing.
//!
//! A stubbed route is a (method, URL pattern, fixture body) triple registered
//! on a session before navigation. When the page under test issues a matching
//! request, the canned response is returned instead of touching the network.

use crate::result::{VitrinaError, VitrinaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// HTTP methods for request matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// PUT request
    Put,
    /// DELETE request
    Delete,
    /// Any method
    Any,
}

impl HttpMethod {
    /// Parse from a method string; unknown methods map to `Any`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            _ => Self::Any,
        }
    }

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Any => "*",
        }
    }

    /// Check whether this method matches another
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        *self == Self::Any || *other == Self::Any || *self == *other
    }
}

/// Pattern for matching request URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UrlPattern {
    /// Exact URL match
    Exact(String),
    /// Prefix match
    Prefix(String),
    /// Contains substring
    Contains(String),
    /// Glob pattern (e.g. `**/api/support.json`)
    Glob(String),
    /// Regex match
    Regex(String),
    /// Match any URL
    Any,
}

impl UrlPattern {
    /// Check if a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(pattern) => url == pattern,
            Self::Prefix(pattern) => url.starts_with(pattern),
            Self::Contains(pattern) => url.contains(pattern),
            Self::Glob(pattern) => Self::glob_matches(pattern, url),
            Self::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(url))
                .unwrap_or(false),
            Self::Any => true,
        }
    }

    /// Simple glob matching for URLs: `*` matches any run of characters.
    fn glob_matches(pattern: &str, url: &str) -> bool {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.is_empty() {
            return url.is_empty();
        }

        let mut pos = 0;
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            if let Some(found) = url[pos..].find(part) {
                if i == 0 && found != 0 {
                    return false;
                }
                pos += found + part.len();
            } else {
                return false;
            }
        }

        pattern.ends_with('*') || pos == url.len()
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(s) | Self::Prefix(s) | Self::Contains(s) | Self::Glob(s)
            | Self::Regex(s) => write!(f, "{s}"),
            Self::Any => write!(f, "*"),
        }
    }
}

/// A canned HTTP response substituted for a live one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: Vec<u8>,
    /// Content type
    pub content_type: String,
}

impl Default for StubResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: Vec::new(),
            content_type: "application/json".to_string(),
        }
    }
}

impl StubResponse {
    /// Create an empty 200 response
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a 200 JSON response from a serializable value
    pub fn json<T: Serialize>(data: &T) -> VitrinaResult<Self> {
        let body = serde_json::to_vec(data)?;
        Ok(Self {
            body,
            ..Self::default()
        })
    }

    /// Create a 200 text response
    #[must_use]
    pub fn text(content: &str) -> Self {
        Self {
            body: content.as_bytes().to_vec(),
            content_type: "text/plain".to_string(),
            ..Self::default()
        }
    }

    /// Create a response from raw JSON bytes (e.g. a fixture file)
    #[must_use]
    pub fn json_bytes(body: Vec<u8>) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Set the status code
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Body as a lossy UTF-8 string
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// A request the registry saw during a navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedRequest {
    /// Request URL
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Whether a stub answered it
    pub stubbed: bool,
}

/// A registered stub route
#[derive(Debug, Clone)]
pub struct StubbedRoute {
    /// URL pattern to match
    pub pattern: UrlPattern,
    /// HTTP method to match
    pub method: HttpMethod,
    /// Response to return
    pub response: StubResponse,
    /// Number of times this route has matched
    pub match_count: usize,
}

impl StubbedRoute {
    /// Create a new route
    #[must_use]
    pub fn new(pattern: UrlPattern, method: HttpMethod, response: StubResponse) -> Self {
        Self {
            pattern,
            method,
            response,
            match_count: 0,
        }
    }

    /// Check if this route matches a request
    #[must_use]
    pub fn matches(&self, url: &str, method: &HttpMethod) -> bool {
        self.pattern.matches(url) && self.method.matches(method)
    }
}

/// Registry of stubbed routes for one session
#[derive(Debug, Default)]
pub struct StubRegistry {
    routes: Vec<StubbedRoute>,
    captured: Vec<CapturedRequest>,
}

impl StubRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route
    pub fn register(&mut self, route: StubbedRoute) {
        self.routes.push(route);
    }

    /// Register a GET route
    pub fn get(&mut self, pattern: UrlPattern, response: StubResponse) {
        self.register(StubbedRoute::new(pattern, HttpMethod::Get, response));
    }

    /// Number of registered routes
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Whether any routes are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Answer an outgoing request: returns the canned response when a route
    /// matches, None when the request should hit the network.
    pub fn handle_request(&mut self, url: &str, method: HttpMethod) -> Option<StubResponse> {
        for route in &mut self.routes {
            if route.matches(url, &method) {
                route.match_count += 1;
                debug!(url, pattern = %route.pattern, "request stubbed");
                self.captured.push(CapturedRequest {
                    url: url.to_string(),
                    method,
                    stubbed: true,
                });
                return Some(route.response.clone());
            }
        }
        self.captured.push(CapturedRequest {
            url: url.to_string(),
            method,
            stubbed: false,
        });
        None
    }

    /// Requests seen during the session
    #[must_use]
    pub fn captured_requests(&self) -> &[CapturedRequest] {
        &self.captured
    }

    /// Total matches recorded for routes matching `pattern`
    #[must_use]
    pub fn match_count(&self, pattern: &UrlPattern) -> usize {
        self.captured
            .iter()
            .filter(|r| r.stubbed && pattern.matches(&r.url))
            .count()
    }

    /// Assert that at least one request matching `pattern` was answered by
    /// a stub.
    pub fn assert_stubbed(&self, pattern: &UrlPattern) -> VitrinaResult<()> {
        if self.match_count(pattern) == 0 {
            return Err(VitrinaError::AssertionFailed {
                message: format!("expected a stubbed request matching `{pattern}`, saw none"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod http_method_tests {
        use super::*;

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!(HttpMethod::parse("get"), HttpMethod::Get);
            assert_eq!(HttpMethod::parse("POST"), HttpMethod::Post);
            assert_eq!(HttpMethod::parse("weird"), HttpMethod::Any);
        }

        #[test]
        fn any_matches_everything() {
            assert!(HttpMethod::Any.matches(&HttpMethod::Get));
            assert!(HttpMethod::Get.matches(&HttpMethod::Any));
            assert!(!HttpMethod::Get.matches(&HttpMethod::Post));
        }
    }

    mod url_pattern_tests {
        use super::*;

        #[test]
        fn glob_matches_support_endpoint() {
            let pattern = UrlPattern::Glob("**/api/support.json".to_string());
            assert!(pattern.matches("http://localhost:1337/api/support.json"));
            assert!(!pattern.matches("http://localhost:1337/api/other.json"));
        }

        #[test]
        fn glob_trailing_star_matches_rest() {
            let pattern = UrlPattern::Glob("http://localhost:1337/api/*".to_string());
            assert!(pattern.matches("http://localhost:1337/api/support.json"));
            assert!(!pattern.matches("http://other.host/api/support.json"));
        }

        #[test]
        fn exact_prefix_contains() {
            assert!(UrlPattern::Exact("a/b".into()).matches("a/b"));
            assert!(!UrlPattern::Exact("a/b".into()).matches("a/b/c"));
            assert!(UrlPattern::Prefix("http://l".into()).matches("http://localhost"));
            assert!(UrlPattern::Contains("/api/".into()).matches("x/api/y"));
        }

        #[test]
        fn regex_pattern() {
            let pattern = UrlPattern::Regex(r"/support\.json$".to_string());
            assert!(pattern.matches("http://localhost:1337/api/support.json"));
            assert!(!pattern.matches("http://localhost:1337/api/support.json?x=1"));
        }
    }

    mod stub_response_tests {
        use super::*;

        #[test]
        fn json_response_serializes_payload() {
            let response = StubResponse::json(&serde_json::json!([{"name": "Test 1"}])).unwrap();
            assert_eq!(response.status, 200);
            assert_eq!(response.content_type, "application/json");
            assert!(response.body_string().contains("Test 1"));
        }

        #[test]
        fn builders_set_status_and_headers() {
            let response = StubResponse::text("ok")
                .with_status(201)
                .with_header("X-Stub", "1");
            assert_eq!(response.status, 201);
            assert_eq!(response.headers.get("X-Stub"), Some(&"1".to_string()));
        }
    }

    mod registry_tests {
        use super::*;

        fn support_registry() -> StubRegistry {
            let mut registry = StubRegistry::new();
            registry.get(
                UrlPattern::Glob("**/api/support.json".to_string()),
                StubResponse::text("[]"),
            );
            registry
        }

        #[test]
        fn registration_is_reflected_in_route_count() {
            let registry = StubRegistry::new();
            assert!(registry.is_empty());
            assert_eq!(registry.route_count(), 0);

            let registry = support_registry();
            assert!(!registry.is_empty());
            assert_eq!(registry.route_count(), 1);
        }

        #[test]
        fn matching_request_is_answered_and_counted() {
            let mut registry = support_registry();
            let response =
                registry.handle_request("http://localhost:1337/api/support.json", HttpMethod::Get);
            assert!(response.is_some());
            assert_eq!(
                registry.match_count(&UrlPattern::Contains("support".into())),
                1
            );
        }

        #[test]
        fn wrong_method_passes_through() {
            let mut registry = support_registry();
            let response =
                registry.handle_request("http://localhost:1337/api/support.json", HttpMethod::Post);
            assert!(response.is_none());
            assert!(!registry.captured_requests()[0].stubbed);
        }

        #[test]
        fn assert_stubbed_reports_missing_match() {
            let mut registry = support_registry();
            let pattern = UrlPattern::Contains("support".into());
            assert!(registry.assert_stubbed(&pattern).is_err());

            registry.handle_request("http://localhost:1337/api/support.json", HttpMethod::Get);
            assert!(registry.assert_stubbed(&pattern).is_ok());
        }
    }
}
