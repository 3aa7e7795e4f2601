//! Request read surface.
//!
//! # Responsibilities
//! - Expose the fields matching reads: path, detected locale, headers,
//!   query parameters, cookies
//! - Parse the query string and `Cookie` header once, up front
//!
//! # Design Decisions
//! - Immutable snapshot, cheap to clone (`Arc` inner); the engine and every
//!   handler share one parse
//! - Header lookup is case-insensitive via `http::HeaderMap`
//! - First value wins for repeated query keys and cookie names

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::header::{HeaderName, HeaderValue, COOKIE};
use axum::http::{HeaderMap, Request};
use cookie::Cookie;

/// Locale the host framework detected for a request, attached as a request
/// extension before the stack runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLocale(pub String);

/// Immutable view of one incoming request, scoped to what matching and
/// handlers need to read.
#[derive(Debug, Clone)]
pub struct RequestContext {
    inner: Arc<Parts>,
}

#[derive(Debug)]
struct Parts {
    path: String,
    locale: Option<String>,
    headers: HeaderMap,
    query: HashMap<String, String>,
    cookies: HashMap<String, String>,
}

impl RequestContext {
    /// Snapshot an incoming request.
    ///
    /// Query parameters come from the request URI, cookies from the
    /// `Cookie` header, and the detected locale from a [`DetectedLocale`]
    /// extension when the host framework attached one.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let query = request.uri().query().map(parse_query).unwrap_or_default();
        let cookies = request
            .headers()
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(parse_cookies)
            .unwrap_or_default();
        let locale = request
            .extensions()
            .get::<DetectedLocale>()
            .map(|locale| locale.0.clone());
        Self {
            inner: Arc::new(Parts {
                path: request.uri().path().to_string(),
                locale,
                headers: request.headers().clone(),
                query,
                cookies,
            }),
        }
    }

    /// Builder for assembling a context by hand (tests, demos).
    pub fn builder(path: impl Into<String>) -> RequestContextBuilder {
        RequestContextBuilder {
            path: path.into(),
            locale: None,
            headers: HeaderMap::new(),
            query: HashMap::new(),
            cookies: HashMap::new(),
        }
    }

    /// Request path, without the query string.
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Locale the host framework detected, if any.
    pub fn locale(&self) -> Option<&str> {
        self.inner.locale.as_deref()
    }

    /// Header value by name (case-insensitive). Non-UTF-8 values read as
    /// absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    /// First query parameter value for `key`.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.inner.query.get(key).map(String::as_str)
    }

    /// Cookie value by name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.inner.cookies.get(name).map(String::as_str)
    }
}

/// Builder for [`RequestContext`].
#[derive(Debug)]
pub struct RequestContextBuilder {
    path: String,
    locale: Option<String>,
    headers: HeaderMap,
    query: HashMap<String, String>,
    cookies: HashMap<String, String>,
}

impl RequestContextBuilder {
    /// Set the detected locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Add a header. Invalid names or values are ignored.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.headers.append(name, value);
        }
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Add a cookie.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies
            .entry(name.into())
            .or_insert_with(|| value.into());
        self
    }

    pub fn build(self) -> RequestContext {
        RequestContext {
            inner: Arc::new(Parts {
                path: self.path,
                locale: self.locale,
                headers: self.headers,
                query: self.query,
                cookies: self.cookies,
            }),
        }
    }
}

fn parse_query(raw: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    values
}

fn parse_cookies(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for cookie in Cookie::split_parse(raw).filter_map(Result::ok) {
        cookies
            .entry(cookie.name().to_string())
            .or_insert_with(|| cookie.value().to_string());
    }
    cookies
}
