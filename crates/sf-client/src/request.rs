//! HTTP request building for the SOAP login and async API calls.

use std::collections::HashMap;

/// Content type of SOAP requests.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Content type of async API XML documents.
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

/// Content type of async API CSV batches.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=UTF-8";

/// Builder for HTTP POST requests, the only method the login and async API calls use.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Look up a header set on this request.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add a header. A header with the same name (ignoring case) is replaced.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Add every header from a map.
    pub fn headers<'a, I>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        headers
            .into_iter()
            .fold(self, |req, (name, value)| req.header(name.as_str(), value.as_str()))
    }

    /// Set a raw text body, leaving Content-Type to the caller.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set an XML body (async API job documents).
    pub fn xml(self, data: impl Into<String>) -> Self {
        self.body(data).header("Content-Type", XML_CONTENT_TYPE)
    }

    /// Set a CSV body (async API batches).
    pub fn csv(self, data: impl Into<String>) -> Self {
        self.body(data).header("Content-Type", CSV_CONTENT_TYPE)
    }

    /// Set a SOAP envelope body and the SOAPAction header.
    pub fn soap(self, envelope: impl Into<String>, action: &str) -> Self {
        self.body(envelope)
            .header("Content-Type", SOAP_CONTENT_TYPE)
            .header("SOAPAction", action)
    }
}
