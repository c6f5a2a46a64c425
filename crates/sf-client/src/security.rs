//! Security utilities for SOAP and async API requests.
//!
//! Every value interpolated into an XML document or a URL path MUST go
//! through this module.
//!
//! ## XML Escaping
//!
//! ```rust
//! use bulkline_sf_client::security::xml;
//!
//! // CORRECT - Always escape values placed in XML templates
//! let user = xml::escape("jane&joe@example.com");
//! let body = format!("<n1:username>{}</n1:username>", user);
//!
//! // WRONG - NEVER do this
//! // let body = format!("<n1:username>{}</n1:username>", username);
//! ```
//!
//! ## URL Path Encoding
//!
//! ```rust
//! use bulkline_sf_client::security::url;
//!
//! let job_id = url::encode_param("750x0/../secret");
//! let path = format!("job/{}/batch/", job_id);
//! ```

/// XML escaping utilities for SOAP and async API documents.
pub mod xml {
    /// Escape a string for safe inclusion in XML content.
    ///
    /// This escapes the five predefined XML entities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bulkline_sf_client::security::xml;
    ///
    /// let safe = xml::escape("Hello <World> & 'Friends'");
    /// assert_eq!(safe, "Hello &lt;World&gt; &amp; &apos;Friends&apos;");
    /// ```
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}

/// URL encoding utilities for path safety.
pub mod url {
    /// URL-encode a path segment.
    ///
    /// User-provided values cannot break out of the path they are placed in.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bulkline_sf_client::security::url;
    ///
    /// assert_eq!(url::encode_param("001/../../secret"), "001%2F..%2F..%2Fsecret");
    /// ```
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Validate an API version before it is embedded in a URL path.
    ///
    /// Accepts non-empty values made of ASCII digits, letters and dots
    /// (e.g. `41.0`).
    ///
    /// ```rust
    /// use bulkline_sf_client::security::url;
    ///
    /// assert!(url::is_safe_api_version("41.0"));
    /// assert!(!url::is_safe_api_version("41.0/../m"));
    /// assert!(!url::is_safe_api_version(""));
    /// ```
    #[must_use]
    pub fn is_safe_api_version(version: &str) -> bool {
        !version.is_empty()
            && version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod url_tests {
        use super::url::*;

        #[test]
        fn test_encode_param() {
            assert_eq!(encode_param("simple"), "simple");
            assert_eq!(encode_param("has space"), "has%20space");
            assert_eq!(encode_param("path/traversal"), "path%2Ftraversal");
            assert_eq!(encode_param("../../etc/passwd"), "..%2F..%2Fetc%2Fpasswd");
            assert_eq!(encode_param("750x00000000001AAA"), "750x00000000001AAA");
        }

        #[test]
        fn test_is_safe_api_version() {
            assert!(is_safe_api_version("41.0"));
            assert!(is_safe_api_version("51.0"));
            assert!(is_safe_api_version("apiVersion"));

            assert!(!is_safe_api_version(""));
            assert!(!is_safe_api_version("41.0/job"));
            assert!(!is_safe_api_version("41.0?x=1"));
            assert!(!is_safe_api_version("41.0#frag"));
            assert!(!is_safe_api_version("41 0"));
        }
    }

    mod xml_tests {
        use super::xml::*;

        #[test]
        fn test_escape() {
            assert_eq!(escape("hello"), "hello");
            assert_eq!(escape("<tag>"), "&lt;tag&gt;");
            assert_eq!(escape("&amp;"), "&amp;amp;");
            assert_eq!(escape("\"quoted\""), "&quot;quoted&quot;");
            assert_eq!(escape("it's"), "it&apos;s");
            assert_eq!(
                escape("p@ss<w>rd&token"),
                "p@ss&lt;w&gt;rd&amp;token"
            );
        }
    }
}
