//! SOAP partner `login` call: endpoint URLs, request envelope and response parsing.

use bulkline_sf_client::security;
use url::Url;

use crate::error::{Error, ErrorKind, Result};
use crate::session::Session;
use crate::{LOGIN_PATH, PRODUCTION_LOGIN_URL, SANDBOX_LOGIN_URL};

/// SOAPAction header value of the login call.
pub(crate) const LOGIN_SOAP_ACTION: &str = "login";

/// Salesforce environment a user logs in to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginEnvironment {
    /// `login.salesforce.com`
    #[default]
    Production,
    /// `test.salesforce.com`
    Sandbox,
}

impl LoginEnvironment {
    /// Pick the environment from a sandbox flag.
    pub fn from_sandbox(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Base login host URL of this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_LOGIN_URL,
            Self::Sandbox => SANDBOX_LOGIN_URL,
        }
    }

    /// SOAP login endpoint of this environment for the given API version.
    pub fn login_url(&self, api_version: &str) -> Result<Url> {
        if !security::url::is_safe_api_version(api_version) {
            return Err(Error::new(ErrorKind::InvalidInput(format!(
                "Invalid API version: {}",
                api_version
            ))));
        }
        let url = Url::parse(&format!("{}{}/{}", self.base_url(), LOGIN_PATH, api_version))?;
        Ok(url)
    }
}

/// SOAP login endpoint: `<base>/services/Soap/u/<api_version>`.
///
/// ```rust
/// use bulkline_sf_auth::login_url;
///
/// let url = login_url("41.0", true).unwrap();
/// assert_eq!(url.as_str(), "https://test.salesforce.com/services/Soap/u/41.0");
/// ```
pub fn login_url(api_version: &str, sandbox: bool) -> Result<Url> {
    LoginEnvironment::from_sandbox(sandbox).login_url(api_version)
}

/// SOAP 1.1 envelope of the partner `login` call.
pub(crate) fn login_envelope(username: &str, password: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
  <env:Body>
    <n1:login xmlns:n1="urn:partner.soap.sforce.com">
      <n1:username>{}</n1:username>
      <n1:password>{}</n1:password>
    </n1:login>
  </env:Body>
</env:Envelope>"#,
        security::xml::escape(username),
        security::xml::escape(password)
    )
}

/// Extract the session from a successful login response body.
///
/// `sessionId` and `serverUrl` are located by local name, whatever
/// namespace prefix the server uses.
pub(crate) fn parse_login_response(body: &str, api_version: &str) -> Result<Session> {
    let session_id = login_field(body, "sessionId")?;
    let server_url = login_field(body, "serverUrl")?;
    Session::new(session_id, server_url, api_version)
}

fn login_field(body: &str, name: &str) -> Result<String> {
    bulkline_sf_client::xml::require_text_by_local_name(body, name).map_err(|e| {
        Error::with_source(
            ErrorKind::Connection(format!("Failed to parse login response: {}", e)),
            e,
        )
    })
}
