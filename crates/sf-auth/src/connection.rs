//! Logged-in connection to a Salesforce instance.

use std::collections::HashMap;

use bulkline_sf_client::{ClientConfig, SfHttpClient};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::{Error, ErrorKind, Result};
use crate::login::{login_envelope, parse_login_response, LOGIN_SOAP_ACTION};
use crate::session::Session;
use crate::ASYNC_API_PATH;

/// Header carrying the session token on async API calls.
pub const SESSION_HEADER: &str = "X-SFDC-Session";

/// An authenticated connection to one Salesforce instance.
///
/// A `Connection` only exists after a successful login (or from an existing
/// [`Session`]), so every request it sends carries a session token.
#[derive(Debug, Clone)]
pub struct Connection {
    http: SfHttpClient,
    session: Session,
    base_url: String,
}

impl Connection {
    /// Log in through the SOAP partner endpoint with default client settings.
    ///
    /// `password` is the account password with the security token appended
    /// when the org requires one.
    pub async fn login(
        login_url: &Url,
        username: &str,
        password: &str,
        api_version: &str,
    ) -> Result<Self> {
        Self::login_with_config(login_url, username, password, api_version, ClientConfig::default())
            .await
    }

    /// Log in through the SOAP partner endpoint.
    ///
    /// Any transport failure, a status other than 200, or a response the
    /// session cannot be extracted from fails with a connection error. For
    /// non-200 responses the error carries the response body, or
    /// `Server Response Error:<status>` when there is none.
    #[instrument(skip(login_url, password, config), fields(login_url = %login_url))]
    pub async fn login_with_config(
        login_url: &Url,
        username: &str,
        password: &str,
        api_version: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = SfHttpClient::new(config).map_err(|e| {
            Error::with_source(ErrorKind::Connection(e.to_string()), e)
        })?;

        let request = http
            .post(login_url.as_str())
            .soap(login_envelope(username, password), LOGIN_SOAP_ACTION);

        let response = http.execute(request).await.map_err(|e| {
            warn!(error = %e, "Login request failed");
            Error::with_source(
                ErrorKind::Connection(format!("Failed to reach login endpoint: {}", e)),
                e,
            )
        })?;

        let status = response.status();
        if status != 200 {
            let message = response.error_message().await;
            warn!(status, "Login rejected");
            return Err(Error::connection(message));
        }

        let body = response.text().await.map_err(|e| {
            Error::with_source(
                ErrorKind::Connection(format!("Failed to read login response: {}", e)),
                e,
            )
        })?;

        let session = parse_login_response(&body, api_version)?;
        info!(instance_host = %session.instance_host(), "Logged in");

        Ok(Self::with_client(http, session))
    }

    /// Wrap a session obtained elsewhere.
    pub fn from_session(session: Session, config: ClientConfig) -> Result<Self> {
        let http = SfHttpClient::new(config)?;
        Ok(Self::with_client(http, session))
    }

    fn with_client(http: SfHttpClient, session: Session) -> Self {
        let base_url = format!("https://{}", session.instance_host());
        Self {
            http,
            session,
            base_url,
        }
    }

    /// Send async API calls to `instance_url` instead of `https://<instance host>`.
    ///
    /// Useful for proxies and mock servers.
    pub fn with_instance_url(mut self, instance_url: impl Into<String>) -> Self {
        self.base_url = instance_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The session this connection authenticates with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Base URL async API calls are sent to.
    pub fn instance_url(&self) -> &str {
        &self.base_url
    }

    /// Full async API URL for a path relative to `/services/async/<version>/`.
    pub fn async_url(&self, path: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.base_url,
            ASYNC_API_PATH,
            self.session.api_version(),
            path.trim_start_matches('/')
        )
    }

    /// POST `body` to an async API path and return the response body.
    ///
    /// The session header is always attached and overrides any header of
    /// the same name in `headers`. Statuses in `[200, 400)` succeed; others
    /// fail with `ErrorKind::Http` carrying the error body.
    #[instrument(skip(self, body, headers))]
    pub async fn post(
        &self,
        path: &str,
        body: impl Into<String>,
        headers: &HashMap<String, String>,
    ) -> Result<String> {
        let url = self.async_url(path);
        debug!(url = %url, "Posting to async API");

        let request = self
            .http
            .post(url)
            .headers(headers)
            .header(SESSION_HEADER, self.session.session_id())
            .body(body);

        Ok(self.http.send_text(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn login_response(server_url: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><soapenv:Body><loginResponse><result><passwordExpired>false</passwordExpired><serverUrl>{}</serverUrl><sessionId>thisissessionid</sessionId><userId>005xx000001SvQmAAK</userId></result></loginResponse></soapenv:Body></soapenv:Envelope>"#,
            server_url
        )
    }

    const LOGIN_FAULT: &str = r#"<?xml version="1.0" encoding="UTF-8"?><soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body><soapenv:Fault><faultcode>INVALID_LOGIN</faultcode><faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring></soapenv:Fault></soapenv:Body></soapenv:Envelope>"#;

    async fn login_server(status: u16, body: String) -> (MockServer, Url) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/Soap/u/41.0"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/services/Soap/u/41.0", server.uri())).unwrap();
        (server, url)
    }

    fn session() -> Session {
        Session::new(
            "thisissessionid",
            "https://na1.salesforce.com/services/Soap/u/41.0/00D",
            "41.0",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_production() {
        let (_server, url) = login_server(
            200,
            login_response("https://xxxxx.my.salesforce.com/services/Soap/u/41.0/00Dxx"),
        )
        .await;

        let connection = Connection::login(&url, "user@example.com", "secret", "41.0")
            .await
            .unwrap();

        assert_eq!(connection.session().session_id(), "thisissessionid");
        assert_eq!(connection.session().instance_host(), "xxxxx.my.salesforce.com");
        assert_eq!(connection.instance_url(), "https://xxxxx.my.salesforce.com");
        assert_eq!(
            connection.async_url("job"),
            "https://xxxxx.my.salesforce.com/services/async/41.0/job"
        );
    }

    #[tokio::test]
    async fn test_login_sandbox_instance() {
        let (_server, url) = login_server(
            200,
            login_response("https://xxxxx--sandbox.my.salesforce.com/services/Soap/u/41.0/00Dxx"),
        )
        .await;

        let connection = Connection::login(&url, "user@example.com.sandbox", "secret", "41.0")
            .await
            .unwrap();

        assert_eq!(
            connection.session().instance_host(),
            "xxxxx--sandbox.my.salesforce.com"
        );
    }

    #[tokio::test]
    async fn test_login_sends_soap_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/Soap/u/41.0"))
            .and(header("SOAPAction", "login"))
            .and(header("Content-Type", "text/xml; charset=utf-8"))
            .and(body_string_contains(
                "<n1:username>jane&amp;joe@example.com</n1:username>",
            ))
            .and(body_string_contains("<n1:password>pa&lt;ss</n1:password>"))
            .respond_with(ResponseTemplate::new(200).set_body_string(login_response(
                "https://na1.salesforce.com/services/Soap/u/41.0/00Dxx",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/services/Soap/u/41.0", server.uri())).unwrap();
        let connection = Connection::login(&url, "jane&joe@example.com", "pa<ss", "41.0")
            .await
            .unwrap();
        assert_eq!(connection.session().instance_host(), "na1.salesforce.com");
    }

    #[tokio::test]
    async fn test_login_fault_carries_body() {
        let (_server, url) = login_server(500, LOGIN_FAULT.to_string()).await;

        let err = Connection::login(&url, "user@example.com", "wrong", "41.0")
            .await
            .unwrap_err();

        assert!(err.is_connection_error());
        assert!(err.to_string().contains("INVALID_LOGIN"));
    }

    #[tokio::test]
    async fn test_login_failure_without_body() {
        let (_server, url) = login_server(500, String::new()).await;

        let err = Connection::login(&url, "user@example.com", "secret", "41.0")
            .await
            .unwrap_err();

        assert!(err.is_connection_error());
        assert_eq!(err.to_string(), "Connection error: Server Response Error:500");
    }

    #[tokio::test]
    async fn test_login_only_200_is_success() {
        let (_server, url) = login_server(
            201,
            login_response("https://na1.salesforce.com/services/Soap/u/41.0/00Dxx"),
        )
        .await;

        let err = Connection::login(&url, "user@example.com", "secret", "41.0")
            .await
            .unwrap_err();
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_login_unrecognised_server_url() {
        let (_server, url) = login_server(
            200,
            login_response("https://example.com/services/Soap/u/41.0/00Dxx"),
        )
        .await;

        let err = Connection::login(&url, "user@example.com", "secret", "41.0")
            .await
            .unwrap_err();

        assert!(err.is_connection_error());
        assert!(err
            .to_string()
            .contains("Unable to get the server instance name:https://example.com/services/Soap/u/41.0/00Dxx"));
    }

    #[tokio::test]
    async fn test_login_missing_session_id() {
        let body = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body><loginResponse><result><serverUrl>https://na1.salesforce.com/services/Soap/u/41.0</serverUrl></result></loginResponse></soapenv:Body></soapenv:Envelope>"#;
        let (_server, url) = login_server(200, body.to_string()).await;

        let err = Connection::login(&url, "user@example.com", "secret", "41.0")
            .await
            .unwrap_err();
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_login_truncated_response() {
        let full = login_response("https://na1.salesforce.com/services/Soap/u/41.0/00D");
        let cut = full.find("<userId>").unwrap() + "<userId>005".len();
        let (_server, url) = login_server(200, full[..cut].to_string()).await;

        let err = Connection::login(&url, "user@example.com", "secret", "41.0")
            .await
            .unwrap_err();
        assert!(err.is_connection_error());
        assert!(err.to_string().contains("Failed to parse login response"));
    }

    #[tokio::test]
    async fn test_login_unreachable_endpoint() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{}/services/Soap/u/41.0", port)).unwrap();

        let err = Connection::login(&url, "user@example.com", "secret", "41.0")
            .await
            .unwrap_err();

        assert!(err.is_connection_error());
        assert!(err.source.is_some());
    }

    #[tokio::test]
    async fn test_post_attaches_session_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/async/41.0/job"))
            .and(header(SESSION_HEADER, "thisissessionid"))
            .and(header("Content-Type", "application/xml; charset=UTF-8"))
            .and(body_string("<jobInfo/>"))
            .respond_with(ResponseTemplate::new(201).set_body_string("<jobInfo><id>X</id></jobInfo>"))
            .expect(1)
            .mount(&server)
            .await;

        let connection = Connection::from_session(session(), ClientConfig::default())
            .unwrap()
            .with_instance_url(format!("{}/", server.uri()));

        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/xml; charset=UTF-8".to_string(),
        );
        headers.insert(SESSION_HEADER.to_string(), "spoofed".to_string());

        let body = connection.post("job", "<jobInfo/>", &headers).await.unwrap();
        assert_eq!(body, "<jobInfo><id>X</id></jobInfo>");
    }

    #[tokio::test]
    async fn test_post_keeps_trailing_slash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/async/41.0/job/750x/batch/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<batchInfo/>"))
            .expect(1)
            .mount(&server)
            .await;

        let connection = Connection::from_session(session(), ClientConfig::default())
            .unwrap()
            .with_instance_url(server.uri());

        connection
            .post("job/750x/batch/", "Name\nAcme\n", &HashMap::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_post_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/async/41.0/job"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                "<error><exceptionCode>InvalidJob</exceptionCode></error>",
            ))
            .mount(&server)
            .await;

        let connection = Connection::from_session(session(), ClientConfig::default())
            .unwrap()
            .with_instance_url(server.uri());

        let err = connection
            .post("job", "<jobInfo/>", &HashMap::new())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("InvalidJob"));
    }

    #[test]
    fn test_connection_debug_redacts_token() {
        let connection = Connection::from_session(session(), ClientConfig::default()).unwrap();
        let debug = format!("{:?}", connection);
        assert!(!debug.contains("thisissessionid"));
    }
}
