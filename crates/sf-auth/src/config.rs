//! Login settings, built in code or loaded from the environment.

use bulkline_sf_client::ClientConfig;
use url::Url;

use crate::connection::Connection;
use crate::error::{Error, ErrorKind, Result};
use crate::login::LoginEnvironment;

/// Everything needed to open a [`Connection`].
///
/// The password is redacted in Debug output.
#[derive(Clone)]
pub struct LoginConfig {
    username: String,
    password: String,
    api_version: String,
    environment: LoginEnvironment,
}

impl std::fmt::Debug for LoginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("environment", &self.environment)
            .finish()
    }
}

impl LoginConfig {
    /// Production login with the default API version.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_version: bulkline_sf_client::DEFAULT_API_VERSION.to_string(),
            environment: LoginEnvironment::Production,
        }
    }

    /// Load login settings from environment variables.
    ///
    /// - `SF_USERNAME` / `SALESFORCE_USERNAME` (required)
    /// - `SF_PASSWORD` / `SALESFORCE_PASSWORD` (required, security token appended)
    /// - `SF_API_VERSION` / `SALESFORCE_API_VERSION` (default `41.0`)
    /// - `SF_SANDBOX` / `SALESFORCE_SANDBOX` (`true` or `1` selects the sandbox)
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("SF_USERNAME")
            .or_else(|_| std::env::var("SALESFORCE_USERNAME"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("SF_USERNAME".to_string())))?;

        let password = std::env::var("SF_PASSWORD")
            .or_else(|_| std::env::var("SALESFORCE_PASSWORD"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("SF_PASSWORD".to_string())))?;

        let api_version = std::env::var("SF_API_VERSION")
            .or_else(|_| std::env::var("SALESFORCE_API_VERSION"))
            .unwrap_or_else(|_| bulkline_sf_client::DEFAULT_API_VERSION.to_string());

        let sandbox = std::env::var("SF_SANDBOX")
            .or_else(|_| std::env::var("SALESFORCE_SANDBOX"))
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        Ok(Self::new(username, password)
            .with_api_version(api_version)
            .with_environment(LoginEnvironment::from_sandbox(sandbox)))
    }

    /// Set the API version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the login environment.
    pub fn with_environment(mut self, environment: LoginEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Username to log in as.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// API version to log in with.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Environment to log in to.
    pub fn environment(&self) -> LoginEnvironment {
        self.environment
    }

    /// SOAP login endpoint for these settings.
    pub fn login_url(&self) -> Result<Url> {
        self.environment.login_url(&self.api_version)
    }

    /// Log in with default client settings.
    pub async fn login(&self) -> Result<Connection> {
        self.login_with_config(ClientConfig::default()).await
    }

    /// Log in with the given client settings.
    pub async fn login_with_config(&self, config: ClientConfig) -> Result<Connection> {
        let url = self.login_url()?;
        Connection::login_with_config(&url, &self.username, &self.password, &self.api_version, config)
            .await
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1")
}
