// # UniFi DNS Manager
//
// This crate provides the UniFi Network static-DNS client for tudns.
//
// ## Behavior
//
// - Lazy login on first need; the session is dropped on any 401
// - One retry of the whole list → plan → write sequence after a 401
// - No write when the listed record already holds the target IP
// - No caching between calls; records are listed before every upsert
// - No retry of any other failure (the next scheduled pass is the retry)
//
// ## Authentication Modes
//
// - `Csrf` (UniFi OS): the login response carries an `X-Csrf-Token` header
//   and a session cookie. Both are sent back on every request.
// - `Bearer`: the login response body carries `{"token": "..."}`, sent back
//   as `Authorization: Bearer <token>`.
//
// ## API Reference
//
// - Login: POST `/api/auth/login`
// - List records: GET `/proxy/network/v2/api/site/default/static-dns`
// - Create record: POST `/proxy/network/v2/api/site/default/static-dns`
// - Update record: PUT `/proxy/network/v2/api/site/default/static-dns/:id`
//
// ## Security Requirements
//
// - Password and session token NEVER appear in logs or Debug output

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;
use tokio::sync::Mutex;
use tudns_core::config::{AuthMode, DeviceConfig};
use tudns_core::record::{AddressRecord, UpsertPlan, UpsertResult, plan_upsert};
use tudns_core::traits::{DnsManager, DnsManagerFactory};
use tudns_core::{Error, Result};

/// Login endpoint
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Static DNS collection endpoint
pub const STATIC_DNS_PATH: &str = "/proxy/network/v2/api/site/default/static-dns";

/// Header carrying the CSRF token in `AuthMode::Csrf`
const CSRF_HEADER: &str = "X-Csrf-Token";

/// Default HTTP timeout for API requests (10 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated-state artifact for one device
#[derive(Default)]
struct Session {
    /// CSRF or bearer token; `None` means unauthenticated
    token: Option<String>,
}

/// Static DNS entry as returned by the controller
#[derive(Debug, Deserialize)]
struct StaticDnsEntry {
    #[serde(rename = "_id")]
    id: String,
    key: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    record_type: Option<String>,
}

impl StaticDnsEntry {
    fn is_address_record(&self) -> bool {
        self.record_type
            .as_deref()
            .is_none_or(|t| t.eq_ignore_ascii_case("A"))
    }
}

/// Create/update request body
#[derive(Debug, Serialize)]
struct RecordPayload<'a> {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    key: &'a str,
    record_type: &'static str,
    value: String,
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct BearerLoginResponse {
    #[serde(default)]
    token: Option<String>,
}

/// UniFi controller client
///
/// Owns exactly one device's session. The session lock is held only while
/// reading, replacing or clearing the token, never across a business call.
pub struct UniFiClient {
    /// Base URL, scheme included, no trailing slash
    base_url: String,

    /// Login user
    username: String,

    /// Login password
    /// ⚠️ NEVER log this value
    password: String,

    /// Session authentication style
    auth_mode: AuthMode,

    /// HTTP client (cookie store enabled for CSRF sessions)
    client: reqwest::Client,

    /// Current session
    session: Mutex<Session>,
}

// Custom Debug implementation that hides credentials
impl std::fmt::Debug for UniFiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniFiClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("auth_mode", &self.auth_mode)
            .finish()
    }
}

impl UniFiClient {
    /// Create a new UniFi client
    ///
    /// # Parameters
    ///
    /// - `host`: Host or URL; `https://` is prepended when no scheme is given
    /// - `username` / `password`: Local controller credentials
    /// - `auth_mode`: How the session token is obtained and sent
    /// - `insecure_skip_verify_tls`: Accept self-signed certificates
    pub fn new(
        host: &str,
        username: impl Into<String>,
        password: impl Into<String>,
        auth_mode: AuthMode,
        insecure_skip_verify_tls: bool,
    ) -> Result<Self> {
        let base_url = normalize_host(host);

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .cookie_store(true)
            .danger_accept_invalid_certs(insecure_skip_verify_tls)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        tracing::info!(
            "Creating UniFi client for host: {} (insecureSkipVerify: {})",
            base_url,
            insecure_skip_verify_tls
        );

        Ok(Self {
            base_url,
            username: username.into(),
            password: password.into(),
            auth_mode,
            client,
            session: Mutex::new(Session::default()),
        })
    }

    /// Whether a session token is currently held
    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.token.is_some()
    }

    fn records_url(&self) -> String {
        format!("{}{}", self.base_url, STATIC_DNS_PATH)
    }

    /// Perform the credential exchange and return the token artifact
    async fn request_token(&self) -> Result<String> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        tracing::info!("Logging in to UniFi controller at {}", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": self.username,
                "password": self.password,
            }))
            .send()
            .await
            .map_err(|e| Error::auth(format!("failed to send login request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Login failed with status code: {}", status.as_u16());
            return Err(Error::auth(format!(
                "login failed with status: {}",
                status.as_u16()
            )));
        }

        let token = match self.auth_mode {
            AuthMode::Csrf => response
                .headers()
                .get(CSRF_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            AuthMode::Bearer => {
                let body: BearerLoginResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::auth(format!("invalid login response: {}", e)))?;
                body.token
            }
        };

        match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                tracing::info!("Successfully logged in to UniFi controller");
                Ok(token)
            }
            None => {
                tracing::error!("No session token received in login response");
                Err(Error::auth(match self.auth_mode {
                    AuthMode::Csrf => "no CSRF token received",
                    AuthMode::Bearer => "no bearer token received",
                }))
            }
        }
    }

    /// Current token, logging in first if the session is unauthenticated
    async fn session_token(&self) -> Result<String> {
        let mut session = self.session.lock().await;
        if let Some(token) = &session.token {
            return Ok(token.clone());
        }
        let token = self.request_token().await?;
        session.token = Some(token.clone());
        Ok(token)
    }

    async fn invalidate_session(&self) {
        self.session.lock().await.token = None;
    }

    fn authorize(&self, request: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        let request = request.header(reqwest::header::CONTENT_TYPE, "application/json");
        match self.auth_mode {
            AuthMode::Csrf => request.header(CSRF_HEADER, token),
            AuthMode::Bearer => request.bearer_auth(token),
        }
    }

    /// Issue a create (no id) or update-in-place (with id)
    async fn write_record(&self, id: Option<&str>, hostname: &str, ip: Ipv4Addr) -> Result<()> {
        let token = self.session_token().await?;
        let payload = RecordPayload {
            id,
            key: hostname,
            record_type: "A",
            value: ip.to_string(),
            enabled: true,
        };

        let request = match id {
            Some(id) => self.client.put(format!("{}/{}", self.records_url(), id)),
            None => self.client.post(self.records_url()),
        };

        let response = self
            .authorize(request, &token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::http(format!("failed to send DNS request: {}", e)))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => {
                self.invalidate_session().await;
                Err(Error::SessionExpired {
                    stage: "DNS operation",
                })
            }
            status => {
                tracing::error!("DNS operation failed with status code: {}", status.as_u16());
                Err(Error::status("DNS operation", status.as_u16()))
            }
        }
    }

    /// One list → plan → write sequence
    async fn try_upsert(&self, hostname: &str, ip: Ipv4Addr) -> Result<UpsertResult> {
        tracing::info!("Checking DNS record for {}", hostname);
        let records = self.list_address_records().await?;

        match plan_upsert(&records, hostname, ip) {
            UpsertPlan::Unchanged => {
                tracing::info!(
                    "DNS record for {} already has IP {}, no update needed",
                    hostname,
                    ip
                );
                Ok(UpsertResult::Unchanged)
            }
            UpsertPlan::Update { id, previous } => {
                tracing::info!(
                    "Updating DNS record for {} from {} to {}",
                    hostname,
                    previous,
                    ip
                );
                self.write_record(Some(&id), hostname, ip).await?;
                Ok(UpsertResult::Updated { previous })
            }
            UpsertPlan::Create => {
                tracing::info!("Creating new DNS record for {} with IP {}", hostname, ip);
                self.write_record(None, hostname, ip).await?;
                Ok(UpsertResult::Created)
            }
        }
    }
}

#[async_trait]
impl DnsManager for UniFiClient {
    async fn login(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        session.token = None;
        session.token = Some(self.request_token().await?);
        Ok(())
    }

    async fn list_address_records(&self) -> Result<Vec<AddressRecord>> {
        let token = self.session_token().await?;

        let response = self
            .authorize(self.client.get(self.records_url()), &token)
            .send()
            .await
            .map_err(|e| Error::http(format!("failed to send DNS entries request: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.invalidate_session().await;
            return Err(Error::SessionExpired {
                stage: "get DNS entries",
            });
        }
        if !status.is_success() {
            tracing::error!("Failed to get DNS entries with status code: {}", status.as_u16());
            return Err(Error::status("get DNS entries", status.as_u16()));
        }

        let entries: Vec<StaticDnsEntry> = response
            .json()
            .await
            .map_err(|e| Error::http(format!("failed to decode DNS entries response: {}", e)))?;

        let records: Vec<AddressRecord> = entries
            .into_iter()
            .filter(StaticDnsEntry::is_address_record)
            .map(|e| AddressRecord::new(e.id, e.key, e.value))
            .collect();

        tracing::debug!("Retrieved {} address records", records.len());
        Ok(records)
    }

    async fn upsert_address_record(&self, hostname: &str, ip: Ipv4Addr) -> Result<UpsertResult> {
        match self.try_upsert(hostname, ip).await {
            Err(e) if e.is_session_expired() => {
                tracing::warn!("UniFi session expired ({}), logging in again", e);
                self.try_upsert(hostname, ip).await
            }
            other => other,
        }
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

/// Prepend `https://` when no scheme is present and drop trailing slashes
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Factory for creating UniFi clients
pub struct UniFiFactory;

impl DnsManagerFactory for UniFiFactory {
    fn create(
        &self,
        device: &DeviceConfig,
        insecure_skip_verify_tls: bool,
    ) -> Result<Box<dyn DnsManager>> {
        if device.username.is_empty() {
            return Err(Error::config(format!(
                "UniFi device {} is missing a username",
                device.host
            )));
        }

        let client = UniFiClient::new(
            &device.host,
            device.username.clone(),
            device.password.clone(),
            device.auth_mode,
            device.insecure_skip_verify_tls || insecure_skip_verify_tls,
        )?;
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    const IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 10);

    fn csrf_client(server: &ServerGuard) -> UniFiClient {
        UniFiClient::new(&server.url(), "admin", "password", AuthMode::Csrf, false).unwrap()
    }

    async fn mock_csrf_login(server: &mut ServerGuard, hits: usize) -> mockito::Mock {
        server
            .mock("POST", LOGIN_PATH)
            .match_body(Matcher::PartialJson(json!({
                "username": "admin",
                "password": "password",
            })))
            .with_status(200)
            .with_header("X-Csrf-Token", "test-csrf-token")
            .expect(hits)
            .create_async()
            .await
    }

    async fn mock_list(server: &mut ServerGuard, body: serde_json::Value, hits: usize) -> mockito::Mock {
        server
            .mock("GET", STATIC_DNS_PATH)
            .match_header("x-csrf-token", "test-csrf-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(hits)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn csrf_login_stores_token() {
        let mut server = Server::new_async().await;
        let login = mock_csrf_login(&mut server, 1).await;
        let client = csrf_client(&server);

        assert!(!client.is_authenticated().await);
        client.login().await.unwrap();
        assert!(client.is_authenticated().await);
        login.assert_async().await;
    }

    #[tokio::test]
    async fn login_without_csrf_token_fails_closed() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", LOGIN_PATH)
            .with_status(200)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let err = client.login().await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)), "got {:?}", err);
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn rejected_login_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", LOGIN_PATH)
            .with_status(401)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let err = client.login().await.unwrap_err();
        assert!(err.to_string().contains("login failed with status: 401"));
    }

    #[tokio::test]
    async fn bearer_mode_uses_token_from_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", LOGIN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"token": "test-token"}).to_string())
            .create_async()
            .await;
        let list = server
            .mock("GET", STATIC_DNS_PATH)
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let client =
            UniFiClient::new(&server.url(), "admin", "password", AuthMode::Bearer, false).unwrap();
        let records = client.list_address_records().await.unwrap();

        assert!(records.is_empty());
        list.assert_async().await;
    }

    #[tokio::test]
    async fn bearer_login_without_token_fails_closed() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", LOGIN_PATH)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client =
            UniFiClient::new(&server.url(), "admin", "password", AuthMode::Bearer, false).unwrap();
        assert!(matches!(
            client.login().await,
            Err(Error::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn list_logs_in_lazily_once() {
        let mut server = Server::new_async().await;
        let login = mock_csrf_login(&mut server, 1).await;
        let list = mock_list(
            &mut server,
            json!([
                {"_id": "1", "key": "example.com", "value": "192.168.1.100", "record_type": "A"},
                {"_id": "2", "key": "test.com", "value": "192.168.1.101"},
                {"_id": "3", "key": "alias.com", "value": "example.com", "record_type": "CNAME"}
            ]),
            2,
        )
        .await;
        let client = csrf_client(&server);

        let records = client.list_address_records().await.unwrap();
        client.list_address_records().await.unwrap();

        assert_eq!(
            records,
            vec![
                AddressRecord::new("1", "example.com", "192.168.1.100"),
                AddressRecord::new("2", "test.com", "192.168.1.101"),
            ]
        );
        login.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn list_error_status_is_not_retried() {
        let mut server = Server::new_async().await;
        let login = mock_csrf_login(&mut server, 1).await;
        let list = server
            .mock("GET", STATIC_DNS_PATH)
            .with_status(400)
            .expect(1)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let err = client.list_address_records().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Status {
                stage: "get DNS entries",
                status: 400
            }
        ));
        login.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn upsert_creates_missing_record() {
        let mut server = Server::new_async().await;
        mock_csrf_login(&mut server, 1).await;
        mock_list(&mut server, json!([]), 1).await;
        let create = server
            .mock("POST", STATIC_DNS_PATH)
            .match_header("x-csrf-token", "test-csrf-token")
            .match_body(Matcher::PartialJson(json!({
                "key": "example.com",
                "record_type": "A",
                "value": "192.168.1.10",
                "enabled": true,
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let result = client.upsert_address_record("example.com", IP).await.unwrap();

        assert_eq!(result, UpsertResult::Created);
        create.assert_async().await;
    }

    #[tokio::test]
    async fn upsert_is_noop_when_converged() {
        let mut server = Server::new_async().await;
        let login = mock_csrf_login(&mut server, 1).await;
        mock_list(
            &mut server,
            json!([{"_id": "abc", "key": "test.com", "value": "10.0.0.5"}]),
            2,
        )
        .await;
        let create = server
            .mock("POST", STATIC_DNS_PATH)
            .expect(0)
            .create_async()
            .await;
        let update = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let ip = Ipv4Addr::new(10, 0, 0, 5);
        assert_eq!(
            client.upsert_address_record("test.com", ip).await.unwrap(),
            UpsertResult::Unchanged
        );
        assert_eq!(
            client.upsert_address_record("test.com", ip).await.unwrap(),
            UpsertResult::Unchanged
        );

        login.assert_async().await;
        create.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn repeated_upsert_writes_once() {
        let mut server = Server::new_async().await;
        mock_csrf_login(&mut server, 1).await;
        // Device state before and after the create
        mock_list(&mut server, json!([]), 1).await;
        mock_list(
            &mut server,
            json!([{"_id": "new", "key": "example.com", "value": "192.168.1.10"}]),
            1,
        )
        .await;
        let create = server
            .mock("POST", STATIC_DNS_PATH)
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let client = csrf_client(&server);

        assert_eq!(
            client.upsert_address_record("example.com", IP).await.unwrap(),
            UpsertResult::Created
        );
        assert_eq!(
            client.upsert_address_record("example.com", IP).await.unwrap(),
            UpsertResult::Unchanged
        );
        create.assert_async().await;
    }

    #[tokio::test]
    async fn changed_ip_updates_by_remote_id() {
        let mut server = Server::new_async().await;
        mock_csrf_login(&mut server, 1).await;
        mock_list(
            &mut server,
            json!([{"_id": "abc", "key": "test.com", "value": "10.0.0.5"}]),
            1,
        )
        .await;
        let update = server
            .mock("PUT", format!("{}/abc", STATIC_DNS_PATH).as_str())
            .match_header("x-csrf-token", "test-csrf-token")
            .match_body(Matcher::PartialJson(json!({
                "_id": "abc",
                "key": "test.com",
                "record_type": "A",
                "value": "192.168.1.10",
                "enabled": true,
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let create = server
            .mock("POST", STATIC_DNS_PATH)
            .expect(0)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let result = client.upsert_address_record("test.com", IP).await.unwrap();

        assert_eq!(
            result,
            UpsertResult::Updated {
                previous: "10.0.0.5".to_string()
            }
        );
        update.assert_async().await;
        create.assert_async().await;
    }

    #[tokio::test]
    async fn write_failure_reports_status() {
        let mut server = Server::new_async().await;
        mock_csrf_login(&mut server, 1).await;
        mock_list(&mut server, json!([]), 1).await;
        server
            .mock("POST", STATIC_DNS_PATH)
            .with_status(500)
            .expect(1)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let err = client
            .upsert_address_record("example.com", IP)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "DNS operation failed with status: 500");
    }

    #[tokio::test]
    async fn expired_session_relogs_and_retries_once() {
        let mut server = Server::new_async().await;
        let login = mock_csrf_login(&mut server, 2).await;
        let expired = server
            .mock("GET", STATIC_DNS_PATH)
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let list = mock_list(&mut server, json!([]), 1).await;
        let create = server
            .mock("POST", STATIC_DNS_PATH)
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let result = client.upsert_address_record("example.com", IP).await.unwrap();

        assert_eq!(result, UpsertResult::Created);
        login.assert_async().await;
        expired.assert_async().await;
        list.assert_async().await;
        create.assert_async().await;
    }

    #[tokio::test]
    async fn persistent_401_gives_up_after_one_retry() {
        let mut server = Server::new_async().await;
        let login = mock_csrf_login(&mut server, 2).await;
        let expired = server
            .mock("GET", STATIC_DNS_PATH)
            .with_status(401)
            .expect(2)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let err = client
            .upsert_address_record("example.com", IP)
            .await
            .unwrap_err();

        assert!(err.is_session_expired(), "got {:?}", err);
        assert!(!client.is_authenticated().await);
        login.assert_async().await;
        expired.assert_async().await;
    }

    #[tokio::test]
    async fn login_failure_aborts_upsert() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", LOGIN_PATH)
            .with_status(403)
            .expect(1)
            .create_async()
            .await;
        let list = server
            .mock("GET", STATIC_DNS_PATH)
            .expect(0)
            .create_async()
            .await;
        let client = csrf_client(&server);

        let err = client
            .upsert_address_record("example.com", IP)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Authentication(_)));
        list.assert_async().await;
    }

    #[test]
    fn host_without_scheme_gets_https() {
        assert_eq!(normalize_host("192.168.1.1"), "https://192.168.1.1");
        assert_eq!(normalize_host("http://10.0.0.1:8443/"), "http://10.0.0.1:8443");
        assert_eq!(normalize_host("https://unifi.lan"), "https://unifi.lan");
    }

    #[test]
    fn credentials_not_exposed_in_debug() {
        let client =
            UniFiClient::new("10.0.0.1", "admin", "secret_pw_12345", AuthMode::Csrf, true).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret_pw_12345"));
        assert!(debug_str.contains("UniFiClient"));
    }

    #[test]
    fn factory_builds_client_for_device() {
        let device = DeviceConfig::new("10.0.0.1", "admin", "pw", ".*").with_insecure_tls(true);
        let client = UniFiFactory.create(&device, false).unwrap();
        assert_eq!(client.endpoint(), "https://10.0.0.1");
    }

    #[test]
    fn factory_rejects_missing_username() {
        let device = DeviceConfig::new("10.0.0.1", "", "pw", ".*");
        assert!(UniFiFactory.create(&device, false).is_err());
    }
}
