use super::models::{
    App, ConnectedAccount, ConnectionLookup, ConnectionRequest, InitiateConnection, Integration,
    SaveAccessData,
};
use super::scrub::sanitize_api_error;
use super::traits::Backend;
use crate::config::Config;
use crate::error::{ClientError, ClientResult, FlowError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// `Backend` over the Composio REST API, authenticated with `x-api-key`.
pub struct HttpBackend {
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ItemsResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

impl HttpBackend {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Build a backend from config; fails when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, FlowError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| FlowError::LoginRequired(config.config_path.display().to_string()))?;
        Ok(Self::new(
            &config.base_url,
            api_key,
            config.connection.request_timeout_secs,
        ))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .header("x-api-key", &self.api_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header("x-api-key", &self.api_key)
    }

    async fn create_integration(&self, request: &InitiateConnection) -> ClientResult<Integration> {
        let app = self.get_app(&request.app_name).await?;
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());

        let mut body = json!({
            "name": format!("{}_{timestamp}", request.app_name),
            "appName": request.app_name,
            "useComposioAuth": request.auth_config.is_none(),
        });
        if let Some(app_id) = &app.app_id {
            body["appId"] = json!(app_id);
        }
        if let Some(mode) = &request.auth_mode {
            body["authScheme"] = json!(mode);
        }
        if let Some(auth_config) = &request.auth_config {
            body["authConfig"] = json!(auth_config);
        }

        debug!(app = %request.app_name, "creating integration");
        let resp = self.post("/v1/integrations").json(&body).send().await?;
        Ok(ensure_success(resp).await?.json().await?)
    }
}

/// Map a non-2xx response to `ClientError::Api` with a sanitized body.
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    Err(ClientError::Api {
        status: status.as_u16(),
        message: sanitize_api_error(&body),
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get_connection(&self, entity_id: &str, app: &str) -> ClientResult<ConnectionLookup> {
        let resp = self
            .get("/v1/connectedAccounts")
            .query(&[
                ("user_uuid", entity_id),
                ("appNames", app),
                ("showActiveOnly", "true"),
            ])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(ConnectionLookup::NotFound);
        }

        let body: ItemsResponse<ConnectedAccount> = ensure_success(resp).await?.json().await?;
        let latest = body
            .items
            .into_iter()
            .filter(|account| {
                account.app_name.is_empty() || account.app_name.eq_ignore_ascii_case(app)
            })
            .max_by(|a, b| a.updated_at.cmp(&b.updated_at));

        Ok(latest.map_or(ConnectionLookup::NotFound, ConnectionLookup::Found))
    }

    async fn initiate_connection(
        &self,
        request: &InitiateConnection,
    ) -> ClientResult<ConnectionRequest> {
        let integration = match &request.integration {
            Some(integration) => integration.clone(),
            None => self.create_integration(request).await?,
        };

        let mut body = json!({
            "integrationId": integration.id,
            "userUuid": request.entity_id,
            "data": {},
        });
        if let Some(redirect_url) = &request.redirect_url {
            body["redirectUri"] = json!(redirect_url);
        }

        debug!(
            app = %request.app_name,
            integration_id = %integration.id,
            "initiating connection"
        );
        let resp = self.post("/v1/connectedAccounts").json(&body).send().await?;
        let mut connection: ConnectionRequest = ensure_success(resp).await?.json().await?;
        connection.integration_id = Some(integration.id);
        Ok(connection)
    }

    async fn get_app(&self, name: &str) -> ClientResult<App> {
        let resp = self.get(&format!("/v1/apps/{name}")).send().await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    async fn list_integrations(&self) -> ClientResult<Vec<Integration>> {
        let resp = self.get("/v1/integrations").send().await?;
        let body: ItemsResponse<Integration> = ensure_success(resp).await?.json().await?;
        Ok(body.items)
    }

    async fn get_connected_account(&self, id: &str) -> ClientResult<ConnectedAccount> {
        let resp = self
            .get(&format!("/v1/connectedAccounts/{id}"))
            .send()
            .await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    async fn save_user_access_data(
        &self,
        data: &SaveAccessData,
    ) -> ClientResult<ConnectionRequest> {
        let integration_id = data
            .integration_id
            .as_deref()
            .ok_or(ClientError::MissingField("integrationId"))?;

        let body = json!({
            "integrationId": integration_id,
            "userUuid": data.entity_id,
            "connectedAccountId": data.connected_account_id,
            "data": data.field_inputs,
        });

        debug!(
            connected_account_id = %data.connected_account_id,
            fields = data.field_inputs.len(),
            "saving user access data"
        );
        let resp = self.post("/v1/connectedAccounts").json(&body).send().await?;
        let mut connection: ConnectionRequest = ensure_success(resp).await?.json().await?;
        connection.integration_id = Some(integration_id.to_string());
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{AuthConfig, ConnectionStatus};
    use std::collections::BTreeMap;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> HttpBackend {
        HttpBackend::new(&server.uri(), "ck-test", 5)
    }

    fn integration(id: &str) -> Integration {
        Integration {
            id: id.into(),
            name: "github_oauth".into(),
            app_name: "github".into(),
            auth_scheme: Some("OAUTH2".into()),
        }
    }

    #[test]
    fn strips_trailing_slash() {
        let b = HttpBackend::new("https://example.com/api/", "k", 5);
        assert_eq!(b.url("/v1/apps"), "https://example.com/api/v1/apps");
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = Config::default();
        let err = HttpBackend::from_config(&config).err().unwrap();
        assert!(matches!(err, FlowError::LoginRequired(_)));
    }

    #[tokio::test]
    async fn get_app_sends_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/apps/github"))
            .and(header("x-api-key", "ck-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "github",
                "auth_schemes": [{"auth_mode": "OAUTH2", "fields": []}]
            })))
            .mount(&server)
            .await;

        let app = backend(&server).get_app("github").await.unwrap();
        assert_eq!(app.name, "github");
        assert_eq!(app.auth_schemes[0].auth_mode, "OAUTH2");
    }

    #[tokio::test]
    async fn get_connection_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/connectedAccounts"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let lookup = backend(&server)
            .get_connection("default", "github")
            .await
            .unwrap();
        assert_eq!(lookup, ConnectionLookup::NotFound);
    }

    #[tokio::test]
    async fn get_connection_picks_latest_matching_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/connectedAccounts"))
            .and(query_param("user_uuid", "alice"))
            .and(query_param("appNames", "github"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "id": "old",
                        "status": "ACTIVE",
                        "appName": "github",
                        "updatedAt": "2024-01-01T00:00:00Z"
                    },
                    {
                        "id": "new",
                        "status": "ACTIVE",
                        "appName": "github",
                        "updatedAt": "2024-06-01T00:00:00Z"
                    },
                    {
                        "id": "other",
                        "status": "ACTIVE",
                        "appName": "slack",
                        "updatedAt": "2025-01-01T00:00:00Z"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let lookup = backend(&server)
            .get_connection("alice", "github")
            .await
            .unwrap();
        match lookup {
            ConnectionLookup::Found(account) => assert_eq!(account.id, "new"),
            ConnectionLookup::NotFound => panic!("expected a connection"),
        }
    }

    #[tokio::test]
    async fn get_connection_empty_items_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/connectedAccounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let lookup = backend(&server)
            .get_connection("default", "github")
            .await
            .unwrap();
        assert!(!lookup.is_found());
    }

    #[tokio::test]
    async fn server_errors_are_scrubbed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/integrations"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_string(r#"{"error":"boom","client_secret":"very-secret"}"#),
            )
            .mount(&server)
            .await;

        let err = backend(&server).list_integrations().await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(!msg.contains("very-secret"));
        assert!(msg.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn initiate_with_existing_integration_skips_creation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/connectedAccounts"))
            .and(body_partial_json(json!({
                "integrationId": "int-1",
                "userUuid": "default",
                "redirectUri": "https://app.composio.dev/redirect"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "connectionStatus": "INITIATED",
                "connectedAccountId": "ca-1",
                "redirectUrl": "https://github.com/login/oauth"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/integrations"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let request = backend(&server)
            .initiate_connection(&InitiateConnection {
                entity_id: "default".into(),
                app_name: "github".into(),
                auth_mode: None,
                auth_config: None,
                integration: Some(integration("int-1")),
                redirect_url: Some("https://app.composio.dev/redirect".into()),
            })
            .await
            .unwrap();

        assert_eq!(request.connected_account_id, "ca-1");
        assert_eq!(request.integration_id.as_deref(), Some("int-1"));
        assert_eq!(request.connection_status, ConnectionStatus::Initiated);
    }

    #[tokio::test]
    async fn initiate_without_integration_creates_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/apps/jira"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "jira", "appId": "app-jira"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/integrations"))
            .and(body_partial_json(json!({
                "appId": "app-jira",
                "authScheme": "BASIC",
                "useComposioAuth": false,
                "authConfig": {"scopes": "read,write"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "int-new", "name": "jira_1", "appName": "jira"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/connectedAccounts"))
            .and(body_partial_json(json!({"integrationId": "int-new"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "connectionStatus": "INITIATED",
                "connectedAccountId": "ca-2"
            })))
            .mount(&server)
            .await;

        let request = backend(&server)
            .initiate_connection(&InitiateConnection {
                entity_id: "default".into(),
                app_name: "jira".into(),
                auth_mode: Some("BASIC".into()),
                auth_config: Some(AuthConfig {
                    client_id: "*".into(),
                    client_secret: "*".into(),
                    scopes: "read,write".into(),
                }),
                integration: None,
                redirect_url: None,
            })
            .await
            .unwrap();

        assert_eq!(request.integration_id.as_deref(), Some("int-new"));
        assert!(request.redirect_url.is_none());
    }

    #[tokio::test]
    async fn save_user_access_data_posts_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/connectedAccounts"))
            .and(body_partial_json(json!({
                "integrationId": "int-1",
                "userUuid": "default",
                "data": {"api_key": "secret"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "connectionStatus": "ACTIVE",
                "connectedAccountId": "ca-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut field_inputs = BTreeMap::new();
        field_inputs.insert("api_key".to_string(), "secret".to_string());
        let saved = backend(&server)
            .save_user_access_data(&SaveAccessData {
                entity_id: "default".into(),
                integration_id: Some("int-1".into()),
                connected_account_id: "ca-1".into(),
                field_inputs,
            })
            .await
            .unwrap();

        assert_eq!(saved.connection_status, ConnectionStatus::Active);
    }

    #[tokio::test]
    async fn save_user_access_data_requires_integration() {
        let server = MockServer::start().await;
        let err = backend(&server)
            .save_user_access_data(&SaveAccessData {
                entity_id: "default".into(),
                integration_id: None,
                connected_account_id: "ca-1".into(),
                field_inputs: BTreeMap::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingField("integrationId")));
    }
}
