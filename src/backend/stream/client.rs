//! Typed reqwest wrapper for the Stream chat REST API.

use crate::backend::stream::models::{DirectoryEntry, UpsertUsersRequest};
use crate::backend::stream::token::{server_token, user_token};
use crate::backend::stream::{StreamCredentials, StreamError};

const STREAM_API_BASE: &str = "https://chat.stream-io-api.com";

/// HTTP client for Stream server-side operations
///
/// Built once at startup and shared through `AppState`; cloning is cheap
/// because the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct StreamClient {
    http: reqwest::Client,
    base_url: String,
    credentials: StreamCredentials,
}

impl StreamClient {
    /// Create a client for the given API key and secret
    pub fn new(credentials: StreamCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: STREAM_API_BASE.to_string(),
            credentials,
        }
    }

    /// Override the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.credentials.api_key
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    /// Insert or update a batch of users, keyed by id
    ///
    /// Stream caps a single call at 100 users; callers are expected to batch.
    pub async fn upsert_users(&self, users: &[DirectoryEntry]) -> Result<(), StreamError> {
        let token = server_token(&self.credentials.api_secret)?;

        let resp = self
            .http
            .post(self.users_url())
            .query(&[("api_key", self.credentials.api_key.as_str())])
            .header("Authorization", token)
            .header("stream-auth-type", "jwt")
            .json(&UpsertUsersRequest { users })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StreamError::Api { status, body });
        }

        Ok(())
    }

    /// Insert or update a single user
    pub async fn upsert_user(&self, user: &DirectoryEntry) -> Result<(), StreamError> {
        self.upsert_users(std::slice::from_ref(user)).await
    }

    /// Mint a client token the browser uses to connect as `user_id`
    pub fn create_user_token(&self, user_id: &str) -> Result<String, StreamError> {
        Ok(user_token(&self.credentials.api_secret, user_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, StreamClient) {
        let server = MockServer::start().await;
        let client = StreamClient::new(StreamCredentials::new("test-key", "test-secret"))
            .with_base_url(&server.uri());
        (server, client)
    }

    #[tokio::test]
    async fn upsert_users_sends_key_and_server_token() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(query_param("api_key", "test-key"))
            .and(header("stream-auth-type", "jwt"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "users": {},
                "duration": "1.23ms"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let users = vec![DirectoryEntry::new("u1", "Ada", None)];
        client.upsert_users(&users).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["users"]["u1"]["name"], "Ada");
        assert_eq!(body["users"]["u1"]["image"], "");
    }

    #[tokio::test]
    async fn upsert_users_maps_error_status() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(401).set_body_string("api_key not valid"))
            .mount(&server)
            .await;

        let users = vec![DirectoryEntry::new("u1", "Ada", None)];
        let err = client.upsert_users(&users).await.unwrap_err();
        match err {
            StreamError::Api { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "api_key not valid");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upsert_user_sends_single_entry() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        client
            .upsert_user(&DirectoryEntry::new("u9", "Grace", Some("https://img/g.png")))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["users"].as_object().unwrap().len(), 1);
        assert_eq!(body["users"]["u9"]["image"], "https://img/g.png");
    }

    #[test]
    fn create_user_token_is_not_empty() {
        let client = StreamClient::new(StreamCredentials::new("k", "s"));
        let token = client.create_user_token("u1").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }
}
