//! Stream User Directory Synchronizer
//!
//! Pushes every local user into the Stream directory so chat and video
//! calls can address them, even users created before Stream was wired in.
//!
//! One pass:
//! 1. Read the whole user collection
//! 2. Project each user to a [`DirectoryEntry`]
//! 3. Upsert the entries in contiguous batches of [`SYNC_BATCH_SIZE`], one
//!    batch at a time, in order
//!
//! The pass is best effort. Errors end the pass and are reported through
//! [`SyncOutcome`]; they are never returned as `Err`. Batches already sent
//! stay sent, later batches are not attempted, and nothing is retried.

use crate::backend::stream::{DirectoryEntry, StreamClient};

/// User sources
pub mod source;

pub use source::UserSource;

/// Maximum number of users sent in one upsert call
pub const SYNC_BATCH_SIZE: usize = 100;

/// How a synchronization pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The user collection was empty; nothing was sent
    NoUsers,
    /// Every batch was upserted
    Completed { batches: usize, users: usize },
    /// The pass stopped early
    ///
    /// `batches_total` is zero when the user read itself failed.
    Failed {
        batches_succeeded: usize,
        batches_total: usize,
        users_upserted: usize,
        error: String,
    },
}

impl SyncOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SyncOutcome::Failed { .. })
    }
}

/// Run one synchronization pass
///
/// # Arguments
///
/// * `source` - Where to read users from (the database pool in production)
/// * `stream` - Client carrying the Stream API key and secret
pub async fn sync_stream_users(source: &dyn UserSource, stream: &StreamClient) -> SyncOutcome {
    let users = match source.list_users().await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Stream sync failed: {}", e);
            return SyncOutcome::Failed {
                batches_succeeded: 0,
                batches_total: 0,
                users_upserted: 0,
                error: e.to_string(),
            };
        }
    };

    if users.is_empty() {
        tracing::warn!("No users found to sync");
        return SyncOutcome::NoUsers;
    }

    let entries: Vec<DirectoryEntry> = users.iter().map(DirectoryEntry::from).collect();
    let batches_total = entries.len().div_ceil(SYNC_BATCH_SIZE);
    let mut users_upserted = 0;

    for (index, batch) in entries.chunks(SYNC_BATCH_SIZE).enumerate() {
        if let Err(e) = stream.upsert_users(batch).await {
            tracing::error!(batch = index + 1, size = batch.len(), "Stream sync failed: {}", e);
            return SyncOutcome::Failed {
                batches_succeeded: index,
                batches_total,
                users_upserted,
                error: e.to_string(),
            };
        }

        users_upserted += batch.len();
        tracing::info!(batch = index + 1, size = batch.len(), "Upserted {} users", batch.len());
    }

    tracing::info!(users = users_upserted, batches = batches_total, "Stream user sync complete");

    SyncOutcome::Completed {
        batches: batches_total,
        users: users_upserted,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::backend::auth::users::{fixtures, User};
    use crate::backend::stream::StreamCredentials;

    struct MemorySource(Vec<User>);

    #[async_trait]
    impl UserSource for MemorySource {
        async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl UserSource for BrokenSource {
        async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
            Err(sqlx::Error::PoolTimedOut)
        }
    }

    /// `n` users whose ids descend, so id order and insertion order differ
    fn users(n: u128) -> Vec<User> {
        (1..=n)
            .rev()
            .map(|i| fixtures::user(Uuid::from_u128(i), &format!("User {}", i), None))
            .collect()
    }

    async fn stream_for(server: &MockServer) -> StreamClient {
        StreamClient::new(StreamCredentials::new("key", "secret")).with_base_url(&server.uri())
    }

    /// Entry ids in the order they appear in a serialized upsert body
    ///
    /// `serde_json::Value` sorts object keys, so the raw text is scanned.
    fn ids_in_body(body: &[u8]) -> Vec<String> {
        let text = std::str::from_utf8(body).unwrap();
        let marker = r#""id":""#;
        text.match_indices(marker)
            .map(|(at, _)| {
                let rest = &text[at + marker.len()..];
                rest[..rest.find('"').unwrap()].to_string()
            })
            .collect()
    }

    /// User ids carried by each recorded upsert call, in call order
    async fn batch_ids(server: &MockServer) -> Vec<Vec<String>> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|req| ids_in_body(&req.body))
            .collect()
    }

    #[test]
    fn test_ids_in_body_keeps_order() {
        let body = br#"{"users":{"b":{"id":"b","name":"B","image":""},"a":{"id":"a","name":"A","image":""}}}"#;
        assert_eq!(ids_in_body(body), vec!["b".to_string(), "a".to_string()]);
    }

    #[tokio::test]
    async fn test_batches_of_one_hundred() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201))
            .expect(3)
            .mount(&server)
            .await;

        let source = MemorySource(users(250));
        let outcome = sync_stream_users(&source, &stream_for(&server).await).await;

        assert_eq!(outcome, SyncOutcome::Completed { batches: 3, users: 250 });

        let sent = batch_ids(&server).await;
        assert_eq!(sent.iter().map(Vec::len).collect::<Vec<_>>(), vec![100, 100, 50]);

        // Batches joined in call order reproduce the projection exactly
        let projected: Vec<String> = source.0.iter().map(|u| u.id.to_string()).collect();
        assert_eq!(sent.concat(), projected);
    }

    #[tokio::test]
    async fn test_upsert_count_is_ceiling_of_user_count() {
        for (n, calls) in [(1u128, 1usize), (100, 1), (101, 2), (200, 2)] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/users"))
                .respond_with(ResponseTemplate::new(201))
                .mount(&server)
                .await;

            let outcome = sync_stream_users(&MemorySource(users(n)), &stream_for(&server).await).await;

            assert_eq!(
                outcome,
                SyncOutcome::Completed { batches: calls, users: n as usize }
            );
            assert_eq!(batch_ids(&server).await.len(), calls);
        }
    }

    #[tokio::test]
    async fn test_no_users_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = sync_stream_users(&MemorySource(Vec::new()), &stream_for(&server).await).await;

        assert_eq!(outcome, SyncOutcome::NoUsers);
        assert!(!outcome.is_failure());
    }

    #[tokio::test]
    async fn test_failed_batch_stops_the_pass() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let outcome = sync_stream_users(&MemorySource(users(250)), &stream_for(&server).await).await;

        assert!(outcome.is_failure());
        assert_matches!(
            outcome,
            SyncOutcome::Failed {
                batches_succeeded: 1,
                batches_total: 3,
                users_upserted: 100,
                ..
            }
        );
        // The third batch is never attempted
        assert_eq!(batch_ids(&server).await.len(), 2);
    }

    #[tokio::test]
    async fn test_read_failure_is_contained() {
        let server = MockServer::start().await;

        let outcome = sync_stream_users(&BrokenSource, &stream_for(&server).await).await;

        assert_matches!(
            outcome,
            SyncOutcome::Failed { batches_succeeded: 0, batches_total: 0, .. }
        );
        assert!(batch_ids(&server).await.is_empty());
    }

    #[tokio::test]
    async fn test_rerun_sends_identical_requests() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let source = MemorySource(users(150));
        let stream = stream_for(&server).await;
        sync_stream_users(&source, &stream).await;
        sync_stream_users(&source, &stream).await;

        let bodies: Vec<Vec<u8>> = server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|req| req.body)
            .collect();
        assert_eq!(bodies.len(), 4);
        assert_eq!(bodies[..2], bodies[2..]);
    }
}
