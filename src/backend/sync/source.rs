//! Where the synchronizer reads users from.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::backend::auth::users::{self, User};

/// A full, ordered read of the local user collection
///
/// Implementations must return users in a stable order so that two reads of
/// an unchanged collection produce identical batches.
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error>;
}

#[async_trait]
impl UserSource for PgPool {
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        users::list_users(self).await
    }
}
