//! Shared application state for the HTTP server.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chatkeep_core::service::chat::ChatService;
use chatkeep_infra::config::database_url;
use chatkeep_infra::sqlite::chat::SqliteChatRepository;
use chatkeep_infra::sqlite::message::SqliteMessageRepository;
use chatkeep_infra::sqlite::pool::DatabasePool;
use chatkeep_types::config::AppConfig;

/// Concrete type alias for the chat service with SQLite repositories.
pub type ConcreteChatService = ChatService<SqliteChatRepository, SqliteMessageRepository>;

/// Shared application state, cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Open the database described by `config` and wire the service.
    ///
    /// Migrations run as part of opening the pool.
    pub async fn init(config: &AppConfig, data_dir: &Path) -> anyhow::Result<Self> {
        let url = database_url(config, data_dir);
        let pool = DatabasePool::connect(&url, &config.database).await?;

        Ok(Self::from_pool(
            pool,
            Duration::from_secs(config.request_timeout_secs),
        ))
    }

    /// Build state over an already opened pool.
    pub fn from_pool(pool: DatabasePool, request_timeout: Duration) -> Self {
        let chat_repo = SqliteChatRepository::new(pool.clone());
        let message_repo = SqliteMessageRepository::new(pool.clone());
        let chat_service =
            ChatService::new(chat_repo, message_repo).with_request_timeout(request_timeout);

        Self {
            chat_service: Arc::new(chat_service),
            db_pool: pool,
        }
    }
}
