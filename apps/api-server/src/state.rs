//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{PostRepository, TokenService};
use blog_infra::{InMemoryPostRepository, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    /// Posts per listing page.
    pub page_size: u64,
    /// Name of the storage backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Connects to PostgreSQL when a database is configured. A configured but
    /// unreachable database is a startup error; no configuration at all runs
    /// on the in-memory store.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        match connect_store(config).await? {
            Some(posts) => {
                tracing::info!("Application state initialized (postgres)");
                Ok(Self {
                    posts,
                    tokens,
                    page_size: config.page_size,
                    storage: "postgres",
                })
            }
            None => {
                tracing::warn!("Running without database (in-memory mode).");
                Ok(Self::in_memory(tokens, config.page_size))
            }
        }
    }

    /// State backed by the in-memory post store.
    pub fn in_memory(tokens: Arc<dyn TokenService>, page_size: u64) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            tokens,
            page_size,
            storage: "memory",
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect_store(config: &AppConfig) -> std::io::Result<Option<Arc<dyn PostRepository>>> {
    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set.");
        return Ok(None);
    };

    let conn = blog_infra::database::connect(db_config)
        .await
        .map_err(std::io::Error::other)?;

    Ok(Some(Arc::new(blog_infra::PostgresPostRepository::new(conn))))
}

#[cfg(not(feature = "postgres"))]
async fn connect_store(config: &AppConfig) -> std::io::Result<Option<Arc<dyn PostRepository>>> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature.");
    }
    Ok(None)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use blog_core::domain::DEFAULT_PAGE_SIZE;
    use blog_infra::JwtConfig;

    /// In-memory state with a fixed signing key.
    pub(crate) fn test_state() -> AppState {
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "test".to_string(),
        });
        AppState::in_memory(Arc::new(tokens), DEFAULT_PAGE_SIZE)
    }
}
