//! Application state - shared across all handlers.

use std::sync::Arc;

use docket_core::ports::{Clock, PasswordService, TodoRepository, TokenService, UserRepository};
use docket_core::{TodoService, UserService};
use docket_infra::{
    Argon2PasswordService, InMemoryTodoRepository, InMemoryUserRepository, JwtTokenService,
    SystemClock,
};

#[cfg(feature = "postgres")]
use docket_infra::{DatabaseConnections, PostgresTodoRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
    pub users: UserService,
    pub tokens: Arc<dyn TokenService>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

type Repositories = (Arc<dyn TodoRepository>, Arc<dyn UserRepository>);

fn in_memory_repositories() -> Repositories {
    (
        Arc::new(InMemoryTodoRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::from_name(&config.timezone));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        // Initialize database connections if configured
        #[cfg(feature = "postgres")]
        let (db, (todo_repo, user_repo)): (Option<Arc<DatabaseConnections>>, Repositories) = {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let todo_repo: Arc<dyn TodoRepository> =
                            Arc::new(PostgresTodoRepository::new(conn.main.clone()));
                        let user_repo: Arc<dyn UserRepository> =
                            Arc::new(PostgresUserRepository::new(conn.main.clone()));
                        (Some(conn), (todo_repo, user_repo))
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, in_memory_repositories())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, in_memory_repositories())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (todo_repo, user_repo) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory_repositories()
        };

        tracing::info!(timezone = %config.timezone, today = %clock.today(), "Application state initialized");

        Self {
            todos: TodoService::new(todo_repo, clock),
            users: UserService::new(user_repo, passwords),
            tokens,
            #[cfg(feature = "postgres")]
            db,
        }
    }

    /// State over in-memory repositories with the given clock.
    #[cfg(test)]
    pub fn in_memory(clock: Arc<dyn Clock>, tokens: Arc<dyn TokenService>) -> Self {
        let (todo_repo, user_repo) = in_memory_repositories();
        Self {
            todos: TodoService::new(todo_repo, clock),
            users: UserService::new(user_repo, Arc::new(Argon2PasswordService::new())),
            tokens,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
