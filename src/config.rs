use std::env;

/// Fallback signing secret for local development and tests.
const LOCAL_JWT_SECRET: &str = "notes-local-development-secret";

/// AppConfig
///
/// Holds the application's entire configuration state. The struct is immutable once
/// loaded and is pulled into handlers and the gate middleware via `FromRef`, the same
/// way the repository and route registry are.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Postgres connection string. Optional in local mode, where the in-memory store is used instead.
    pub db_url: Option<String>,
    // Runtime environment marker. Controls the `x-user-id` development bypass.
    pub env: Env,
    // Secret key used to validate incoming session JWTs.
    pub jwt_secret: String,
    // Path of the login page. Anonymous callers are redirected here with a `next` parameter.
    pub login_path: String,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (in-memory store, header bypass) and hardened production behaviour.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a non-panicking AppConfig instance used for test setup, so that state can
    /// be scaffolded without touching environment variables.
    fn default() -> Self {
        Self {
            db_url: None,
            env: Env::Local,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            login_path: "/login/".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads all parameters from environment variables and implements the **fail-fast**
    /// principle.
    ///
    /// # Panics
    /// Panics if a variable required by the current environment is missing (production
    /// needs both `DATABASE_URL` and `JWT_SECRET`), or if `LOGIN_PATH` is not an absolute
    /// path. The server must never start with an incomplete or insecure configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let login_path = env::var("LOGIN_PATH").unwrap_or_else(|_| "/login/".to_string());
        if !login_path.starts_with('/') {
            panic!("FATAL: LOGIN_PATH must be an absolute path, got {login_path:?}");
        }

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        match env {
            Env::Local => Self {
                env: Env::Local,
                // Without DATABASE_URL the service runs against the in-memory store.
                db_url: env::var("DATABASE_URL").ok(),
                jwt_secret: env::var("JWT_SECRET")
                    .unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
                login_path,
                bind_addr,
            },
            Env::Production => Self {
                env: Env::Production,
                db_url: Some(
                    env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
                ),
                jwt_secret: env::var("JWT_SECRET")
                    .expect("FATAL: JWT_SECRET must be set in production."),
                login_path,
                bind_addr,
            },
        }
    }
}
