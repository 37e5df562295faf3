/// Server configuration loaded from environment variables.
///
/// Constructed once at startup and injected through
/// [`crate::state::AppState`]; there are no ambient config globals.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root directory for the static site passthrough (default: `site`).
    pub static_dir: String,
    /// Session token configuration (secret, inactivity window).
    pub session: SessionConfig,
    /// Seed admin account (created at startup if missing).
    pub admin: AdminSeedConfig,
}

/// Configuration for opaque session tokens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC key for session token digests.
    pub secret: String,
    /// Inactivity window in minutes; renewed on every authenticated
    /// request (default: 60).
    pub ttl_mins: i64,
}

/// Seed admin credentials. A fixed setup account, expected to be
/// changed after deployment.
#[derive(Debug, Clone)]
pub struct AdminSeedConfig {
    pub username: String,
    pub password: String,
}

/// Default session inactivity window in minutes.
const DEFAULT_SESSION_TTL_MINS: i64 = 60;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Required | Default                  |
    /// |------------------------|----------|--------------------------|
    /// | `HOST`                 | no       | `0.0.0.0`                |
    /// | `PORT`                 | no       | `8080`                   |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                     |
    /// | `STATIC_DIR`           | no       | `site`                   |
    /// | `SECRET_KEY`           | **yes**  | --                       |
    /// | `SESSION_TTL_MINS`     | no       | `60`                     |
    /// | `ADMIN_USERNAME`       | no       | `admin`                  |
    /// | `ADMIN_PASSWORD`       | **yes**  | --                       |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric one fails
    /// to parse -- misconfiguration should fail fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "site".into());

        let secret = std::env::var("SECRET_KEY").expect("SECRET_KEY must be set");
        assert!(!secret.is_empty(), "SECRET_KEY must not be empty");

        let ttl_mins: i64 = std::env::var("SESSION_TTL_MINS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_MINS.to_string())
            .parse()
            .expect("SESSION_TTL_MINS must be a valid i64");

        let admin = AdminSeedConfig {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            session: SessionConfig { secret, ttl_mins },
            admin,
        }
    }
}
