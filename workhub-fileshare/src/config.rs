/// Configuration management for the file-sharing API
///
/// Loads configuration from environment variables into a type-safe struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 8080)
/// - `JWT_SECRET`: secret key for session token signing (required, >= 32 chars)
/// - `UPLOAD_DIR`: directory for uploaded blobs (default: uploads)
/// - `MAIL_API_URL`: HTTP mail gateway endpoint (required)
/// - `MAIL_API_KEY`: gateway API key (required)
/// - `MAIL_FROM`: sender address for verification mail (required)
/// - `DOWNLOAD_TOKEN_SECRET`: optional key for download-link tokens; when
///   unset a fresh key is generated at startup and links stop decoding after
///   a restart
///
/// # Example
///
/// ```no_run
/// use workhub_fileshare::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session token configuration
    pub auth: AuthConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,

    /// Blob storage configuration
    pub storage: StorageConfig,

    /// Download-link token key, if pinned via configuration
    ///
    /// None means a per-process key is generated at startup; previously
    /// issued links become undecodable after a restart.
    pub download_token_secret: Option<String>,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub jwt_secret: String,
}

/// Outbound mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// HTTP mail gateway endpoint
    pub api_url: String,

    /// Gateway API key
    pub api_key: String,

    /// Sender address
    pub from: String,
}

/// Blob storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded files are written to
    pub upload_dir: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or malformed
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let mail_api_url = env::var("MAIL_API_URL")
            .map_err(|_| anyhow::anyhow!("MAIL_API_URL environment variable is required"))?;
        let mail_api_key = env::var("MAIL_API_KEY")
            .map_err(|_| anyhow::anyhow!("MAIL_API_KEY environment variable is required"))?;
        let mail_from = env::var("MAIL_FROM")
            .map_err(|_| anyhow::anyhow!("MAIL_FROM environment variable is required"))?;

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let download_token_secret = env::var("DOWNLOAD_TOKEN_SECRET").ok();

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig { jwt_secret },
            mail: MailConfig {
                api_url: mail_api_url,
                api_key: mail_api_key,
                from: mail_from,
            },
            storage: StorageConfig { upload_dir },
            download_token_secret,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
