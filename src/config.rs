use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub admin_token: String,
    pub server_host: String,
    pub server_port: u16,
    /// Allowed CORS origins (comma-separated). Use "*" for any origin (development only).
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        // ADMIN_TOKEN is required - no insecure defaults
        let admin_token = env::var("ADMIN_TOKEN").map_err(|_| {
            anyhow::anyhow!(
                "ADMIN_TOKEN environment variable must be set. \
                Generate a secure token with: openssl rand -base64 32"
            )
        })?;

        if admin_token.len() < 16 {
            return Err(anyhow::anyhow!(
                "ADMIN_TOKEN must be at least 16 characters long. \
                Generate a secure token with: openssl rand -base64 32"
            ));
        }

        // Parse CORS origins - default to localhost for development
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:8000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://tagradio.db?mode=rwc".to_string()),
            admin_token,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            cors_origins,
        })
    }
}
