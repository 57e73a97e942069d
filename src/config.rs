use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_body_size: usize,
    pub token_ttl_hours: i64,
    pub registration: RegistrationMode,
    pub log_level: String,
    pub admin: Option<AdminSeed>,
}

/// Account created at startup when the users table is empty.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationMode {
    Open,
    /// Only the first account may register.
    Closed,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_or("DATABASE_URL", "sqlite://database.sqlite?mode=rwc");
        let jwt_secret = env_required("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }

        let host: IpAddr = env_or("PORTFOLIO_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_HOST: {e}"))?;

        let port: u16 = env_or("PORTFOLIO_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_PORT: {e}"))?;

        let upload_dir = PathBuf::from(env_or("PORTFOLIO_UPLOAD_DIR", "uploads"));

        let max_body_size: usize = env_or("PORTFOLIO_MAX_BODY_SIZE", "6291456")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_MAX_BODY_SIZE: {e}"))?;

        let token_ttl_hours: i64 = env_or("PORTFOLIO_TOKEN_TTL_HOURS", "24")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_TOKEN_TTL_HOURS: {e}"))?;
        if token_ttl_hours <= 0 {
            return Err("PORTFOLIO_TOKEN_TTL_HOURS must be positive".to_string());
        }

        let registration = match env_or("PORTFOLIO_REGISTRATION", "open").as_str() {
            "closed" => RegistrationMode::Closed,
            _ => RegistrationMode::Open,
        };

        let log_level = env_or("PORTFOLIO_LOG_LEVEL", "info");

        let admin = match (
            std::env::var("PORTFOLIO_ADMIN_USERNAME").ok(),
            std::env::var("PORTFOLIO_ADMIN_EMAIL").ok(),
            std::env::var("PORTFOLIO_ADMIN_PASSWORD").ok(),
        ) {
            (Some(username), Some(email), Some(password)) => Some(AdminSeed {
                username,
                email,
                password,
            }),
            (None, None, None) => None,
            _ => {
                return Err(
                    "PORTFOLIO_ADMIN_USERNAME, PORTFOLIO_ADMIN_EMAIL and PORTFOLIO_ADMIN_PASSWORD must be set together"
                        .to_string(),
                );
            }
        };

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            upload_dir,
            max_body_size,
            token_ttl_hours,
            registration,
            log_level,
            admin,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
