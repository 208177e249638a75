use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub sheets: SheetsConfig,
    pub line: LineConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Spreadsheet backing-store configuration.
///
/// The store is a named-table, row/column-addressed API: each table has a
/// header row and data rows, addressed by A1-style ranges.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Base URL of the spreadsheet values API
    pub base_url: String,
    /// Spreadsheet document id
    pub spreadsheet_id: String,
    /// Bearer token for the values API
    pub api_token: String,
    /// Per-request timeout for store calls
    pub request_timeout: Duration,
}

/// Outbound LINE push channel configuration
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// Push endpoint URL
    pub push_url: String,
    /// Channel access token (bearer)
    pub channel_token: String,
    /// Target group/channel id
    pub group_id: String,
    /// Per-request timeout for push calls
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            sheets: SheetsConfig::from_env()?,
            line: LineConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AuthConfig {
    const DEFAULT_TOKEN_TTL_SECS: u64 = 12 * 3600; // one shift

    pub fn from_env() -> Result<Self, String> {
        let token_secret = env::var("SESSION_TOKEN_SECRET")
            .map_err(|_| "SESSION_TOKEN_SECRET environment variable is required".to_string())?;

        if token_secret.len() < 32 {
            return Err("SESSION_TOKEN_SECRET must be at least 32 bytes".to_string());
        }

        let token_ttl_secs = env::var("SESSION_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TOKEN_TTL_SECS must be a valid number".to_string())?;

        Ok(Self {
            token_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "RepairHub API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "PCBA repair ticket tracking API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl SheetsConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("SHEETS_BASE_URL")
            .unwrap_or_else(|_| "https://sheets.googleapis.com/v4/spreadsheets".to_string());

        let spreadsheet_id = env::var("SHEETS_SPREADSHEET_ID")
            .map_err(|_| "SHEETS_SPREADSHEET_ID environment variable is required".to_string())?;

        let api_token = env::var("SHEETS_API_TOKEN")
            .map_err(|_| "SHEETS_API_TOKEN environment variable is required".to_string())?;

        let request_timeout_secs = env::var("SHEETS_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SHEETS_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            spreadsheet_id,
            api_token,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

impl LineConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let push_url = env::var("LINE_PUSH_URL")
            .unwrap_or_else(|_| "https://api.line.me/v2/bot/message/push".to_string());

        let channel_token = env::var("LINE_CHANNEL_ACCESS_TOKEN")
            .map_err(|_| "LINE_CHANNEL_ACCESS_TOKEN environment variable is required".to_string())?;

        let group_id = env::var("LINE_GROUP_ID")
            .map_err(|_| "LINE_GROUP_ID environment variable is required".to_string())?;

        let request_timeout_secs = env::var("LINE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "LINE_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            push_url,
            channel_token,
            group_id,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}
