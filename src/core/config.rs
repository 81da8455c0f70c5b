use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub intake: IntakeConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Expose stored photos under `/captured_images/{filename}`
    pub serve_uploaded_files: bool,
    /// Take the caller address from `X-Forwarded-For` (only behind a reverse proxy)
    pub trust_forwarded_for: bool,
}

/// Upload intake configuration: where photos and the audit log live,
/// and which uploads are accepted
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Directory holding stored photos (the upload root)
    pub upload_dir: PathBuf,
    /// Path of the append-only CSV audit log
    pub log_path: PathBuf,
    /// Lowercase extensions accepted when `enforce_extensions` is on
    pub allowed_extensions: Vec<String>,
    pub enforce_extensions: bool,
    /// Maximum total request body size in bytes
    pub max_upload_size: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
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
            intake: IntakeConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins =
            split_list(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let serve_uploaded_files = parse_bool(
            "SERVE_UPLOADED_FILES",
            &env::var("SERVE_UPLOADED_FILES").unwrap_or_else(|_| "true".to_string()),
        )?;

        let trust_forwarded_for = parse_bool(
            "TRUST_FORWARDED_FOR",
            &env::var("TRUST_FORWARDED_FOR").unwrap_or_else(|_| "false".to_string()),
        )?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            serve_uploaded_files,
            trust_forwarded_for,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl IntakeConfig {
    const DEFAULT_UPLOAD_DIR: &'static str = "captured_images";
    const DEFAULT_LOG_PATH: &'static str = "pog.csv";
    const DEFAULT_ALLOWED_EXTENSIONS: &'static str = "png,jpg,jpeg";
    const DEFAULT_MAX_UPLOAD_SIZE: usize = 15 * 1024 * 1024; // 15MB

    pub fn from_env() -> Result<Self, String> {
        let upload_dir =
            env::var("UPLOAD_DIR").unwrap_or_else(|_| Self::DEFAULT_UPLOAD_DIR.to_string());
        let log_path =
            env::var("LOG_CSV_PATH").unwrap_or_else(|_| Self::DEFAULT_LOG_PATH.to_string());

        let allowed_extensions = parse_extensions(
            &env::var("ALLOWED_EXTENSIONS")
                .unwrap_or_else(|_| Self::DEFAULT_ALLOWED_EXTENSIONS.to_string()),
        );

        let enforce_extensions = parse_bool(
            "ENFORCE_ALLOWED_EXTENSIONS",
            &env::var("ENFORCE_ALLOWED_EXTENSIONS").unwrap_or_else(|_| "true".to_string()),
        )?;

        if enforce_extensions && allowed_extensions.is_empty() {
            return Err(
                "ALLOWED_EXTENSIONS must not be empty while ENFORCE_ALLOWED_EXTENSIONS is on"
                    .to_string(),
            );
        }

        let max_upload_size = env::var("MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_UPLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_SIZE must be a valid number".to_string())?;

        Ok(Self {
            upload_dir: PathBuf::from(upload_dir),
            log_path: PathBuf::from(log_path),
            allowed_extensions,
            enforce_extensions,
            max_upload_size,
        })
    }

    /// Whether `extension` (already lowercased) may be stored
    pub fn is_extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Photo Intake API".to_string());
        let version =
            env::var("SWAGGER_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Photo upload intake with CSV audit log".to_string());

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

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a comma-separated extension list, lowercased, leading dots stripped
pub fn parse_extensions(raw: &str) -> Vec<String> {
    split_list(raw)
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, String> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("{} must be a boolean (true/false)", name)),
    }
}
