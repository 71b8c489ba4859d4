use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Brevo transactional email settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub api_key: String,
    #[serde(default = "default_mail_api_url")]
    pub api_url: String,
    pub sender_name: String,
    pub sender_email: String,
    #[serde(default = "default_mail_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpConfig {
    pub ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public base URL used to build unsubscribe links.
    pub backend_url: String,
    /// Recipient of verified-lead alerts.
    pub admin_email: String,
    pub brand_name: String,
}

fn default_mail_api_url() -> String {
    "https://api.brevo.com/v3/smtp/email".to_string()
}

fn default_mail_timeout_secs() -> u64 {
    10
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_mail_api_url(),
            sender_name: "Oaklyn Real Estates".to_string(),
            sender_email: String::new(),
            timeout_secs: default_mail_timeout_secs(),
        }
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            sweep_interval_secs: 600,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080".to_string(),
            admin_email: String::new(),
            brand_name: "Oaklyn Real Estates".to_string(),
        }
    }
}

impl MailConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl OtpConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse {config_path}: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No file: build entirely from the environment and defaults
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    mail: MailConfig::default(),
                    otp: OtpConfig::default(),
                    site: SiteConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Cannot read config file {config_path}: {e}").into());
            }
        };

        // Environment always wins over the file
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }

        if let Ok(v) = env::var("BREVO_API_KEY") {
            config.mail.api_key = v;
        }
        if let Ok(v) = env::var("BREVO_API_URL") {
            config.mail.api_url = v;
        }
        if let Ok(v) = env::var("MAIL_SENDER_NAME") {
            config.mail.sender_name = v;
        }
        if let Ok(v) = env::var("MAIL_SENDER_EMAIL") {
            config.mail.sender_email = v;
        }
        if let Ok(v) = env::var("MAIL_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            config.mail.timeout_secs = n;
        }

        if let Ok(v) = env::var("OTP_TTL_SECS")
            && let Ok(n) = v.parse()
        {
            config.otp.ttl_secs = n;
        }
        if let Ok(v) = env::var("OTP_SWEEP_INTERVAL_SECS")
            && let Ok(n) = v.parse()
        {
            config.otp.sweep_interval_secs = n;
        }

        if let Ok(v) = env::var("BACKEND_URL") {
            config.site.backend_url = v;
        }
        if let Ok(v) = env::var("ADMIN_EMAIL") {
            config.site.admin_email = v;
        }
        if let Ok(v) = env::var("BRAND_NAME") {
            config.site.brand_name = v;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.otp.ttl_secs == 0 {
            return Err("otp.ttl_secs must be greater than zero".to_string());
        }
        if self.otp.sweep_interval_secs < self.otp.ttl_secs {
            return Err(format!(
                "otp.sweep_interval_secs ({}) must not be shorter than otp.ttl_secs ({})",
                self.otp.sweep_interval_secs, self.otp.ttl_secs
            ));
        }
        if self.mail.timeout_secs == 0 {
            return Err("mail.timeout_secs must be greater than zero".to_string());
        }
        if self.mail.api_key.is_empty() {
            log::warn!("BREVO_API_KEY is empty; outbound email will be rejected by the provider");
        }
        if self.site.admin_email.is_empty() {
            log::warn!("ADMIN_EMAIL is empty; verified-lead alerts will not be delivered");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 9000

        [database]
        url = "postgres://localhost/oaklyn"
        max_connections = 5

        [mail]
        api_key = "xkeysib-test"
        sender_name = "Oaklyn"
        sender_email = "no-reply@oaklyn.test"

        [site]
        backend_url = "https://api.oaklyn.test"
        admin_email = "admin@oaklyn.test"
        brand_name = "Oaklyn Real Estates"
    "#;

    #[test]
    fn test_parse_with_defaults() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.mail.api_url, "https://api.brevo.com/v3/smtp/email");
        assert_eq!(config.mail.timeout_secs, 10);
        assert_eq!(config.otp.ttl(), Duration::from_secs(300));
        assert_eq!(config.otp.sweep_interval(), Duration::from_secs(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sweep_shorter_than_ttl_is_rejected() {
        let mut config: Config = toml::from_str(SAMPLE).unwrap();
        config.otp.sweep_interval_secs = 60;
        assert!(config.validate().is_err());

        config.otp.sweep_interval_secs = config.otp.ttl_secs;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config: Config = toml::from_str(SAMPLE).unwrap();
        config.otp.ttl_secs = 0;
        assert!(config.validate().is_err());
    }
}
