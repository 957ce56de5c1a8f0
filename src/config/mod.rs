// Configuration module entry point
// Loads configuration from file and environment, holds application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AppConfig, Config, HttpConfig, LoggingConfig, Mode, PerformanceConfig, ResourcesConfig,
    ServerConfig, DEV_SECRET_KEY,
};

impl Config {
    /// Load configuration from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Precedence: built-in defaults < config file < `MINIDASH_*` environment
    /// variables < the bare `PORT` / `SECRET_KEY` / `APP_ENV` shortcuts.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("MINIDASH").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("app.secret_key", DEV_SECRET_KEY)?
            .set_default("app.env", "development")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("http.server_name", "minidash/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("resources.template_dir", "templates")?
            .set_default("resources.static_dir", "static")?;

        // Bare-variable shortcuts matching the usual PaaS conventions
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(secret) = std::env::var("SECRET_KEY") {
            builder = builder.set_override("app.secret_key", secret)?;
        }
        if let Ok(env) = std::env::var("APP_ENV") {
            builder = builder.set_override("app.env", env)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("PORT");
        std::env::remove_var("SECRET_KEY");
        std::env::remove_var("APP_ENV");

        let cfg = Config::load_from("nonexistent-config").unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.app.secret_key, DEV_SECRET_KEY);
        assert!(cfg.app.has_default_secret());
        assert_eq!(cfg.app.env, Mode::Development);
        assert_eq!(cfg.resources.template_dir, "templates");
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_port_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PORT", "8080");

        let cfg = Config::load_from("nonexistent-config").unwrap();
        assert_eq!(cfg.server.port, 8080);

        std::env::remove_var("PORT");
    }

    #[test]
    fn test_mode_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("SECRET_KEY", "deployed-secret");

        let cfg = Config::load_from("nonexistent-config").unwrap();
        assert_eq!(cfg.app.env, Mode::Production);
        assert!(!cfg.app.env.is_development());
        assert!(!cfg.app.has_default_secret());

        std::env::remove_var("APP_ENV");
        std::env::remove_var("SECRET_KEY");
    }

    #[test]
    fn test_socket_addr() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("PORT");

        let cfg = Config::load_from("nonexistent-config").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 5000);
    }
}
