//! # Configuración del Fixture
//! src/config.rs
//!
//! Argumentos CLI y variables de entorno del binario.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http_fixture --port 9000 --table capitals.json --sized-path /hello.txt
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! FIXTURE_PORT=9000 FIXTURE_LOG=debug ./http_fixture
//! ```

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Niveles aceptados por `--log-level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuración del fixture HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "http_fixture")]
#[command(about = "Servidor HTTP/1.1 de una sola conexión para probar clientes HTTP")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = el sistema elige)
    #[arg(short, long, default_value = "8080", env = "FIXTURE_PORT")]
    pub port: u16,

    /// IP en la que escucha (por defecto todas las interfaces)
    #[arg(long, default_value = "0.0.0.0", env = "FIXTURE_HOST")]
    pub host: String,

    /// Archivo JSON con la tabla segmento → body (por defecto, capitales)
    #[arg(long, env = "FIXTURE_TABLE")]
    pub table: Option<PathBuf>,

    /// URIs cuya respuesta lleva `Content-Length` (repetible)
    #[arg(long = "sized-path", default_value = "/hello.txt")]
    pub sized_paths: Vec<String>,

    /// Nivel de log si `RUST_LOG` no está definido
    #[arg(long = "log-level", default_value = "info", env = "FIXTURE_LOG")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Dirección completa para bind
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_fixture::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    /// ```
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| format!("Host must be an IP address, got '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;

        if let Some(path) = self.sized_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(format!("Sized path must start with '/', got '{}'", path));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(format!("Unknown log level '{}'", self.log_level));
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            table: None,
            sized_paths: vec!["/hello.txt".to_string()],
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.table.is_none());
        assert_eq!(config.sized_paths, vec!["/hello.txt"]);
    }

    #[test]
    fn test_socket_addr_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_host() {
        let mut config = Config::default();
        config.host = "localhost".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().contains("Host must be an IP"));
    }

    #[test]
    fn test_validate_invalid_sized_path() {
        let mut config = Config::default();
        config.sized_paths = vec!["hello.txt".to_string()];
        assert!(config.validate().unwrap_err().contains("Sized path"));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("log level"));
    }

    #[test]
    fn test_parse_from_args() {
        let config = Config::parse_from([
            "http_fixture",
            "--port",
            "0",
            "--host",
            "127.0.0.1",
            "--table",
            "capitals.json",
            "--sized-path",
            "/Peru",
            "--sized-path",
            "/hello.txt",
        ]);

        assert_eq!(config.port, 0);
        assert_eq!(config.table, Some(PathBuf::from("capitals.json")));
        assert_eq!(config.sized_paths, vec!["/Peru", "/hello.txt"]);
        assert!(config.validate().is_ok());
    }
}
