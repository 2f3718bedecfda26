//! # Logging
//! src/logging.rs
//!
//! Instala el subscriber de `tracing`. `RUST_LOG` tiene prioridad sobre el
//! nivel configurado.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Inicializa el logging con `default_level` como filtro de respaldo
///
/// Si ya hay un subscriber global (por ejemplo, en tests) no hace nada.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("http_fixture={}", default_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
