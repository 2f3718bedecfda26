//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Dos piezas:
//! 1. `endpoint`: el socket crudo (bind, listen, accept, read, write, close)
//! 2. `facade`: el ciclo request/respond sobre una única conexión
//!
//! No hay loop de accept ni threads: el fixture atiende exactamente un
//! cliente y termina.

pub mod endpoint;
pub mod facade;

// Re-exportar para facilitar el uso
pub use endpoint::Endpoint;
pub use facade::{Server, State};
