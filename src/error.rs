//! # Errores del servidor
//! src/error.rs
//!
//! Dos niveles:
//!
//! - [`EndpointError`]: fallos de las primitivas del socket. Cada variante
//!   guarda el nombre de la operación que falló (`socket`, `bind`,
//!   `accept`, ...) y el `io::Error` con el código del sistema operativo.
//! - [`ServerError`]: lo que ve quien usa la fachada. Envuelve los errores
//!   del endpoint, del parser y del handler.
//!
//! No hay reintentos: cualquier error termina el intercambio actual.

use crate::handler::HandlerError;
use crate::http::ParseError;
use crate::server::State;
use std::io;
use thiserror::Error;

/// Errores de las primitivas del socket
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Falló `socket`, `setsockopt` o `bind` al crear el endpoint
    #[error("{operation} failed: {source}")]
    Bind {
        operation: &'static str,
        source: io::Error,
    },

    /// Falló `listen` sobre el socket de escucha
    #[error("{operation} failed: {source}")]
    Listen {
        operation: &'static str,
        source: io::Error,
    },

    /// Falló `accept`
    #[error("{operation} failed: {source}")]
    Accept {
        operation: &'static str,
        source: io::Error,
    },

    /// Falló la lectura de la conexión activa
    #[error("{operation} failed: {source}")]
    Read {
        operation: &'static str,
        source: io::Error,
    },

    /// Falló la escritura en la conexión activa
    #[error("{operation} failed: {source}")]
    Write {
        operation: &'static str,
        source: io::Error,
    },

    /// Se pidió leer/escribir sin una conexión aceptada
    #[error("{operation} failed: no active connection")]
    NotConnected { operation: &'static str },

    /// El socket de escucha ya fue cerrado
    #[error("{operation} failed: endpoint is closed")]
    Closed { operation: &'static str },
}

impl EndpointError {
    /// Nombre de la operación que falló
    pub fn operation(&self) -> &'static str {
        match self {
            EndpointError::Bind { operation, .. }
            | EndpointError::Listen { operation, .. }
            | EndpointError::Accept { operation, .. }
            | EndpointError::Read { operation, .. }
            | EndpointError::Write { operation, .. }
            | EndpointError::NotConnected { operation }
            | EndpointError::Closed { operation } => operation,
        }
    }

    /// Código de error del sistema operativo, si lo hay
    pub fn os_code(&self) -> Option<i32> {
        match self {
            EndpointError::Bind { source, .. }
            | EndpointError::Listen { source, .. }
            | EndpointError::Accept { source, .. }
            | EndpointError::Read { source, .. }
            | EndpointError::Write { source, .. } => source.raw_os_error(),
            EndpointError::NotConnected { .. } | EndpointError::Closed { .. } => None,
        }
    }
}

/// Errores que devuelve la fachada [`crate::server::Server`]
#[derive(Debug, Error)]
pub enum ServerError {
    /// Falló una primitiva del socket
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// El texto recibido no es un request válido
    #[error("Invalid request: {0}")]
    Parse(#[from] ParseError),

    /// El handler rechazó el request
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// El cliente cerró la conexión sin mandar datos
    #[error("Connection closed by peer before sending a request")]
    ConnectionClosed,

    /// Operación llamada en un estado que no la permite
    #[error("Cannot {operation} while server is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: State,
    },
}
