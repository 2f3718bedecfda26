//! # Módulo HTTP
//!
//! Subconjunto mínimo de HTTP/1.1 que necesita el fixture:
//!
//! - Parsing de un request crudo (método, URI, headers, body)
//! - Serialización de una respuesta a bytes
//! - Códigos de estado
//!
//! No hay keep-alive, ni chunked transfer encoding, ni cálculo automático
//! de `Content-Length`.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /Nepal HTTP/1.1\r\n
//! Host: localhost\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! \r\n
//! Kathmandu
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Serialización de HTTP responses
pub mod status;    // Códigos de estado HTTP

pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;

/// Versión del protocolo que se escribe en la status line
pub const VERSION: &str = "HTTP/1.1";

/// Separador de líneas
pub const CRLF: &str = "\r\n";

/// Separador entre la sección de headers y el body
pub const CRLF2: &str = "\r\n\r\n";
