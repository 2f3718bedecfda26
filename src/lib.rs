//! # HTTP Fixture
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo para probar un cliente HTTP contra un endpoint
//! controlable. Acepta una sola conexión, lee un request, responde y cierra.
//!
//! ## Arquitectura
//!
//! - `http`: parser de requests, serializador de respuestas, status codes
//! - `server`: endpoint TCP crudo y la fachada request/respond
//! - `handler`: trait `Handler` y el handler basado en tabla
//! - `config`: argumentos CLI y variables de entorno
//! - `logging`: subscriber de `tracing`
//! - `error`: errores del endpoint y de la fachada
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_fixture::handler::{LookupHandler, LookupTable};
//! use http_fixture::server::Server;
//!
//! let handler = LookupHandler::new(LookupTable::capitals());
//! let mut server = Server::create(8080).expect("bind");
//!
//! server.listen().expect("accept");
//! server.exchange(&handler).expect("exchange");
//! server.stop();
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logging;
pub mod server;

pub use error::{EndpointError, ServerError};
