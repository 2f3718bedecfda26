//! # Handlers
//! src/handler/mod.rs
//!
//! Un handler decide qué responder a un request. El servidor no sabe nada
//! del contenido de las respuestas: eso lo aporta quien lo usa.
//!
//! ```text
//! Request → Handler → Response
//! ```
//!
//! [`LookupHandler`] es el handler del fixture: toma el URI sin la `/`
//! inicial y busca el body en una [`LookupTable`].

pub mod table;

pub use table::{LookupTable, TableError};

use crate::http::{Method, Request, Response, StatusCode};
use std::collections::HashSet;
use thiserror::Error;

/// Errores que un handler puede devolver en lugar de una respuesta
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// El handler no sabe atender este método. El servidor no debe seguir
    /// sirviendo después de esto.
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(Method),
}

/// Convierte un request en una respuesta
pub trait Handler {
    fn handle(&self, request: &Request) -> Result<Response, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Result<Response, HandlerError>,
{
    fn handle(&self, request: &Request) -> Result<Response, HandlerError> {
        self(request)
    }
}

/// Handler respaldado por una tabla URI → body
///
/// # Ejemplo
/// ```
/// use http_fixture::handler::{Handler, LookupHandler, LookupTable};
/// use http_fixture::http::Request;
///
/// let handler = LookupHandler::new(LookupTable::capitals());
/// let request = Request::parse("GET /Nepal HTTP/1.1\r\n\r\n").unwrap();
///
/// let response = handler.handle(&request).unwrap();
/// assert_eq!(response.body(), "Kathmandu");
/// ```
#[derive(Debug, Clone)]
pub struct LookupHandler {
    table: LookupTable,
    /// URIs cuya respuesta lleva `Content-Length`
    sized_paths: HashSet<String>,
}

impl LookupHandler {
    /// Crea el handler. Solo `/hello.txt` lleva `Content-Length` por defecto.
    pub fn new(table: LookupTable) -> Self {
        Self {
            table,
            sized_paths: HashSet::from(["/hello.txt".to_string()]),
        }
    }

    /// Reemplaza el conjunto de URIs que llevan `Content-Length`
    pub fn with_sized_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sized_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    fn get_response(&self, uri: &str) -> Response {
        let segment = uri.strip_prefix('/').unwrap_or(uri);

        let Some(body) = self.table.get(segment) else {
            tracing::debug!(uri, "URI sin entrada en la tabla");
            return Response::new(StatusCode::NotFound);
        };

        let response = Response::ok(body);
        if self.sized_paths.contains(uri) {
            response.with_content_length()
        } else {
            response
        }
    }
}

impl Handler for LookupHandler {
    fn handle(&self, request: &Request) -> Result<Response, HandlerError> {
        match request.method() {
            Method::GET => Ok(self.get_response(request.uri())),
            other => Err(HandlerError::UnsupportedMethod(other)),
        }
    }
}
