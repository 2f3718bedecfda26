//! # Serialización de Respuestas HTTP
//!
//! Una respuesta es un status, un bloque crudo de headers (posiblemente
//! vacío) y un body de texto.
//!
//! ## Formato en el cable
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 22\r\n      <- solo si hay headers
//! \r\n
//! This is sample content
//! ```
//!
//! La línea vacía que separa headers y body aparece siempre exactamente una
//! vez. `Content-Length` nunca se agrega solo: quien lo quiera debe pedirlo
//! con [`Response::with_content_length`] o escribirlo en los headers.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_fixture::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok).with_body("Kathmandu");
//!
//! assert_eq!(response.to_bytes(), b"HTTP/1.1 200 OK\r\n\r\nKathmandu");
//! ```

use super::{StatusCode, CRLF, CRLF2, VERSION};

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Bloque de headers crudo, líneas separadas por `\r\n`, sin `\r\n` final
    headers: String,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: String,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: String::new(),
            body: String::new(),
        }
    }

    /// Atajo para `200 OK` con el body dado
    pub fn ok(body: &str) -> Self {
        Self::new(StatusCode::Ok).with_body(body)
    }

    /// Agrega una línea `Name: value` al bloque de headers
    ///
    /// # Ejemplo
    /// ```
    /// use http_fixture::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_header("Content-Type", "text/plain")
    ///     .with_header("X-Custom", "value");
    ///
    /// assert_eq!(response.headers(), "Content-Type: text/plain\r\nX-Custom: value");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Versión mutable de [`Response::with_header`]
    pub fn add_header(&mut self, name: &str, value: &str) {
        if !self.headers.is_empty() {
            self.headers.push_str(CRLF);
        }
        self.headers.push_str(name);
        self.headers.push_str(": ");
        self.headers.push_str(value);
    }

    /// Reemplaza el bloque de headers por uno crudo
    ///
    /// Se espera el mismo formato que produce `with_header`: líneas unidas
    /// por `\r\n` y sin separador al final.
    pub fn with_raw_headers(mut self, headers: &str) -> Self {
        self.headers = headers.to_string();
        self
    }

    /// Establece el body. No toca los headers.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Agrega `Content-Length` con la longitud en bytes del body actual
    ///
    /// # Ejemplo
    /// ```
    /// use http_fixture::http::Response;
    ///
    /// let response = Response::ok("This is sample content").with_content_length();
    /// assert_eq!(response.headers(), "Content-Length: 22");
    /// ```
    pub fn with_content_length(self) -> Self {
        let length = self.body.len().to_string();
        self.with_header("Content-Length", &length)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK`
    /// - `\r\n` + headers, solo si hay headers
    /// - `\r\n\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el bloque de headers crudo
    pub fn headers(&self) -> &str {
        &self.headers
    }

    /// Obtiene el body
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", VERSION, self.status)?;
        if !self.headers.is_empty() {
            write!(f, "{}{}", CRLF, self.headers)?;
        }
        write!(f, "{}{}", CRLF2, self.body)
    }
}
