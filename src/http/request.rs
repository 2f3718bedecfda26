//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser mínimo para el único request que recibe el fixture.
//!
//! ## Formato esperado
//!
//! ```text
//! GET /Nepal HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! <body>
//! ```
//!
//! ## Reglas
//!
//! 1. Todo lo anterior al primer `\r\n\r\n` es la sección de headers.
//!    Se divide por `\r\n` y cada línea se guarda cruda; la primera es la
//!    request line.
//! 2. El método es el primer token de la request line y el URI el segundo.
//! 3. El body es el último segmento después de dividir por `\r\n`.
//!    Un body con varias líneas se queda solo con la última; los
//!    clientes del fixture mandan bodies de una sola línea.

use super::{CRLF, CRLF2};
use std::str::FromStr;
use thiserror::Error;

/// Métodos HTTP reconocidos por el parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// PUT - Reemplazar un recurso
    PUT,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío (o solo espacios)
    #[error("Empty request")]
    EmptyRequest,

    /// No aparece `\r\n\r\n` entre headers y body
    #[error("Missing header/body separator")]
    MissingSeparator,

    /// La request line no tiene ningún token
    #[error("Missing HTTP method")]
    MissingMethod,

    /// Método HTTP fuera de GET/POST/PUT
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// La request line no tiene segundo token
    #[error("Missing request URI")]
    MissingUri,

    /// El URI no empieza con `/`
    #[error("Invalid request URI: {0}")]
    InvalidUri(String),
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Método HTTP (GET, POST, PUT)
    method: Method,

    /// URI de la petición (ej: "/Nepal")
    uri: String,

    /// Líneas crudas de la sección de headers, la primera es la request line
    headers: Vec<String>,

    /// Body del request
    body: String,
}

impl Request {
    /// Parsea un request a partir del texto recibido por el socket
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_fixture::http::{Method, Request};
    ///
    /// let request = Request::parse("GET /Nepal HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.uri(), "/Nepal");
    /// assert_eq!(request.headers().len(), 2);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if raw.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let (head, rest) = raw
            .split_once(CRLF2)
            .ok_or(ParseError::MissingSeparator)?;

        let headers: Vec<String> = head.split(CRLF).map(str::to_string).collect();

        let (method, uri) = Self::parse_request_line(&headers[0])?;

        // rsplit siempre produce al menos un segmento
        let body = rest.rsplit(CRLF).next().unwrap_or_default().to_string();

        Ok(Request {
            method,
            uri,
            headers,
            body,
        })
    }

    /// Extrae método y URI de la request line
    ///
    /// Formato: `GET /path HTTP/1.1`. Los tokens después del URI se ignoran.
    fn parse_request_line(line: &str) -> Result<(Method, String), ParseError> {
        let mut parts = line.split_whitespace();

        let method = parts.next().ok_or(ParseError::MissingMethod)?.parse()?;

        let uri = parts.next().ok_or(ParseError::MissingUri)?;
        if !uri.starts_with('/') {
            return Err(ParseError::InvalidUri(uri.to_string()));
        }

        Ok((method, uri.to_string()))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el URI del request
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Obtiene las líneas de headers, incluida la request line
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Obtiene la request line (primera línea del request)
    pub fn request_line(&self) -> &str {
        &self.headers[0]
    }

    /// Busca un header por nombre, sin distinguir mayúsculas
    ///
    /// # Ejemplo
    /// ```
    /// use http_fixture::http::Request;
    ///
    /// let request = Request::parse("GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
    ///
    /// assert_eq!(request.header("host"), Some("localhost"));
    /// assert_eq!(request.header("Accept"), None);
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers[1..].iter().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &str {
        &self.body
    }
}
