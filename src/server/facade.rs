//! # Fachada del servidor
//! src/server/facade.rs
//!
//! Compone el [`Endpoint`] con el parser y el serializador para exponer un
//! ciclo request/respond sobre una sola conexión.
//!
//! ## Estados
//!
//! ```text
//! Created → Listening → Connected → Idle → Responded
//!    └──────────┴───────────┴────────┴──────────┴──→ Stopped
//! ```
//!
//! `stop` es válido desde cualquier estado y es terminal. Cualquier otra
//! operación fuera de su estado devuelve `ServerError::InvalidState`.

use super::Endpoint;
use crate::error::ServerError;
use crate::handler::Handler;
use crate::http::{Request, Response, StatusCode};
use std::net::{Ipv4Addr, SocketAddr};

/// Estado del ciclo de vida del servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Socket asociado, todavía sin escuchar
    Created,
    /// `listen` hecho, esperando en `accept`
    Listening,
    /// Hay un cliente conectado, aún sin leer
    Connected,
    /// Se leyó un request y falta responder
    Idle,
    /// Respuesta enviada
    Responded,
    /// Recursos liberados
    Stopped,
}

/// Servidor HTTP de una sola conexión
#[derive(Debug)]
pub struct Server {
    endpoint: Endpoint,
    state: State,
}

impl Server {
    /// Crea el servidor asociado a `0.0.0.0:port`
    ///
    /// # Ejemplo
    /// ```no_run
    /// use http_fixture::server::Server;
    ///
    /// let mut server = Server::create(8080).unwrap();
    /// server.listen().unwrap();
    /// let request = server.request().unwrap();
    /// println!("{} {}", request.method(), request.uri());
    /// server.stop();
    /// ```
    pub fn create(port: u16) -> Result<Self, ServerError> {
        Self::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    /// Crea el servidor asociado a una dirección arbitraria
    pub fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let endpoint = Endpoint::create(addr)?;
        Ok(Self {
            endpoint,
            state: State::Created,
        })
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.endpoint.local_addr()
    }

    /// Estado actual
    pub fn state(&self) -> State {
        self.state
    }

    /// Escucha y bloquea hasta que un cliente se conecta
    pub fn listen(&mut self) -> Result<(), ServerError> {
        self.listen_with(|_| {})
    }

    /// Igual que [`Server::listen`], pero llama a `ready` justo después de
    /// marcar el socket como pasivo y antes del `accept` bloqueante.
    ///
    /// Desde `ready` en adelante un cliente ya puede conectarse: la
    /// conexión queda en el backlog del sistema hasta el `accept`.
    ///
    /// # Ejemplo
    /// ```no_run
    /// use http_fixture::server::Server;
    /// use std::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let mut server = Server::create(0).unwrap();
    /// std::thread::spawn(move || {
    ///     server.listen_with(|addr| tx.send(addr).unwrap()).unwrap();
    /// });
    /// let addr = rx.recv().unwrap();
    /// ```
    pub fn listen_with<F>(&mut self, ready: F) -> Result<(), ServerError>
    where
        F: FnOnce(SocketAddr),
    {
        self.expect_state("listen", &[State::Created, State::Listening])?;

        self.endpoint.listen()?;
        self.state = State::Listening;
        ready(self.endpoint.local_addr());

        self.endpoint.accept()?;
        self.state = State::Connected;
        Ok(())
    }

    /// Lee y parsea un request de la conexión activa
    ///
    /// # Errores
    ///
    /// - `ConnectionClosed` si el cliente cerró sin mandar datos
    /// - `Parse` si el texto recibido no es un request válido
    /// - `Endpoint` si falla la lectura
    pub fn request(&mut self) -> Result<Request, ServerError> {
        self.expect_state("request", &[State::Connected, State::Idle])?;

        let raw = self.endpoint.read()?.ok_or(ServerError::ConnectionClosed)?;
        self.state = State::Idle;

        let request = Request::parse(&raw).map_err(|e| {
            tracing::warn!(error = %e, "Request inválido");
            e
        })?;

        tracing::info!(method = %request.method(), uri = request.uri(), "Request recibido");
        Ok(request)
    }

    /// Serializa y envía la respuesta
    pub fn respond(&mut self, response: &Response) -> Result<(), ServerError> {
        self.expect_state("respond", &[State::Idle])?;

        self.endpoint.write(&response.to_bytes())?;
        self.state = State::Responded;

        tracing::info!(status = %response.status(), "Respuesta enviada");
        Ok(())
    }

    /// Un intercambio completo: `request` → `handler` → `respond`
    ///
    /// Un request que no se puede parsear recibe `400 Bad Request` y el
    /// error de parsing se propaga igual. Si el handler falla no se escribe
    /// nada.
    pub fn exchange<H>(&mut self, handler: &H) -> Result<Response, ServerError>
    where
        H: Handler + ?Sized,
    {
        let request = match self.request() {
            Ok(request) => request,
            Err(ServerError::Parse(e)) => {
                self.respond(&Response::new(StatusCode::BadRequest))?;
                return Err(e.into());
            }
            Err(e) => return Err(e),
        };
        let response = handler.handle(&request).map_err(|e| {
            tracing::error!(error = %e, uri = request.uri(), "El handler rechazó el request");
            e
        })?;
        self.respond(&response)?;
        Ok(response)
    }

    /// Cierra la conexión y el socket de escucha. Válido en cualquier estado.
    pub fn stop(&mut self) {
        self.endpoint.shutdown();
        self.state = State::Stopped;
    }

    fn expect_state(&self, operation: &'static str, allowed: &[State]) -> Result<(), ServerError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ServerError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}
