//! # Endpoint de conexión
//! src/server/endpoint.rs
//!
//! Dueño exclusivo del socket de escucha y de la única conexión aceptada.
//! Expone las primitivas crudas: crear/bind, listen, accept, read, write y
//! cerrar. Todo es bloqueante y sin timeouts.
//!
//! Los dos sockets viven en `Option`s: `shutdown` los toma y los suelta,
//! así que cada uno se cierra exactamente una vez aunque `shutdown` se
//! llame varias veces o no se llame nunca (lo hace `Drop`).

use crate::error::EndpointError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr};

/// Cola de conexiones pendientes. El kernel la recorta a su máximo
/// (`somaxconn`), así que pedir `i32::MAX` equivale a pedir el máximo.
const BACKLOG: i32 = i32::MAX;

/// Tamaño del único chunk que se lee por request
pub const READ_BUFFER_SIZE: usize = 4096;

/// Socket de escucha + conexión activa
#[derive(Debug)]
pub struct Endpoint {
    listener: Option<Socket>,
    connection: Option<Socket>,
    local_addr: SocketAddr,
    listening: bool,
}

impl Endpoint {
    /// Crea un socket TCP con `SO_REUSEADDR` y lo asocia a `addr`
    ///
    /// # Errores
    ///
    /// `EndpointError::Bind` con la operación que falló (`socket`,
    /// `setsockopt`, `bind` o `getsockname`).
    pub fn create(addr: SocketAddr) -> Result<Self, EndpointError> {
        let bind_error = |operation: &'static str| {
            move |source: io::Error| {
                tracing::error!(%addr, operation, error = %source, "Fallo al crear endpoint");
                EndpointError::Bind { operation, source }
            }
        };

        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
            .map_err(bind_error("socket"))?;
        socket
            .set_reuse_address(true)
            .map_err(bind_error("setsockopt"))?;
        socket.bind(&addr.into()).map_err(bind_error("bind"))?;

        // Con puerto 0 el sistema elige uno; se consulta el real
        let local_addr = socket
            .local_addr()
            .and_then(|sock_addr| {
                sock_addr.as_socket().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "not an inet address")
                })
            })
            .map_err(bind_error("getsockname"))?;

        tracing::info!(address = %local_addr, "Endpoint asociado");

        Ok(Self {
            listener: Some(socket),
            connection: None,
            local_addr,
            listening: false,
        })
    }

    /// Dirección real a la que quedó asociado el socket
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Indica si hay una conexión aceptada
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Marca el socket como pasivo. A partir de aquí los clientes pueden
    /// conectarse aunque `accept` todavía no haya sido llamado.
    ///
    /// Llamarlo dos veces no hace nada la segunda vez.
    pub fn listen(&mut self) -> Result<(), EndpointError> {
        let listener = self
            .listener
            .as_ref()
            .ok_or(EndpointError::Closed { operation: "listen" })?;

        if self.listening {
            return Ok(());
        }

        listener.listen(BACKLOG).map_err(|source| {
            tracing::error!(error = %source, "Fallo en listen");
            EndpointError::Listen {
                operation: "listen",
                source,
            }
        })?;
        self.listening = true;

        tracing::info!(address = %self.local_addr, backlog = BACKLOG, "Escuchando");
        Ok(())
    }

    /// Bloquea hasta que un cliente se conecta y guarda la conexión
    ///
    /// Retorna la dirección del cliente si el sistema la reporta.
    pub fn accept(&mut self) -> Result<Option<SocketAddr>, EndpointError> {
        let listener = self
            .listener
            .as_ref()
            .ok_or(EndpointError::Closed { operation: "accept" })?;

        let (connection, peer) = listener.accept().map_err(|source| {
            tracing::error!(error = %source, "Fallo en accept");
            EndpointError::Accept {
                operation: "accept",
                source,
            }
        })?;

        let peer = peer.as_socket();
        match peer {
            Some(peer) => tracing::info!(%peer, "Nueva conexión"),
            None => tracing::info!("Nueva conexión"),
        }

        self.connection = Some(connection);
        Ok(peer)
    }

    /// `listen` + `accept`
    pub fn accept_connection(&mut self) -> Result<Option<SocketAddr>, EndpointError> {
        self.listen()?;
        self.accept()
    }

    /// Lee un único chunk (hasta [`READ_BUFFER_SIZE`] bytes) de la conexión
    ///
    /// Retorna `Ok(None)` si el cliente cerró sin mandar nada. Los bytes
    /// que no son UTF-8 válido se reemplazan por `U+FFFD`.
    pub fn read(&mut self) -> Result<Option<String>, EndpointError> {
        let connection = self
            .connection
            .as_mut()
            .ok_or(EndpointError::NotConnected { operation: "read" })?;

        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let bytes_read = connection.read(&mut buffer).map_err(|source| {
            tracing::error!(error = %source, "Fallo en read");
            EndpointError::Read {
                operation: "read",
                source,
            }
        })?;

        if bytes_read == 0 {
            tracing::debug!("Conexión cerrada por el cliente");
            return Ok(None);
        }

        tracing::debug!(bytes = bytes_read, "Datos recibidos");
        Ok(Some(String::from_utf8_lossy(&buffer[..bytes_read]).into_owned()))
    }

    /// Escribe todos los bytes en la conexión activa
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), EndpointError> {
        let connection = self
            .connection
            .as_mut()
            .ok_or(EndpointError::NotConnected { operation: "write" })?;

        connection
            .write_all(bytes)
            .and_then(|()| connection.flush())
            .map_err(|source| {
                tracing::error!(error = %source, "Fallo en write");
                EndpointError::Write {
                    operation: "write",
                    source,
                }
            })?;

        tracing::debug!(bytes = bytes.len(), "Datos enviados");
        Ok(())
    }

    /// Cierra la conexión (si existe) y el socket de escucha
    ///
    /// Es seguro llamarlo aunque `accept` nunca haya tenido éxito, y
    /// más de una vez.
    pub fn shutdown(&mut self) {
        if let Some(connection) = self.connection.take() {
            // El cliente puede haber cerrado ya; no es un error aquí
            if let Err(e) = connection.shutdown(Shutdown::Both) {
                tracing::debug!(error = %e, "shutdown de la conexión");
            }
            tracing::debug!("Conexión cerrada");
        }

        if self.listener.take().is_some() {
            self.listening = false;
            tracing::info!(address = %self.local_addr, "Endpoint cerrado");
        }
    }
}

impl Drop for Endpoint {
    fn drop(&mut self) {
        self.shutdown();
    }
}
