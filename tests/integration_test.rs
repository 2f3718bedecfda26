//! Tests de integración para el fixture HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero de loopback.
//! El thread del servidor avisa por un canal cuando ya está escuchando y
//! recién entonces el cliente se conecta.

use http_fixture::handler::{HandlerError, LookupHandler, LookupTable};
use http_fixture::http::{Method, Request, Response};
use http_fixture::server::{Server, State};
use http_fixture::ServerError;
use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Helper: levanta un servidor que atiende un intercambio con `handler`
///
/// Retorna la dirección en la que escucha y el resultado del intercambio.
fn spawn_server<H>(handler: H) -> (SocketAddr, JoinHandle<Result<Response, ServerError>>)
where
    H: Fn(&Request) -> Result<Response, HandlerError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    let server_thread = thread::spawn(move || -> Result<Response, ServerError> {
        let mut server = Server::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))?;

        let result = server
            .listen_with(|addr| tx.send(addr).unwrap())
            .and_then(|()| server.exchange(&handler));
        server.stop();
        result
    });

    let addr = rx.recv().expect("server did not start listening");
    (addr, server_thread)
}

/// Helper: envía un request crudo y retorna la respuesta completa
fn send_request(addr: SocketAddr, raw: &str) -> std::io::Result<Vec<u8>> {
    let mut stream = TcpStream::connect(addr)?;
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;

    stream.write_all(raw.as_bytes())?;
    stream.flush()?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response)?;
    Ok(response)
}

fn capitals_handler() -> impl Fn(&Request) -> Result<Response, HandlerError> + Send + 'static {
    let handler = LookupHandler::new(LookupTable::capitals());
    move |request: &Request| http_fixture::handler::Handler::handle(&handler, request)
}

#[test]
fn test_get_capital() {
    let (addr, server) = spawn_server(capitals_handler());

    let response = send_request(addr, "GET /Nepal HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();

    assert_eq!(response, b"HTTP/1.1 200 OK\r\n\r\nKathmandu");
    assert_eq!(server.join().unwrap().unwrap().body(), "Kathmandu");
}

#[test]
fn test_get_with_explicit_content_length() {
    let (addr, server) = spawn_server(capitals_handler());

    let response = send_request(addr, "GET /hello.txt HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(
        String::from_utf8(response).unwrap(),
        "HTTP/1.1 200 OK\r\nContent-Length: 22\r\n\r\nThis is sample content"
    );
    server.join().unwrap().unwrap();
}

#[test]
fn test_unknown_capital_is_not_found() {
    let (addr, server) = spawn_server(capitals_handler());

    let response = send_request(addr, "GET /Atlantis HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n\r\n");
    server.join().unwrap().unwrap();
}

#[test]
fn test_post_surfaces_unsupported_method() {
    let (addr, server) = spawn_server(capitals_handler());

    // El servidor cierra sin responder; el cliente no recibe un 200
    let response = send_request(addr, "POST /Nepal HTTP/1.1\r\n\r\nfoo").unwrap_or_default();
    assert!(!String::from_utf8_lossy(&response).contains("200 OK"));

    let result = server.join().unwrap();
    assert!(matches!(
        result,
        Err(ServerError::Handler(HandlerError::UnsupportedMethod(Method::POST)))
    ));
}

#[test]
fn test_unknown_method_is_parse_error() {
    let (addr, server) = spawn_server(capitals_handler());

    let response = send_request(addr, "DELETE /Nepal HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(response, b"HTTP/1.1 400 Bad Request\r\n\r\n");

    let error = server.join().unwrap().unwrap_err();
    assert_eq!(error.to_string(), "Invalid request: Unsupported HTTP method: DELETE");
}

#[test]
fn test_custom_handler_sees_parsed_request() {
    let (addr, server) = spawn_server(|request: &Request| -> Result<Response, HandlerError> {
        let summary = format!(
            "{} {} {} {}",
            request.method(),
            request.uri(),
            request.headers().len(),
            request.body()
        );
        Ok(Response::ok(&summary).with_header("X-Fixture", "yes"))
    });

    let response =
        send_request(addr, "PUT /Peru HTTP/1.1\r\nHost: x\r\nAccept: */*\r\n\r\nLima").unwrap();

    assert_eq!(
        String::from_utf8(response).unwrap(),
        "HTTP/1.1 200 OK\r\nX-Fixture: yes\r\n\r\nPUT /Peru 3 Lima"
    );
    server.join().unwrap().unwrap();
}

#[test]
fn test_client_closes_without_sending() {
    let (addr, server) = spawn_server(capitals_handler());

    drop(TcpStream::connect(addr).unwrap());

    assert!(matches!(server.join().unwrap(), Err(ServerError::ConnectionClosed)));
}

#[test]
fn test_stop_before_listen() {
    let mut server = Server::create(0).unwrap();
    server.stop();
    assert_eq!(server.state(), State::Stopped);
}

#[test]
fn test_port_is_reusable_after_stop() {
    let (addr, server) = spawn_server(capitals_handler());
    send_request(addr, "GET /Italy HTTP/1.1\r\n\r\n").unwrap();
    server.join().unwrap().unwrap();

    // SO_REUSEADDR permite volver a usar el puerto aunque quede en TIME_WAIT
    let mut again = Server::bind(addr).unwrap();
    assert_eq!(again.local_addr(), addr);
    again.stop();
}
