//! # HTTP Fixture - Entry Point
//! src/main.rs
//!
//! Atiende un único intercambio y termina. Código de salida 1 ante
//! cualquier error.

use http_fixture::config::Config;
use http_fixture::handler::{LookupHandler, LookupTable};
use http_fixture::logging;
use http_fixture::server::Server;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = Config::new();
    logging::init(&config.log_level);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Error fatal");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let table = match &config.table {
        Some(path) => LookupTable::from_json_file(path)?,
        None => LookupTable::capitals(),
    };
    tracing::info!(entries = table.len(), "Tabla cargada");

    let handler = LookupHandler::new(table).with_sized_paths(config.sized_paths.iter().cloned());

    let mut server = Server::bind(config.socket_addr()?)?;
    tracing::info!(address = %server.local_addr(), "Fixture listo");

    // stop() corre aunque el intercambio falle
    let result = server
        .listen()
        .and_then(|()| server.exchange(&handler).map(|_| ()));
    server.stop();

    Ok(result?)
}
