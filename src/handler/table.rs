//! # Tabla de respuestas
//! src/handler/table.rs
//!
//! Mapa segmento de URI → body. Se puede cargar desde un objeto JSON:
//!
//! ```json
//! { "Nepal": "Kathmandu", "hello.txt": "This is sample content" }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errores al cargar una tabla desde archivo
#[derive(Debug, Error)]
pub enum TableError {
    /// No se pudo leer el archivo
    #[error("Cannot read table {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// El contenido no es un objeto JSON de strings
    #[error("Invalid table {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Tabla segmento → body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LookupTable {
    entries: HashMap<String, String>,
}

impl LookupTable {
    /// Crea una tabla vacía
    pub fn new() -> Self {
        Self::default()
    }

    /// Tabla por defecto del fixture: capitales y un archivo de ejemplo
    pub fn capitals() -> Self {
        [
            ("Nepal", "Kathmandu"),
            ("Peru", "Lima"),
            ("Italy", "Rome"),
            ("USA", "Washington, D.C"),
            ("hello.txt", "This is sample content"),
        ]
        .into_iter()
        .collect()
    }

    /// Parsea la tabla desde un objeto JSON de strings
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Lee y parsea la tabla desde un archivo JSON
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content).map_err(|source| TableError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Busca el body de un segmento
    pub fn get(&self, segment: &str) -> Option<&str> {
        self.entries.get(segment).map(|s| s.as_str())
    }

    /// Agrega o reemplaza una entrada
    pub fn insert(&mut self, segment: &str, body: &str) {
        self.entries.insert(segment.to_string(), body.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LookupTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitals() {
        let table = LookupTable::capitals();

        assert_eq!(table.len(), 5);
        assert_eq!(table.get("Nepal"), Some("Kathmandu"));
        assert_eq!(table.get("USA"), Some("Washington, D.C"));
        assert_eq!(table.get("hello.txt"), Some("This is sample content"));
        assert_eq!(table.get("/Nepal"), None);
    }

    #[test]
    fn test_from_json_str() {
        let table = LookupTable::from_json_str(r#"{"Chile": "Santiago"}"#).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Chile"), Some("Santiago"));
    }

    #[test]
    fn test_from_json_str_rejects_non_string_values() {
        assert!(LookupTable::from_json_str(r#"{"Chile": 1}"#).is_err());
        assert!(LookupTable::from_json_str("[]").is_err());
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("lookup_table_{}.json", std::process::id()));
        fs::write(&path, r#"{"Japan": "Tokyo", "Peru": "Lima"}"#).unwrap();

        let table = LookupTable::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(table.get("Japan"), Some("Tokyo"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_missing_file() {
        let error = LookupTable::from_json_file("/nonexistent/table.json").unwrap_err();

        assert!(matches!(error, TableError::Io { .. }));
        assert!(error.to_string().starts_with("Cannot read table /nonexistent/table.json: "));
    }

    #[test]
    fn test_from_invalid_json_file() {
        let path = std::env::temp_dir().join(format!("bad_table_{}.json", std::process::id()));
        fs::write(&path, r#"{"Japan": 1}"#).unwrap();

        let error = LookupTable::from_json_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(error, TableError::Json { .. }));
        assert!(error.to_string().starts_with("Invalid table "));
    }

    #[test]
    fn test_insert() {
        let mut table = LookupTable::new();
        assert!(table.is_empty());

        table.insert("Peru", "Cusco");
        table.insert("Peru", "Lima");

        assert_eq!(table.get("Peru"), Some("Lima"));
        assert_eq!(table.len(), 1);
    }
}
