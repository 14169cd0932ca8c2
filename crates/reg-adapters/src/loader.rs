//! Carga con degradación progresiva: API → fichero local → datos fijos.
//!
//! Cada fuente es una estrategia; `FallbackLoader` las prueba en orden y se
//! queda con la primera que responde. Si todas fallan devuelve `Unavailable`
//! con el motivo de cada intento.
use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::PathBuf;

use crate::{AdapterError, SourceFailure, Unavailable};

#[async_trait]
pub trait DataSource<T>: Send + Sync {
    fn name(&self) -> &str;

    async fn load(&self) -> Result<T, AdapterError>;
}

/// Resultado exitoso, con el nombre de la fuente que lo produjo.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub source: String,
}

pub struct FallbackLoader<T> {
    sources: Vec<Box<dyn DataSource<T>>>,
}

impl<T: Send> FallbackLoader<T> {
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    /// Añade una estrategia al final de la cadena.
    pub fn then<S>(mut self, source: S) -> Self
        where S: DataSource<T> + 'static
    {
        self.sources.push(Box::new(source));
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn load(&self) -> Result<Loaded<T>, Unavailable> {
        let mut attempts = Vec::new();
        for source in &self.sources {
            match source.load().await {
                Ok(value) => {
                    debug!("loaded data from '{}' after {} failed attempt(s)", source.name(), attempts.len());
                    return Ok(Loaded { value,
                                       source: source.name().to_string() });
                }
                Err(error) => {
                    warn!("data source '{}' failed: {}", source.name(), error);
                    attempts.push(SourceFailure { source: source.name().to_string(),
                                                  error });
                }
            }
        }
        Err(Unavailable { attempts })
    }
}

impl<T: Send> Default for FallbackLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Último recurso: datos embebidos.
pub struct StaticSource<T> {
    name: String,
    value: T,
}

impl<T> StaticSource<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self { name: name.into(),
               value }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> DataSource<T> for StaticSource<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<T, AdapterError> {
        Ok(self.value.clone())
    }
}

/// Fichero JSON local.
pub struct JsonFileSource<T> {
    name: String,
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileSource<T> {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(),
               path: path.into(),
               _marker: PhantomData }
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send> DataSource<T> for JsonFileSource<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<T, AdapterError> {
        let raw = tokio::fs::read_to_string(&self.path).await
                                                       .map_err(|e| AdapterError::Io { path: self.path.display().to_string(),
                                                                                       message: e.to_string() })?;
        serde_json::from_str(&raw).map_err(|e| AdapterError::Parse(format!("{}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    #[async_trait]
    impl DataSource<Vec<String>> for Offline {
        fn name(&self) -> &str {
            "api"
        }

        async fn load(&self) -> Result<Vec<String>, AdapterError> {
            Err(AdapterError::Source("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn falls_through_to_first_working_source() {
        let loader = FallbackLoader::<Vec<String>>::new().then(Offline)
                                                         .then(JsonFileSource::new("file", "/nonexistent/menu.json"))
                                                         .then(StaticSource::new("builtin", vec!["home".to_string()]));
        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded.source, "builtin");
        assert_eq!(loaded.value, vec!["home".to_string()]);
    }

    #[tokio::test]
    async fn reports_every_failed_attempt() {
        let loader = FallbackLoader::<Vec<String>>::new().then(Offline)
                                                         .then(JsonFileSource::new("file", "/nonexistent/menu.json"));
        let err = loader.load().await.unwrap_err();
        let names: Vec<&str> = err.attempts.iter().map(|a| a.source.as_str()).collect();
        assert_eq!(names, vec!["api", "file"]);
        assert!(matches!(err.attempts[1].error, AdapterError::Io { .. }));
    }

    #[tokio::test]
    async fn empty_chain_is_unavailable() {
        let loader: FallbackLoader<u32> = FallbackLoader::default();
        assert!(loader.load().await.unwrap_err().attempts.is_empty());
    }
}
