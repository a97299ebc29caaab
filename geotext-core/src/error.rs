//! Tipos de erro do geotext-core.

use thiserror::Error;

/// Resultado padrão das operações do crate.
pub type Result<T> = std::result::Result<T, GeoTextError>;

/// Erros propagados pelo núcleo.
///
/// O caminho de matching é total: uma chave ausente no índice simplesmente não
/// gera match. Só configuração inválida e pacotes de registros ilegíveis falham.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeoTextError {
    /// Modo de matching desconhecido (ex: "fuzzy").
    #[error("configuração inválida: {0}")]
    InvalidConfiguration(String),

    /// Pacote de registros JSON rejeitado.
    #[error("registros inválidos: {0}")]
    Records(String),
}

impl GeoTextError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        GeoTextError::InvalidConfiguration(msg.into())
    }
}

impl From<serde_json::Error> for GeoTextError {
    fn from(err: serde_json::Error) -> Self {
        GeoTextError::Records(err.to_string())
    }
}
