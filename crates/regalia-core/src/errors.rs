// crates/regalia-core/src/errors.rs
use thiserror::Error;

/// Error genérico del núcleo de Regalia.
///
/// El motor de reparto nunca lo produce: sólo aparece en los bordes
/// (fuentes de datos, selección de política). Las capas superiores (CLI, etc.)
/// deberían mapearlo a mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("repository error: {0}")]
  Repository(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error(transparent)]
  Policy(#[from] PolicyError),
}

/// Configuración de política inválida.
///
/// Se detecta al convertir la selección del operador en una
/// [`AllocationPolicy`](crate::domain::AllocationPolicy) tipada, nunca durante el cálculo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
  #[error("unknown allocation policy: {0}")]
  UnknownKind(String),

  #[error("split must be within 0..=100, got {0}")]
  SplitOutOfRange(u8),

  #[error("unknown tag family: {0}")]
  UnknownTagFamily(String),

  #[error("unknown sort column: {0}")]
  UnknownSortColumn(String),
}
