use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Declara un identificador opaco respaldado por un UUID.
///
/// Los identificadores llegan ya asignados por la fuente de datos; el motor
/// sólo los compara y los copia al resultado.
macro_rules! uuid_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(Uuid);

    impl $name {
      /// Genera un nuevo identificador aleatorio (v4).
      pub fn new() -> Self {
        Self(Uuid::new_v4())
      }

      pub fn from_uuid(u: Uuid) -> Self {
        Self(u)
      }

      pub fn as_uuid(&self) -> Uuid {
        self.0
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }

    impl From<Uuid> for $name {
      fn from(u: Uuid) -> Self {
        Self(u)
      }
    }

    impl From<$name> for Uuid {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl FromStr for $name {
      type Err = uuid::Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }
  };
}

uuid_id!(
  /// Identificador de un artista (la entidad que cobra).
  ArtistId
);

uuid_id!(
  /// Identificador de una canción del catálogo.
  SongId
);

uuid_id!(
  /// Identificador de un oyente suscrito (quien paga la cuota).
  ListenerId
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_hyphenated_uuid_with_whitespace() {
    let id: ArtistId = " 6f1c1f0e-8a0c-4c8e-9d7b-2f1f6a9b3c11 ".parse().unwrap();
    assert_eq!(id.to_string(), "6f1c1f0e-8a0c-4c8e-9d7b-2f1f6a9b3c11");
  }

  #[test]
  fn rejects_garbage() {
    assert!("not-an-id".parse::<ListenerId>().is_err());
  }
}
