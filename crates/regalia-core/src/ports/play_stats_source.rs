use crate::domain::{ArtistPlayStat, Listener, ListenerId, PlatformTotals};
use crate::errors::CoreError;

/// Fuente de datos de escuchas, ya agregadas.
///
/// La implementan las capas externas (base de datos, fichero de fixture...).
/// Todas las consultas son de sólo lectura.
pub trait PlayStatsSource {
  fn list_listeners(&self) -> Result<Vec<Listener>, CoreError>;

  fn find_listener(&self, id: ListenerId) -> Result<Option<Listener>, CoreError>;

  /// Una entrada por artista con el que el oyente tiene relación.
  fn artist_stats(&self, listener: ListenerId) -> Result<Vec<ArtistPlayStat>, CoreError>;

  fn platform_totals(&self) -> Result<PlatformTotals, CoreError>;
}
