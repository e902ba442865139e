use serde::{Deserialize, Serialize};

use super::ids::{ArtistId, SongId};
use super::tags::TagFamily;

/// Una canción del catálogo con las etiquetas que usa la política
/// por características.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
  pub id: SongId,
  pub title: String,
  pub artist_id: ArtistId,
  pub genre: String,
  pub release_year: i32,
  /// Tipo de voz. Las fuentes antiguas lo llaman `vocalist_gender`.
  #[serde(alias = "vocalist_gender")]
  pub vocal_type: String,
  pub geography: String,
  pub lead_instrument: String,
  pub theme: String,
}

impl Song {
  /// Valor de la etiqueta de `family` para esta canción.
  pub fn tag(&self, family: TagFamily) -> &str {
    match family {
      TagFamily::Genre => &self.genre,
      TagFamily::VocalType => &self.vocal_type,
      TagFamily::Geography => &self.geography,
      TagFamily::LeadInstrument => &self.lead_instrument,
      TagFamily::Theme => &self.theme,
    }
  }
}
