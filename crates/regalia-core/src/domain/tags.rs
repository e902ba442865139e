use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::PolicyError;

/// Familias de etiquetas que una canción lleva y que el operador puede usar
/// para decidir qué artistas son prioritarios.
///
/// El año de publicación también viaja en cada [`Song`](super::Song), pero no es
/// una familia seleccionable: es numérico y no forma parte del vocabulario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFamily {
  Genre,
  /// Tipo de voz principal (masculina, femenina, mixta, instrumental).
  #[serde(alias = "vocalist_gender")]
  VocalType,
  Geography,
  LeadInstrument,
  Theme,
}

impl TagFamily {
  pub const ALL: [TagFamily; 5] =
    [TagFamily::Genre, TagFamily::VocalType, TagFamily::Geography, TagFamily::LeadInstrument, TagFamily::Theme];

  /// Clave estable usada en JSON, TOML y en la línea de comandos.
  pub fn as_str(&self) -> &'static str {
    match self {
      TagFamily::Genre => "genre",
      TagFamily::VocalType => "vocal_type",
      TagFamily::Geography => "geography",
      TagFamily::LeadInstrument => "lead_instrument",
      TagFamily::Theme => "theme",
    }
  }

  /// Valores que el catálogo ofrece para esta familia.
  ///
  /// Es el vocabulario que se muestra al operador; la pertenencia se evalúa
  /// por igualdad exacta, así que un valor fuera de esta lista simplemente no
  /// coincide con ninguna canción etiquetada desde el catálogo.
  pub fn options(&self) -> &'static [&'static str] {
    match self {
      TagFamily::Genre => &[
        "Rock",
        "Pop",
        "Jazz",
        "Hip-Hop",
        "Country",
        "Electronic",
        "R&B",
        "Classical",
        "Folk",
        "Blues",
        "Metal",
        "Indie",
      ],
      TagFamily::VocalType => &["Male Vocals", "Female Vocals", "Mixed Vocals", "Instrumental"],
      TagFamily::Geography => &["US", "UK", "Canada", "Europe", "Asia", "Latin America", "Australia", "Global"],
      TagFamily::LeadInstrument => &["Guitar", "Piano", "Synth", "Drums", "Violin", "Bass", "Vocals", "Saxophone"],
      TagFamily::Theme => &[
        "Love",
        "Party",
        "Introspective",
        "Political",
        "Nature",
        "Urban Life",
        "Heartbreak",
        "Celebration",
      ],
    }
  }
}

impl fmt::Display for TagFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      TagFamily::Genre => "Genre",
      TagFamily::VocalType => "Vocal type",
      TagFamily::Geography => "Geography",
      TagFamily::LeadInstrument => "Lead instrument",
      TagFamily::Theme => "Theme",
    };
    write!(f, "{}", text)
  }
}

impl FromStr for TagFamily {
  type Err = PolicyError;

  /// Acepta la clave canónica y variantes con espacios, guiones o mayúsculas
  /// (`"Lead Instrument"`, `"lead-instrument"`), además del nombre histórico
  /// `vocalist_gender`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace(['-', ' ', '_'], "");

    let family = match normalized.as_str() {
      "genre" => TagFamily::Genre,
      "vocaltype" | "vocalistgender" | "vocals" => TagFamily::VocalType,
      "geography" | "region" => TagFamily::Geography,
      "leadinstrument" | "instrument" => TagFamily::LeadInstrument,
      "theme" => TagFamily::Theme,
      _ => return Err(PolicyError::UnknownTagFamily(s.to_string())),
    };

    Ok(family)
  }
}
