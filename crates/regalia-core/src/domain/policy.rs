use std::collections::BTreeMap;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ids::ArtistId;
use super::play_stats::ArtistPlayStat;
use super::tags::TagFamily;
use crate::errors::PolicyError;

/// Porcentaje de la cuota que pasa por el submodelo user-centric; el resto
/// (`100 - split`) pasa por el submodelo pooled.
///
/// Sólo admite valores en `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Split(u8);

impl Split {
  const MAX: u8 = 100;

  /// Valor por defecto del control deslizante: mitad y mitad.
  pub const HALF: Split = Split(50);

  /// Devuelve `None` si `percent` pasa de 100.
  pub fn new(percent: u8) -> Option<Self> {
    (percent <= Self::MAX).then_some(Self(percent))
  }

  pub fn percent(&self) -> u8 {
    self.0
  }

  /// `split / 100`.
  pub fn user_centric_fraction(&self) -> f64 {
    f64::from(self.0) / 100.0
  }

  /// `(100 - split) / 100`.
  pub fn pooled_fraction(&self) -> f64 {
    f64::from(Self::MAX - self.0) / 100.0
  }
}

impl Default for Split {
  fn default() -> Self {
    Self::HALF
  }
}

impl TryFrom<u8> for Split {
  type Error = PolicyError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Split::new(value).ok_or(PolicyError::SplitOutOfRange(value))
  }
}

impl From<Split> for u8 {
  fn from(split: Split) -> Self {
    split.0
  }
}

impl fmt::Display for Split {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}% user-centric / {}% pooled", self.0, Self::MAX - self.0)
  }
}

/// Las cinco políticas de reparto reconocidas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
  Pooled,
  UserCentric,
  Hybrid,
  PriorityArtists,
  PriorityCharacteristics,
}

impl PolicyKind {
  pub const ALL: [PolicyKind; 5] = [
    PolicyKind::Pooled,
    PolicyKind::UserCentric,
    PolicyKind::Hybrid,
    PolicyKind::PriorityArtists,
    PolicyKind::PriorityCharacteristics,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      PolicyKind::Pooled => "pooled",
      PolicyKind::UserCentric => "user_centric",
      PolicyKind::Hybrid => "hybrid",
      PolicyKind::PriorityArtists => "priority_artists",
      PolicyKind::PriorityCharacteristics => "priority_characteristics",
    }
  }
}

impl fmt::Display for PolicyKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PolicyKind {
  type Err = PolicyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace(['-', ' ', '_'], "");

    let kind = match normalized.as_str() {
      "pooled" | "prorata" => PolicyKind::Pooled,
      "usercentric" => PolicyKind::UserCentric,
      "hybrid" => PolicyKind::Hybrid,
      "priorityartists" => PolicyKind::PriorityArtists,
      "prioritycharacteristics" => PolicyKind::PriorityCharacteristics,
      _ => return Err(PolicyError::UnknownKind(s.to_string())),
    };

    Ok(kind)
  }
}

/// Valores de etiqueta aceptados por familia.
///
/// Un artista es prioritario si, para alguna familia con valores
/// seleccionados, alguna de sus canciones lleva uno de esos valores
/// (un OR de ORs). Las familias con lista vacía no cuentan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityCharacteristics(BTreeMap<TagFamily, Vec<String>>);

impl PriorityCharacteristics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Añade `values` a la familia `family`.
  pub fn with<I, S>(mut self, family: TagFamily, values: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.0.entry(family).or_default().extend(values.into_iter().map(Into::into));
    self
  }

  pub fn values(&self, family: TagFamily) -> &[String] {
    self.0.get(&family).map(Vec::as_slice).unwrap_or(&[])
  }

  /// `true` si al menos una familia tiene algún valor seleccionado.
  pub fn has_selection(&self) -> bool {
    self.0.values().any(|values| !values.is_empty())
  }

  pub fn matches(&self, artist: &ArtistPlayStat) -> bool {
    self.0.iter().filter(|(_, values)| !values.is_empty()).any(|(family, values)| {
      artist.songs.iter().any(|song| {
        let tag = song.tag(*family);
        values.iter().any(|v| v == tag)
      })
    })
  }

  /// Quita `value` si ya estaba seleccionado; si no, lo añade.
  pub fn toggle(&mut self, family: TagFamily, value: &str) {
    let values = self.0.entry(family).or_default();
    match values.iter().position(|v| v == value) {
      Some(idx) => {
        values.remove(idx);
      }
      None => values.push(value.to_string()),
    }
  }
}

/// Política tipada con sus parámetros. El despachador es total sobre este enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AllocationPolicy {
  Pooled,
  UserCentric,
  Hybrid {
    split: Split,
  },
  PriorityArtists {
    split: Split,
    artist_ids: Vec<ArtistId>,
  },
  PriorityCharacteristics {
    split: Split,
    characteristics: PriorityCharacteristics,
  },
}

impl AllocationPolicy {
  pub fn kind(&self) -> PolicyKind {
    match self {
      AllocationPolicy::Pooled => PolicyKind::Pooled,
      AllocationPolicy::UserCentric => PolicyKind::UserCentric,
      AllocationPolicy::Hybrid { .. } => PolicyKind::Hybrid,
      AllocationPolicy::PriorityArtists { .. } => PolicyKind::PriorityArtists,
      AllocationPolicy::PriorityCharacteristics { .. } => PolicyKind::PriorityCharacteristics,
    }
  }
}

fn default_kind() -> String {
  PolicyKind::UserCentric.as_str().to_string()
}

fn default_split() -> u8 {
  Split::HALF.percent()
}

/// Selección del operador tal como la mantiene una interfaz: un `type` libre,
/// el split del control deslizante y las listas de prioridad, que sobreviven
/// aunque se cambie de política.
///
/// Se convierte en [`AllocationPolicy`] con `TryFrom`; un `type` desconocido o
/// un split fuera de rango es un error de configuración.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySelection {
  #[serde(rename = "type", default = "default_kind")]
  pub kind: String,
  #[serde(default = "default_split")]
  pub hybrid_split: u8,
  #[serde(default)]
  pub priority_artist_ids: Vec<ArtistId>,
  #[serde(default)]
  pub priority_characteristics: PriorityCharacteristics,
}

impl Default for PolicySelection {
  fn default() -> Self {
    Self {
      kind: default_kind(),
      hybrid_split: default_split(),
      priority_artist_ids: Vec::new(),
      priority_characteristics: PriorityCharacteristics::default(),
    }
  }
}

impl PolicySelection {
  pub fn new(kind: PolicyKind) -> Self {
    Self { kind: kind.as_str().to_string(), ..Self::default() }
  }

  pub fn toggle_priority_artist(&mut self, artist_id: ArtistId) {
    match self.priority_artist_ids.iter().position(|id| *id == artist_id) {
      Some(idx) => {
        self.priority_artist_ids.remove(idx);
      }
      None => self.priority_artist_ids.push(artist_id),
    }
  }

  pub fn toggle_characteristic(&mut self, family: TagFamily, value: &str) {
    self.priority_characteristics.toggle(family, value);
  }
}

impl TryFrom<&PolicySelection> for AllocationPolicy {
  type Error = PolicyError;

  fn try_from(selection: &PolicySelection) -> Result<Self, Self::Error> {
    let kind: PolicyKind = selection.kind.parse()?;
    let split = Split::try_from(selection.hybrid_split)?;

    let policy = match kind {
      PolicyKind::Pooled => AllocationPolicy::Pooled,
      PolicyKind::UserCentric => AllocationPolicy::UserCentric,
      PolicyKind::Hybrid => AllocationPolicy::Hybrid { split },
      PolicyKind::PriorityArtists => {
        AllocationPolicy::PriorityArtists { split, artist_ids: selection.priority_artist_ids.clone() }
      }
      PolicyKind::PriorityCharacteristics => AllocationPolicy::PriorityCharacteristics {
        split,
        characteristics: selection.priority_characteristics.clone(),
      },
    };

    Ok(policy)
  }
}

impl TryFrom<PolicySelection> for AllocationPolicy {
  type Error = PolicyError;

  fn try_from(selection: PolicySelection) -> Result<Self, Self::Error> {
    AllocationPolicy::try_from(&selection)
  }
}
