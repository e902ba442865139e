use std::cmp::Ordering;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ids::ArtistId;
use super::play_stats::ArtistPlayStat;
use crate::errors::PolicyError;

/// Devuelve `value` si es finito y `0.0` en caso contrario.
///
/// Ningún campo monetario o porcentual de un resultado puede ser `NaN` ni infinito.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
  if value.is_finite() { value } else { 0.0 }
}

/// Desglose del reparto para un artista.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistPayout {
  pub artist_id: ArtistId,
  pub artist_name: String,
  pub listener_plays: u64,
  pub total_platform_plays: u64,
  /// Fracción (0..=1) de las escuchas del oyente que fueron a este artista.
  pub pct_listener_plays: f64,
  /// `listener_plays / total_platform_plays` del propio artista.
  pub pct_platform_plays: f64,
  pub user_centric_payout: f64,
  pub pooled_payout: f64,
  /// Siempre `user_centric_payout + pooled_payout`.
  pub total_payout: f64,
  pub is_priority: bool,
  pub is_listened: bool,
}

impl ArtistPayout {
  /// Construye el registro a partir de sus dos componentes.
  ///
  /// Los valores no finitos se sustituyen por `0.0` antes de sumarlos, de modo
  /// que `total_payout` es exactamente la suma de lo que se guarda.
  pub(crate) fn new(
    stat: &ArtistPlayStat,
    pct_listener_plays: f64,
    user_centric_payout: f64,
    pooled_payout: f64,
    is_priority: bool,
  ) -> Self {
    let user_centric_payout = finite_or_zero(user_centric_payout);
    let pooled_payout = finite_or_zero(pooled_payout);

    Self {
      artist_id: stat.artist_id,
      artist_name: stat.artist_name.clone(),
      listener_plays: stat.listener_plays,
      total_platform_plays: stat.total_platform_plays,
      pct_listener_plays: finite_or_zero(pct_listener_plays),
      pct_platform_plays: finite_or_zero(stat.listener_plays as f64 / stat.total_platform_plays as f64),
      user_centric_payout,
      pooled_payout,
      total_payout: user_centric_payout + pooled_payout,
      is_priority,
      is_listened: stat.listener_plays > 0,
    }
  }
}

/// Resultado agregado de un cálculo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
  pub payouts: Vec<ArtistPayout>,
  /// Suma de `total_payout` sobre todos los artistas entregados al motor.
  pub total_to_listened_artists: f64,
  /// Parte de la cuota que acaba en artistas fuera de la lista (o sin asignar).
  pub total_to_other_artists: f64,
  pub subscription_fee: f64,
  /// Importe reservado a los artistas prioritarios (0 fuera de las políticas de prioridad).
  pub priority_payout: f64,
  /// Importe que queda tras la reserva prioritaria (la cuota entera fuera de ellas).
  pub remainder_payout: f64,
}

impl CalculationResult {
  /// Nada repartido: toda la cuota queda para otros artistas.
  pub fn unallocated(fee: f64) -> Self {
    Self {
      payouts: Vec::new(),
      total_to_listened_artists: 0.0,
      total_to_other_artists: fee,
      subscription_fee: fee,
      priority_payout: 0.0,
      remainder_payout: fee,
    }
  }

  /// Cierra un reparto: lo que no llegó a `payouts` va a otros artistas.
  pub(crate) fn from_payouts(fee: f64, payouts: Vec<ArtistPayout>, priority_payout: f64, remainder_payout: f64) -> Self {
    let total_to_listened_artists: f64 = payouts.iter().map(|p| p.total_payout).sum();

    Self {
      payouts,
      total_to_listened_artists,
      total_to_other_artists: finite_or_zero(fee - total_to_listened_artists),
      subscription_fee: fee,
      priority_payout: finite_or_zero(priority_payout),
      remainder_payout: finite_or_zero(remainder_payout),
    }
  }

  /// Reparto en el que, por construcción, toda la cuota queda dentro de la lista.
  pub(crate) fn fully_allocated(fee: f64, payouts: Vec<ArtistPayout>) -> Self {
    Self {
      payouts,
      total_to_listened_artists: fee,
      total_to_other_artists: 0.0,
      subscription_fee: fee,
      priority_payout: 0.0,
      remainder_payout: fee,
    }
  }

  /// Suma de `total_payout` de los artistas marcados como prioritarios.
  pub fn priority_total(&self) -> f64 {
    self.payouts.iter().filter(|p| p.is_priority).map(|p| p.total_payout).sum()
  }

  pub fn payout_for(&self, artist_id: ArtistId) -> Option<&ArtistPayout> {
    self.payouts.iter().find(|p| p.artist_id == artist_id)
  }

  /// Componentes sumados sobre todos los registros.
  pub fn component_totals(&self) -> ComponentTotals {
    ComponentTotals::sum(self.payouts.iter())
  }

  /// Componentes sumados sólo sobre los registros no prioritarios.
  pub fn non_priority_totals(&self) -> ComponentTotals {
    ComponentTotals::sum(self.payouts.iter().filter(|p| !p.is_priority))
  }

  /// Copia de los registros ordenada por `column`.
  pub fn sorted_payouts(&self, column: SortColumn, direction: SortDirection) -> Vec<ArtistPayout> {
    let mut payouts = self.payouts.clone();
    sort_payouts(&mut payouts, column, direction);
    payouts
  }
}

/// Suma de los componentes de pago de un grupo de registros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ComponentTotals {
  pub listener_plays: u64,
  pub total_platform_plays: u64,
  pub pct_platform_plays: f64,
  pub user_centric_payout: f64,
  pub pooled_payout: f64,
  pub total_payout: f64,
}

impl ComponentTotals {
  pub fn sum<'a>(payouts: impl IntoIterator<Item = &'a ArtistPayout>) -> Self {
    payouts.into_iter().fold(Self::default(), |acc, p| Self {
      listener_plays: acc.listener_plays.saturating_add(p.listener_plays),
      total_platform_plays: acc.total_platform_plays.saturating_add(p.total_platform_plays),
      pct_platform_plays: acc.pct_platform_plays + p.pct_platform_plays,
      user_centric_payout: acc.user_centric_payout + p.user_centric_payout,
      pooled_payout: acc.pooled_payout + p.pooled_payout,
      total_payout: acc.total_payout + p.total_payout,
    })
  }
}

/// Columnas por las que se puede ordenar una tabla de pagos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
  #[default]
  ArtistName,
  ListenerPlays,
  TotalPlatformPlays,
  PctListenerPlays,
  PctPlatformPlays,
  UserCentricPayout,
  PooledPayout,
  TotalPayout,
}

impl SortColumn {
  fn compare(&self, a: &ArtistPayout, b: &ArtistPayout) -> Ordering {
    match self {
      SortColumn::ArtistName => a.artist_name.to_lowercase().cmp(&b.artist_name.to_lowercase()),
      SortColumn::ListenerPlays => a.listener_plays.cmp(&b.listener_plays),
      SortColumn::TotalPlatformPlays => a.total_platform_plays.cmp(&b.total_platform_plays),
      SortColumn::PctListenerPlays => a.pct_listener_plays.total_cmp(&b.pct_listener_plays),
      SortColumn::PctPlatformPlays => a.pct_platform_plays.total_cmp(&b.pct_platform_plays),
      SortColumn::UserCentricPayout => a.user_centric_payout.total_cmp(&b.user_centric_payout),
      SortColumn::PooledPayout => a.pooled_payout.total_cmp(&b.pooled_payout),
      SortColumn::TotalPayout => a.total_payout.total_cmp(&b.total_payout),
    }
  }
}

impl FromStr for SortColumn {
  type Err = PolicyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace(['-', ' ', '_'], "");

    let column = match normalized.as_str() {
      "artistname" | "name" | "artist" => SortColumn::ArtistName,
      "listenerplays" | "plays" => SortColumn::ListenerPlays,
      "totalplatformplays" | "platformplays" => SortColumn::TotalPlatformPlays,
      "pctlistenerplays" => SortColumn::PctListenerPlays,
      "pctplatformplays" => SortColumn::PctPlatformPlays,
      "usercentricpayout" | "usercentric" => SortColumn::UserCentricPayout,
      "pooledpayout" | "pooled" => SortColumn::PooledPayout,
      "totalpayout" | "payout" | "total" => SortColumn::TotalPayout,
      _ => return Err(PolicyError::UnknownSortColumn(s.to_string())),
    };

    Ok(column)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

impl fmt::Display for SortDirection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SortDirection::Asc => write!(f, "asc"),
      SortDirection::Desc => write!(f, "desc"),
    }
  }
}

/// Ordena en el sitio. El orden es estable: los empates conservan el orden de entrada.
pub fn sort_payouts(payouts: &mut [ArtistPayout], column: SortColumn, direction: SortDirection) {
  payouts.sort_by(|a, b| {
    let ord = column.compare(a, b);
    match direction {
      SortDirection::Asc => ord,
      SortDirection::Desc => ord.reverse(),
    }
  });
}
