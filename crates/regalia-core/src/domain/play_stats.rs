use serde::{Deserialize, Serialize};

use super::ids::ArtistId;
use super::listener::Listener;
use super::payout::CalculationResult;
use super::policy::AllocationPolicy;
use super::song::Song;
use crate::allocation;

/// Escuchas de un oyente concreto sobre un artista, junto con las escuchas
/// totales que ese artista tiene en la plataforma.
///
/// Se espera `listener_plays <= total_platform_plays`, pero no se valida: si
/// la fuente entrega datos incoherentes los porcentajes pueden pasar de 1.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistPlayStat {
  pub artist_id: ArtistId,
  pub artist_name: String,
  pub listener_plays: u64,
  pub total_platform_plays: u64,
  #[serde(default)]
  pub songs: Vec<Song>,
}

/// Suma de `listener_plays` sobre la lista entregada, saturando en `u64::MAX`.
pub fn total_listener_plays(stats: &[ArtistPlayStat]) -> u64 {
  stats.iter().fold(0u64, |acc, s| acc.saturating_add(s.listener_plays))
}

/// Totales de toda la plataforma, obtenidos una vez por lote de cálculos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformTotals {
  pub total_platform_plays: u64,
}

/// Foto inmutable de todo lo que el motor necesita para un oyente.
///
/// Se construye a partir de la fuente de datos y después no cambia; varios
/// cálculos (una política tras otra) pueden reutilizarla sin volver a consultar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerSnapshot {
  pub listener: Listener,
  pub artist_stats: Vec<ArtistPlayStat>,
  pub platform: PlatformTotals,
}

impl ListenerSnapshot {
  pub fn new(listener: Listener, artist_stats: Vec<ArtistPlayStat>, platform: PlatformTotals) -> Self {
    Self { listener, artist_stats, platform }
  }

  /// Reparte la cuota del oyente según `policy`.
  pub fn compute(&self, policy: &AllocationPolicy) -> CalculationResult {
    allocation::compute_payouts(
      self.listener.subscription_fee,
      &self.artist_stats,
      self.platform.total_platform_plays,
      policy,
    )
  }

  pub fn summary(&self) -> ListenerSummary {
    ListenerSummary {
      total_listener_plays: total_listener_plays(&self.artist_stats),
      unique_artists: self.artist_stats.len(),
      subscription_fee: self.listener.subscription_fee,
      total_platform_plays: self.platform.total_platform_plays,
    }
  }
}

/// Cifras de consumo mensual que acompañan al desglose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListenerSummary {
  pub total_listener_plays: u64,
  pub unique_artists: usize,
  pub subscription_fee: f64,
  pub total_platform_plays: u64,
}
