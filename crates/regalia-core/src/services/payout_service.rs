use tracing::{debug, info};

use crate::domain::{AllocationPolicy, CalculationResult, Listener, ListenerId, ListenerSnapshot, PlatformTotals};
use crate::errors::CoreError;
use crate::ports::PlayStatsSource;

pub struct PayoutService<S>
where
  S: PlayStatsSource,
{
  source: S,
}

impl<S> PayoutService<S>
where
  S: PlayStatsSource,
{
  pub fn new(source: S) -> Self {
    Self { source }
  }

  pub fn list_listeners(&self) -> Result<Vec<Listener>, CoreError> {
    self.source.list_listeners()
  }

  pub fn platform_totals(&self) -> Result<PlatformTotals, CoreError> {
    self.source.platform_totals()
  }

  /// Construye la foto de un oyente con unos totales de plataforma ya obtenidos.
  pub fn snapshot(&self, id: ListenerId, platform: PlatformTotals) -> Result<ListenerSnapshot, CoreError> {
    let listener = self.source.find_listener(id)?.ok_or_else(|| CoreError::NotFound(format!("listener {id}")))?;
    let artist_stats = self.source.artist_stats(id)?;

    debug!(listener = %listener.username, artists = artist_stats.len(), "snapshot built");
    Ok(ListenerSnapshot::new(listener, artist_stats, platform))
  }

  /// Calcula el reparto de un único oyente.
  pub fn calculate(&self, id: ListenerId, policy: &AllocationPolicy) -> Result<CalculationResult, CoreError> {
    let platform = self.platform_totals()?;
    Ok(self.snapshot(id, platform)?.compute(policy))
  }

  /// Calcula el reparto de todos los oyentes con la misma política.
  ///
  /// Los totales de la plataforma se leen una sola vez para todo el lote.
  pub fn calculate_all(&self, policy: &AllocationPolicy) -> Result<Vec<(Listener, CalculationResult)>, CoreError> {
    let platform = self.platform_totals()?;
    let listeners = self.source.list_listeners()?;
    info!(listeners = listeners.len(), policy = %policy.kind(), "calculating batch");

    listeners
      .into_iter()
      .map(|listener| -> Result<_, CoreError> {
        let snapshot = self.snapshot(listener.id, platform)?;
        let result = snapshot.compute(policy);
        Ok((snapshot.listener, result))
      })
      .collect()
  }
}
