use tracing::trace;

use super::carve_out::carve_out;
use super::hybrid::calculate_hybrid;
use crate::domain::{ArtistPlayStat, CalculationResult, PriorityCharacteristics, Split};

/// Prioridad por características: mismo reparto en dos fases que
/// [`calculate_priority_artists`](super::calculate_priority_artists), pero un
/// artista es prioritario si alguna de sus canciones lleva alguno de los
/// valores seleccionados en alguna familia.
///
/// Sin ningún valor seleccionado la política se comporta exactamente como la
/// híbrida con el mismo `split`.
pub fn calculate_priority_characteristics(
  fee: f64,
  artist_stats: &[ArtistPlayStat],
  total_platform_plays: u64,
  characteristics: &PriorityCharacteristics,
  split: Split,
) -> CalculationResult {
  if !characteristics.has_selection() {
    trace!("priority characteristics: empty selection, falling back to hybrid");
    return calculate_hybrid(fee, artist_stats, total_platform_plays, split);
  }

  carve_out(fee, artist_stats, total_platform_plays, split, |artist| characteristics.matches(artist))
}
