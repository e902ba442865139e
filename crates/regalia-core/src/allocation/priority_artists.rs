use std::collections::HashSet;

use super::carve_out::carve_out;
use crate::domain::{ArtistId, ArtistPlayStat, CalculationResult, Split};

/// Prioridad por identidad: los artistas elegidos por el operador cobran
/// primero, en proporción a lo que el oyente los escuchó; el remanente se
/// reparte entre los demás con `split`% user-centric y el resto pooled.
///
/// Los identificadores que no aparecen en `artist_stats` se ignoran.
pub fn calculate_priority_artists(
  fee: f64,
  artist_stats: &[ArtistPlayStat],
  total_platform_plays: u64,
  priority_artist_ids: &[ArtistId],
  split: Split,
) -> CalculationResult {
  let wanted: HashSet<ArtistId> = priority_artist_ids.iter().copied().collect();
  carve_out(fee, artist_stats, total_platform_plays, split, |artist| wanted.contains(&artist.artist_id))
}
