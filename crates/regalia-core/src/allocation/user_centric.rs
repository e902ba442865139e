use tracing::trace;

use super::share;
use crate::domain::{ArtistPayout, ArtistPlayStat, CalculationResult, total_listener_plays};

/// Modelo user-centric: la cuota se reparte sólo según las escuchas del propio
/// oyente. Si hubo escuchas, la cuota entera queda dentro de la lista.
pub fn calculate_user_centric(fee: f64, artist_stats: &[ArtistPlayStat]) -> CalculationResult {
  let listener_total = total_listener_plays(artist_stats);
  if listener_total == 0 {
    trace!("user-centric: listener has no plays");
    return CalculationResult::unallocated(fee);
  }

  let listener_total = listener_total as f64;
  let payouts = artist_stats
    .iter()
    .map(|artist| {
      let pct = share(artist.listener_plays as f64, listener_total);
      ArtistPayout::new(artist, pct, pct * fee, 0.0, false)
    })
    .collect();

  CalculationResult::fully_allocated(fee, payouts)
}
