use tracing::trace;

use super::share;
use crate::domain::{ArtistPayout, ArtistPlayStat, CalculationResult, Split, total_listener_plays};

/// Modelo híbrido: `split`% de la cuota se reparte user-centric y el resto pooled.
///
/// Para que las escuchas del oyente no cuenten dos veces, la parte pooled
/// descuenta de cada artista (y del total de la plataforma) la fracción de
/// escuchas del oyente que ya se pagó por la vía user-centric:
///
/// ```text
/// adjusted_total  = total_platform_plays - listener_total * split/100
/// adjusted_artist = artist.total_platform_plays - artist.listener_plays * split/100
/// ```
///
/// Con `split = 100` coincide con el modelo user-centric y con `split = 0` con
/// el pooled.
pub fn calculate_hybrid(
  fee: f64,
  artist_stats: &[ArtistPlayStat],
  total_platform_plays: u64,
  split: Split,
) -> CalculationResult {
  let listener_total = total_listener_plays(artist_stats);
  if listener_total == 0 || total_platform_plays == 0 {
    trace!(listener_total, total_platform_plays, "hybrid: degenerate totals");
    return CalculationResult::unallocated(fee);
  }

  let listener_total = listener_total as f64;
  let uc_fraction = split.user_centric_fraction();
  let user_centric_amount = fee * uc_fraction;
  let pooled_amount = fee * split.pooled_fraction();
  let adjusted_total = total_platform_plays as f64 - listener_total * uc_fraction;

  let payouts = artist_stats
    .iter()
    .map(|artist| {
      let listener_plays = artist.listener_plays as f64;
      let pct = share(listener_plays, listener_total);
      let adjusted_artist = artist.total_platform_plays as f64 - listener_plays * uc_fraction;

      let user_centric = pct * user_centric_amount;
      let pooled = share(adjusted_artist, adjusted_total) * pooled_amount;

      ArtistPayout::new(artist, pct, user_centric, pooled, false)
    })
    .collect();

  CalculationResult::from_payouts(fee, payouts, 0.0, fee)
}
