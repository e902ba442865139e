use tracing::trace;

use super::share;
use crate::domain::{ArtistPayout, ArtistPlayStat, CalculationResult, total_listener_plays};

/// Modelo pooled (pro-rata): cada artista cobra según su cuota de las escuchas
/// de toda la plataforma, las haya escuchado el oyente o no.
///
/// `pct_listener_plays` se calcula sobre la suma de escuchas de la lista
/// entregada, así que el llamador debe pasar el conjunto completo de artistas
/// del oyente. Lo que no llega a la lista queda en `total_to_other_artists`.
pub fn calculate_pooled(fee: f64, artist_stats: &[ArtistPlayStat], total_platform_plays: u64) -> CalculationResult {
  if total_platform_plays == 0 {
    trace!("pooled: no platform plays");
    return CalculationResult::unallocated(fee);
  }

  let listener_total = total_listener_plays(artist_stats) as f64;
  let platform_total = total_platform_plays as f64;

  let payouts = artist_stats
    .iter()
    .map(|artist| {
      let pooled = share(artist.total_platform_plays as f64, platform_total) * fee;
      ArtistPayout::new(artist, share(artist.listener_plays as f64, listener_total), 0.0, pooled, false)
    })
    .collect();

  CalculationResult::from_payouts(fee, payouts, 0.0, fee)
}

#[cfg(test)]
mod tests {
  use super::super::fixtures::*;
  use super::*;

  #[test]
  fn splits_by_platform_share() {
    let result = calculate_pooled(FEE, &two_artists(), 10_000);

    approx(result.payouts[0].pooled_payout, 1.399);
    approx(result.payouts[1].pooled_payout, 12.591);
    approx(result.total_to_other_artists, 0.0);
    assert_eq!(result.payouts[0].user_centric_payout, 0.0);
    assert_eq!(result.remainder_payout, FEE);
  }

  #[test]
  fn leaks_to_artists_outside_the_list() {
    let stats = vec![stat("Sarah Chen", 10, 2_000)];
    let result = calculate_pooled(10.0, &stats, 10_000);

    approx(result.total_to_listened_artists, 2.0);
    approx(result.total_to_other_artists, 8.0);
  }

  #[test]
  fn percentages_use_the_supplied_list() {
    let stats = vec![stat("Marcus Bell", 30, 600), stat("Emma Stone", 10, 0)];
    let result = calculate_pooled(FEE, &stats, 1_000);

    approx(result.payouts[0].pct_listener_plays, 0.75);
    approx(result.payouts[0].pct_platform_plays, 0.05);
    // sin escuchas en plataforma: porcentaje mostrable, no infinito
    assert_eq!(result.payouts[1].pct_platform_plays, 0.0);
    assert!(!result.payouts[1].pct_listener_plays.is_nan());
  }

  #[test]
  fn listener_without_plays_gets_zero_percentages() {
    let stats = vec![stat("River Phoenix", 0, 450)];
    let result = calculate_pooled(FEE, &stats, 1_000);

    assert_eq!(result.payouts[0].pct_listener_plays, 0.0);
    assert!(!result.payouts[0].is_listened);
    approx(result.payouts[0].total_payout, 0.45 * FEE);
  }

  #[test]
  fn zero_platform_plays_allocates_nothing() {
    let result = calculate_pooled(FEE, &two_artists(), 0);
    assert!(result.payouts.is_empty());
    assert_eq!(result.total_to_other_artists, FEE);
  }
}
