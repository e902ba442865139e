use tracing::trace;

use super::share;
use crate::domain::{ArtistPayout, ArtistPlayStat, CalculationResult, Split, total_listener_plays};

/// Reparto en dos fases común a las políticas de prioridad.
///
/// 1. Los artistas que cumplen `is_priority` se llevan la parte de la cuota
///    proporcional a sus escuchas (`priority_plays / listener_total`), repartida
///    entre ellos de forma user-centric.
/// 2. El remanente se reparte entre el resto: `split`% user-centric sobre las
///    escuchas del resto y `100 - split`% pooled sobre el total de la plataforma,
///    sin ajuste por las escuchas del oyente.
///
/// Los prioritarios van primero en `payouts`, cada grupo en el orden de entrada.
pub(super) fn carve_out<F>(
  fee: f64,
  artist_stats: &[ArtistPlayStat],
  total_platform_plays: u64,
  split: Split,
  is_priority: F,
) -> CalculationResult
where
  F: Fn(&ArtistPlayStat) -> bool,
{
  let listener_total = total_listener_plays(artist_stats);
  if listener_total == 0 || total_platform_plays == 0 {
    trace!(listener_total, total_platform_plays, "priority: degenerate totals");
    return CalculationResult::unallocated(fee);
  }

  let (priority, rest): (Vec<&ArtistPlayStat>, Vec<&ArtistPlayStat>) =
    artist_stats.iter().partition(|artist| is_priority(artist));

  let listener_total = listener_total as f64;
  let priority_plays = plays_of(&priority) as f64;
  let rest_plays = plays_of(&rest) as f64;

  let priority_amount = share(priority_plays, listener_total) * fee;
  let remainder_amount = fee - priority_amount;

  trace!(
    priority_artists = priority.len(),
    rest_artists = rest.len(),
    priority_amount,
    remainder_amount,
    "priority: carve-out"
  );

  let remainder_user_centric = remainder_amount * split.user_centric_fraction();
  let remainder_pooled = remainder_amount * split.pooled_fraction();
  let platform_total = total_platform_plays as f64;

  let mut payouts = Vec::with_capacity(artist_stats.len());

  payouts.extend(priority.iter().map(|artist| {
    let listener_plays = artist.listener_plays as f64;
    let user_centric = share(listener_plays, priority_plays) * priority_amount;
    ArtistPayout::new(artist, share(listener_plays, listener_total), user_centric, 0.0, true)
  }));

  payouts.extend(rest.iter().map(|artist| {
    let listener_plays = artist.listener_plays as f64;
    let user_centric = share(listener_plays, rest_plays) * remainder_user_centric;
    let pooled = share(artist.total_platform_plays as f64, platform_total) * remainder_pooled;
    ArtistPayout::new(artist, share(listener_plays, listener_total), user_centric, pooled, false)
  }));

  CalculationResult::from_payouts(fee, payouts, priority_amount, remainder_amount)
}

fn plays_of(artists: &[&ArtistPlayStat]) -> u64 {
  artists.iter().fold(0u64, |acc, a| acc.saturating_add(a.listener_plays))
}

