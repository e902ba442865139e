//! Motor de reparto de la cuota de suscripción.
//!
//! Todas las estrategias son funciones puras sobre una foto de las escuchas:
//! no guardan estado, no hacen E/S y recorren la lista de artistas un número
//! constante de veces. Pueden llamarse en cada interacción del operador y
//! desde varios hilos a la vez.

mod carve_out;
pub mod hybrid;
pub mod pooled;
pub mod priority_artists;
pub mod priority_characteristics;
pub mod user_centric;

use tracing::{debug, trace};

use crate::domain::payout::finite_or_zero;
use crate::domain::{AllocationPolicy, ArtistPlayStat, CalculationResult, PolicySelection};
use crate::errors::PolicyError;

pub use hybrid::calculate_hybrid;
pub use pooled::calculate_pooled;
pub use priority_artists::calculate_priority_artists;
pub use priority_characteristics::calculate_priority_characteristics;
pub use user_centric::calculate_user_centric;

/// Reparte `fee` entre `artist_stats` según `policy`.
///
/// Sin artistas o sin escuchas en la plataforma no hay nada que repartir con
/// ninguna política: se devuelve un resultado vacío con toda la cuota en
/// `total_to_other_artists`.
pub fn compute_payouts(
  fee: f64,
  artist_stats: &[ArtistPlayStat],
  total_platform_plays: u64,
  policy: &AllocationPolicy,
) -> CalculationResult {
  debug!(policy = %policy.kind(), artists = artist_stats.len(), total_platform_plays, fee, "computing payouts");

  if artist_stats.is_empty() || total_platform_plays == 0 {
    trace!("nothing to allocate, fee left to other artists");
    return CalculationResult::unallocated(fee);
  }

  match policy {
    AllocationPolicy::Pooled => calculate_pooled(fee, artist_stats, total_platform_plays),
    AllocationPolicy::UserCentric => calculate_user_centric(fee, artist_stats),
    AllocationPolicy::Hybrid { split } => calculate_hybrid(fee, artist_stats, total_platform_plays, *split),
    AllocationPolicy::PriorityArtists { split, artist_ids } => {
      calculate_priority_artists(fee, artist_stats, total_platform_plays, artist_ids, *split)
    }
    AllocationPolicy::PriorityCharacteristics { split, characteristics } => {
      calculate_priority_characteristics(fee, artist_stats, total_platform_plays, characteristics, *split)
    }
  }
}

/// Igual que [`compute_payouts`], pero a partir de la selección sin validar
/// del operador. Un tipo de política desconocido es un error, nunca un
/// resultado vacío.
pub fn compute_for_selection(
  fee: f64,
  artist_stats: &[ArtistPlayStat],
  total_platform_plays: u64,
  selection: &PolicySelection,
) -> Result<CalculationResult, PolicyError> {
  let policy = AllocationPolicy::try_from(selection)?;
  Ok(compute_payouts(fee, artist_stats, total_platform_plays, &policy))
}

/// `part / whole`, o `0.0` si el denominador es cero.
pub(crate) fn share(part: f64, whole: f64) -> f64 {
  finite_or_zero(part / whole)
}

#[cfg(test)]
pub(crate) mod fixtures {
  use crate::domain::{ArtistId, ArtistPlayStat, Song, SongId};

  pub const FEE: f64 = 13.99;
  pub const EPS: f64 = 1e-9;

  pub fn approx(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < EPS, "expected {expected}, got {actual}");
  }

  pub fn stat(name: &str, listener_plays: u64, total_platform_plays: u64) -> ArtistPlayStat {
    ArtistPlayStat {
      artist_id: ArtistId::new(),
      artist_name: name.into(),
      listener_plays,
      total_platform_plays,
      songs: Vec::new(),
    }
  }

  pub fn tagged(mut stat: ArtistPlayStat, genre: &str, geography: &str) -> ArtistPlayStat {
    stat.songs.push(Song {
      id: SongId::new(),
      title: format!("{} single", stat.artist_name),
      artist_id: stat.artist_id,
      genre: genre.into(),
      release_year: 2024,
      vocal_type: "Mixed Vocals".into(),
      geography: geography.into(),
      lead_instrument: "Guitar".into(),
      theme: "Love".into(),
    });
    stat
  }

  /// A: 100 escuchas del oyente sobre 1000 totales; B: 0 sobre 9000.
  pub fn two_artists() -> Vec<ArtistPlayStat> {
    vec![stat("Stellar Nova", 100, 1000), stat("Luna Rivers", 0, 9000)]
  }
}

#[cfg(test)]
mod tests {
  use super::fixtures::*;
  use super::*;
  use crate::domain::{ArtistId, PolicyKind, PriorityCharacteristics, Split};

  fn every_policy() -> Vec<AllocationPolicy> {
    vec![
      AllocationPolicy::Pooled,
      AllocationPolicy::UserCentric,
      AllocationPolicy::Hybrid { split: Split::HALF },
      AllocationPolicy::PriorityArtists { split: Split::HALF, artist_ids: vec![ArtistId::new()] },
      AllocationPolicy::PriorityCharacteristics { split: Split::HALF, characteristics: PriorityCharacteristics::new() },
    ]
  }

  #[test]
  fn zero_platform_plays_leaves_fee_unallocated_for_every_policy() {
    let stats = two_artists();
    for policy in every_policy() {
      let result = compute_payouts(FEE, &stats, 0, &policy);
      assert!(result.payouts.is_empty(), "{:?}", policy.kind());
      assert_eq!(result.total_to_other_artists, FEE);
      assert_eq!(result.total_to_listened_artists, 0.0);
    }
  }

  #[test]
  fn empty_stats_leave_fee_unallocated_for_every_policy() {
    for policy in every_policy() {
      let result = compute_payouts(FEE, &[], 10_000, &policy);
      assert!(result.payouts.is_empty());
      assert_eq!(result.total_to_other_artists, FEE);
      assert_eq!(result.subscription_fee, FEE);
    }
  }

  #[test]
  fn dispatches_by_kind() {
    let stats = two_artists();
    let pooled = compute_payouts(FEE, &stats, 10_000, &AllocationPolicy::Pooled);
    let user_centric = compute_payouts(FEE, &stats, 10_000, &AllocationPolicy::UserCentric);

    approx(pooled.payouts[0].total_payout, 1.399);
    approx(user_centric.payouts[0].total_payout, FEE);
  }

  #[test]
  fn selection_with_unknown_kind_is_rejected() {
    let selection = PolicySelection { kind: "lottery".into(), ..PolicySelection::default() };
    let err = compute_for_selection(FEE, &two_artists(), 10_000, &selection).unwrap_err();
    assert_eq!(err, PolicyError::UnknownKind("lottery".into()));
  }

  #[test]
  fn selection_runs_the_parsed_policy() {
    let selection = PolicySelection::new(PolicyKind::Pooled);
    let result = compute_for_selection(FEE, &two_artists(), 10_000, &selection).unwrap();
    approx(result.payouts[1].total_payout, 12.591);
  }

  #[test]
  fn share_guards_zero_denominator() {
    assert_eq!(share(5.0, 0.0), 0.0);
    assert_eq!(share(0.0, 0.0), 0.0);
    approx(share(1.0, 4.0), 0.25);
  }
}
