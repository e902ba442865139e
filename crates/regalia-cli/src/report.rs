use regalia_core::domain::{
  AllocationPolicy, ArtistPayout, CalculationResult, ComponentTotals, Listener, ListenerSummary,
};

/// Cabecera con el consumo del oyente y los totales del reparto.
///
/// En las políticas de prioridad los componentes user-centric y pooled se
/// muestran sólo para el resto, ya que lo prioritario va en su propia línea.
pub fn render_summary(summary: &ListenerSummary, policy: &AllocationPolicy, result: &CalculationResult) -> String {
  let mut lines = vec![
    format!("policy            {}{}", policy.kind(), split_suffix(policy)),
    format!("subscription fee  ${:.2}", result.subscription_fee),
    format!("listener plays    {}", summary.total_listener_plays),
    format!("artists           {}", summary.unique_artists),
    format!("platform plays    {}", summary.total_platform_plays),
  ];

  let components = match policy {
    AllocationPolicy::PriorityArtists { .. } | AllocationPolicy::PriorityCharacteristics { .. } => {
      lines.push(format!("priority pool     ${:.4}", result.priority_payout));
      lines.push(format!("  paid to them    ${:.4}", result.priority_total()));
      lines.push(format!("remainder         ${:.4}", result.remainder_payout));
      result.non_priority_totals()
    }
    AllocationPolicy::Pooled | AllocationPolicy::UserCentric | AllocationPolicy::Hybrid { .. } => {
      result.component_totals()
    }
  };

  lines.push(format!("user-centric      ${:.4}", components.user_centric_payout));
  lines.push(format!("pooled            ${:.4}", components.pooled_payout));
  lines.push(format!("to your artists   ${:.4}", result.total_to_listened_artists));
  lines.push(format!("to other artists  ${:.4}", result.total_to_other_artists));

  lines.into_iter().map(|line| line + "\n").collect()
}

fn split_suffix(policy: &AllocationPolicy) -> String {
  match policy {
    AllocationPolicy::Hybrid { split }
    | AllocationPolicy::PriorityArtists { split, .. }
    | AllocationPolicy::PriorityCharacteristics { split, .. } => format!(" ({split})"),
    AllocationPolicy::Pooled | AllocationPolicy::UserCentric => String::new(),
  }
}

/// Tabla de pagos, una fila por artista y una última con los totales.
pub fn render_table(payouts: &[ArtistPayout]) -> String {
  let name_width = payouts.iter().map(|p| p.artist_name.chars().count()).max().unwrap_or(0).max("artist".len());

  let mut out = format!(
    "{:<name_width$}  {:>8}  {:>12}  {:>7}  {:>7}  {:>10}  {:>10}  {:>10}  \n",
    "artist", "plays", "platform", "%you", "%plat", "user-ctr", "pooled", "total"
  );

  for p in payouts {
    let flags = match (p.is_priority, p.is_listened) {
      (true, _) => "*",
      (false, false) => "-",
      (false, true) => "",
    };
    out.push_str(&format!(
      "{:<name_width$}  {:>8}  {:>12}  {:>6.2}%  {:>6.2}%  {:>10.4}  {:>10.4}  {:>10.4}  {}\n",
      p.artist_name,
      p.listener_plays,
      p.total_platform_plays,
      p.pct_listener_plays * 100.0,
      p.pct_platform_plays * 100.0,
      p.user_centric_payout,
      p.pooled_payout,
      p.total_payout,
      flags,
    ));
  }

  let totals = ComponentTotals::sum(payouts);
  let pct_listener = if payouts.is_empty() { 0.0 } else { 100.0 };
  out.push_str(&format!(
    "{:<name_width$}  {:>8}  {:>12}  {:>6.2}%  {:>6.2}%  {:>10.4}  {:>10.4}  {:>10.4}  \n",
    "total",
    totals.listener_plays,
    totals.total_platform_plays,
    pct_listener,
    totals.pct_platform_plays * 100.0,
    totals.user_centric_payout,
    totals.pooled_payout,
    totals.total_payout,
  ));

  out
}

/// Una línea por oyente para el modo por lotes.
pub fn render_batch_line(listener: &Listener, result: &CalculationResult) -> String {
  format!(
    "{:<16} fee ${:>7.2}  to yours ${:>9.4}  to others ${:>9.4}  artists {}",
    listener.username,
    result.subscription_fee,
    result.total_to_listened_artists,
    result.total_to_other_artists,
    result.payouts.len()
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use regalia_core::compute_payouts;
  use regalia_core::domain::{ArtistId, ArtistPlayStat, ListenerId, ListenerSnapshot, PlatformTotals, Split};

  fn snapshot() -> ListenerSnapshot {
    let stats = vec![
      ArtistPlayStat {
        artist_id: ArtistId::new(),
        artist_name: "Stellar Nova".into(),
        listener_plays: 100,
        total_platform_plays: 1_000,
        songs: Vec::new(),
      },
      ArtistPlayStat {
        artist_id: ArtistId::new(),
        artist_name: "B".into(),
        listener_plays: 0,
        total_platform_plays: 9_000,
        songs: Vec::new(),
      },
    ];
    let listener = Listener { id: ListenerId::new(), username: "alice".into(), subscription_fee: 13.99 };
    ListenerSnapshot::new(listener, stats, PlatformTotals { total_platform_plays: 10_000 })
  }

  #[test]
  fn summary_mentions_split_and_totals() {
    let snapshot = snapshot();
    let policy = AllocationPolicy::Hybrid { split: Split::HALF };
    let result = snapshot.compute(&policy);

    let text = render_summary(&snapshot.summary(), &policy, &result);
    assert!(text.contains("hybrid (50% user-centric / 50% pooled)"));
    assert!(text.contains("subscription fee  $13.99"));
    assert!(text.contains("user-centric      $"));
    assert!(!text.contains("priority pool"));
  }

  #[test]
  fn priority_summary_splits_components() {
    let snapshot = snapshot();
    let nova = snapshot.artist_stats[0].artist_id;
    let policy = AllocationPolicy::PriorityArtists { split: Split::HALF, artist_ids: vec![nova] };
    let result = snapshot.compute(&policy);

    let text = render_summary(&snapshot.summary(), &policy, &result);
    // Nova tiene todas las escuchas: la cuota entera va a la reserva.
    assert!(text.contains("priority pool     $13.9900"));
    assert!(text.contains("user-centric      $0.0000"));
    assert!(text.contains("pooled            $0.0000"));
  }

  #[test]
  fn table_flags_unlistened_artists() {
    let snapshot = snapshot();
    let result = compute_payouts(13.99, &snapshot.artist_stats, 10_000, &AllocationPolicy::Pooled);

    let table = render_table(&result.payouts);
    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("1.3990"));
    assert!(lines[2].trim_end().ends_with('-'));

    // 1000 + 9000 escuchas en plataforma; pooled reparte toda la cuota.
    assert!(lines[3].starts_with("total"));
    assert!(lines[3].contains("10000"));
    assert!(lines[3].contains("13.9900"));
  }
}
