//! `regalia`: simula cómo se reparte la cuota de un oyente entre artistas
//! con cada política, a partir de una foto JSON de la plataforma.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use regalia_core::domain::{
  AllocationPolicy, ArtistId, PolicyKind, PolicySelection, PriorityCharacteristics, SortColumn, SortDirection,
  TagFamily,
};
use regalia_core::services::PayoutService;

mod config;
mod report;
mod snapshot_file;

use config::CliConfig;
use snapshot_file::JsonSnapshotSource;

fn parse_path(s: &str) -> Result<PathBuf> {
  let original_path = PathBuf::from(s);
  if original_path.is_absolute() {
    return Ok(original_path);
  }
  let cwd = std::env::current_dir()?;
  Ok(cwd.join(original_path))
}

/// `family=value`, p. ej. `genre=Jazz` o `lead_instrument=Piano`.
fn parse_tag(s: &str) -> Result<(TagFamily, String), String> {
  let (family, value) = s.split_once('=').ok_or_else(|| format!("expected family=value, got `{s}`"))?;
  let family = family.parse::<TagFamily>().map_err(|e| e.to_string())?;
  let value = value.trim();
  if value.is_empty() {
    return Err(format!("empty value for {}", family.as_str()));
  }
  Ok((family, value.to_string()))
}

#[derive(Parser, Debug)]
#[command(name = "regalia", version, about = "Split a subscription fee among artists under different royalty policies")]
struct CliArgs {
  /// Snapshot JSON with listeners and their aggregated plays.
  #[arg(value_parser = parse_path)]
  snapshot: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Lists the listeners in the snapshot.
  Listeners,

  /// Lists the allocation policies accepted by `--policy`.
  Policies,

  /// Shows the selectable values of every tag family.
  Tags,

  /// Splits one listener's fee and prints the breakdown.
  Calculate {
    /// Username or listener id.
    listener: String,

    #[command(flatten)]
    policy: PolicyArgs,

    /// Column to sort the table by (artist_name, total_payout, pooled_payout...).
    #[arg(long, default_value = "artist_name")]
    sort: SortColumn,

    /// Sort descending.
    #[arg(long)]
    desc: bool,

    /// Print the full result as JSON instead of a table.
    #[arg(long)]
    json: bool,
  },

  /// Runs the same policy for every listener in the snapshot.
  Batch {
    #[command(flatten)]
    policy: PolicyArgs,
  },
}

#[derive(Args, Debug)]
struct PolicyArgs {
  /// pooled, user_centric, hybrid, priority_artists or priority_characteristics.
  #[arg(long)]
  policy: Option<String>,

  /// Percentage (0-100) routed through the user-centric model.
  #[arg(long)]
  split: Option<u8>,

  /// Artist id paid first under priority_artists. Repeatable.
  #[arg(long = "priority-artist")]
  priority_artists: Vec<ArtistId>,

  /// Tag value that marks an artist as priority, as family=value. Repeatable.
  #[arg(long = "tag", value_parser = parse_tag)]
  tags: Vec<(TagFamily, String)>,
}

impl PolicyArgs {
  fn selection(&self, cfg: &CliConfig) -> PolicySelection {
    let mut selection = PolicySelection {
      kind: self.policy.clone().unwrap_or_else(|| cfg.default_policy.clone()),
      hybrid_split: self.split.unwrap_or(cfg.default_split),
      ..PolicySelection::default()
    };

    for id in &self.priority_artists {
      if !selection.priority_artist_ids.contains(id) {
        selection.priority_artist_ids.push(*id);
      }
    }

    selection.priority_characteristics = self
      .tags
      .iter()
      .fold(PriorityCharacteristics::new(), |acc, (family, value)| acc.with(*family, [value.as_str()]));

    selection
  }

  fn policy(&self, cfg: &CliConfig) -> Result<AllocationPolicy> {
    let selection = self.selection(cfg);
    AllocationPolicy::try_from(&selection).context("invalid policy selection")
  }
}

fn init_tracing(fallback_filter: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
  let args = CliArgs::parse();

  let (cfg, cfg_error) = match CliConfig::load() {
    Ok(cfg) => (cfg, None),
    Err(e) => (CliConfig::default(), Some(e)),
  };
  init_tracing(&cfg.log_filter);
  if let Some(e) = cfg_error {
    warn!("could not load settings, using defaults: {e}");
  }

  let source = JsonSnapshotSource::open(&args.snapshot)?;
  info!("loaded snapshot {}", args.snapshot.display());

  match args.command {
    Command::Listeners => {
      let service = PayoutService::new(source);
      for listener in service.list_listeners()? {
        println!("{}  {:<16} ${:.2}", listener.id, listener.username, listener.subscription_fee);
      }
    }

    Command::Policies => {
      for kind in PolicyKind::ALL {
        println!("{kind}");
      }
    }

    Command::Tags => {
      for family in TagFamily::ALL {
        println!("{:<16} {}", family.as_str(), family.options().join(", "));
      }
    }

    Command::Calculate { listener, policy, sort, desc, json } => {
      let listener_id =
        source.resolve_listener(&listener).with_context(|| format!("no listener `{listener}` in snapshot"))?;
      let policy = policy.policy(&cfg)?;

      let service = PayoutService::new(source);
      let snapshot = service.snapshot(listener_id, service.platform_totals()?)?;

      if let AllocationPolicy::PriorityArtists { artist_ids, .. } = &policy {
        for id in artist_ids.iter().filter(|id| !snapshot.artist_stats.iter().any(|s| s.artist_id == **id)) {
          warn!("priority artist {id} has no plays for {}", snapshot.listener.username);
        }
      }

      let mut result = snapshot.compute(&policy);
      let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
      let payouts = result.sorted_payouts(sort, direction);

      if json {
        result.payouts = payouts;
        println!("{}", serde_json::to_string_pretty(&result)?);
      } else {
        print!("{}", report::render_summary(&snapshot.summary(), &policy, &result));
        println!();
        print!("{}", report::render_table(&payouts));
      }
    }

    Command::Batch { policy } => {
      let policy = policy.policy(&cfg)?;
      let service = PayoutService::new(source);
      for (listener, result) in service.calculate_all(&policy)? {
        println!("{}", report::render_batch_line(&listener, &result));
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(extra: &[&str]) -> PolicyArgs {
    let mut argv = vec!["regalia", "snapshot.json", "batch"];
    argv.extend_from_slice(extra);
    match CliArgs::try_parse_from(argv).unwrap().command {
      Command::Batch { policy } => policy,
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn falls_back_to_configured_defaults() {
    let cfg = CliConfig { default_policy: "hybrid".into(), default_split: 80, ..CliConfig::default() };
    let policy = args(&[]).policy(&cfg).unwrap();
    assert_eq!(policy.kind(), PolicyKind::Hybrid);
    assert!(matches!(policy, AllocationPolicy::Hybrid { split } if split.percent() == 80));
  }

  #[test]
  fn tags_build_characteristics() {
    let parsed = args(&["--policy", "priority_characteristics", "--tag", "genre=Jazz", "--tag", "theme=Love"]);
    let selection = parsed.selection(&CliConfig::default());

    assert_eq!(selection.priority_characteristics.values(TagFamily::Genre), ["Jazz".to_string()]);
    assert_eq!(selection.priority_characteristics.values(TagFamily::Theme), ["Love".to_string()]);
  }

  #[test]
  fn unknown_policy_is_reported() {
    let err = args(&["--policy", "random"]).policy(&CliConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("unknown allocation policy: random"));
  }

  #[test]
  fn split_out_of_range_is_reported() {
    let err = args(&["--policy", "hybrid", "--split", "120"]).policy(&CliConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("split must be within 0..=100"));
  }

  #[test]
  fn every_listed_policy_is_accepted() {
    for kind in PolicyKind::ALL {
      let policy = args(&["--policy", kind.as_str()]).policy(&CliConfig::default()).unwrap();
      assert_eq!(policy.kind(), kind);
    }
  }

  #[test]
  fn rejects_malformed_tags() {
    assert!(parse_tag("genre").is_err());
    assert!(parse_tag("mood=Happy").is_err());
    assert!(parse_tag("genre= ").is_err());
    assert_eq!(parse_tag("Lead Instrument=Piano").unwrap(), (TagFamily::LeadInstrument, "Piano".to_string()));
  }
}
