use std::path::Path;

use anyhow::{Context, Result};
use regalia_core::CoreError;
use regalia_core::domain::{ArtistPlayStat, Listener, ListenerId, PlatformTotals};
use regalia_core::ports::PlayStatsSource;
use serde::Deserialize;

/// Un oyente tal como aparece en el fichero, con sus escuchas ya agregadas.
#[derive(Debug, Clone, Deserialize)]
struct ListenerEntry {
  #[serde(flatten)]
  listener: Listener,
  #[serde(default)]
  artists: Vec<ArtistPlayStat>,
}

/// Fichero JSON con la foto de la plataforma:
///
/// ```json
/// {
///   "total_platform_plays": 10000,
///   "listeners": [
///     { "id": "…", "username": "alice", "subscription_fee": 13.99,
///       "artists": [ { "artist_id": "…", "artist_name": "…",
///                      "listener_plays": 100, "total_platform_plays": 1000,
///                      "songs": [] } ] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct JsonSnapshotSource {
  total_platform_plays: u64,
  listeners: Vec<ListenerEntry>,
}

impl JsonSnapshotSource {
  pub fn from_json(json: &str) -> Result<Self> {
    serde_json::from_str(json).context("invalid snapshot JSON")
  }

  pub fn open(path: &Path) -> Result<Self> {
    let json = std::fs::read_to_string(path).with_context(|| format!("cannot read snapshot {}", path.display()))?;
    Self::from_json(&json).with_context(|| format!("while loading {}", path.display()))
  }

  /// Busca un oyente por UUID o, si no lo es, por nombre de usuario (sin
  /// distinguir mayúsculas).
  pub fn resolve_listener(&self, key: &str) -> Option<ListenerId> {
    if let Ok(id) = key.parse::<ListenerId>() {
      return self.listeners.iter().find(|e| e.listener.id == id).map(|e| e.listener.id);
    }
    self.listeners.iter().find(|e| e.listener.username.eq_ignore_ascii_case(key.trim())).map(|e| e.listener.id)
  }

  fn entry(&self, id: ListenerId) -> Option<&ListenerEntry> {
    self.listeners.iter().find(|e| e.listener.id == id)
  }
}

impl PlayStatsSource for JsonSnapshotSource {
  fn list_listeners(&self) -> Result<Vec<Listener>, CoreError> {
    Ok(self.listeners.iter().map(|e| e.listener.clone()).collect())
  }

  fn find_listener(&self, id: ListenerId) -> Result<Option<Listener>, CoreError> {
    Ok(self.entry(id).map(|e| e.listener.clone()))
  }

  fn artist_stats(&self, listener: ListenerId) -> Result<Vec<ArtistPlayStat>, CoreError> {
    self
      .entry(listener)
      .map(|e| e.artists.clone())
      .ok_or_else(|| CoreError::NotFound(format!("listener {listener}")))
  }

  fn platform_totals(&self) -> Result<PlatformTotals, CoreError> {
    Ok(PlatformTotals { total_platform_plays: self.total_platform_plays })
  }
}
