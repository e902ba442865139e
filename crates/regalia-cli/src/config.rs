use regalia_config::{ConfigBackend, ConfigError, TomlConfigBackend, config_backend};
use regalia_core::domain::{PolicyKind, Split};
use serde::{Deserialize, Serialize};

const SECTION: &str = "cli";

/// Sección `[cli]` de regalia.toml.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CliConfig {
  /// Política usada cuando no se pasa `--policy`.
  #[serde(default = "default_policy")]
  pub default_policy: String,

  /// Split usado cuando no se pasa `--split`.
  #[serde(default = "default_split")]
  pub default_split: u8,

  /// Filtro de `tracing` si `RUST_LOG` no está definida.
  #[serde(default = "default_log_filter")]
  pub log_filter: String,
}

fn default_policy() -> String {
  PolicyKind::UserCentric.as_str().to_string()
}

fn default_split() -> u8 {
  Split::HALF.percent()
}

fn default_log_filter() -> String {
  "warn,regalia_core=info".to_string()
}

impl Default for CliConfig {
  fn default() -> Self {
    CliConfig { default_policy: default_policy(), default_split: default_split(), log_filter: default_log_filter() }
  }
}

impl CliConfig {
  /// Carga la sección (o los valores por defecto) y la vuelve a escribir para
  /// que el usuario encuentre todas las claves en el fichero.
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(config_backend()?)
  }

  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let cfg = backend.load_section_with_default(SECTION)?;
    backend.save_section(SECTION, &cfg)?;
    Ok(cfg)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use regalia_config::{BASE_DIR_ENV, RegaliaPaths};
  use tempfile::tempdir;

  #[test]
  fn partial_section_fills_defaults() {
    let tmp = tempdir().unwrap();
    let paths = RegaliaPaths::at(tmp.path()).unwrap();
    std::fs::write(paths.config_file(), "[cli]\ndefault_policy = \"hybrid\"\n").unwrap();

    let cfg = CliConfig::load_from(&TomlConfigBackend::new(paths.clone())).unwrap();
    assert_eq!(cfg.default_policy, "hybrid");
    assert_eq!(cfg.default_split, 50);
    assert_eq!(cfg.log_filter, default_log_filter());

    let written = std::fs::read_to_string(paths.config_file()).unwrap();
    assert!(written.contains("default_split = 50"));
  }

  #[test]
  fn missing_file_yields_defaults() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(RegaliaPaths::at(tmp.path()).unwrap());

    assert_eq!(CliConfig::load_from(&backend).unwrap(), CliConfig::default());
    assert!(backend.paths().config_file().exists());
  }

  #[test]
  fn load_reports_unusable_base_dir() {
    let tmp = tempdir().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let original = std::env::var(BASE_DIR_ENV).ok();
    unsafe { std::env::set_var(BASE_DIR_ENV, blocker.join("regalia")) };
    let loaded = CliConfig::load();
    match original {
      Some(val) => unsafe { std::env::set_var(BASE_DIR_ENV, val) },
      None => unsafe { std::env::remove_var(BASE_DIR_ENV) },
    }

    assert!(matches!(loaded, Err(ConfigError::Io(_))));
  }
}
