use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Variable de entorno que fuerza un directorio base (modo portable, tests).
pub const BASE_DIR_ENV: &str = "REGALIA_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct RegaliaPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl RegaliaPaths {
  /// Resuelve los directorios del usuario, o los de `REGALIA_BASE_DIR` si está
  /// definida, y los crea si no existen.
  pub fn detect() -> Result<Self, ConfigError> {
    let paths = match std::env::var(BASE_DIR_ENV) {
      Ok(base) => Self::layout_under(Path::new(&base)),
      Err(_) => {
        let proj_dirs = ProjectDirs::from("com", "regalia", "regalia").ok_or(ConfigError::Directories)?;
        Self {
          base_dir: proj_dirs.config_dir().to_path_buf(),
          config_dir: proj_dirs.config_dir().to_path_buf(),
          data_dir: proj_dirs.data_dir().to_path_buf(),
          cache_dir: proj_dirs.cache_dir().to_path_buf(),
        }
      }
    };

    paths.ensure_dirs()?;
    Ok(paths)
  }

  /// Estructura portable bajo `base`: `config/`, `data/` y `cache/`.
  pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let paths = Self::layout_under(base.as_ref());
    paths.ensure_dirs()?;
    Ok(paths)
  }

  fn layout_under(base: &Path) -> Self {
    Self {
      base_dir: base.to_path_buf(),
      config_dir: base.join("config"),
      data_dir: base.join("data"),
      cache_dir: base.join("cache"),
    }
  }

  fn ensure_dirs(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    std::fs::create_dir_all(&self.cache_dir)?;
    Ok(())
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("regalia.toml")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::{Mutex, MutexGuard};
  use tempfile::tempdir;

  // Los tests que tocan `REGALIA_BASE_DIR` no pueden solaparse.
  static ENV_LOCK: Mutex<()> = Mutex::new(());

  struct EnvVarGuard {
    key: String,
    original: Option<String>,
    _lock: MutexGuard<'static, ()>,
  }

  impl EnvVarGuard {
    fn new(key: &str, value: &str) -> Self {
      let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
      let original = std::env::var(key).ok();
      unsafe { std::env::set_var(key, value) };
      EnvVarGuard { key: key.to_owned(), original, _lock: lock }
    }
  }

  impl Drop for EnvVarGuard {
    fn drop(&mut self) {
      match &self.original {
        Some(val) => unsafe { std::env::set_var(&self.key, val) },
        None => unsafe { std::env::remove_var(&self.key) },
      }
    }
  }

  #[test]
  fn base_dir_env_override() {
    let tmp = tempdir().unwrap();
    let _env = EnvVarGuard::new(BASE_DIR_ENV, tmp.path().to_str().unwrap());

    let paths = RegaliaPaths::detect().unwrap();

    assert_eq!(paths.base_dir, tmp.path());
    assert_eq!(paths.config_dir, tmp.path().join("config"));
    assert_eq!(paths.config_file(), tmp.path().join("config").join("regalia.toml"));
    assert!(paths.data_dir.exists());
    assert!(paths.cache_dir.exists());
  }

  #[test]
  fn detect_fails_when_base_cannot_be_created() {
    let tmp = tempdir().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let _env = EnvVarGuard::new(BASE_DIR_ENV, blocker.join("regalia").to_str().unwrap());

    assert!(matches!(RegaliaPaths::detect(), Err(ConfigError::Io(_))));
  }

  #[test]
  fn explicit_base_creates_layout() {
    let tmp = tempdir().unwrap();
    let paths = RegaliaPaths::at(tmp.path().join("portable")).unwrap();

    assert!(paths.config_dir.exists());
    assert_eq!(paths.data_dir, tmp.path().join("portable").join("data"));
  }
}
