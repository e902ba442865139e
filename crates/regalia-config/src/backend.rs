use crate::io::atomic_write_str;
use crate::paths::{ConfigError, RegaliaPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use toml_edit::{DocumentMut, Item};

/// Acceso por secciones (`[cli]`, ...) al fichero de configuración.
pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  paths: RegaliaPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: RegaliaPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &RegaliaPaths {
    &self.paths
  }

  /// Como [`ConfigBackend::load_section`], pero sin fichero o sin sección
  /// devuelve `T::default()`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
      Err(e) => return Err(e.into()),
    };

    match read_section(&content, section)? {
      Some(value) => Ok(value),
      None => Ok(T::default()),
    }
  }
}

fn read_section<T: DeserializeOwned>(content: &str, section: &str) -> Result<Option<T>, ConfigError> {
  let root: toml::Table = toml::from_str(content)?;

  let Some(table) = root.get(section) else {
    return Ok(None);
  };

  table
    .clone()
    .try_into()
    .map(Some)
    .map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

fn load_document(path: &Path) -> Result<DocumentMut, ConfigError> {
  match fs::read_to_string(path) {
    Ok(content) => content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}"))),
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(DocumentMut::new()),
    Err(e) => Err(e.into()),
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let content = fs::read_to_string(&path)?;

    read_section(&content, section)?
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {}", path.display())))
  }

  /// Reemplaza sólo `[section]`; el resto del documento conserva sus comentarios.
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();
    let mut doc = load_document(&path)?;

    // `toml` serializa la sección sin cabecera ("foo = 1\nbar = 2\n");
    // reparsearla como documento nos da la tabla como `Item`.
    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  struct Defaults {
    policy: String,
    split: u8,
  }

  fn backend(base: &Path) -> TomlConfigBackend {
    TomlConfigBackend::new(RegaliaPaths::at(base).unwrap())
  }

  #[test]
  fn missing_file_yields_default() {
    let tmp = tempdir().unwrap();
    let loaded: Defaults = backend(tmp.path()).load_section_with_default("cli").unwrap();
    assert_eq!(loaded, Defaults::default());
  }

  #[test]
  fn missing_section_is_an_error_for_strict_load() {
    let tmp = tempdir().unwrap();
    let backend = backend(tmp.path());
    backend.save_section("other", &Defaults { policy: "pooled".into(), split: 0 }).unwrap();

    let err = backend.load_section::<Defaults>("cli").unwrap_err();
    assert!(matches!(err, ConfigError::Other(msg) if msg.contains("[cli]")));
  }

  #[test]
  fn save_keeps_other_sections_and_comments() {
    let tmp = tempdir().unwrap();
    let backend = backend(tmp.path());
    fs::write(backend.paths().config_file(), "# hand written\n[other]\nkeep = true\n").unwrap();

    let wanted = Defaults { policy: "hybrid".into(), split: 70 };
    backend.save_section("cli", &wanted).unwrap();

    let written = fs::read_to_string(backend.paths().config_file()).unwrap();
    assert!(written.contains("# hand written"));
    assert!(written.contains("keep = true"));

    let loaded: Defaults = backend.load_section("cli").unwrap();
    assert_eq!(loaded, wanted);
  }
}
