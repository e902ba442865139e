mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{BASE_DIR_ENV, ConfigError, RegaliaPaths};

use once_cell::sync::OnceCell;

// Singleton del backend de config (se inicializa al primer acceso correcto)
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Backend compartido sobre los paths detectados.
///
/// Si los directorios no se pueden resolver o crear devuelve el error y la
/// celda sigue vacía, así que una llamada posterior vuelve a intentarlo.
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| RegaliaPaths::detect().map(TomlConfigBackend::new))
}
