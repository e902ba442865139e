use serde::{Deserialize, Serialize};

use super::ids::ListenerId;

/// Oyente suscrito. La cuota es lo que se reparte cada mes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listener {
  pub id: ListenerId,
  pub username: String,
  pub subscription_fee: f64,
}
