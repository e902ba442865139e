pub mod allocation;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod services;

pub use allocation::{compute_for_selection, compute_payouts};
pub use errors::{CoreError, PolicyError};
