pub mod ids;
pub mod listener;
pub mod payout;
pub mod play_stats;
pub mod policy;
pub mod song;
pub mod tags;

pub use ids::{ArtistId, ListenerId, SongId};
pub use listener::Listener;
pub use payout::{ArtistPayout, CalculationResult, ComponentTotals, SortColumn, SortDirection, sort_payouts};
pub use play_stats::{ArtistPlayStat, ListenerSnapshot, ListenerSummary, PlatformTotals, total_listener_plays};
pub use policy::{AllocationPolicy, PolicyKind, PolicySelection, PriorityCharacteristics, Split};
pub use song::Song;
pub use tags::TagFamily;
