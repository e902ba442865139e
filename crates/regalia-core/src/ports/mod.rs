pub mod play_stats_source;

pub use play_stats_source::PlayStatsSource;
