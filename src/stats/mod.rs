pub mod trial_stats;
