pub mod audio_level;
pub mod constraint_metrics;
