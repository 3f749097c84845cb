pub mod audio_state;
pub mod frame_cadence;
pub mod null_poller;

#[cfg(test)]
pub(crate) mod fakes;
