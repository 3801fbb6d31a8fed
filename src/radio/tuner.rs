//! Tuner abstraction
//!
//! What radio control needs from the tuner chip. Every call is a short
//! bus transaction; long operations (seek) are started here and their
//! completion is observed through [`Tuner::status`].

use crate::rds::Group;
use crate::types::{Frequency, Rssi, SeekDirection, Volume};

/// Tune/seek progress as reported by the tuner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TuneStatus {
    /// Seek or tune has finished
    pub complete: bool,
    /// Seek reached the band edge without finding a station
    pub seek_failed: bool,
    /// Frequency the tuner is on, if it maps into the band
    pub frequency: Option<Frequency>,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TuneStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TuneStatus(complete={}, failed={}, {})",
            self.complete,
            self.seek_failed,
            self.frequency
        );
    }
}

/// FM tuner with an RDS group output
#[allow(async_fn_in_trait)]
pub trait Tuner {
    /// Bus or device error
    type Error;

    /// Tune to a frequency
    async fn set_frequency(&mut self, freq: Frequency) -> Result<(), Self::Error>;

    /// Start a seek; completion is reported by [`Tuner::status`]
    async fn start_seek(&mut self, direction: SeekDirection) -> Result<(), Self::Error>;

    /// Current tune/seek status
    async fn status(&mut self) -> Result<TuneStatus, Self::Error>;

    /// Signal strength on the current channel
    async fn rssi(&mut self) -> Result<Rssi, Self::Error>;

    /// Set the seek SNR threshold
    async fn set_seek_threshold(&mut self, threshold: u8) -> Result<(), Self::Error>;

    /// Set the audio volume
    async fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error>;

    /// Mute or unmute the audio output
    async fn set_mute(&mut self, mute: bool) -> Result<(), Self::Error>;

    /// Next decoded RDS group, if one is ready
    async fn read_group(&mut self) -> Result<Option<Group>, Self::Error>;
}
