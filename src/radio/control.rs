//! Radio control
//!
//! Owns the tuner and the RDS parser. User commands and the periodic
//! poll both go through here, so every frequency change (direct tune,
//! channel step, seek completion, scan step) resets the parser before
//! any group from the new channel can reach it.

use core::fmt;

use heapless::Vec;

use super::tuner::Tuner;
use crate::config::{
    DEFAULT_SEEK_THRESHOLD, FM_BAND, MAX_SEEK_THRESHOLD, MAX_STATIONS, SCAN_RSSI_THRESHOLD,
    SCAN_SETTLE_POLLS, STATION_PRESETS_KHZ,
};
use crate::rds::{GroupKind, RdsParser, RdsSnapshot};
use crate::types::{Frequency, Rssi, SeekDirection, Volume};

/// User request to the radio
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioCommand {
    /// Tune directly to a frequency
    SetFrequency(Frequency),
    /// One channel up, wrapping at the top of the band
    StepUp,
    /// One channel down, wrapping at the bottom of the band
    StepDown,
    /// Let the tuner seek to the next station
    Seek(SeekDirection),
    /// Sweep the band and collect stations
    Scan,
    /// Tune to a station found by the last scan
    TuneStation(usize),
    /// Tune to a configured preset
    TunePreset(usize),
    /// Volume one step up
    VolumeUp,
    /// Volume one step down
    VolumeDown,
    /// Toggle audio mute
    ToggleMute,
    /// Raise the seek threshold by one
    SeekThresholdUp,
    /// Lower the seek threshold by one
    SeekThresholdDown,
    /// Request a status report
    Report,
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::SetFrequency(freq) => defmt::write!(f, "SetFrequency({})", freq),
            Self::StepUp => defmt::write!(f, "StepUp"),
            Self::StepDown => defmt::write!(f, "StepDown"),
            Self::Seek(dir) => defmt::write!(f, "Seek({})", dir),
            Self::Scan => defmt::write!(f, "Scan"),
            Self::TuneStation(n) => defmt::write!(f, "TuneStation({=usize})", n),
            Self::TunePreset(n) => defmt::write!(f, "TunePreset({=usize})", n),
            Self::VolumeUp => defmt::write!(f, "VolumeUp"),
            Self::VolumeDown => defmt::write!(f, "VolumeDown"),
            Self::ToggleMute => defmt::write!(f, "ToggleMute"),
            Self::SeekThresholdUp => defmt::write!(f, "SeekThresholdUp"),
            Self::SeekThresholdDown => defmt::write!(f, "SeekThresholdDown"),
            Self::Report => defmt::write!(f, "Report"),
        }
    }
}

/// Outcome of a command or a poll
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioEvent {
    /// Nothing happened
    Idle,
    /// Now tuned to a frequency
    Tuned(Frequency),
    /// Seek started
    SeekStarted(SeekDirection),
    /// Seek still running
    Seeking,
    /// Seek stopped on a station
    SeekComplete(Frequency),
    /// Seek hit the band edge without a station
    SeekFailed,
    /// Scan started at the bottom of the band
    ScanStarted,
    /// Scan waiting for the tuner to settle
    ScanSettling,
    /// Scan stepped past a channel below the threshold
    ScanStep(Frequency, Rssi),
    /// Scan recorded a station
    StationFound(Frequency, Rssi),
    /// Scan finished with this many stations
    ScanComplete(usize),
    /// An RDS group went to this decoder
    Group(GroupKind),
    /// Volume changed
    Volume(Volume),
    /// Mute changed
    Muted(bool),
    /// Seek threshold changed
    SeekThreshold(u8),
    /// Caller should publish a status report
    Report,
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "Idle"),
            Self::Tuned(freq) => defmt::write!(f, "Tuned({})", freq),
            Self::SeekStarted(dir) => defmt::write!(f, "SeekStarted({})", dir),
            Self::Seeking => defmt::write!(f, "Seeking"),
            Self::SeekComplete(freq) => defmt::write!(f, "SeekComplete({})", freq),
            Self::SeekFailed => defmt::write!(f, "SeekFailed"),
            Self::ScanStarted => defmt::write!(f, "ScanStarted"),
            Self::ScanSettling => defmt::write!(f, "ScanSettling"),
            Self::ScanStep(freq, rssi) => defmt::write!(f, "ScanStep({}, {})", freq, rssi),
            Self::StationFound(freq, rssi) => defmt::write!(f, "StationFound({}, {})", freq, rssi),
            Self::ScanComplete(n) => defmt::write!(f, "ScanComplete({=usize})", n),
            Self::Group(kind) => defmt::write!(f, "Group({})", kind),
            Self::Volume(vol) => defmt::write!(f, "{}", vol),
            Self::Muted(muted) => defmt::write!(f, "Muted({})", muted),
            Self::SeekThreshold(th) => defmt::write!(f, "SeekThreshold({=u8})", th),
            Self::Report => defmt::write!(f, "Report"),
        }
    }
}

/// Radio control error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioError<E> {
    /// Tuner bus or device error
    Tuner(E),
    /// No scanned station at this index
    InvalidStation(usize),
    /// No preset at this index
    InvalidPreset(usize),
}

impl<E: fmt::Debug> fmt::Display for RadioError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tuner(e) => write!(f, "tuner error: {e:?}"),
            Self::InvalidStation(n) => write!(f, "no station at index {n}"),
            Self::InvalidPreset(n) => write!(f, "no preset at index {n}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for RadioError<E> {}

#[cfg(feature = "embedded")]
impl<E: defmt::Format> defmt::Format for RadioError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Tuner(e) => defmt::write!(f, "tuner error: {}", e),
            Self::InvalidStation(n) => defmt::write!(f, "no station at index {=usize}", n),
            Self::InvalidPreset(n) => defmt::write!(f, "no preset at index {=usize}", n),
        }
    }
}

/// Radio control result
pub type RadioResult<T, E> = Result<T, RadioError<E>>;

/// What the poll loop is doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Activity {
    /// Reading RDS groups
    Listening,
    /// Waiting for a tuner seek to finish
    Seeking,
    /// Sweeping the band
    Scanning {
        /// Polls left before RSSI is sampled on this channel
        settle: u8,
        /// Frequency to return to if no station is found
        resume: Frequency,
    },
}

/// Tuner, RDS parser and user-facing radio state
pub struct RadioControl<T> {
    tuner: T,
    rds: RdsParser,
    frequency: Frequency,
    volume: Volume,
    muted: bool,
    seek_threshold: u8,
    activity: Activity,
    stations: Vec<Frequency, MAX_STATIONS>,
}

impl<T: Tuner> RadioControl<T> {
    /// Wrap a tuner; nothing is sent until [`RadioControl::start`]
    pub const fn new(tuner: T, frequency: Frequency, volume: Volume) -> Self {
        Self {
            tuner,
            rds: RdsParser::new(),
            frequency,
            volume,
            muted: false,
            seek_threshold: DEFAULT_SEEK_THRESHOLD,
            activity: Activity::Listening,
            stations: Vec::new(),
        }
    }

    /// Push the initial frequency, volume and seek threshold to the tuner
    pub async fn start(&mut self) -> RadioResult<(), T::Error> {
        self.tuner.set_volume(self.volume).await.map_err(RadioError::Tuner)?;
        self.tuner
            .set_seek_threshold(self.seek_threshold)
            .await
            .map_err(RadioError::Tuner)?;
        self.tune(self.frequency).await?;
        info!("Radio started on {}", self.frequency);
        Ok(())
    }

    /// Execute a user command
    pub async fn handle(&mut self, command: RadioCommand) -> RadioResult<RadioEvent, T::Error> {
        debug!("Command {}", command);
        match command {
            RadioCommand::SetFrequency(freq) => {
                self.activity = Activity::Listening;
                self.tune(freq).await?;
                Ok(RadioEvent::Tuned(freq))
            }
            RadioCommand::StepUp => {
                self.activity = Activity::Listening;
                let freq = self.frequency.step_up(&FM_BAND);
                self.tune(freq).await?;
                Ok(RadioEvent::Tuned(freq))
            }
            RadioCommand::StepDown => {
                self.activity = Activity::Listening;
                let freq = self.frequency.step_down(&FM_BAND);
                self.tune(freq).await?;
                Ok(RadioEvent::Tuned(freq))
            }
            RadioCommand::Seek(direction) => {
                self.rds.reset();
                self.tuner.start_seek(direction).await.map_err(RadioError::Tuner)?;
                self.activity = Activity::Seeking;
                Ok(RadioEvent::SeekStarted(direction))
            }
            RadioCommand::Scan => {
                let resume = self.frequency;
                self.stations.clear();
                self.tune(FM_BAND.bottom).await?;
                self.activity = Activity::Scanning {
                    settle: SCAN_SETTLE_POLLS,
                    resume,
                };
                info!("Scan started");
                Ok(RadioEvent::ScanStarted)
            }
            RadioCommand::TuneStation(index) => {
                let freq = *self
                    .stations
                    .get(index)
                    .ok_or(RadioError::InvalidStation(index))?;
                self.activity = Activity::Listening;
                self.tune(freq).await?;
                Ok(RadioEvent::Tuned(freq))
            }
            RadioCommand::TunePreset(index) => {
                let freq = STATION_PRESETS_KHZ
                    .get(index)
                    .and_then(|&khz| Frequency::from_khz(khz))
                    .ok_or(RadioError::InvalidPreset(index))?;
                self.activity = Activity::Listening;
                self.tune(freq).await?;
                Ok(RadioEvent::Tuned(freq))
            }
            RadioCommand::VolumeUp => self.set_volume(self.volume.up()).await,
            RadioCommand::VolumeDown => self.set_volume(self.volume.down()).await,
            RadioCommand::ToggleMute => {
                let muted = !self.muted;
                self.tuner.set_mute(muted).await.map_err(RadioError::Tuner)?;
                self.muted = muted;
                Ok(RadioEvent::Muted(muted))
            }
            RadioCommand::SeekThresholdUp => {
                self.set_seek_threshold(self.seek_threshold.saturating_add(1).min(MAX_SEEK_THRESHOLD))
                    .await
            }
            RadioCommand::SeekThresholdDown => {
                self.set_seek_threshold(self.seek_threshold.saturating_sub(1)).await
            }
            RadioCommand::Report => Ok(RadioEvent::Report),
        }
    }

    /// One step of background work
    ///
    /// Call at a fixed interval. While seeking this watches for seek
    /// completion, while scanning it samples one channel, otherwise it
    /// feeds at most one RDS group to the parser.
    pub async fn poll(&mut self) -> RadioResult<RadioEvent, T::Error> {
        match self.activity {
            Activity::Listening => self.poll_rds().await,
            Activity::Seeking => self.poll_seek().await,
            Activity::Scanning { settle, resume } => self.poll_scan(settle, resume).await,
        }
    }

    async fn poll_rds(&mut self) -> RadioResult<RadioEvent, T::Error> {
        match self.tuner.read_group().await.map_err(RadioError::Tuner)? {
            Some(group) => Ok(RadioEvent::Group(self.rds.update(&group))),
            None => Ok(RadioEvent::Idle),
        }
    }

    async fn poll_seek(&mut self) -> RadioResult<RadioEvent, T::Error> {
        let status = self.tuner.status().await.map_err(RadioError::Tuner)?;
        if !status.complete {
            return Ok(RadioEvent::Seeking);
        }

        self.activity = Activity::Listening;
        self.rds.reset();
        if let Some(freq) = status.frequency {
            self.frequency = freq;
        }
        if status.seek_failed {
            warn!("Seek failed at {}", self.frequency);
            Ok(RadioEvent::SeekFailed)
        } else {
            info!("Seek stopped on {}", self.frequency);
            Ok(RadioEvent::SeekComplete(self.frequency))
        }
    }

    async fn poll_scan(&mut self, settle: u8, resume: Frequency) -> RadioResult<RadioEvent, T::Error> {
        if settle > 0 {
            self.activity = Activity::Scanning {
                settle: settle - 1,
                resume,
            };
            return Ok(RadioEvent::ScanSettling);
        }

        let current = self.frequency;
        let rssi = self.tuner.rssi().await.map_err(RadioError::Tuner)?;
        let found = rssi.0 >= SCAN_RSSI_THRESHOLD && self.stations.push(current).is_ok();
        if found {
            info!("Station {} ({})", current, rssi);
        }

        let next = current.as_hz() + FM_BAND.spacing_hz;
        let done = next > FM_BAND.top.as_hz() || self.stations.is_full();
        if done {
            let count = self.stations.len();
            let target = self.stations.first().copied().unwrap_or(resume);
            self.activity = Activity::Listening;
            self.tune(target).await?;
            info!("Scan complete, {=usize} stations", count);
            return Ok(RadioEvent::ScanComplete(count));
        }

        if let Some(freq) = Frequency::from_hz(next) {
            self.tune(freq).await?;
        }
        self.activity = Activity::Scanning {
            settle: SCAN_SETTLE_POLLS,
            resume,
        };
        if found {
            Ok(RadioEvent::StationFound(current, rssi))
        } else {
            Ok(RadioEvent::ScanStep(current, rssi))
        }
    }

    async fn tune(&mut self, freq: Frequency) -> RadioResult<(), T::Error> {
        self.rds.reset();
        self.tuner.set_frequency(freq).await.map_err(RadioError::Tuner)?;
        self.frequency = freq;
        debug!("Tuned to {}", freq);
        Ok(())
    }

    async fn set_volume(&mut self, volume: Volume) -> RadioResult<RadioEvent, T::Error> {
        if volume != self.volume {
            self.tuner.set_volume(volume).await.map_err(RadioError::Tuner)?;
            self.volume = volume;
        }
        Ok(RadioEvent::Volume(self.volume))
    }

    async fn set_seek_threshold(&mut self, threshold: u8) -> RadioResult<RadioEvent, T::Error> {
        if threshold != self.seek_threshold {
            self.tuner
                .set_seek_threshold(threshold)
                .await
                .map_err(RadioError::Tuner)?;
            self.seek_threshold = threshold;
        }
        Ok(RadioEvent::SeekThreshold(self.seek_threshold))
    }

    /// Current frequency
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Current volume
    #[must_use]
    pub const fn volume(&self) -> Volume {
        self.volume
    }

    /// Audio muted
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Current seek threshold
    #[must_use]
    pub const fn seek_threshold(&self) -> u8 {
        self.seek_threshold
    }

    /// Seek in progress
    #[must_use]
    pub const fn is_seeking(&self) -> bool {
        matches!(self.activity, Activity::Seeking)
    }

    /// Scan in progress
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        matches!(self.activity, Activity::Scanning { .. })
    }

    /// Stations found by the last scan
    #[must_use]
    pub fn stations(&self) -> &[Frequency] {
        &self.stations
    }

    /// RDS state for the current station
    #[must_use]
    pub const fn rds(&self) -> &RdsParser {
        &self.rds
    }

    /// Copy of the RDS state for the current station
    #[must_use]
    pub fn snapshot(&self) -> RdsSnapshot {
        self.rds.snapshot()
    }

    /// Underlying tuner
    pub fn tuner_mut(&mut self) -> &mut T {
        &mut self.tuner
    }
}
