//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the FM receiver hardware
//! and the RDS decoder. Bus addresses, timing, band plan and buffer
//! capacities are centralized here.

use crate::types::{FmBand, Frequency, Volume};

/// I2C bus frequency for the tuner
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// RDA5807M random-access I2C address
pub const RDA5807_I2C_ADDR: u8 = 0x11;

/// Radio poll interval in milliseconds (one RDS group every ~87.6 ms)
pub const POLL_INTERVAL_MS: u64 = 40;

/// Number of polls between RDS status reports
pub const REPORT_EVERY_POLLS: u32 = 25;

/// FM band plan (RDA5807M band 0 at 100 kHz spacing)
pub const FM_BAND: FmBand = FmBand {
    bottom: match Frequency::from_hz(87_500_000) {
        Some(f) => f,
        None => panic!("band bottom out of range"),
    },
    top: match Frequency::from_hz(108_000_000) {
        Some(f) => f,
        None => panic!("band top out of range"),
    },
    spacing_hz: 100_000,
};

/// Lowest frequency of the tuner's channel numbering (band 0 starts at 87.0 MHz)
pub const TUNER_CHANNEL_BASE_HZ: u32 = 87_000_000;

/// Station presets in kHz
pub const STATION_PRESETS_KHZ: [u32; 6] = [88_100, 90_300, 91_700, 95_700, 101_100, 107_300];

/// Default startup frequency (first preset)
pub const DEFAULT_FREQUENCY_KHZ: u32 = STATION_PRESETS_KHZ[0];

/// Default volume
pub const DEFAULT_VOLUME: Volume = Volume::new(1);

/// Minimum RSSI for a scanned channel to be recorded as a station
pub const SCAN_RSSI_THRESHOLD: u8 = 60;

/// Polls to wait after each scan step before sampling RSSI (~500 ms)
pub const SCAN_SETTLE_POLLS: u8 = 12;

/// Maximum number of stations kept by a band scan
pub const MAX_STATIONS: usize = 10;

/// Default seek threshold (tuner SNR units)
pub const DEFAULT_SEEK_THRESHOLD: u8 = 8;

/// Highest seek threshold the tuner accepts (4-bit field)
pub const MAX_SEEK_THRESHOLD: u8 = 15;

/// Program-service name length
pub const PS_LEN: usize = 8;

/// RadioText length for 2A groups
pub const RT_LEN: usize = 64;

/// RadioText length for 2B groups
pub const RT_2B_LEN: usize = 32;

/// Alternative-frequency list capacity
pub const AF_LIST_LEN: usize = 25;

/// RadioText-Plus open-data application ID
pub const RT_PLUS_AID: u16 = 0x4BD7;

/// Group type carrying RadioText-Plus until an ODA announcement says otherwise (11A)
pub const RT_PLUS_DEFAULT_GROUP: u8 = 11;

/// Build the default startup frequency
#[must_use]
pub const fn default_frequency() -> Option<Frequency> {
    Frequency::from_khz(DEFAULT_FREQUENCY_KHZ)
}
