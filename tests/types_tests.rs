//! Types Module Tests
//!
//! Tests for domain types (Frequency, FmBand, Volume, etc.)
//! Run with: cargo test --test types_tests

use fm_rds_firmware::config::FM_BAND;
use fm_rds_firmware::types::{Frequency, Rssi, Volume};

fn mhz(khz: u32) -> Frequency {
    Frequency::from_khz(khz).unwrap()
}

// =============================================================================
// Frequency Tests
// =============================================================================

#[test]
fn test_frequency_from_hz_valid() {
    assert!(Frequency::from_hz(87_500_000).is_some()); // Min
    assert!(Frequency::from_hz(108_000_000).is_some()); // Max
    assert!(Frequency::from_hz(101_100_000).is_some());
}

#[test]
fn test_frequency_from_hz_invalid() {
    assert!(Frequency::from_hz(87_499_999).is_none());
    assert!(Frequency::from_hz(108_000_001).is_none());
    assert!(Frequency::from_hz(0).is_none());
}

#[test]
fn test_frequency_from_khz() {
    let freq = mhz(95_700);
    assert_eq!(freq.as_hz(), 95_700_000);
    assert_eq!(freq.as_khz(), 95_700);
    assert!(Frequency::from_khz(u32::MAX).is_none());
}

#[test]
fn test_frequency_display() {
    assert_eq!(mhz(88_100).to_string(), "88.1 MHz");
    assert_eq!(mhz(107_300).to_string(), "107.3 MHz");
    assert_eq!(mhz(100_000).as_mhz_parts(), (100, 0));
}

#[test]
fn test_frequency_ordering() {
    assert!(mhz(88_100) < mhz(88_200));
}

// =============================================================================
// Alternative Frequency Code Tests
// =============================================================================

#[test]
fn test_af_code_range() {
    assert_eq!(Frequency::from_af_code(1), Some(mhz(87_600)));
    assert_eq!(Frequency::from_af_code(204), Some(mhz(107_900)));
}

#[test]
fn test_af_code_special_values() {
    // 0 = not to be used, 205 = filler, 224+ = count / LF-MF markers
    for code in [0, 205, 224, 225, 249, 250, 255] {
        assert!(Frequency::from_af_code(code).is_none(), "code {code}");
    }
}

// =============================================================================
// Band Stepping Tests
// =============================================================================

#[test]
fn test_step_up() {
    assert_eq!(mhz(88_100).step_up(&FM_BAND), mhz(88_200));
}

#[test]
fn test_step_up_wraps_to_bottom() {
    assert_eq!(mhz(108_000).step_up(&FM_BAND), FM_BAND.bottom);
}

#[test]
fn test_step_down() {
    assert_eq!(mhz(88_100).step_down(&FM_BAND), mhz(88_000));
}

#[test]
fn test_step_down_wraps_to_top() {
    assert_eq!(mhz(87_500).step_down(&FM_BAND), FM_BAND.top);
}

#[test]
fn test_band_channels() {
    assert!(FM_BAND.contains(mhz(98_000)));
    assert_eq!(FM_BAND.channel_of(mhz(87_500)), 0);
    assert_eq!(FM_BAND.channel_of(mhz(88_100)), 6);
    assert_eq!(FM_BAND.frequency_of(6), Some(mhz(88_100)));
    assert_eq!(FM_BAND.frequency_of(205), Some(mhz(108_000)));
    assert_eq!(FM_BAND.frequency_of(206), None);
}

// =============================================================================
// Volume Tests
// =============================================================================

#[test]
fn test_volume_clamped() {
    assert_eq!(Volume::new(40), Volume::MAX);
    assert_eq!(Volume::new(7).level(), 7);
}

#[test]
fn test_volume_steps_saturate() {
    assert_eq!(Volume::MAX.up(), Volume::MAX);
    assert_eq!(Volume::MIN.down(), Volume::MIN);
    assert_eq!(Volume::new(3).up().level(), 4);
    assert_eq!(Volume::new(3).down().level(), 2);
}

#[test]
fn test_volume_default() {
    assert_eq!(Volume::default().level(), 1);
}

#[test]
fn test_rssi_ordering() {
    assert!(Rssi(61) > Rssi(60));
    assert_eq!(Rssi::default(), Rssi(0));
}
