//! `RDA5807M` FM Tuner Driver
//!
//! Single-chip FM receiver with an on-chip RDS demodulator and block
//! decoder. The chip is driven through its random-access I2C interface,
//! where every register is 16 bits wide and transferred high byte first.
//!
//! ```text
//! write:  [reg, hi, lo]
//! read:   [reg] then 2 bytes
//! ```
//!
//! Writable registers are kept in a shadow copy so single fields can be
//! updated without a read-modify-write on the bus.

use embedded_hal_async::i2c::I2c;

use crate::config::{DEFAULT_SEEK_THRESHOLD, FM_BAND, RDA5807_I2C_ADDR, TUNER_CHANNEL_BASE_HZ};
use crate::radio::{TuneStatus, Tuner};
use crate::rds::Group;
use crate::types::{Frequency, Rssi, SeekDirection, Volume};

/// `RDA5807M` register addresses
mod reg {
    pub const CHIP_ID: u8 = 0x00;
    pub const CONTROL: u8 = 0x02;
    pub const CHANNEL: u8 = 0x03;
    pub const SYSTEM: u8 = 0x04;
    pub const VOLUME: u8 = 0x05;
    pub const STATUS: u8 = 0x0A;
    pub const SIGNAL: u8 = 0x0B;
    pub const RDS_A: u8 = 0x0C;
}

/// Register 0x02 bits
mod control {
    pub const DHIZ: u16 = 1 << 15;
    pub const DMUTE: u16 = 1 << 14;
    pub const SEEKUP: u16 = 1 << 9;
    pub const SEEK: u16 = 1 << 8;
    pub const RDS_EN: u16 = 1 << 3;
    pub const NEW_METHOD: u16 = 1 << 2;
    pub const SOFT_RESET: u16 = 1 << 1;
    pub const ENABLE: u16 = 1 << 0;
}

/// Register 0x03 bits
mod channel {
    pub const CHAN_SHIFT: u16 = 6;
    pub const CHAN_MASK: u16 = 0x03FF;
    pub const TUNE: u16 = 1 << 4;
}

/// Register 0x04 bits
mod system {
    /// 50 µs de-emphasis
    pub const DE: u16 = 1 << 11;
}

/// Register 0x05 bits
mod volume {
    pub const INT_MODE: u16 = 1 << 15;
    pub const SEEKTH_SHIFT: u16 = 8;
    pub const SEEKTH_MASK: u16 = 0x0F;
    pub const LNA_PORT_LNAP: u16 = 0b10 << 6;
    pub const VOLUME_MASK: u16 = 0x0F;
}

/// Register 0x0A bits
mod status {
    pub const RDSR: u16 = 1 << 15;
    pub const STC: u16 = 1 << 14;
    pub const SF: u16 = 1 << 13;
    pub const READCHAN_MASK: u16 = 0x03FF;
}

/// Register 0x0B bits
mod signal {
    pub const RSSI_SHIFT: u16 = 9;
    pub const RSSI_MASK: u16 = 0x7F;
    pub const BLERA_SHIFT: u16 = 2;
    pub const BLER_MASK: u16 = 0x03;
    /// Six or more errors: block uncorrectable
    pub const BLER_UNCORRECTABLE: u16 = 3;
}

/// Expected upper byte of the chip ID register
const CHIP_ID: u8 = 0x58;

/// Channel spacing in Hz (SPACE = 00)
const CHANNEL_SPACING_HZ: u32 = 100_000;

/// `RDA5807M` driver over an async I2C bus
pub struct Rda5807<I> {
    i2c: I,
    address: u8,
    control: u16,
    volume: u16,
}

impl<I: I2c> Rda5807<I> {
    /// Create a driver at the default address; the chip is not touched
    #[must_use]
    pub const fn new(i2c: I) -> Self {
        Self {
            i2c,
            address: RDA5807_I2C_ADDR,
            control: control::DHIZ | control::DMUTE | control::RDS_EN | control::NEW_METHOD | control::ENABLE,
            volume: volume::INT_MODE
                | ((DEFAULT_SEEK_THRESHOLD as u16 & volume::SEEKTH_MASK) << volume::SEEKTH_SHIFT)
                | volume::LNA_PORT_LNAP,
        }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Soft-reset the chip and enable audio output and RDS
    pub async fn init(&mut self) -> Result<(), I::Error> {
        let id = self.read_reg(reg::CHIP_ID).await?;
        if (id >> 8) as u8 != CHIP_ID {
            warn!("Unexpected tuner chip ID {=u16:#x}", id);
        }

        self.write_reg(reg::CONTROL, self.control | control::SOFT_RESET).await?;
        self.write_reg(reg::CONTROL, self.control).await?;
        self.write_reg(reg::SYSTEM, system::DE).await?;
        self.write_reg(reg::VOLUME, self.volume).await?;
        info!("RDA5807M initialized");
        Ok(())
    }

    /// Channel number for the CHAN field
    #[must_use]
    pub const fn channel_of(freq: Frequency) -> u16 {
        ((freq.as_hz() - TUNER_CHANNEL_BASE_HZ) / CHANNEL_SPACING_HZ) as u16 & channel::CHAN_MASK
    }

    /// Frequency of a READCHAN value, `None` outside the FM band
    #[must_use]
    pub const fn frequency_of(chan: u16) -> Option<Frequency> {
        let hz = TUNER_CHANNEL_BASE_HZ + (chan & channel::CHAN_MASK) as u32 * CHANNEL_SPACING_HZ;
        match Frequency::from_hz(hz) {
            Some(freq) if FM_BAND.contains(freq) => Some(freq),
            _ => None,
        }
    }

    async fn write_reg(&mut self, register: u8, value: u16) -> Result<(), I::Error> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c.write(self.address, &[register, hi, lo]).await
    }

    async fn read_reg(&mut self, register: u8) -> Result<u16, I::Error> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut buf).await?;
        Ok(u16::from_be_bytes(buf))
    }
}

impl<I: I2c> Tuner for Rda5807<I> {
    type Error = I::Error;

    async fn set_frequency(&mut self, freq: Frequency) -> Result<(), Self::Error> {
        // Stop any seek in progress
        self.control &= !(control::SEEK | control::SEEKUP);
        self.write_reg(reg::CONTROL, self.control).await?;
        let chan = Self::channel_of(freq);
        self.write_reg(reg::CHANNEL, (chan << channel::CHAN_SHIFT) | channel::TUNE)
            .await
    }

    async fn start_seek(&mut self, direction: SeekDirection) -> Result<(), Self::Error> {
        self.control &= !control::SEEKUP;
        if direction == SeekDirection::Up {
            self.control |= control::SEEKUP;
        }
        self.write_reg(reg::CONTROL, self.control | control::SEEK).await
    }

    async fn status(&mut self) -> Result<TuneStatus, Self::Error> {
        let value = self.read_reg(reg::STATUS).await?;
        Ok(TuneStatus {
            complete: value & status::STC != 0,
            seek_failed: value & status::SF != 0,
            frequency: Self::frequency_of(value & status::READCHAN_MASK),
        })
    }

    async fn rssi(&mut self) -> Result<Rssi, Self::Error> {
        let value = self.read_reg(reg::SIGNAL).await?;
        Ok(Rssi(((value >> signal::RSSI_SHIFT) & signal::RSSI_MASK) as u8))
    }

    async fn set_seek_threshold(&mut self, threshold: u8) -> Result<(), Self::Error> {
        self.volume = (self.volume & !(volume::SEEKTH_MASK << volume::SEEKTH_SHIFT))
            | ((u16::from(threshold) & volume::SEEKTH_MASK) << volume::SEEKTH_SHIFT);
        self.write_reg(reg::VOLUME, self.volume).await
    }

    async fn set_volume(&mut self, level: Volume) -> Result<(), Self::Error> {
        self.volume = (self.volume & !volume::VOLUME_MASK) | u16::from(level.level());
        self.write_reg(reg::VOLUME, self.volume).await
    }

    async fn set_mute(&mut self, mute: bool) -> Result<(), Self::Error> {
        // DMUTE set means audio is *not* muted
        if mute {
            self.control &= !control::DMUTE;
        } else {
            self.control |= control::DMUTE;
        }
        self.write_reg(reg::CONTROL, self.control).await
    }

    async fn read_group(&mut self) -> Result<Option<Group>, Self::Error> {
        if self.read_reg(reg::STATUS).await? & status::RDSR == 0 {
            return Ok(None);
        }

        let quality = self.read_reg(reg::SIGNAL).await?;
        let bler_a = (quality >> signal::BLERA_SHIFT) & signal::BLER_MASK;
        let bler_b = quality & signal::BLER_MASK;
        if bler_a == signal::BLER_UNCORRECTABLE || bler_b == signal::BLER_UNCORRECTABLE {
            trace!("RDS group dropped, BLER {=u16}/{=u16}", bler_a, bler_b);
            return Ok(None);
        }

        let mut blocks = [0u16; 4];
        for (offset, block) in (0u8..).zip(blocks.iter_mut()) {
            *block = self.read_reg(reg::RDS_A + offset).await?;
        }
        Ok(Some(Group::from_blocks(blocks)))
    }
}
