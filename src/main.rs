//! FM Radio Main Application
//!
//! Entry point for the STM32G474 + RDA5807M FM receiver firmware.
//! Initializes hardware and spawns async tasks:
//!
//! - `radio_task` owns the tuner and RDS parser, scans the band once at
//!   boot and then polls every 40 ms
//! - `report_task` logs RDS status snapshots
//! - `heartbeat_task` blinks the user LED

#![no_std]
#![no_main]

use defmt::{unwrap, Display2Format};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Async;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Ticker;
use {defmt_rtt as _, panic_probe as _};

use fm_rds_firmware::drivers::Rda5807;
use fm_rds_firmware::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

/// Latest RDS snapshot waiting to be reported
static REPORT: Signal<CriticalSectionRawMutex, RdsSnapshot> = Signal::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("FM RDS Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // User LED (PA5 on Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // I2C1 for the RDA5807M
    // PB8 = SCL, PB9 = SDA
    let i2c = I2c::new(
        p.I2C1,
        p.PB8, // SCL
        p.PB9, // SDA
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    info!("I2C1 initialized at {=u32} Hz", I2C_FREQUENCY_HZ);

    unwrap!(spawner.spawn(heartbeat_task(led)));
    unwrap!(spawner.spawn(report_task()));
    unwrap!(spawner.spawn(radio_task(i2c)));

    info!("Tasks spawned");
}

/// Radio task - owns the tuner and the RDS parser
#[embassy_executor::task]
async fn radio_task(i2c: I2c<'static, Async>) {
    let mut tuner = Rda5807::new(i2c);
    if let Err(e) = tuner.init().await {
        error!("Tuner init failed: {}", e);
        return;
    }

    let frequency = default_frequency().unwrap_or(FM_BAND.bottom);
    let mut radio = RadioControl::new(tuner, frequency, DEFAULT_VOLUME);
    if let Err(e) = radio.start().await {
        error!("Radio start failed: {}", e);
        return;
    }

    // Build the station list, then listen on the first station found
    if let Err(e) = radio.handle(RadioCommand::Scan).await {
        warn!("{}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut polls: u32 = 0;

    loop {
        match radio.poll().await {
            Ok(RadioEvent::ScanComplete(count)) => {
                info!("{=usize} stations found, now on {}", count, radio.frequency());
            }
            Ok(RadioEvent::Idle | RadioEvent::Seeking | RadioEvent::ScanSettling) => {}
            Ok(event) => debug!("{}", event),
            Err(e) => warn!("{}", e),
        }

        polls += 1;
        if polls >= REPORT_EVERY_POLLS {
            polls = 0;
            if !radio.is_scanning() && !radio.is_seeking() {
                REPORT.signal(radio.snapshot());
            }
        }

        ticker.next().await;
    }
}

/// Report task - logs RDS snapshots as they arrive
#[embassy_executor::task]
async fn report_task() {
    loop {
        let snapshot = REPORT.wait().await;
        info!("{}", Display2Format(&snapshot));
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
