//! AdminBoxx - Button/LED Panel Firmware
//!
//! Main firmware binary for an RP2040 board driving an 8x4 grid of
//! NeoTrellis keys. The panel shows up on the host as a USB serial port:
//! presses are reported over it, LED colours and heartbeats come back.
//!
//! Core 0 runs the embassy executor with the USB stack. Core 1 runs the
//! blocking panel session, which never yields.
//!
//! Wiring: I2C1 to both NeoTrellis boards, SDA = GPIO2, SCL = GPIO3.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_time::{block_for, Delay, Duration};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use adminboxx_core::Session;
use adminboxx_drivers::NeoTrellisGrid;

use crate::clock::EmbassyClock;

mod channels;
mod clock;
mod usb;

/// Seesaw boards are specified for standard-mode I2C
const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Delay before retrying a failed panel bring-up
const INIT_RETRY: Duration = Duration::from_secs(1);

const USB_VID: u16 = 0x1209;
const USB_PID: u16 = 0x0001;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

// Core 1 stack and USB descriptor buffers (must live forever)
static CORE1_STACK: StaticCell<Stack<8192>> = StaticCell::new();
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CDC_STATE: StaticCell<State> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("AdminBoxx firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Host link: USB CDC-ACM on core 0
    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some("AdminBoxx");
    usb_config.product = Some("AdminBoxx panel");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );
    let class = CdcAcmClass::new(&mut builder, CDC_STATE.init(State::new()), usb::MAX_PACKET_SIZE);
    let device = builder.build();
    let (tx, rx) = class.split();

    spawner.spawn(usb::usb_task(device)).unwrap();
    spawner.spawn(usb::cdc_rx_task(rx)).unwrap();
    spawner.spawn(usb::cdc_tx_task(tx)).unwrap();
    info!("USB CDC initialized for host communication");

    // Panel session on core 1
    let (i2c1, sda, scl) = (p.I2C1, p.PIN_2, p.PIN_3);
    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        let mut i2c_config = I2cConfig::default();
        i2c_config.frequency = I2C_FREQUENCY_HZ;
        let i2c = I2c::new_blocking(i2c1, scl, sda, i2c_config);

        let mut panel = NeoTrellisGrid::new(i2c, Delay);
        while let Err(e) = panel.init() {
            error!("NeoTrellis init failed: {}, retrying", Debug2Format(&e));
            block_for(INIT_RETRY);
        }
        info!("NeoTrellis grid initialized");

        let mut session = Session::new(panel, usb::link(), EmbassyClock);

        if let Err(e) = session.startup() {
            warn!("Startup sequence failed: {}", Debug2Format(&e));
        }

        info!("Entering main loop");
        session.run()
    });
}
