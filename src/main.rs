//! chessterm - keypad chess terminal firmware for the nRF52840.
//!
//! A single control loop scans the keypad, feeds host bytes to the
//! terminal and pushes whatever it rendered out to the OLED, LED and
//! buzzer. The USB CDC-ACM link runs in its own tasks.

#![no_std]
#![no_main]

mod hw;
mod usb;

use chessterm::config;
use chessterm::Terminal;
use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Instant, Timer};
use embassy_usb::class::cdc_acm::{Receiver, Sender};
use embassy_usb::UsbDevice;
use {defmt_rtt as _, panic_probe as _};

use hw::buzzer::Buzzer;
use hw::indicator::Indicator;
use hw::keypad::Keypad;
use usb::serial::{self, UsbDriver};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    serial::run_usb_device(device).await
}

#[embassy_executor::task]
async fn usb_reader(receiver: Receiver<'static, UsbDriver>) -> ! {
    serial::reader_task(receiver).await
}

#[embassy_executor::task]
async fn usb_writer(sender: Sender<'static, UsbDriver>) -> ! {
    serial::writer_task(sender).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("chessterm starting");

    let seed = hw::random_seed(p.RNG);

    let mut keypad = Keypad::new(
        [
            p.P0_03.degrade(),
            p.P0_04.degrade(),
            p.P0_28.degrade(),
            p.P0_29.degrade(),
        ],
        [
            p.P0_30.degrade(),
            p.P0_31.degrade(),
            p.P1_14.degrade(),
            p.P1_15.degrade(),
        ],
    );
    let mut indicator = Indicator::new(
        p.P0_13.degrade(),
        p.P0_14.degrade(),
        p.P0_15.degrade(),
    );
    let mut buzzer = Buzzer::new(p.PWM0, p.P1_10);

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut display = match hw::oled::init(i2c) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!("display init failed: {:?}", e);
            None
        }
    };

    let link = serial::init(p.USBD);
    unwrap!(spawner.spawn(usb_task(link.device)));
    unwrap!(spawner.spawn(usb_reader(link.receiver)));
    unwrap!(spawner.spawn(usb_writer(link.sender)));

    let mut terminal = Terminal::new(seed, Instant::now().as_millis());
    info!("control loop running");

    loop {
        let now_ms = Instant::now().as_millis();
        let pressed = keypad.scan().await;
        let packet = serial::rx_packets().try_receive().ok();
        terminal.run_pass(&pressed, packet.as_deref().unwrap_or(&[]), now_ms);

        let outputs = terminal.outputs_mut();
        if let Some(rows) = outputs.take_rows() {
            if let Some(display) = display.as_mut() {
                if let Err(e) = hw::oled::draw_rows(display, &rows) {
                    warn!("display write failed: {:?}", e);
                }
            }
        }
        if let Some(color) = outputs.take_indicator() {
            indicator.set(color);
        }
        if let Some(tone) = outputs.take_tone() {
            buzzer.play(tone, now_ms);
        }
        while let Some(command) = outputs.pop_command() {
            if let Err(e) = serial::send_command(&command) {
                warn!("host link busy, dropped command: {:?}", e);
            }
        }
        buzzer.update(now_ms);

        Timer::after_millis(config::CONTROL_LOOP_PERIOD_MS).await;
    }
}
