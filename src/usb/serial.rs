//! USB CDC-ACM serial link to the analysis host.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one CDC-ACM interface. Received packets and
//! outgoing lines cross to the control loop through bounded channels.

use core::fmt::Write;

use chessterm::config;
use chessterm::protocol::Command;
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::cdc_acm::{CdcAcmClass, Receiver, Sender, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Config, UsbDevice};
use heapless::{String, Vec};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// One USB packet as received.
pub type Packet = Vec<u8, { config::USB_CDC_PACKET_SIZE as usize }>;

/// One outgoing line, terminator included.
pub type Line = String<80>;

static CDC_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

static RX_PACKETS: Channel<CriticalSectionRawMutex, Packet, 4> = Channel::new();
static TX_LINES: Channel<CriticalSectionRawMutex, Line, 16> = Channel::new();

/// Host → terminal packets.
pub fn rx_packets() -> &'static Channel<CriticalSectionRawMutex, Packet, 4> {
    &RX_PACKETS
}

/// Build result containing the USB device runner and both CDC halves.
pub struct UsbSerial {
    pub device: UsbDevice<'static, UsbDriver>,
    pub sender: Sender<'static, UsbDriver>,
    pub receiver: Receiver<'static, UsbDriver>,
}

/// Initialise the USB stack and create the CDC-ACM interface.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbSerial {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // CDC needs the IAD so Windows binds both interfaces.
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    let mut builder = Builder::new(
        driver,
        usb_config,
        USB_CONFIG_DESC.init([0u8; 256]),
        USB_BOS_DESC.init([0u8; 256]),
        USB_MSOS_DESC.init([0u8; 256]),
        USB_CTRL_BUF.init([0u8; 64]),
    );

    let state = CDC_STATE.init(State::new());
    let class = CdcAcmClass::new(&mut builder, state, config::USB_CDC_PACKET_SIZE);
    let (sender, receiver) = class.split();

    let device = builder.build();

    info!("USB CDC-ACM serial initialised");

    UsbSerial {
        device,
        sender,
        receiver,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Reader task - forwards every received packet to the control loop.
pub async fn reader_task(mut receiver: Receiver<'static, UsbDriver>) -> ! {
    let mut buf = [0u8; config::USB_CDC_PACKET_SIZE as usize];
    loop {
        receiver.wait_connection().await;
        info!("host connected");
        loop {
            match receiver.read_packet(&mut buf).await {
                Ok(n) => {
                    let mut packet = Packet::new();
                    let _ = packet.extend_from_slice(&buf[..n]);
                    RX_PACKETS.send(packet).await;
                }
                Err(EndpointError::Disabled) => break,
                Err(EndpointError::BufferOverflow) => warn!("USB rx overflow"),
            }
        }
        info!("host disconnected");
    }
}

/// Writer task - sends queued lines to the host packet by packet.
pub async fn writer_task(mut sender: Sender<'static, UsbDriver>) -> ! {
    let max = config::USB_CDC_PACKET_SIZE as usize;
    loop {
        sender.wait_connection().await;
        loop {
            let line = TX_LINES.receive().await;
            if write_line(&mut sender, line.as_bytes(), max).await.is_err() {
                break;
            }
        }
    }
}

async fn write_line(
    sender: &mut Sender<'static, UsbDriver>,
    bytes: &[u8],
    max: usize,
) -> Result<(), EndpointError> {
    for chunk in bytes.chunks(max) {
        sender.write_packet(chunk).await?;
    }
    // A full last packet needs a zero-length packet to end the transfer.
    if !bytes.is_empty() && bytes.len() % max == 0 {
        sender.write_packet(&[]).await?;
    }
    Ok(())
}

/// Queue a command as one line. Dropped when the host is not keeping up.
pub fn send_command(command: &Command) -> Result<(), chessterm::Error> {
    let mut line = Line::new();
    writeln!(line, "{}", command).map_err(|_| chessterm::Error::Usb)?;
    TX_LINES.try_send(line).map_err(|_| chessterm::Error::Usb)
}
