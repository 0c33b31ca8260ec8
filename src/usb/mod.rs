//! USB Device subsystem - presents a CDC-ACM serial port to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. The analysis host opens the port and exchanges
//! newline-terminated text lines with the terminal.
//!
//! Three tasks share the link: the device runner, a reader feeding
//! received packets to the control loop, and a writer draining lines the
//! control loop queued.

pub mod serial;
