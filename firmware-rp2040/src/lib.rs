//! RP2040 firmware for the autonomous image plotter.
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and impersonates a
//! HORI Pokken Tournament Pro Pad over USB. Once enumerated it feeds
//! the host one controller report per poll interval, produced by the
//! platform-agnostic [`splat_plotter`] state machine, until the
//! compiled-in image has been drawn.
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three concurrent
//! tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Plot Task**: Asks the plotter for the next report and writes it
//!   to the IN endpoint; the await on the endpoint write is what paces
//!   the automaton to the host's polling interval
//! - **Drain Task**: Reads and discards everything the host sends on
//!   the OUT endpoint
//!
//! The image resource is compiled in via `include_bytes!` and validated
//! at startup; a truncated blob refuses to start rather than running a
//! corrupted scan.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development
//!   (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)
//! - **`alert-when-done`**: Flash the on-board LED once plotting
//!   finishes, so a human knows the device can be unplugged
//!
//! # Re-exports
//!
//! This crate re-exports all public items from [`splat_plotter`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

// Ensure mutually exclusive panic strategies
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

// Re-export core types for convenience
pub use splat_plotter::{
    Buttons, Hat, ImageError, ImageResource, PlotOptions, PlotReport, Plotter, ECHOES,
    IMAGE_HEIGHT, IMAGE_WIDTH, RESOURCE_LEN, STICK_CENTER, STICK_MAX, STICK_MIN,
};

pub mod usb_output;

pub use usb_output::{
    configure_usb_hid, OutputError, PlotterRequestHandler, UsbHidOutput, REPORT_DESCRIPTOR,
    USB_PID, USB_VID,
};
