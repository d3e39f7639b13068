#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::Timer;
use embassy_usb::class::hid::{HidReader, State};
use embassy_usb::{Builder, Config as UsbConfig};
use splat_plotter_rp2040::{
    configure_usb_hid, ImageResource, Plotter, PlotterRequestHandler, UsbHidOutput, USB_PID,
    USB_VID,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// The compiled-in image resource: one flag byte followed by the
/// bit-packed 320x120 bitmap. Regenerate with the packer script.
static IMAGE_DATA: &[u8] = include_bytes!("../../assets/poster.bin");

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("splat-plotter starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // Validate the image resource before anything touches USB: a bad
    // blob means refusing to start, not drawing garbage.
    let image = match ImageResource::new(IMAGE_DATA) {
        Ok(image) => image,
        Err(e) => defmt::panic!("invalid image resource: {}", e),
    };
    let plotter = Plotter::new(image);
    info!(
        "image ok, options: margin={} opposite={} slow={} save={} vertical={}",
        plotter.options().cautious_margin,
        plotter.options().opposite,
        plotter.options().slow_mode,
        plotter.options().end_save,
        plotter.options().vertical,
    );

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some("HORI CO.,LTD.");
    usb_config.product = Some("POKKEN CONTROLLER");
    usb_config.serial_number = None;
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let (hid_reader, hid_writer) = configure_usb_hid(&mut builder, hid_state);

    // Build the USB device
    let usb_device = builder.build();

    let usb_output = UsbHidOutput::new(hid_writer);

    // On-board LED: solid once enumerated, flashing when done (with the
    // alert-when-done feature).
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(usb_task(usb_device)).unwrap();
    spawner.spawn(drain_task(hid_reader)).unwrap();
    spawner.spawn(plot_task(usb_output, plotter, led)).unwrap();

    info!("splat-plotter initialized, waiting for enumeration...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Drain task - reads and discards inbound reports from the host.
///
/// The host addresses us with occasional OUT reports; no command
/// protocol is implemented over that channel, but the endpoint still
/// has to be serviced.
#[embassy_executor::task]
async fn drain_task(reader: HidReader<'static, Driver<'static, USB>, 8>) {
    let mut handler = PlotterRequestHandler;
    reader.run(false, &mut handler).await;
}

/// Plot task - produces one report per host poll until the image is
/// drawn.
///
/// The plotter derives all of its timing from the number of calls made,
/// so reports must go out in strict production order, exactly one per
/// poll: the awaited endpoint write provides that cadence.
#[embassy_executor::task]
async fn plot_task(
    mut output: UsbHidOutput<'static>,
    mut plotter: Plotter<'static>,
    mut led: Output<'static>,
) {
    output.wait_ready().await;
    led.set_high();
    info!("USB HID ready, plotting...");

    let mut announced = false;
    loop {
        let report = plotter.next_report();
        if let Err(e) = output.send(&report).await {
            warn!("report write failed: {:?}", e);
        }
        if plotter.is_done() {
            if !announced {
                info!("plotting finished");
                announced = true;
            }
            #[cfg(feature = "alert-when-done")]
            led.toggle();
            Timer::after_millis(250).await;
        }
    }
}
