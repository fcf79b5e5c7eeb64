#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::Timer;
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    clock::CpuClock,
    delay::Delay,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    spi::master::Spi,
    time::Rate,
    timer::timg::TimerGroup,
};
use lanyard_core::{
    canvas::Canvas,
    content::{self, BadgeContent, CONTENT_SCRATCH_BYTES, DEFAULT_CONTENT},
    layout::{LayoutPolicy, draw_badge},
    qr::BadgeCode,
};
use lanyard_hal_esp32s3::{
    platform::display::EinkPanel,
    qr::{QrScratch, encode_url},
    render::EinkCanvas,
    storage::flash_content::FlashContentStore,
};
use log::{LevelFilter, info, warn};
use uc8151::{Config as PanelConfig, UpdateSpeed};

#[path = "main/power.rs"]
mod power;

const DISPLAY_SPI_HZ: u32 = 10_000_000;
const PANEL_SPEED: UpdateSpeed = UpdateSpeed::Default;
const TEXT_THICKNESS: u8 = 2;
const LED_LINGER_MS: u64 = 500;

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: lanyard starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Activity LED stays lit while the badge is awake.
    let mut led = Output::new(peripherals.GPIO21, Level::High, OutputConfig::default());

    // Panel wiring used by this board:
    // CLK=GPIO12, MOSI=GPIO11, CS=GPIO10, DC=GPIO9, RST=GPIO18, BUSY=GPIO17
    let dc = Output::new(peripherals.GPIO9, Level::Low, OutputConfig::default());
    let rst = Output::new(peripherals.GPIO18, Level::High, OutputConfig::default());
    let cs = Output::new(peripherals.GPIO10, Level::High, OutputConfig::default());
    let busy = Input::new(
        peripherals.GPIO17,
        InputConfig::default().with_pull(Pull::Up),
    );

    let spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_hz(DISPLAY_SPI_HZ))
        // UC8151 uses CPOL=0, CPHA=0.
        .with_mode(esp_hal::spi::Mode::_0);

    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO12)
        .with_mosi(peripherals.GPIO11);
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();

    let mut panel = EinkPanel::new(
        spi_device,
        dc,
        busy,
        rst,
        PanelConfig::default().with_speed(PANEL_SPEED),
        Delay::new(),
    );
    if let Err(err) = panel.initialize() {
        info!("panel initialize failed: {err:?}");
    }

    // Badge text, seeding the default record on first boot.
    let mut scratch = [0u8; CONTENT_SCRATCH_BYTES];
    let content = match FlashContentStore::new() {
        Ok(mut store) => match content::load_or_seed(&mut store, &mut scratch) {
            Ok(content) => content,
            Err(err) => {
                warn!("content load failed: {err:?}, rendering default");
                BadgeContent::parse(DEFAULT_CONTENT)
            }
        },
        Err(err) => {
            warn!("content store unavailable: {err:?}, rendering default");
            BadgeContent::parse(DEFAULT_CONTENT)
        }
    };

    // Badge code; a failed encode degrades to the blank matrix rather
    // than aborting the pass.
    let mut qr_scratch = QrScratch::new();
    let code = match encode_url(&content.url, &mut qr_scratch) {
        Ok(code) => BadgeCode::Ready(code),
        Err(err) => {
            warn!("badge code generation failed: {err:?}");
            BadgeCode::Empty
        }
    };

    let mut canvas = EinkCanvas::new(panel);
    canvas.set_thickness(TEXT_THICKNESS);
    match draw_badge(&mut canvas, &content, &code, &LayoutPolicy::default()) {
        Ok(()) => info!("badge rendered"),
        Err(err) => info!("badge render failed: {err:?}"),
    }

    Timer::after_millis(LED_LINGER_MS).await;
    led.set_low();

    let (mut panel, _) = canvas.release();
    if let Err(err) = panel.deep_sleep() {
        info!("panel sleep failed: {err:?}");
    }

    // Any front button wakes the badge for a fresh render pass.
    power::halt()
}

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();
