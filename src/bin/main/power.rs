use esp_hal::{
    gpio::RtcPin,
    peripherals::{GPIO4, GPIO5, GPIO6, GPIO7, GPIO8, LPWR},
    rtc_cntl::{
        Rtc,
        sleep::{RtcioWakeupSource, WakeupLevel},
    },
};
use lanyard_hal_esp32s3::input::buttons::FrontButton;

/// Enters deep sleep with every front button armed as a wakeup source.
///
/// This is the badge's whole idle policy: the panel holds the image
/// without power, so there is nothing to do until a button press
/// reboots the firmware into a fresh render pass.
pub(super) fn halt() -> ! {
    let level = if FrontButton::A.pressed_level_high() {
        WakeupLevel::High
    } else {
        WakeupLevel::Low
    };

    // Pins match FrontButton::gpio(): A=4, B=5, C=6, Up=7, Down=8.
    let mut button_a = unsafe { GPIO4::steal() };
    let mut button_b = unsafe { GPIO5::steal() };
    let mut button_c = unsafe { GPIO6::steal() };
    let mut button_up = unsafe { GPIO7::steal() };
    let mut button_down = unsafe { GPIO8::steal() };

    let mut wake_pins: [(&mut dyn RtcPin, WakeupLevel); 5] = [
        (&mut button_a, level),
        (&mut button_b, level),
        (&mut button_c, level),
        (&mut button_up, level),
        (&mut button_down, level),
    ];
    let wake_source = RtcioWakeupSource::new(&mut wake_pins);

    let mut rtc = Rtc::new(unsafe { LPWR::steal() });
    rtc.sleep_deep(&[&wake_source]);
}
