// Color conversions between the representations a Yeelight bulb
// reports and the "#RRGGBB" strings the host displays.

use palette::{FromColor, Hsv, Srgb};

/// Converts a bulb's HSV reading into RGB. `hue` is in degrees
/// (0-359), `sat` and `value` are percentages (0-100). Values outside
/// those ranges are clamped by the conversion.
pub fn hsv_to_rgb(hue: u16, sat: u8, value: i32) -> Srgb<u8> {
    let hsv: Hsv = Hsv::new(
        f32::from(hue),
        f32::from(sat) / 100.0,
        value.clamp(0, 100) as f32 / 100.0,
    );

    let rgb: Srgb = Srgb::from_color(hsv);

    rgb.into_format()
}

/// Unpacks the 24-bit 0xRRGGBB integer used by the bulb's `rgb`
/// property.
pub fn from_packed(rgb: u32) -> Srgb<u8> {
    Srgb::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}
