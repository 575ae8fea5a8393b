// The bulb reports its state as a map of property names to string
// values (the reply to a `get_prop` request). This module validates
// that map once, as it arrives, and turns it into a `RemoteState`.
// Everything downstream works with typed fields.

use super::color;
use palette::Srgb;
use std::{collections::HashMap, str::FromStr};
use tracing::warn;

/// The vendor property names requested on every refresh.
pub const PROPS: &[&str] =
    &["power", "bright", "ct", "color_mode", "rgb", "hue", "sat"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Power {
    On,
    Off,
}

/// Which representation currently drives the bulb's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    ColorTemperature,
    Hsv,
    Other(u8),
}

impl From<u8> for ColorMode {
    fn from(v: u8) -> Self {
        match v {
            1 => ColorMode::Rgb,
            2 => ColorMode::ColorTemperature,
            3 => ColorMode::Hsv,
            v => ColorMode::Other(v),
        }
    }
}

/// A snapshot of the bulb's state. Fields are `None` when the bulb
/// didn't report them or reported something that couldn't be
/// parsed. A snapshot is never modified; each refresh builds a new
/// one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemoteState {
    pub power: Option<Power>,
    pub bright: Option<i32>,
    pub ct: Option<i32>,
    pub color_mode: Option<ColorMode>,
    pub rgb: Option<u32>,
    pub hue: Option<u16>,
    pub sat: Option<u8>,
}

// Parses one field of the reply. Missing keys are silently absent;
// keys that are present but bad get logged.

fn field<T: FromStr>(
    props: &HashMap<String, String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = props.get(key)?;

    match raw.trim().parse::<T>() {
        Ok(v) if valid(&v) => Some(v),
        _ => {
            warn!("ignoring bad '{}' value : {:?}", key, raw);
            None
        }
    }
}

impl RemoteState {
    pub fn from_props(props: &HashMap<String, String>) -> Self {
        let power = props.get("power").and_then(|v| match v.as_str() {
            "on" => Some(Power::On),
            "off" => Some(Power::Off),
            v => {
                warn!("ignoring bad 'power' value : {:?}", v);
                None
            }
        });

        RemoteState {
            power,
            bright: field::<i32>(props, "bright", |_| true),
            ct: field::<i32>(props, "ct", |_| true),
            color_mode: field::<u8>(props, "color_mode", |_| true)
                .map(ColorMode::from),
            rgb: field::<u32>(props, "rgb", |v| *v <= 0xff_ffff),
            hue: field::<u16>(props, "hue", |v| *v < 360),
            sat: field::<u8>(props, "sat", |v| *v <= 100),
        }
    }

    pub fn is_on(&self) -> bool {
        self.power == Some(Power::On)
    }

    /// Brightness in percent. The bulb's own bounds are trusted so
    /// the value isn't range-checked.
    pub fn brightness(&self) -> i32 {
        self.bright.unwrap_or(0)
    }

    /// Color temperature in kelvin.
    pub fn color_temperature(&self) -> i32 {
        self.ct.unwrap_or(0)
    }

    /// The color the bulb is showing. In color-temperature mode (or
    /// any mode other than RGB and HSV) this is black.
    pub fn rgb(&self) -> Srgb<u8> {
        match self.color_mode {
            Some(ColorMode::Rgb) => color::from_packed(self.rgb.unwrap_or(0)),
            Some(ColorMode::Hsv) => color::hsv_to_rgb(
                self.hue.unwrap_or(0),
                self.sat.unwrap_or(0),
                self.brightness(),
            ),
            _ => Srgb::new(0, 0, 0),
        }
    }

    /// The color as a "#RRGGBB" string.
    pub fn color(&self) -> String {
        color::to_hex(self.rgb())
    }
}
