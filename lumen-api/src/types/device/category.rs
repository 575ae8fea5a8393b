use serde::Serialize;
use std::fmt;

/// The overall kind of light a device is, as far as the host's UI is
/// concerned. It's derived from which property families a device
/// exposes and doesn't change once the device is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceCategory {
    DimmableColorLight,
    OnOffColorLight,
    DimmableLight,
    OnOffLight,
}

impl DeviceCategory {
    /// Maps the presence of a color-family property and a brightness
    /// property onto a category. Every combination has an answer.
    pub fn from_features(has_color: bool, has_level: bool) -> Self {
        match (has_color, has_level) {
            (true, true) => DeviceCategory::DimmableColorLight,
            (true, false) => DeviceCategory::OnOffColorLight,
            (false, true) => DeviceCategory::DimmableLight,
            (false, false) => DeviceCategory::OnOffLight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::DimmableColorLight => "dimmableColorLight",
            DeviceCategory::OnOffColorLight => "onOffColorLight",
            DeviceCategory::DimmableLight => "dimmableLight",
            DeviceCategory::OnOffLight => "onOffLight",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
