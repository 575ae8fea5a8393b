use lumen_api::{driver::DriverConfig, Error};
use std::net::Ipv4Addr;

fn default_color_temperature() -> bool {
    true
}

#[derive(serde::Deserialize, Debug, PartialEq)]
pub struct Params {
    pub addr: Ipv4Addr,
    pub name: String,
    pub model: String,
    pub support: String,
    #[serde(default = "default_color_temperature")]
    pub color_temperature: bool,
}

impl TryFrom<DriverConfig> for Params {
    type Error = Error;

    fn try_from(cfg: DriverConfig) -> std::result::Result<Self, Self::Error> {
        cfg.parse_into()
    }
}
