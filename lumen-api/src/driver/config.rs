use crate::{types::Error, Result};
use serde::de::DeserializeOwned;
use toml::value::{Table, Value};

/// Represents how configuration information is given to a driver.
/// Since each driver can have vastly different requirements, the
/// config structure needs to be as general as possible. A
/// `DriverConfig` type is a map with `String` keys and `toml::Value`
/// values.
#[derive(Clone, Debug, Default)]
pub struct DriverConfig(Table);

impl DriverConfig {
    /// Decodes the whole table into a driver's parameter type.
    pub fn parse_into<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        Value::Table(self.0.clone()).try_into().map_err(|e| {
            Error::ConfigError(format!("config parse error: {}", e))
        })
    }
}

impl From<Table> for DriverConfig {
    fn from(t: Table) -> Self {
        DriverConfig(t)
    }
}

impl std::str::FromStr for DriverConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Table>()
            .map(DriverConfig)
            .map_err(|e| Error::ConfigError(format!("{}", e)))
    }
}
