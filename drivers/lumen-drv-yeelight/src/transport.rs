use super::state::{RemoteState, PROPS};
use lumen_api::{Error, Result};
use std::{collections::HashMap, future::Future};
use tracing::warn;

/// The request/response channel to a bulb. The driver only ever asks
/// for the current values of a list of properties; the reply maps
/// each property name to its string value.
///
/// Implementations should report network failures as
/// `Error::MissingPeer` or `Error::TimeoutError`.
pub trait Transport: Send + Sync + 'static {
    fn get_properties(
        &self,
        keys: &'static [&'static str],
    ) -> impl Future<Output = Result<HashMap<String, String>>> + Send;
}

/// The outcome of a refresh. A failed refresh isn't an error for the
/// caller; it just means the cached state is still the latest we
/// have.
#[derive(Debug, PartialEq)]
pub enum Refresh {
    Fresh(RemoteState),
    Stale(Error),
}

/// Requests the bulb's state. Transport errors are logged and turned
/// into `Refresh::Stale`.
pub async fn fetch<T: Transport>(transport: &T) -> Refresh {
    match transport.get_properties(PROPS).await {
        Ok(props) => Refresh::Fresh(RemoteState::from_props(&props)),
        Err(e) => {
            warn!("couldn't refresh state : {}", &e);
            Refresh::Stale(e)
        }
    }
}
