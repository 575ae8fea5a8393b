use super::{
    model::PropertyKind,
    state::RemoteState,
    transport::{self, Refresh, Transport},
};
use lumen_api::{device::Value, driver::ReadOnlyDevice};
use std::sync::Arc;
use tokio::{
    sync::{oneshot, watch},
    time::{self, Duration, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

/// How often the bulb is asked for its state.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Keeps the cached state of one bulb, and the host's copy of its
/// property values, in sync with the hardware. The poller is the
/// only writer of either.
pub struct Poller<T: Transport> {
    transport: T,
    state: watch::Sender<Arc<RemoteState>>,
    props: Vec<(PropertyKind, ReadOnlyDevice<Value>)>,
}

impl<T: Transport> Poller<T> {
    pub fn new(
        transport: T,
        state: watch::Sender<Arc<RemoteState>>,
        props: Vec<(PropertyKind, ReadOnlyDevice<Value>)>,
    ) -> Self {
        Poller {
            transport,
            state,
            props,
        }
    }

    /// Refreshes the cached state and pushes changed property values
    /// to the host. Returns `true` if the bulb answered. When it
    /// doesn't, the previous snapshot is kept as-is and the property
    /// values are recomputed from it (so nothing changes.)
    ///
    /// The only thing awaited is the bulb's reply. The host queues
    /// notifications without making the poller wait.
    pub async fn tick(&mut self) -> bool {
        let fresh = match transport::fetch(&self.transport).await {
            Refresh::Fresh(st) => {
                // Readers either see the old snapshot or the new
                // one; never a mix.

                self.state.send_replace(Arc::new(st));
                true
            }
            Refresh::Stale(_) => false,
        };

        let snapshot = self.state.borrow().clone();

        for (kind, dev) in self.props.iter_mut() {
            let value = kind.extract(&snapshot);

            if dev.report_if_changed(value.clone()) {
                debug!("{} -> {}", kind.name(), &value);
            }
        }
        fresh
    }

    /// Polls the bulb every `POLL_INTERVAL` until `shutdown` fires or
    /// its sender is dropped. The first poll happens one interval
    /// after starting since the caller has just fetched the state.
    /// If a poll takes longer than the interval, the next one is
    /// delayed rather than bunched up. A poll that is waiting on the
    /// bulb when `shutdown` fires is abandoned.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        let mut timer =
            time::interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);

        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("starting poll loop");

        loop {
            #[rustfmt::skip]
            tokio::select! {
                _ = &mut shutdown => break,

                _ = timer.tick() => {
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = self.tick() => ()
                    }
                }
            }
        }
        info!("poll loop stopped");
    }
}
