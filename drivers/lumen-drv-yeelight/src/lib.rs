// A driver for Yeelight LED bulbs. A bulb is described by its
// discovery record (address, name, model and the list of commands
// it supports). From the command list the driver decides which
// properties to expose to the host, then keeps their values in step
// with the bulb by polling it:
//
//  Request:   {"id":1,"method":"get_prop","params":["power","bright",...]}
//  Reply:     {"id":1,"result":["on","30",...]}
//
// The request/response exchange itself is provided by a `Transport`.

use lumen_api::{device, driver::RequestChan, Result};
use std::{net::Ipv4Addr, sync::Arc};
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};
use tracing::{info, info_span, warn};
use tracing_futures::Instrument;

pub mod capability;
pub mod color;
pub mod config;
pub mod model;
pub mod poller;
pub mod state;
pub mod transport;

use capability::CapabilitySet;
use model::Model;
use state::RemoteState;
use transport::{Refresh, Transport};

/// A Yeelight bulb, as seen by the host. The device owns a background
/// task that polls the bulb for as long as the device exists.
pub struct Device {
    name: String,
    description: String,
    addr: Ipv4Addr,
    caps: CapabilitySet,
    model: Model,
    state: watch::Receiver<Arc<RemoteState>>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Device {
    pub const NAME: &'static str = "yeelight";

    pub const SUMMARY: &'static str = "monitors Yeelight LED bulbs";

    pub const DESCRIPTION: &'static str = include_str!("../README.md");

    /// Builds the device: reads the bulb's state, works out its
    /// properties, registers them with the host and starts polling.
    ///
    /// An unreachable bulb doesn't prevent the device from being
    /// built; its properties start from default values and the poller
    /// fills them in once the bulb answers. An error is only returned
    /// if the host refuses a property or can't be reached.
    pub async fn new<T: Transport>(
        cfg: config::Params,
        transport: T,
        drc: &RequestChan,
    ) -> Result<Self> {
        let caps = CapabilitySet::parse(&cfg.support);
        let initial = match transport::fetch(&transport).await {
            Refresh::Fresh(st) => st,
            Refresh::Stale(_) => RemoteState::default(),
        };
        let model = Model::synthesize(&caps, cfg.color_temperature);

        // Register each property, starting it at the value computed
        // from the initial state.

        let mut props = Vec::with_capacity(model.properties.len());

        for kind in model.properties.iter() {
            let dev = drc
                .add_property(kind.descriptor(), kind.extract(&initial))
                .await?;

            props.push((*kind, dev));
        }

        info!(
            "{} ({}) at {} is a {}",
            &cfg.name, &cfg.model, cfg.addr, model.category
        );

        let (tx_state, rx_state) = watch::channel(Arc::new(initial));
        let (tx_stop, rx_stop) = oneshot::channel();
        let task = tokio::spawn(
            poller::Poller::new(transport, tx_state, props)
                .run(rx_stop)
                .instrument(info_span!(
                    "yeelight",
                    dev = &**drc.device_id(),
                    addr = %cfg.addr
                )),
        );

        Ok(Device {
            name: cfg.name,
            description: cfg.model,
            addr: cfg.addr,
            caps,
            model,
            state: rx_state,
            stop: tx_stop,
            task,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bulb's model name.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn commands(&self) -> &CapabilitySet {
        &self.caps
    }

    pub fn category(&self) -> device::DeviceCategory {
        self.model.category
    }

    pub fn capabilities(&self) -> Vec<&'static str> {
        self.model.capabilities()
    }

    pub fn properties(&self) -> Vec<device::PropertyDescriptor> {
        self.model
            .properties
            .iter()
            .map(model::PropertyKind::descriptor)
            .collect()
    }

    /// Returns the most recent snapshot of the bulb's state.
    pub fn state(&self) -> Arc<RemoteState> {
        self.state.borrow().clone()
    }

    /// Returns the current value of the named property, or `None` if
    /// the device doesn't have it.
    pub fn value(&self, name: &str) -> Option<device::Value> {
        let state = self.state();

        self.model
            .properties
            .iter()
            .find(|kind| kind.name() == name)
            .map(|kind| kind.extract(&state))
    }

    /// Stops the poller and waits for it to exit. Dropping the device
    /// also stops the poller, but without waiting.
    pub async fn shutdown(self) {
        let Device { stop, task, .. } = self;

        let _ = stop.send(());

        if let Err(e) = task.await {
            warn!("poller exited abnormally : {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{poller::POLL_INTERVAL, transport::tests::Scripted};
    use lumen_api::{
        device::{DeviceCategory, Value},
        driver::{ReportReading, Request},
        Error,
    };
    use std::sync::Mutex;
    use tokio::{sync::mpsc, time};

    type Log = Arc<Mutex<Vec<(&'static str, Value)>>>;

    // Plays the part of the host. Every property registration is
    // accepted (and recorded) and every reported value is logged.

    fn fake_host(
        registered: Log,
        reported: Log,
    ) -> (mpsc::Sender<Request>, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(10);
        let task = tokio::spawn(async move {
            while let Some(Request::AddProperty {
                descriptor,
                initial,
                rpy_chan,
                ..
            }) = rx.recv().await
            {
                let name = descriptor.name;
                let reported = reported.clone();
                let rr: ReportReading = Box::new(move |v| {
                    reported.lock().unwrap().push((name, v))
                });

                registered.lock().unwrap().push((name, initial));
                let _ = rpy_chan.send(Ok(rr));
            }
        });

        (tx, task)
    }

    fn params(support: &str) -> config::Params {
        config::Params {
            addr: Ipv4Addr::new(192, 168, 1, 42),
            name: String::from("Hallway"),
            model: String::from("color"),
            support: String::from(support),
            color_temperature: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dimmable_bulb() {
        let registered = Log::default();
        let reported = Log::default();
        let (tx, _host) = fake_host(registered.clone(), reported.clone());
        let drc = RequestChan::new("bulb-1".into(), &tx);
        let t = Scripted::default()
            .reply(&[("power", "on"), ("bright", "30")])
            .reply(&[("power", "on"), ("bright", "31")]);
        let dev = Device::new(params("set_bright set_on"), t.clone(), &drc)
            .await
            .unwrap();

        assert_eq!(dev.category(), DeviceCategory::DimmableLight);
        assert_eq!(
            *registered.lock().unwrap(),
            vec![("level", Value::Int(30)), ("on", Value::Bool(true))]
        );
        assert_eq!(dev.value("level"), Some(Value::Int(30)));
        assert_eq!(dev.value("on"), Some(Value::Bool(true)));
        assert_eq!(dev.value("color"), None);
        assert_eq!(dev.capabilities(), vec!["OnOffSwitch", "Light"]);
        assert_eq!(dev.name(), "Hallway");
        assert_eq!(dev.description(), "color");

        // One poll later, the new brightness has reached both the
        // host and the device's own snapshot.

        time::sleep(POLL_INTERVAL + time::Duration::from_millis(1)).await;

        assert_eq!(*reported.lock().unwrap(), vec![("level", Value::Int(31))]);
        assert_eq!(dev.value("level"), Some(Value::Int(31)));
        assert_eq!(t.requests(), 2);

        dev.shutdown().await;

        time::sleep(POLL_INTERVAL * 2).await;
        assert_eq!(t.requests(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_color_bulb() {
        let registered = Log::default();
        let (tx, _host) = fake_host(registered.clone(), Log::default());
        let drc = RequestChan::new("bulb-2".into(), &tx);
        let t = Scripted::default().reply(&[
            ("power", "off"),
            ("color_mode", "1"),
            ("rgb", "255"),
            ("bright", "10"),
        ]);
        let dev = Device::new(
            params("set_rgb set_hsv set_bright"),
            t.clone(),
            &drc,
        )
        .await
        .unwrap();

        assert_eq!(dev.category(), DeviceCategory::DimmableColorLight);
        assert_eq!(
            dev.properties()
                .iter()
                .map(|d| d.name)
                .collect::<Vec<_>>(),
            vec!["color", "level", "on"]
        );
        assert_eq!(
            dev.value("color").map(|v| v.to_string()),
            Some(String::from("#0000FF"))
        );
        assert_eq!(dev.value("level"), Some(Value::Int(10)));
        assert_eq!(dev.value("on"), Some(Value::Bool(false)));
        assert_eq!(registered.lock().unwrap().len(), 3);
        assert_eq!(
            dev.capabilities(),
            vec!["OnOffSwitch", "Light", "ColorControl"]
        );

        dev.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_bulb() {
        let registered = Log::default();
        let reported = Log::default();
        let (tx, _host) = fake_host(registered.clone(), reported.clone());
        let drc = RequestChan::new("bulb-3".into(), &tx);
        let t = Scripted::default()
            .fail()
            .reply(&[("power", "on"), ("bright", "80")]);
        let dev = Device::new(params("set_power set_bright"), t.clone(), &drc)
            .await
            .unwrap();

        // The device was still built, from default values.

        assert_eq!(*dev.state(), RemoteState::default());
        assert_eq!(
            *registered.lock().unwrap(),
            vec![("level", Value::Int(0)), ("on", Value::Bool(false))]
        );

        // The poller recovers once the bulb answers.

        time::sleep(POLL_INTERVAL + time::Duration::from_millis(1)).await;

        assert_eq!(
            *reported.lock().unwrap(),
            vec![("level", Value::Int(80)), ("on", Value::Bool(true))]
        );
        assert!(dev.state().is_on());

        dev.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_device_stops_polling() {
        let (tx, _host) = fake_host(Log::default(), Log::default());
        let drc = RequestChan::new("bulb-4".into(), &tx);
        let t = Scripted::default().reply(&[("power", "on")]);
        let dev = Device::new(params("set_power"), t.clone(), &drc)
            .await
            .unwrap();

        assert_eq!(dev.category(), DeviceCategory::OnOffLight);
        std::mem::drop(dev);

        time::sleep(POLL_INTERVAL * 3).await;
        assert_eq!(t.requests(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_while_bulb_silent() {
        let (tx, _host) = fake_host(Log::default(), Log::default());
        let drc = RequestChan::new("bulb-6".into(), &tx);
        let t = Scripted::default().reply(&[("power", "on")]).hang();
        let dev = Device::new(params("set_power"), t.clone(), &drc)
            .await
            .unwrap();

        time::sleep(POLL_INTERVAL * 2).await;
        assert_eq!(t.requests(), 2);

        assert!(time::timeout(POLL_INTERVAL, dev.shutdown()).await.is_ok());
    }

    // A bulb whose transport blows up after the first request.

    struct Faulty(Arc<Mutex<usize>>);

    impl Transport for Faulty {
        fn get_properties(
            &self,
            _keys: &'static [&'static str],
        ) -> impl std::future::Future<
            Output = Result<std::collections::HashMap<String, String>>,
        > + Send {
            let count = {
                let mut count = self.0.lock().unwrap();

                *count += 1;
                *count
            };

            async move {
                if count > 1 {
                    panic!("transport fault")
                }
                Ok(Default::default())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_after_poller_panic() {
        let (tx, _host) = fake_host(Log::default(), Log::default());
        let drc = RequestChan::new("bulb-7".into(), &tx);
        let count = Arc::new(Mutex::new(0));
        let t = Faulty(count.clone());
        let dev = Device::new(params("set_power"), t, &drc).await.unwrap();

        time::sleep(POLL_INTERVAL * 2).await;
        assert_eq!(*count.lock().unwrap(), 2);

        // The poller's panic is logged, not passed on.

        dev.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_host() {
        let (tx, rx) = mpsc::channel(10);
        let drc = RequestChan::new("bulb-5".into(), &tx);

        std::mem::drop(rx);

        assert_eq!(
            Device::new(params("set_power"), Scripted::default(), &drc)
                .await
                .err(),
            Some(Error::MissingPeer(String::from(
                "can't communicate with core"
            )))
        );
    }
}
