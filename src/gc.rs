//! The orphan collector (spec §4.7): a long-lived background task that
//! periodically reconciles retained discovery messages against the
//! cluster's declared descriptors, evicting anything this controller
//! published that no longer has an owning resource.
//!
//! Grounded on the same `KubeApi` seam the base reconciler uses
//! ([`crate::reconcile::kube_api`]) for the expected-set listing, and on
//! [`crate::mqtt_client::MqttClient`] for the subscribe/accumulate/evict
//! cycle. The dispatch over all 28 kinds mirrors
//! [`crate::reconcile::controllers::run_all`]'s `spawn_all!` macro rather
//! than hand-writing 28 listing call sites.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kube::Client;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::GcConfig;
use crate::error::Error;
use crate::mqtt_client::{MessageSink, MqttClient};
use crate::reconcile::kube_api::{KubeApi, LiveKubeApi};
use crate::reconcile::ORIGIN_NAME;
use crate::topic;

const SWEEP_FILTER: &str = "homeassistant/+/+/+/config";
const SWEEP_QOS: u8 = 0;
const EVICT_QOS: u8 = 1;
const IO_DEADLINE: Duration = Duration::from_secs(30);

struct Delivery {
    topic: String,
    payload: Vec<u8>,
}

/// Runs the sweep loop until `cancel` fires (spec §4.7, §5's "unsubscribes
/// and exits" on cancellation).
pub async fn run(client: Client, mqtt: MqttClient, config: GcConfig, cancel: CancellationToken) {
    if !config.enabled {
        info!("orphan collector disabled via GC_ENABLED");
        return;
    }

    if config.run_on_startup {
        sweep_once(&client, &mqtt, &config, &cancel).await;
    }

    let mut ticker = interval_at(Instant::now() + config.interval, config.interval);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("orphan collector stopping");
                return;
            }
            _ = ticker.tick() => {
                sweep_once(&client, &mqtt, &config, &cancel).await;
            }
        }
    }
}

/// One full cycle: subscribe, accumulate through the silence window,
/// filter by ownership, diff against the expected set, evict orphans.
/// Never propagates an error up to the caller (spec §4.7's "never fails
/// the process"); a subscribe failure simply aborts this cycle.
async fn sweep_once(client: &Client, mqtt: &MqttClient, config: &GcConfig, cancel: &CancellationToken) {
    let deliveries = match collect_deliveries(mqtt, config.silence_timeout, cancel).await {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "orphan sweep subscribe failed, aborting this cycle");
            return;
        }
    };

    let (expected, verified) = expected_topics(client).await;
    let owned: Vec<&Delivery> = deliveries.iter().filter(|d| is_owned(&d.payload)).collect();
    let orphans = find_orphans(owned.iter().map(|d| d.topic.as_str()), &expected, &verified);

    let mut evicted = 0usize;
    for orphan in &orphans {
        match mqtt.publish(IO_DEADLINE, orphan, Vec::new(), EVICT_QOS, true).await {
            Ok(()) => {
                evicted += 1;
                info!(topic = %orphan, "evicted orphaned discovery message");
            }
            Err(e) => warn!(
                topic = %orphan,
                error = %e,
                "orphan eviction publish failed, left for next cycle"
            ),
        }
    }
    info!(collected = deliveries.len(), evicted, "orphan sweep complete");
}

/// The diff at the core of spec §4.7 steps 5-6: an owned delivery's topic is
/// an orphan iff it parses as a valid discovery topic, its component is in
/// `verified` (i.e. that kind's listing succeeded this cycle), and it is not
/// in `expected`. Pulled out of [`sweep_once`] so the component-verification
/// gate (spec §8's "ownership gate" property) is testable without a live
/// broker or apiserver.
fn find_orphans<'a>(
    owned_topics: impl Iterator<Item = &'a str>,
    expected: &HashSet<String>,
    verified: &HashSet<String>,
) -> Vec<String> {
    owned_topics
        .filter(|topic| {
            let Ok(parsed) = topic::parse_discovery_topic(topic) else {
                return false;
            };
            verified.contains(parsed.component.as_str()) && !expected.contains(*topic)
        })
        .map(str::to_string)
        .collect()
}

/// Subscribes to the wildcard discovery filter and accumulates retained
/// deliveries until `silence_timeout` elapses with none arriving (spec §4.7
/// step 2), then unsubscribes and returns the snapshot.
async fn collect_deliveries(
    mqtt: &MqttClient,
    silence_timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Vec<Delivery>, Error> {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let (tx, mut rx) = mpsc::unbounded_channel::<()>();

    let sink_buffer = buffer.clone();
    let sink: MessageSink = Arc::new(move |topic, payload| {
        sink_buffer.lock().unwrap().push(Delivery { topic, payload });
        let _ = tx.send(());
    });

    mqtt.subscribe(IO_DEADLINE, SWEEP_FILTER, SWEEP_QOS, sink).await?;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            received = rx.recv() => {
                if received.is_none() {
                    break;
                }
            }
            _ = sleep(silence_timeout) => break,
        }
    }

    let _ = mqtt.unsubscribe(IO_DEADLINE, SWEEP_FILTER).await;

    let deliveries = std::mem::take(&mut *buffer.lock().unwrap());
    Ok(deliveries)
}

/// Keeps only deliveries whose payload parses as JSON with a matching
/// `origin.name` (spec §4.7 step 3).
fn is_owned(payload: &[u8]) -> bool {
    let Ok(value) = serde_json::from_slice::<Value>(payload) else {
        return false;
    };
    value
        .get("origin")
        .and_then(|o| o.get("name"))
        .and_then(|n| n.as_str())
        == Some(ORIGIN_NAME)
}

/// Lists every descriptor of every kind to build the expected topic set,
/// tracking which components listed successfully (spec §4.7 step 4). A
/// listing failure for one kind is logged and that kind's component is
/// simply absent from `verified`, not fatal to the cycle.
macro_rules! collect_expected {
    ($client:expr, $expected:expr, $verified:expr, [$($kind:expr => $ty:ty),* $(,)?]) => {
        $(
            {
                let api = LiveKubeApi::<$ty>::new($client.clone());
                match api.list_all().await {
                    Ok(items) => {
                        for (namespace, name) in items {
                            $expected.insert(topic::discovery_topic_default($kind, &namespace, &name));
                        }
                        $verified.insert(topic::component_of($kind));
                    }
                    Err(e) => {
                        warn!(kind = ?$kind, error = %e, "orphan sweep: listing failed, component unverified this cycle");
                    }
                }
            }
        )*
    };
}

async fn expected_topics(client: &Client) -> (HashSet<String>, HashSet<String>) {
    use crate::descriptor::kinds::*;
    use crate::descriptor::Kind;

    let mut expected = HashSet::new();
    let mut verified = HashSet::new();

    collect_expected!(
        client,
        expected,
        verified,
        [
            Kind::Button => button::Button,
            Kind::Switch => switch::Switch,
            Kind::Sensor => sensor::Sensor,
            Kind::BinarySensor => binary_sensor::BinarySensor,
            Kind::Number => number::Number,
            Kind::Select => select::Select,
            Kind::Text => text::Text,
            Kind::Scene => scene::Scene,
            Kind::Tag => tag::Tag,
            Kind::Light => light::Light,
            Kind::Cover => cover::Cover,
            Kind::Lock => lock::Lock,
            Kind::Valve => valve::Valve,
            Kind::Fan => fan::Fan,
            Kind::Siren => siren::Siren,
            Kind::Camera => camera::Camera,
            Kind::Image => image::Image,
            Kind::Notify => notify::Notify,
            Kind::Update => update::Update,
            Kind::Climate => climate::Climate,
            Kind::Humidifier => humidifier::Humidifier,
            Kind::WaterHeater => water_heater::WaterHeater,
            Kind::Vacuum => vacuum::Vacuum,
            Kind::LawnMower => lawn_mower::LawnMower,
            Kind::AlarmControlPanel => alarm_control_panel::AlarmControlPanel,
            Kind::DeviceTracker => device_tracker::DeviceTracker,
            Kind::DeviceTrigger => device_trigger::DeviceTrigger,
            Kind::Event => event::Event,
        ]
    );

    (expected, verified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_payload_matches_origin_name() {
        let payload = br#"{"origin":{"name":"hass-crds","sw":"x"}}"#;
        assert!(is_owned(payload));
    }

    #[test]
    fn unowned_payload_is_rejected() {
        let payload = br#"{"origin":{"name":"tasmota"}}"#;
        assert!(!is_owned(payload));
    }

    #[test]
    fn missing_origin_is_rejected() {
        assert!(!is_owned(br#"{"name":"ns-a"}"#));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(!is_owned(b"not json"));
    }

    /// Spec §8 scenario 5: two retained messages, one owned by this
    /// controller with no matching descriptor, one owned by a different
    /// publisher (already filtered out by [`is_owned`] before reaching
    /// `find_orphans`); listing succeeds for every kind.
    #[test]
    fn orphan_sweep_evicts_unowned_button_only() {
        let owned = vec!["homeassistant/button/ns/a/config"];
        let expected = HashSet::new();
        let verified: HashSet<String> = ["button", "sensor"].iter().map(|s| s.to_string()).collect();

        let orphans = find_orphans(owned.into_iter(), &expected, &verified);
        assert_eq!(orphans, vec!["homeassistant/button/ns/a/config".to_string()]);
    }

    /// Spec §8 scenario 6: same as above, but listing `MQTTButton` failed
    /// this cycle, so `button` never enters `verified`. The topic must not
    /// be evicted even though it isn't in the (empty) expected set.
    #[test]
    fn unverified_component_is_never_evicted() {
        let owned = vec!["homeassistant/button/ns/a/config"];
        let expected = HashSet::new();
        let verified: HashSet<String> = ["sensor"].iter().map(|s| s.to_string()).collect();

        assert!(find_orphans(owned.into_iter(), &expected, &verified).is_empty());
    }

    #[test]
    fn topic_present_in_expected_set_is_not_an_orphan() {
        let owned = vec!["homeassistant/button/ns/a/config"];
        let expected: HashSet<String> = ["homeassistant/button/ns/a/config".to_string()].into_iter().collect();
        let verified: HashSet<String> = ["button"].iter().map(|s| s.to_string()).collect();

        assert!(find_orphans(owned.into_iter(), &expected, &verified).is_empty());
    }

    #[test]
    fn malformed_owned_topic_is_dropped_not_evicted() {
        let owned = vec!["not-a-valid-topic"];
        let expected = HashSet::new();
        let verified: HashSet<String> = ["button"].iter().map(|s| s.to_string()).collect();

        assert!(find_orphans(owned.into_iter(), &expected, &verified).is_empty());
    }
}
