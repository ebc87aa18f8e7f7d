//! End-to-end coverage of spec §8's concrete scenarios against a real
//! broker (grounded on the teacher's `do_with_mosquitto` harness, adapted
//! from the retired v5 `rumqttc` client to the plain v3 client this crate
//! uses for MQTT 3.1.1). Exercises the real payload-assembly pipeline
//! ([`hass_crds_controller::reconcile::build_payload`]) and a real publish
//! round trip; status persistence is a separate, already-unit-tested
//! concern ([`hass_crds_controller::reconcile`]'s own test module) that
//! needs a live apiserver rather than a broker.

use std::time::Duration;

use assert_json_diff::assert_json_eq;
use hass_crds_controller::descriptor::common::{
    AvailabilityEntry, AvailabilityMode, AvailabilitySpec, CommonSpec, DeviceBlock, Metadata,
};
use hass_crds_controller::descriptor::kinds::button::{Button, ButtonSpec};
use hass_crds_controller::descriptor::kinds::camera::{Camera, CameraSpec};
use hass_crds_controller::descriptor::kinds::device::MQTTDevice;
use hass_crds_controller::descriptor::kinds::sensor::{Sensor, SensorSpec};
use hass_crds_controller::descriptor::status::EntityStatus;
use hass_crds_controller::descriptor::Reconcilable;
use hass_crds_controller::error::Error;
use hass_crds_controller::mqtt_client::{ClientConfig, MqttClient};
use hass_crds_controller::reconcile::build_payload;
use hass_crds_controller::reconcile::kube_api::KubeApi;
use hass_crds_controller::topic;
use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use serde_json::{json, Value};
use testcontainers_modules::mosquitto;
use testcontainers_modules::testcontainers::runners::AsyncRunner;
use tokio_util::sync::CancellationToken;

/// None of these scenarios reference a `deviceRef`, so the device lookup
/// is never actually invoked; `mockall`'s generated mock is only compiled
/// under `#[cfg(test)]` inside the library itself and isn't visible to
/// this external test binary, so a tiny hand-written stub stands in.
struct UnreachableDeviceApi;

#[async_trait::async_trait]
impl KubeApi<MQTTDevice> for UnreachableDeviceApi {
    async fn get(&self, _namespace: &str, _name: &str) -> Result<Option<MQTTDevice>, Error> {
        unreachable!("no scenario here references a deviceRef")
    }

    async fn patch_status(&self, _namespace: &str, _name: &str, _status: &EntityStatus) -> Result<(), Error> {
        unreachable!("payload assembly never writes status")
    }

    async fn list_all(&self) -> Result<Vec<(String, String)>, Error> {
        unreachable!("payload assembly never lists descriptors")
    }
}

async fn connect_pair(port: u16) -> (MqttClient, AsyncClient, rumqttc::EventLoop, CancellationToken) {
    let mut observer_options = MqttOptions::new("observer", "127.0.0.1", port);
    observer_options.set_keep_alive(Duration::from_secs(5));
    let (observer, observer_loop) = AsyncClient::new(observer_options, 10);
    observer.subscribe("#", QoS::AtLeastOnce).await.expect("subscribe to everything");

    let cancel = CancellationToken::new();
    let client = MqttClient::connect(
        ClientConfig {
            host: "127.0.0.1".to_string(),
            port,
            client_id: "hass-crds-controller-test".to_string(),
            username: None,
            password: None,
            use_tls: false,
        },
        cancel.clone(),
    )
    .await
    .expect("controller client connects");

    (client, observer, observer_loop, cancel)
}

async fn wait_for_publish(observer_loop: &mut rumqttc::EventLoop) -> (String, Value) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            panic!("timed out waiting for a retained publish");
        }
        match tokio::time::timeout(remaining, observer_loop.poll()).await {
            Ok(Ok(Event::Incoming(Incoming::Publish(p)))) if !p.payload.is_empty() => {
                return (p.topic.clone(), serde_json::from_slice(&p.payload).expect("valid json payload"));
            }
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => panic!("observer event loop error: {e}"),
            Err(_) => panic!("timed out waiting for a retained publish"),
        }
    }
}

fn button_descriptor() -> Button {
    Button::new(
        "test-button",
        ButtonSpec {
            common: CommonSpec {
                metadata: Metadata {
                    name: Some("E2E Test Button".to_string()),
                    icon: Some("mdi:button-pointer".to_string()),
                    ..Default::default()
                },
                device: Some(DeviceBlock {
                    name: Some("E2E Test Device".to_string()),
                    identifiers: vec!["e2e-test-device-001".to_string()],
                    manufacturer: Some("hass-crds".to_string()),
                    model: Some("E2E Test".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            command_topic: Some("e2e/button/test/command".to_string()),
            payload_press: Some("PRESS".to_string()),
            ..Default::default()
        },
    )
    .within("hass-crds-e2e")
    .to_owned()
}

#[tokio::test]
async fn button_create_publishes_expected_discovery_payload() {
    let container = mosquitto::Mosquitto.start().await;
    let port = container.get_host_port_ipv4(1883).await;
    let (client, _observer, mut observer_loop, _cancel) = connect_pair(port).await;

    let obj = button_descriptor();
    let device_api = UnreachableDeviceApi;
    let payload = build_payload(&obj, "hass-crds-e2e", "test-button", &device_api)
        .await
        .expect("payload assembles");
    let discovery_topic = topic::discovery_topic_default(Button::KIND, "hass-crds-e2e", "test-button");

    client.publish(Duration::from_secs(10), &discovery_topic, payload, 1, true).await.expect("publish succeeds");

    let (topic, value) = wait_for_publish(&mut observer_loop).await;

    assert_eq!(topic, "homeassistant/button/hass-crds-e2e/test-button/config");
    assert_eq!(value["name"], json!("E2E Test Button"));
    assert_eq!(value["command_topic"], json!("e2e/button/test/command"));
    assert_eq!(value["payload_press"], json!("PRESS"));
    assert_eq!(value["unique_id"], json!("hass-crds-e2e-test-button"));
    assert_eq!(value["icon"], json!("mdi:button-pointer"));
    assert_eq!(value["origin"]["name"], json!("hass-crds"));
    assert_eq!(value["device"]["name"], json!("E2E Test Device"));
    assert_eq!(value["device"]["manufacturer"], json!("hass-crds"));
    assert_eq!(value["device"]["identifiers"], json!(["e2e-test-device-001"]));
}

fn camera_descriptor() -> Camera {
    Camera::new(
        "2-2678647_2-2678647_forecast_chart",
        CameraSpec {
            common: CommonSpec {
                metadata: Metadata {
                    name: Some("Skaftared Weather Forecast Forecast".to_string()),
                    unique_id: Some("2-2678647_2-2678647_forecast_chart".to_string()),
                    ..Default::default()
                },
                availability: AvailabilitySpec {
                    availability_topic: Some("mqttAuto/availability".to_string()),
                    ..Default::default()
                },
                device: Some(DeviceBlock {
                    name: Some("Skaftared Weather Forecast".to_string()),
                    manufacturer: Some("yr.no".to_string()),
                    identifiers: vec!["2-2678647".to_string()],
                    ..Default::default()
                }),
                ..Default::default()
            },
            topic: Some("auto/2-2678647/2-2678647_forecast_chart/state".to_string()),
            image_encoding: Some("b64".to_string()),
            state_class: Some("measurement".to_string()),
            expire_after: Some(86400),
        },
    )
    .within("hass-crds-e2e")
    .to_owned()
}

#[tokio::test]
async fn camera_with_partial_fields_omits_unset_device_fields() {
    let container = mosquitto::Mosquitto.start().await;
    let port = container.get_host_port_ipv4(1883).await;
    let (client, _observer, mut observer_loop, _cancel) = connect_pair(port).await;

    let obj = camera_descriptor();
    let device_api = UnreachableDeviceApi;
    let payload = build_payload(&obj, "hass-crds-e2e", "2-2678647_2-2678647_forecast_chart", &device_api)
        .await
        .expect("payload assembles");
    let discovery_topic =
        topic::discovery_topic_default(Camera::KIND, "hass-crds-e2e", "2-2678647_2-2678647_forecast_chart");

    client.publish(Duration::from_secs(10), &discovery_topic, payload, 1, true).await.expect("publish succeeds");

    let (_topic, value) = wait_for_publish(&mut observer_loop).await;

    assert_eq!(value["name"], json!("Skaftared Weather Forecast Forecast"));
    assert_eq!(value["unique_id"], json!("2-2678647_2-2678647_forecast_chart"));
    assert_eq!(value["topic"], json!("auto/2-2678647/2-2678647_forecast_chart/state"));
    assert_eq!(value["state_class"], json!("measurement"));
    assert_eq!(value["availability_topic"], json!("mqttAuto/availability"));
    assert_eq!(value["expire_after"], json!(86400));
    assert_eq!(value["image_encoding"], json!("b64"));
    assert_json_eq!(
        value["device"],
        json!({
            "name": "Skaftared Weather Forecast",
            "manufacturer": "yr.no",
            "identifiers": ["2-2678647"],
        })
    );
}

fn sensor_with_availability_array() -> Sensor {
    Sensor::new(
        "avail",
        SensorSpec {
            common: CommonSpec {
                availability: AvailabilitySpec {
                    availability: vec![AvailabilityEntry {
                        topic: "e2e/sensor/avail/status".to_string(),
                        payload_available: Some("online".to_string()),
                        payload_not_available: Some("offline".to_string()),
                        ..Default::default()
                    }],
                    availability_mode: Some(AvailabilityMode::All),
                    ..Default::default()
                },
                ..Default::default()
            },
            state_topic: Some("e2e/sensor/avail/state".to_string()),
            ..Default::default()
        },
    )
    .within("hass-crds-e2e")
    .to_owned()
}

#[tokio::test]
async fn sensor_with_availability_array_carries_array_and_mode() {
    let container = mosquitto::Mosquitto.start().await;
    let port = container.get_host_port_ipv4(1883).await;
    let (client, _observer, mut observer_loop, _cancel) = connect_pair(port).await;

    let obj = sensor_with_availability_array();
    let device_api = UnreachableDeviceApi;
    let payload = build_payload(&obj, "hass-crds-e2e", "avail", &device_api).await.expect("payload assembles");
    let discovery_topic = topic::discovery_topic_default(Sensor::KIND, "hass-crds-e2e", "avail");

    client.publish(Duration::from_secs(10), &discovery_topic, payload, 1, true).await.expect("publish succeeds");

    let (_topic, value) = wait_for_publish(&mut observer_loop).await;

    assert_json_eq!(
        value["availability"],
        json!([{
            "topic": "e2e/sensor/avail/status",
            "payload_available": "online",
            "payload_not_available": "offline",
        }])
    );
    assert_eq!(value["availability_mode"], json!("all"));
}
