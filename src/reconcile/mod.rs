//! The base reconciler (spec §4.4): the pipeline shared by every kind,
//! parameterized over [`Reconcilable`] instead of one adapter per kind
//! (spec §9's Design Notes). [`controllers`] wires this around
//! `kube::runtime::{Controller, finalizer}` for each of the 28 kinds;
//! [`kube_api`] is the mockable seam that makes the pipeline itself
//! testable without a live apiserver.

pub mod controllers;
pub mod kube_api;

use std::time::Duration;

use chrono::Utc;
use kube::runtime::controller::Action;
use kube::ResourceExt;
use tracing::warn;

use crate::descriptor::kinds::device::MQTTDevice;
use crate::descriptor::status::{ConditionStatus, ConditionType, EntityStatus};
use crate::descriptor::Reconcilable;
use crate::error::Error;
use crate::mqtt_client::MqttClient;
use crate::payload::PayloadBuilder;
use crate::topic;
use kube_api::KubeApi;

/// Ownership marker stamped into every payload (spec §6); the orphan
/// collector's filter in [`crate::gc`] keys off `origin.name`.
pub const ORIGIN_NAME: &str = "hass-crds";
pub const ORIGIN_SUPPORT_URL: &str = "https://github.com/spontus/hass-crds";

/// Retry delay after a publish failure (spec §4.4 steps 2b, 5).
pub const PUBLISH_FAILURE_RETRY: Duration = Duration::from_secs(30);
/// Bound on an individual publish call; the reconnect-wait inside it is
/// separately capped at 30s by [`MqttClient`] (spec §4.3).
const PUBLISH_DEADLINE: Duration = Duration::from_secs(30);
const DISCOVERY_PREFIX: &str = "homeassistant";

fn unique_id_of<K: Reconcilable>(obj: &K, namespace: &str, name: &str) -> String {
    obj.common()
        .metadata
        .unique_id
        .clone()
        .unwrap_or_else(|| topic::unique_id(namespace, name))
}

/// Resolves the effective `device` map: the inline block if present,
/// otherwise the referenced [`MQTTDevice`] in the same namespace (spec §4.4
/// step 4 — the resolution path the source declared but never wired up;
/// spec §9's Open Questions calls this out explicitly).
async fn resolve_device<K: Reconcilable>(
    obj: &K,
    namespace: &str,
    device_api: &dyn KubeApi<MQTTDevice>,
) -> Result<Option<crate::descriptor::common::DeviceBlock>, Error> {
    let common = obj.common();
    if let Some(device) = &common.device {
        return Ok(Some(device.clone()));
    }
    if let Some(device_ref) = &common.device_ref {
        return match device_api.get(namespace, &device_ref.name).await? {
            Some(device_obj) => Ok(Some(device_obj.spec.device)),
            None => Err(Error::DeviceRefUnresolved {
                namespace: namespace.to_string(),
                name: device_ref.name.clone(),
            }),
        };
    }
    Ok(None)
}

/// Builds the full discovery payload for `obj` (spec §4.4 step 4): kind
/// fields, `unique_id`, device, availability, origin.
pub async fn build_payload<K: Reconcilable>(
    obj: &K,
    namespace: &str,
    name: &str,
    device_api: &dyn KubeApi<MQTTDevice>,
) -> Result<Vec<u8>, Error> {
    let common = obj.common();
    let mut builder = PayloadBuilder::new();
    obj.build_payload(&mut builder);

    if K::stamps_unique_id() {
        builder.set_raw("unique_id", unique_id_of(obj, namespace, name));
    }

    let metadata = &common.metadata;
    builder
        .set("name", metadata.name.clone())
        .set("icon", metadata.icon.clone())
        .set(
            "entityCategory",
            metadata
                .entity_category
                .as_ref()
                .map(|c| serde_json::to_value(c).expect("entity category serializes")),
        )
        .set("enabledByDefault", metadata.enabled_by_default)
        .set("objectId", metadata.object_id.clone())
        .set("qos", common.transport.qos)
        .set("encoding", common.transport.encoding.clone())
        .set("jsonAttributesTopic", common.transport.json_attributes_topic.clone())
        .set("jsonAttributesTemplate", common.transport.json_attributes_template.clone());

    if let Some(device) = resolve_device(obj, namespace, device_api).await? {
        builder.set_device(&device);
    }

    let entries = common.availability.effective_entries();
    builder.set_availability(&entries, common.availability.availability_mode);
    builder.set("availabilityTopic", common.availability.shorthand_topic());
    builder.set_origin(ORIGIN_NAME, ORIGIN_SUPPORT_URL);

    builder.build()
}

/// Applies spec §4.4's condition-update rule (preserve transition time
/// unless the status value itself changed) then persists the new status.
async fn write_status<K: Reconcilable>(
    api: &dyn KubeApi<K>,
    namespace: &str,
    name: &str,
    current: Option<&EntityStatus>,
    mutate: impl FnOnce(&mut EntityStatus),
) -> Result<(), Error> {
    let mut status = current.cloned().unwrap_or_default();
    mutate(&mut status);
    api.patch_status(namespace, name, &status).await
}

/// Handles the "apply" event of spec §4.4 (steps 3-7): finalizer
/// installation is the caller's responsibility via
/// `kube::runtime::finalizer` (see [`controllers`]); this covers payload
/// assembly, publish, status update, and the re-publish requeue.
pub async fn reconcile_apply<K: Reconcilable>(
    obj: &K,
    api: &dyn KubeApi<K>,
    device_api: &dyn KubeApi<MQTTDevice>,
    mqtt: &MqttClient,
) -> Result<Action, Error> {
    let namespace = obj.namespace().unwrap_or_default();
    let name = obj.name_any();
    let discovery_topic = topic::discovery_topic(K::KIND, &namespace, &name, DISCOVERY_PREFIX);
    let common = obj.common();

    let payload = match build_payload(obj, &namespace, &name, device_api).await {
        Ok(p) => p,
        Err(e) => {
            write_status::<K>(api, &namespace, &name, obj.status(), |status| {
                status.set_condition(
                    ConditionType::Published,
                    ConditionStatus::False,
                    reason_for(&e),
                    &e.to_string(),
                    Utc::now(),
                );
            })
            .await?;
            return Ok(Action::requeue(PUBLISH_FAILURE_RETRY));
        }
    };

    let qos = common.transport.qos_or_default();
    let retain = common.transport.retain_or_default();

    match mqtt.publish(PUBLISH_DEADLINE, &discovery_topic, payload, qos, retain).await {
        Ok(()) => {
            let generation = obj.meta().generation;
            write_status::<K>(api, &namespace, &name, obj.status(), |status| {
                status.last_published = Some(Utc::now());
                status.discovery_topic = Some(discovery_topic.clone());
                status.observed_generation = generation;
                status.set_condition(
                    ConditionType::Published,
                    ConditionStatus::True,
                    "Success",
                    "published discovery payload",
                    Utc::now(),
                );
            })
            .await?;

            match common.transport.republish_interval() {
                Some(d) => Ok(Action::requeue(d)),
                None => Ok(Action::await_change()),
            }
        }
        Err(e) => {
            warn!(kind = ?K::KIND, %namespace, %name, error = %e, "discovery publish failed");
            write_status::<K>(api, &namespace, &name, obj.status(), |status| {
                status.set_condition(
                    ConditionType::Published,
                    ConditionStatus::False,
                    "PublishFailed",
                    &e.to_string(),
                    Utc::now(),
                );
            })
            .await?;
            Ok(Action::requeue(PUBLISH_FAILURE_RETRY))
        }
    }
}

/// Handles the "cleanup" event (spec §4.4 step 2): publish exactly one
/// empty retained payload at the descriptor's topic. The caller's
/// `kube::runtime::finalizer` wrapper only strips the finalizer after this
/// returns `Ok`, guaranteeing the publish-before-finalizer-removal
/// ordering spec §5 relies on to avoid the deletion race with the orphan
/// collector.
pub async fn reconcile_cleanup<K: Reconcilable>(obj: &K, mqtt: &MqttClient) -> Result<Action, Error> {
    let namespace = obj.namespace().unwrap_or_default();
    let name = obj.name_any();
    let discovery_topic = topic::discovery_topic(K::KIND, &namespace, &name, DISCOVERY_PREFIX);

    mqtt.publish(PUBLISH_DEADLINE, &discovery_topic, Vec::new(), 1, true)
        .await
        .map_err(|e| {
            warn!(kind = ?K::KIND, %namespace, %name, error = %e, "eviction publish failed");
            e
        })?;
    Ok(Action::await_change())
}

fn reason_for(e: &Error) -> &'static str {
    match e {
        Error::DeviceRefUnresolved { .. } => "DeviceRefUnresolved",
        _ => "PublishFailed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::common::{CommonSpec, DeviceBlock, DeviceRef, Metadata};
    use crate::descriptor::kinds::button::{Button, ButtonSpec};
    use crate::descriptor::kinds::device::{MQTTDevice, MQTTDeviceSpec};
    use kube_api::MockKubeApi;

    fn button(namespace: &str, name: &str) -> Button {
        Button::new(
            name,
            ButtonSpec {
                common: CommonSpec {
                    metadata: Metadata::default(),
                    ..Default::default()
                },
                command_topic: Some("cmd/topic".to_string()),
                ..Default::default()
            },
        )
        .within(namespace)
        .to_owned()
    }

    #[tokio::test]
    async fn device_ref_unresolved_fails_payload_assembly() {
        let mut obj = button("ns", "a");
        obj.spec.common.device_ref = Some(DeviceRef { name: "missing-device".to_string() });

        let mut device_api = MockKubeApi::<MQTTDevice>::new();
        device_api.expect_get().returning(|_, _| Ok(None));

        let result = build_payload(&obj, "ns", "a", &device_api).await;
        assert!(matches!(result, Err(Error::DeviceRefUnresolved { .. })));
    }

    #[test]
    fn reason_for_device_ref_unresolved_is_distinct_from_publish_failed() {
        let e = Error::DeviceRefUnresolved {
            namespace: "ns".to_string(),
            name: "dev".to_string(),
        };
        assert_eq!(reason_for(&e), "DeviceRefUnresolved");
        assert_eq!(reason_for(&Error::DeadlineExceeded), "PublishFailed");
    }

    #[tokio::test]
    async fn inline_device_resolves_without_lookup() {
        let mut obj = button("ns", "a");
        obj.spec.common.device = Some(DeviceBlock {
            name: Some("My Device".to_string()),
            identifiers: vec!["dev-1".to_string()],
            ..Default::default()
        });

        let mut device_api = MockKubeApi::<MQTTDevice>::new();
        device_api.expect_get().times(0);

        let resolved = resolve_device(&obj, "ns", &device_api).await.unwrap();
        assert_eq!(resolved.unwrap().name.as_deref(), Some("My Device"));
    }

    #[tokio::test]
    async fn device_ref_resolves_via_lookup() {
        let mut obj = button("ns", "a");
        obj.spec.common.device_ref = Some(DeviceRef { name: "dev".to_string() });

        let mut device_api = MockKubeApi::<MQTTDevice>::new();
        device_api.expect_get().withf(|ns, name| ns == "ns" && name == "dev").returning(|_, _| {
            Ok(Some(MQTTDevice::new(
                "dev",
                MQTTDeviceSpec {
                    device: DeviceBlock {
                        manufacturer: Some("acme".to_string()),
                        ..Default::default()
                    },
                },
            )))
        });

        let resolved = resolve_device(&obj, "ns", &device_api).await.unwrap();
        assert_eq!(resolved.unwrap().manufacturer.as_deref(), Some("acme"));
    }

    #[test]
    fn unique_id_defaults_to_namespace_dash_name() {
        let obj = button("hass-crds-e2e", "test-button");
        assert_eq!(unique_id_of(&obj, "hass-crds-e2e", "test-button"), "hass-crds-e2e-test-button");
    }

    #[test]
    fn unique_id_override_is_respected() {
        let mut obj = button("ns", "a");
        obj.spec.common.metadata.unique_id = Some("custom-id".to_string());
        assert_eq!(unique_id_of(&obj, "ns", "a"), "custom-id");
    }

    #[test]
    fn device_trigger_omits_unique_id_stamp() {
        assert!(!crate::descriptor::kinds::device_trigger::DeviceTrigger::stamps_unique_id());
        assert!(Button::stamps_unique_id());
    }

    #[tokio::test]
    async fn metadata_fields_are_stamped_on_every_kind() {
        let mut obj = button("ns", "a");
        obj.spec.common.metadata.name = Some("My Button".to_string());
        obj.spec.common.metadata.icon = Some("mdi:button-pointer".to_string());
        obj.spec.common.metadata.enabled_by_default = Some(false);
        obj.spec.common.metadata.entity_category =
            Some(crate::descriptor::common::EntityCategory::Diagnostic);

        let device_api = MockKubeApi::<MQTTDevice>::new();
        let payload = build_payload(&obj, "ns", "a", &device_api).await.expect("payload assembles");
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();

        assert_eq!(value["name"], serde_json::json!("My Button"));
        assert_eq!(value["icon"], serde_json::json!("mdi:button-pointer"));
        assert_eq!(value["enabled_by_default"], serde_json::json!(false));
        assert_eq!(value["entity_category"], serde_json::json!("diagnostic"));
    }

    #[tokio::test]
    async fn transport_fields_are_stamped_on_every_kind() {
        let mut obj = button("ns", "a");
        obj.spec.common.transport.qos = Some(2);
        obj.spec.common.transport.encoding = Some("utf-8".to_string());
        obj.spec.common.transport.json_attributes_topic = Some("ns/a/attrs".to_string());

        let device_api = MockKubeApi::<MQTTDevice>::new();
        let payload = build_payload(&obj, "ns", "a", &device_api).await.expect("payload assembles");
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();

        assert_eq!(value["qos"], serde_json::json!(2));
        assert_eq!(value["encoding"], serde_json::json!("utf-8"));
        assert_eq!(value["json_attributes_topic"], serde_json::json!("ns/a/attrs"));
        assert!(value.get("json_attributes_template").is_none());
    }
}
