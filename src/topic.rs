//! Discovery topic derivation and its inverse.
//!
//! Two pure functions plus a unique-id default; see spec §4.1. The forward
//! `kind -> component` table is the single source of truth. The reverse
//! `component -> kind` map is derived from it eagerly the first time it's
//! needed so the two can never drift apart.

use std::sync::OnceLock;

use crate::descriptor::Kind;
use crate::error::Error;

const DEFAULT_PREFIX: &str = "homeassistant";

/// `kind -> component` as laid out in spec §6. Order matches the spec's table.
const COMPONENT_TABLE: &[(Kind, &str)] = &[
    (Kind::Button, "button"),
    (Kind::Switch, "switch"),
    (Kind::Sensor, "sensor"),
    (Kind::BinarySensor, "binary_sensor"),
    (Kind::Number, "number"),
    (Kind::Select, "select"),
    (Kind::Text, "text"),
    (Kind::Scene, "scene"),
    (Kind::Tag, "tag"),
    (Kind::Light, "light"),
    (Kind::Cover, "cover"),
    (Kind::Lock, "lock"),
    (Kind::Valve, "valve"),
    (Kind::Fan, "fan"),
    (Kind::Siren, "siren"),
    (Kind::Camera, "camera"),
    (Kind::Image, "image"),
    (Kind::Notify, "notify"),
    (Kind::Update, "update"),
    (Kind::Climate, "climate"),
    (Kind::Humidifier, "humidifier"),
    (Kind::WaterHeater, "water_heater"),
    (Kind::Vacuum, "vacuum"),
    (Kind::LawnMower, "lawn_mower"),
    (Kind::AlarmControlPanel, "alarm_control_panel"),
    (Kind::DeviceTracker, "device_tracker"),
    (Kind::DeviceTrigger, "device_automation"),
    (Kind::Event, "event"),
];

fn reverse_table() -> &'static [(&'static str, Kind)] {
    static REVERSE: OnceLock<Vec<(&'static str, Kind)>> = OnceLock::new();
    REVERSE
        .get_or_init(|| {
            COMPONENT_TABLE
                .iter()
                .map(|(kind, component)| (*component, *kind))
                .collect()
        })
        .as_slice()
}

/// Maps a [`Kind`] to its discovery-topic component token.
///
/// Known kinds use [`COMPONENT_TABLE`]. Unknown kinds (there are none today,
/// but the fallback keeps the mapping total per spec §4.1) strip a leading
/// `MQTT` from the kind's debug name and lowercase the rest.
pub fn component_of(kind: Kind) -> String {
    COMPONENT_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, c)| c.to_string())
        .unwrap_or_else(|| {
            let name = format!("{kind:?}");
            name.strip_prefix("MQTT")
                .unwrap_or(&name)
                .to_ascii_lowercase()
        })
}

/// Reverse of [`component_of`]. `None` for components this controller doesn't own.
pub fn kind_of_component(component: &str) -> Option<Kind> {
    reverse_table()
        .iter()
        .find(|(c, _)| *c == component)
        .map(|(_, k)| *k)
}

/// `<prefix>/<component>/<namespace>/<name>/config`.
pub fn discovery_topic(kind: Kind, namespace: &str, name: &str, prefix: &str) -> String {
    let component = component_of(kind);
    let prefix = prefix.trim_end_matches('/');
    format!("{prefix}/{component}/{namespace}/{name}/config")
}

/// Convenience wrapper using the default `homeassistant` prefix.
pub fn discovery_topic_default(kind: Kind, namespace: &str, name: &str) -> String {
    discovery_topic(kind, namespace, name, DEFAULT_PREFIX)
}

/// `<namespace>-<name>`, used unless the descriptor overrides it.
pub fn unique_id(namespace: &str, name: &str) -> String {
    format!("{namespace}-{name}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTopic {
    pub prefix: String,
    pub component: String,
    pub namespace: String,
    pub name: String,
}

/// Inverse of [`discovery_topic`]. Requires exactly five slash-delimited
/// segments ending in `config`.
pub fn parse_discovery_topic(topic: &str) -> Result<ParsedTopic, Error> {
    let segments: Vec<&str> = topic.split('/').collect();
    let [prefix, component, namespace, name, tail] = segments.as_slice() else {
        return Err(Error::MalformedTopic(topic.to_string()));
    };
    if *tail != "config" {
        return Err(Error::MalformedTopic(topic.to_string()));
    }
    Ok(ParsedTopic {
        prefix: prefix.to_string(),
        component: component.to_string(),
        namespace: namespace.to_string(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_known_kind() {
        for (kind, component) in COMPONENT_TABLE {
            let topic = discovery_topic_default(*kind, "ns", "name");
            let parsed = parse_discovery_topic(&topic).expect("parses");
            assert_eq!(parsed.namespace, "ns");
            assert_eq!(parsed.name, "name");
            assert_eq!(&parsed.component, component);
            assert_eq!(kind_of_component(&parsed.component), Some(*kind));
        }
    }

    #[test]
    fn device_trigger_maps_to_device_automation() {
        assert_eq!(component_of(Kind::DeviceTrigger), "device_automation");
    }

    #[test]
    fn default_unique_id_is_namespace_dash_name() {
        assert_eq!(unique_id("hass-crds-e2e", "test-button"), "hass-crds-e2e-test-button");
    }

    #[test]
    fn rejects_malformed_topics() {
        assert!(parse_discovery_topic("homeassistant/button/ns/name").is_err());
        assert!(parse_discovery_topic("homeassistant/button/ns/name/state").is_err());
        assert!(parse_discovery_topic("a/b/c/d/config").is_ok());
    }

    #[test]
    fn strips_trailing_slash_from_prefix() {
        let topic = discovery_topic(Kind::Switch, "ns", "name", "homeassistant/");
        assert_eq!(topic, "homeassistant/switch/ns/name/config");
    }
}
