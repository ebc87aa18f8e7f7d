//! The common block shared by every entity kind (spec §3): metadata, the
//! inline-or-referenced device block, availability, and transport settings.
//!
//! These are descriptor-facing types (camelCase on the wire, like every
//! other Kubernetes spec field) — distinct from the abbreviated HA wire
//! format the teacher library serialized directly. [`crate::payload`] is
//! what bridges the two.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Classification of a non-primary entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

/// Per-field metadata common to all kinds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Display name for the entity. Omitted if only the device name is relevant.
    pub name: Option<String>,
    /// Overrides the default `<namespace>-<name>` unique identifier.
    pub unique_id: Option<String>,
    pub icon: Option<String>,
    pub entity_category: Option<EntityCategory>,
    pub enabled_by_default: Option<bool>,
    /// Overrides the object_id used for automatic entity_id generation.
    pub object_id: Option<String>,
}

/// A connection of the device to the outside world, e.g. `("mac", "02:5b:...")`.
///
/// Named fields here are the Kubernetes-facing shape (CRD spec authors
/// write `{type: mac, value: "..."}`); [`crate::payload`] is what flattens
/// this into the `[type, value]` pair HA's wire format expects, so this
/// struct's own `Serialize` impl is never used for the discovery payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConnection {
    pub r#type: String,
    pub value: String,
}

/// The 12 device-inline fields (spec §3's device block), also reused as the
/// shape [`crate::payload::PayloadBuilder::set_device`] maps into the wire
/// `device` sub-object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceBlock {
    pub name: Option<String>,
    pub identifiers: Vec<String>,
    pub connections: Vec<DeviceConnection>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub model_id: Option<String>,
    pub serial_number: Option<String>,
    pub hw_version: Option<String>,
    pub sw_version: Option<String>,
    pub suggested_area: Option<String>,
    pub configuration_url: Option<String>,
    pub via_device: Option<String>,
}

/// Names a standalone [`crate::descriptor::kinds::device::MQTTDevice`] in the
/// same namespace, resolved during publish (spec §4.4 step 4).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRef {
    pub name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityMode {
    #[default]
    All,
    Any,
    Latest,
}

impl AvailabilityMode {
    pub fn wire_value(self) -> &'static str {
        match self {
            AvailabilityMode::All => "all",
            AvailabilityMode::Any => "any",
            AvailabilityMode::Latest => "latest",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityEntry {
    pub topic: String,
    pub payload_available: Option<String>,
    pub payload_not_available: Option<String>,
    pub value_template: Option<String>,
}

/// Availability block: either an explicit list plus combinator, or the
/// `availabilityTopic` shorthand for a single topic (spec §3).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilitySpec {
    pub availability: Vec<AvailabilityEntry>,
    pub availability_mode: Option<AvailabilityMode>,
    pub availability_topic: Option<String>,
}

impl AvailabilitySpec {
    /// The explicit `availability` list, if any — this and
    /// [`Self::shorthand_topic`] are mutually exclusive on the wire (spec
    /// §3): the list becomes the `availability` array, the shorthand
    /// becomes a top-level `availability_topic` scalar. Does not fold the
    /// shorthand in; see spec §8 scenario 2, where a bare `availabilityTopic`
    /// must render as `availability_topic`, not a synthesized one-entry
    /// array.
    pub fn effective_entries(&self) -> Vec<AvailabilityEntry> {
        self.availability.clone()
    }

    /// The `availabilityTopic` shorthand, only meaningful when no explicit
    /// `availability` list is present.
    pub fn shorthand_topic(&self) -> Option<&str> {
        if !self.availability.is_empty() {
            return None;
        }
        self.availability_topic.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Transport {
    /// 0, 1 or 2. Defaults to 1 when absent (spec §4.4 step 5).
    pub qos: Option<u8>,
    pub retain: Option<bool>,
    pub encoding: Option<String>,
    pub json_attributes_topic: Option<String>,
    pub json_attributes_template: Option<String>,
    /// Duration string (e.g. `"30s"`, `"5m"`), parsed with `humantime`.
    pub republish_interval: Option<String>,
}

impl Transport {
    pub fn qos_or_default(&self) -> u8 {
        self.qos.unwrap_or(1)
    }

    pub fn retain_or_default(&self) -> bool {
        self.retain.unwrap_or(true)
    }

    /// Parses [`Self::republish_interval`], returning `None` if absent, empty
    /// or non-positive (spec §4.4 step 7).
    pub fn republish_interval(&self) -> Option<std::time::Duration> {
        let raw = self.republish_interval.as_deref()?;
        let parsed = humantime::parse_duration(raw).ok()?;
        if parsed.is_zero() {
            None
        } else {
            Some(parsed)
        }
    }
}

/// The block embedded (via `#[serde(flatten)]`) into every kind's spec.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonSpec {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub device: Option<DeviceBlock>,
    pub device_ref: Option<DeviceRef>,
    #[serde(flatten)]
    pub availability: AvailabilitySpec,
    #[serde(flatten)]
    pub transport: Transport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_availability_topic_is_not_an_entry() {
        let spec = AvailabilitySpec {
            availability_topic: Some("status/topic".to_string()),
            ..Default::default()
        };
        assert!(spec.effective_entries().is_empty());
        assert_eq!(spec.shorthand_topic(), Some("status/topic"));
    }

    #[test]
    fn explicit_entries_take_precedence_over_shorthand() {
        let spec = AvailabilitySpec {
            availability: vec![AvailabilityEntry {
                topic: "explicit".to_string(),
                ..Default::default()
            }],
            availability_topic: Some("shorthand".to_string()),
            ..Default::default()
        };
        assert_eq!(spec.effective_entries()[0].topic, "explicit");
        assert_eq!(spec.shorthand_topic(), None);
    }

    #[test]
    fn republish_interval_zero_is_none() {
        let t = Transport {
            republish_interval: Some("0s".to_string()),
            ..Default::default()
        };
        assert!(t.republish_interval().is_none());
    }

    #[test]
    fn republish_interval_positive_parses() {
        let t = Transport {
            republish_interval: Some("30s".to_string()),
            ..Default::default()
        };
        assert_eq!(t.republish_interval(), Some(std::time::Duration::from_secs(30)));
    }
}
