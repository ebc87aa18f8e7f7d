//! Append-only accumulator that turns descriptor fields into the on-wire
//! discovery JSON contract (spec §4.2).
//!
//! Unlike the teacher library, which serializes one strongly-typed struct
//! per kind straight to HA's abbreviated keys (`cmd_t`, `ent_cat`, ...), this
//! builder is the single code path every kind funnels through: it records
//! `(snake_case(key), value)` pairs, elides empties, and emits full
//! (non-abbreviated) snake_case keys as spec.md requires.

mod snake_case;

pub use snake_case::snake_case;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::descriptor::common::{AvailabilityEntry, AvailabilityMode, DeviceBlock, DeviceConnection};
use crate::error::Error;

/// Something that can be recorded via [`PayloadBuilder::set`], eliding itself
/// when empty. Mirrors spec §4.2's "empty string, empty sequence, empty
/// pair-sequence, or absent optional" rule.
pub trait IntoField {
    /// `None` means "elide this key".
    fn into_field(self) -> Option<Value>;
}

impl IntoField for Value {
    fn into_field(self) -> Option<Value> {
        match &self {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::Array(a) if a.is_empty() => None,
            Value::Object(o) if o.is_empty() => None,
            _ => Some(self),
        }
    }
}

impl IntoField for String {
    fn into_field(self) -> Option<Value> {
        if self.is_empty() {
            None
        } else {
            Some(Value::String(self))
        }
    }
}

impl IntoField for &str {
    fn into_field(self) -> Option<Value> {
        if self.is_empty() {
            None
        } else {
            Some(Value::String(self.to_string()))
        }
    }
}

impl<T: IntoField> IntoField for Option<T> {
    fn into_field(self) -> Option<Value> {
        self.and_then(IntoField::into_field)
    }
}

impl<T: Serialize> IntoField for Vec<T> {
    fn into_field(self) -> Option<Value> {
        if self.is_empty() {
            None
        } else {
            Some(serde_json::to_value(self).expect("vec of serializable values"))
        }
    }
}

impl IntoField for bool {
    fn into_field(self) -> Option<Value> {
        Some(Value::Bool(self))
    }
}

macro_rules! impl_into_field_int {
    ($($t:ty),*) => {
        $(
            impl IntoField for $t {
                fn into_field(self) -> Option<Value> {
                    Some(Value::Number((self as i64).into()))
                }
            }
        )*
    };
}
impl_into_field_int!(i64, i32, i16, i8, u64, u32, u16, u8, usize);

macro_rules! impl_into_field_float {
    ($($t:ty),*) => {
        $(
            impl IntoField for $t {
                fn into_field(self) -> Option<Value> {
                    serde_json::Number::from_f64(self as f64).map(Value::Number)
                }
            }
        )*
    };
}
impl_into_field_float!(f64, f32);

/// Accumulates `(key, value)` pairs for one discovery payload and emits
/// canonical JSON. See module docs and spec §4.2.
#[derive(Debug, Default, Clone)]
pub struct PayloadBuilder {
    entries: Map<String, Value>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `(snake_case(key), value)` unless `value` is empty.
    pub fn set(&mut self, key: &str, value: impl IntoField) -> &mut Self {
        if let Some(v) = value.into_field() {
            self.entries.insert(snake_case(key), v);
        }
        self
    }

    /// Like [`Self::set`] but stores `key` verbatim, with no case translation.
    pub fn set_raw(&mut self, key: &str, value: impl IntoField) -> &mut Self {
        if let Some(v) = value.into_field() {
            self.entries.insert(key.to_string(), v);
        }
        self
    }

    /// Attaches the canonical `device` sub-object, omitted entirely when empty.
    pub fn set_device(&mut self, device: &DeviceBlock) -> &mut Self {
        let map = device_map(device);
        if !map.is_empty() {
            self.entries.insert("device".to_string(), Value::Object(map));
        }
        self
    }

    /// Attaches the `availability` array (and `availability_mode` if given),
    /// omitted when the entry list is empty.
    pub fn set_availability(
        &mut self,
        entries: &[AvailabilityEntry],
        mode: Option<AvailabilityMode>,
    ) -> &mut Self {
        if !entries.is_empty() {
            let value = Value::Array(entries.iter().map(availability_entry_map).map(Value::Object).collect());
            self.entries.insert("availability".to_string(), value);
        }
        if let Some(mode) = mode {
            self.entries
                .insert("availability_mode".to_string(), Value::String(mode.wire_value().to_string()));
        }
        self
    }

    /// Attaches the fixed `origin` block with the given name/support_url.
    pub fn set_origin(&mut self, name: &str, support_url: &str) -> &mut Self {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(name.to_string()));
        if !support_url.is_empty() {
            map.insert("support_url".to_string(), Value::String(support_url.to_string()));
        }
        self.entries.insert("origin".to_string(), Value::Object(map));
        self
    }

    /// Emits canonical JSON of all recorded entries.
    pub fn build(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(&self.entries)?)
    }

    /// Same as [`Self::build`] but returns the parsed `Value`, handy for tests
    /// that want to compare structurally rather than byte-for-byte (spec §8's
    /// idempotence property calls out JSON-encoder key ordering as a non-issue).
    pub fn build_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn device_map(device: &DeviceBlock) -> Map<String, Value> {
    let mut map = Map::new();
    macro_rules! put {
        ($key:literal, $field:expr) => {
            if let Some(v) = $field.clone().into_field() {
                map.insert($key.to_string(), v);
            }
        };
    }
    put!("name", device.name);
    put!("identifiers", device.identifiers);
    if !device.connections.is_empty() {
        map.insert("connections".to_string(), connections_value(&device.connections));
    }
    put!("manufacturer", device.manufacturer);
    put!("model", device.model);
    put!("model_id", device.model_id);
    put!("serial_number", device.serial_number);
    put!("hw_version", device.hw_version);
    put!("sw_version", device.sw_version);
    put!("suggested_area", device.suggested_area);
    put!("configuration_url", device.configuration_url);
    put!("via_device", device.via_device);
    map
}

/// HA's wire format models each connection as a `[type, value]` pair, not
/// an object — e.g. `[["mac", "aa:bb:cc:dd:ee:ff"]]` — distinct from this
/// crate's named-field `DeviceConnection` spec type, which stays
/// object-shaped for the Kubernetes CRD.
fn connections_value(connections: &[DeviceConnection]) -> Value {
    Value::Array(
        connections
            .iter()
            .map(|c| Value::Array(vec![Value::String(c.r#type.clone()), Value::String(c.value.clone())]))
            .collect(),
    )
}

fn availability_entry_map(entry: &AvailabilityEntry) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("topic".to_string(), Value::String(entry.topic.clone()));
    if let Some(v) = entry.payload_available.clone().into_field() {
        map.insert("payload_available".to_string(), v);
    }
    if let Some(v) = entry.payload_not_available.clone().into_field() {
        map.insert("payload_not_available".to_string(), v);
    }
    if let Some(v) = entry.value_template.clone().into_field() {
        map.insert("value_template".to_string(), v);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn elides_empty_values() {
        let mut b = PayloadBuilder::new();
        b.set("name", "")
            .set("icon", Option::<String>::None)
            .set("identifiers", Vec::<String>::new())
            .set("commandTopic", "cmd/topic");
        assert_eq!(b.build_value(), json!({"command_topic": "cmd/topic"}));
    }

    #[test]
    fn translates_keys_to_snake_case() {
        let mut b = PayloadBuilder::new();
        b.set("commandTopic", "a").set("RGB", "b");
        assert_eq!(
            b.build_value(),
            json!({"command_topic": "a", "r_g_b": "b"})
        );
    }

    #[test]
    fn set_raw_keeps_key_verbatim() {
        let mut b = PayloadBuilder::new();
        b.set_raw("~", "prefix");
        assert_eq!(b.build_value(), json!({"~": "prefix"}));
    }

    #[test]
    fn device_block_omitted_when_empty() {
        let mut b = PayloadBuilder::new();
        b.set_device(&DeviceBlock::default());
        assert_eq!(b.build_value(), json!({}));
    }

    #[test]
    fn device_connections_serialize_as_pairs_not_objects() {
        use crate::descriptor::common::DeviceConnection;

        let mut b = PayloadBuilder::new();
        b.set_device(&DeviceBlock {
            connections: vec![DeviceConnection {
                r#type: "mac".to_string(),
                value: "aa:bb:cc:dd:ee:ff".to_string(),
            }],
            ..Default::default()
        });
        assert_eq!(
            b.build_value()["device"]["connections"],
            json!([["mac", "aa:bb:cc:dd:ee:ff"]])
        );
    }

    #[test]
    fn availability_array_and_mode() {
        let mut b = PayloadBuilder::new();
        let entries = vec![AvailabilityEntry {
            topic: "e2e/sensor/avail/status".to_string(),
            payload_available: Some("online".to_string()),
            payload_not_available: Some("offline".to_string()),
            value_template: None,
        }];
        b.set_availability(&entries, Some(AvailabilityMode::All));
        assert_eq!(
            b.build_value(),
            json!({
                "availability": [{
                    "topic": "e2e/sensor/avail/status",
                    "payload_available": "online",
                    "payload_not_available": "offline"
                }],
                "availability_mode": "all"
            })
        );
    }

    #[test]
    fn origin_stamped_with_fixed_name() {
        let mut b = PayloadBuilder::new();
        b.set_origin("hass-crds", "https://github.com/spontus/hass-crds");
        assert_eq!(
            b.build_value()["origin"]["name"],
            json!("hass-crds")
        );
    }
}
