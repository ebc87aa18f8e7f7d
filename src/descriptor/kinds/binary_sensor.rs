//! A two-state (on/off) sensor (spec §4.5).

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::descriptor::common::CommonSpec;
use crate::descriptor::status::EntityStatus;
use crate::descriptor::{Kind, Reconcilable};
use crate::payload::PayloadBuilder;

#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "hass-crds.spontus.dev",
    version = "v1alpha1",
    kind = "BinarySensor",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct BinarySensorSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub state_topic: Option<String>,
    pub value_template: Option<String>,
    pub device_class: Option<String>,
    pub force_update: Option<bool>,
    pub off_delay: Option<u32>,
    pub payload_off: Option<String>,
    pub payload_on: Option<String>,
}

impl Reconcilable for BinarySensor {
    const KIND: Kind = Kind::BinarySensor;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("stateTopic", s.state_topic.clone())
            .set("valueTemplate", s.value_template.clone())
            .set("deviceClass", s.device_class.clone())
            .set("forceUpdate", s.force_update)
            .set("offDelay", s.off_delay)
            .set("payloadOff", s.payload_off.clone())
            .set("payloadOn", s.payload_on.clone());
    }
}
