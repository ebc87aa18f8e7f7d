//! A generic on/off switch (spec §4.5).

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
    kind = "Switch",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct SwitchSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_topic: Option<String>,
    pub command_template: Option<String>,
    pub device_class: Option<String>,
    pub optimistic: Option<bool>,
    pub payload_off: Option<String>,
    pub payload_on: Option<String>,
    pub state_off: Option<String>,
    pub state_on: Option<String>,
    pub state_topic: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Switch {
    const KIND: Kind = Kind::Switch;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("commandTopic", s.command_topic.clone())
            .set("commandTemplate", s.command_template.clone())
            .set("deviceClass", s.device_class.clone())
            .set("optimistic", s.optimistic)
            .set("payloadOff", s.payload_off.clone())
            .set("payloadOn", s.payload_on.clone())
            .set("stateOff", s.state_off.clone())
            .set("stateOn", s.state_on.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
