//! A siren/alarm sounder with optional duration and volume support flags.

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
    kind = "Siren",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct SirenSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_template: Option<String>,
    pub command_off_template: Option<String>,
    pub command_topic: Option<String>,
    pub optimistic: Option<bool>,
    pub payload_off: Option<String>,
    pub payload_on: Option<String>,
    pub state_off: Option<String>,
    pub state_on: Option<String>,
    pub state_topic: Option<String>,
    pub state_value_template: Option<String>,
    pub support_duration: Option<bool>,
    pub support_volume_set: Option<bool>,
}

impl Reconcilable for Siren {
    const KIND: Kind = Kind::Siren;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("commandTemplate", s.command_template.clone())
            .set("commandOffTemplate", s.command_off_template.clone())
            .set("commandTopic", s.command_topic.clone())
            .set("optimistic", s.optimistic)
            .set("payloadOff", s.payload_off.clone())
            .set("payloadOn", s.payload_on.clone())
            .set("stateOff", s.state_off.clone())
            .set("stateOn", s.state_on.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("stateValueTemplate", s.state_value_template.clone())
            .set("supportDuration", s.support_duration)
            .set("supportVolumeSet", s.support_volume_set);
    }
}
