//! A stateless, fire-and-forget button (spec §4.5, §8 scenario 1).

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
    kind = "Button",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_topic: Option<String>,
    pub command_template: Option<String>,
    pub device_class: Option<String>,
    pub payload_press: Option<String>,
}

impl Reconcilable for Button {
    const KIND: Kind = Kind::Button;

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
            .set("payloadPress", s.payload_press.clone());
    }
}
