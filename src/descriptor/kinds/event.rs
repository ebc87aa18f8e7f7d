//! A discrete, stateless event stream (button press types, doorbell rings, ...).

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
    kind = "Event",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct EventSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub device_class: Option<String>,
    pub event_types: Vec<String>,
    pub state_topic: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Event {
    const KIND: Kind = Kind::Event;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("deviceClass", s.device_class.clone())
            .set("eventTypes", s.event_types.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
