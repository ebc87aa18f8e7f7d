//! A valve (water, gas, ...) with optional reported position.

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
    kind = "Valve",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct ValveSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_template: Option<String>,
    pub command_topic: Option<String>,
    pub device_class: Option<String>,
    pub optimistic: Option<bool>,
    pub payload_close: Option<String>,
    pub payload_open: Option<String>,
    pub payload_stop: Option<String>,
    pub position_closed: Option<i32>,
    pub position_open: Option<i32>,
    pub reports_position: Option<bool>,
    pub state_closed: Option<String>,
    pub state_closing: Option<String>,
    pub state_open: Option<String>,
    pub state_opening: Option<String>,
    pub state_topic: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Valve {
    const KIND: Kind = Kind::Valve;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("commandTemplate", s.command_template.clone())
            .set("commandTopic", s.command_topic.clone())
            .set("deviceClass", s.device_class.clone())
            .set("optimistic", s.optimistic)
            .set("payloadClose", s.payload_close.clone())
            .set("payloadOpen", s.payload_open.clone())
            .set("payloadStop", s.payload_stop.clone())
            .set("positionClosed", s.position_closed)
            .set("positionOpen", s.position_open)
            .set("reportsPosition", s.reports_position)
            .set("stateClosed", s.state_closed.clone())
            .set("stateClosing", s.state_closing.clone())
            .set("stateOpen", s.state_open.clone())
            .set("stateOpening", s.state_opening.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
