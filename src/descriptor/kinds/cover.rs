//! A cover (garage door, blind, awning, ...) with optional tilt support.

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
    kind = "Cover",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_topic: Option<String>,
    pub device_class: Option<String>,
    pub optimistic: Option<bool>,
    pub payload_close: Option<String>,
    pub payload_open: Option<String>,
    pub payload_stop: Option<String>,
    pub position_closed: Option<i32>,
    pub position_open: Option<i32>,
    pub position_template: Option<String>,
    pub position_topic: Option<String>,
    pub set_position_template: Option<String>,
    pub set_position_topic: Option<String>,
    pub state_closed: Option<String>,
    pub state_closing: Option<String>,
    pub state_open: Option<String>,
    pub state_opening: Option<String>,
    pub state_stopped: Option<String>,
    pub state_topic: Option<String>,
    pub tilt_closed_value: Option<i32>,
    pub tilt_command_template: Option<String>,
    pub tilt_command_topic: Option<String>,
    pub tilt_max: Option<i32>,
    pub tilt_min: Option<i32>,
    pub tilt_opened_value: Option<i32>,
    pub tilt_optimistic: Option<bool>,
    pub tilt_status_template: Option<String>,
    pub tilt_status_topic: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Cover {
    const KIND: Kind = Kind::Cover;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("commandTopic", s.command_topic.clone())
            .set("deviceClass", s.device_class.clone())
            .set("optimistic", s.optimistic)
            .set("payloadClose", s.payload_close.clone())
            .set("payloadOpen", s.payload_open.clone())
            .set("payloadStop", s.payload_stop.clone())
            .set("positionClosed", s.position_closed)
            .set("positionOpen", s.position_open)
            .set("positionTemplate", s.position_template.clone())
            .set("positionTopic", s.position_topic.clone())
            .set("setPositionTemplate", s.set_position_template.clone())
            .set("setPositionTopic", s.set_position_topic.clone())
            .set("stateClosed", s.state_closed.clone())
            .set("stateClosing", s.state_closing.clone())
            .set("stateOpen", s.state_open.clone())
            .set("stateOpening", s.state_opening.clone())
            .set("stateStopped", s.state_stopped.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("tiltClosedValue", s.tilt_closed_value)
            .set("tiltCommandTemplate", s.tilt_command_template.clone())
            .set("tiltCommandTopic", s.tilt_command_topic.clone())
            .set("tiltMax", s.tilt_max)
            .set("tiltMin", s.tilt_min)
            .set("tiltOpenedValue", s.tilt_opened_value)
            .set("tiltOptimistic", s.tilt_optimistic)
            .set("tiltStatusTemplate", s.tilt_status_template.clone())
            .set("tiltStatusTopic", s.tilt_status_topic.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
