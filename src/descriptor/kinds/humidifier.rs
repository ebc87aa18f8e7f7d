//! A humidifier/dehumidifier with optional mode support.

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
    kind = "Humidifier",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct HumidifierSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub action_template: Option<String>,
    pub action_topic: Option<String>,
    pub current_humidity_template: Option<String>,
    pub current_humidity_topic: Option<String>,
    pub command_template: Option<String>,
    pub command_topic: Option<String>,
    pub device_class: Option<String>,
    pub max_humidity: Option<f64>,
    pub min_humidity: Option<f64>,
    pub optimistic: Option<bool>,
    pub payload_off: Option<String>,
    pub payload_on: Option<String>,
    pub payload_reset_humidity: Option<String>,
    pub payload_reset_mode: Option<String>,
    pub target_humidity_command_template: Option<String>,
    pub target_humidity_command_topic: Option<String>,
    pub target_humidity_state_topic: Option<String>,
    pub target_humidity_state_template: Option<String>,
    pub mode_command_template: Option<String>,
    pub mode_command_topic: Option<String>,
    pub mode_state_topic: Option<String>,
    pub mode_state_template: Option<String>,
    pub modes: Option<Vec<String>>,
    pub state_topic: Option<String>,
    pub state_value_template: Option<String>,
}

impl Reconcilable for Humidifier {
    const KIND: Kind = Kind::Humidifier;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("actionTemplate", s.action_template.clone())
            .set("actionTopic", s.action_topic.clone())
            .set("currentHumidityTemplate", s.current_humidity_template.clone())
            .set("currentHumidityTopic", s.current_humidity_topic.clone())
            .set("commandTemplate", s.command_template.clone())
            .set("commandTopic", s.command_topic.clone())
            .set("deviceClass", s.device_class.clone())
            .set("maxHumidity", s.max_humidity)
            .set("minHumidity", s.min_humidity)
            .set("optimistic", s.optimistic)
            .set("payloadOff", s.payload_off.clone())
            .set("payloadOn", s.payload_on.clone())
            .set("payloadResetHumidity", s.payload_reset_humidity.clone())
            .set("payloadResetMode", s.payload_reset_mode.clone())
            .set("targetHumidityCommandTemplate", s.target_humidity_command_template.clone())
            .set("targetHumidityCommandTopic", s.target_humidity_command_topic.clone())
            .set("targetHumidityStateTopic", s.target_humidity_state_topic.clone())
            .set("targetHumidityStateTemplate", s.target_humidity_state_template.clone())
            .set("modeCommandTemplate", s.mode_command_template.clone())
            .set("modeCommandTopic", s.mode_command_topic.clone())
            .set("modeStateTopic", s.mode_state_topic.clone())
            .set("modeStateTemplate", s.mode_state_template.clone())
            .set("modes", s.modes.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("stateValueTemplate", s.state_value_template.clone());
    }
}
