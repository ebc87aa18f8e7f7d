//! A fan with optional speed percentage, oscillation, direction and preset modes.

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
    kind = "Fan",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct FanSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_template: Option<String>,
    pub command_topic: Option<String>,
    pub optimistic: Option<bool>,
    pub direction_command_template: Option<String>,
    pub direction_command_topic: Option<String>,
    pub direction_state_topic: Option<String>,
    pub direction_value_template: Option<String>,
    pub oscillation_command_template: Option<String>,
    pub oscillation_command_topic: Option<String>,
    pub oscillation_state_topic: Option<String>,
    pub oscillation_value_template: Option<String>,
    pub payload_off: Option<String>,
    pub payload_on: Option<String>,
    pub payload_oscillation_off: Option<String>,
    pub payload_oscillation_on: Option<String>,
    pub payload_reset_percentage: Option<String>,
    pub payload_reset_preset_mode: Option<String>,
    pub percentage_command_template: Option<String>,
    pub percentage_command_topic: Option<String>,
    pub percentage_state_topic: Option<String>,
    pub percentage_value_template: Option<String>,
    pub preset_mode_command_template: Option<String>,
    pub preset_mode_command_topic: Option<String>,
    pub preset_mode_state_topic: Option<String>,
    pub preset_mode_value_template: Option<String>,
    pub preset_modes: Option<Vec<String>>,
    pub speed_range_max: Option<i32>,
    pub speed_range_min: Option<i32>,
    pub state_topic: Option<String>,
    pub state_value_template: Option<String>,
}

impl Reconcilable for Fan {
    const KIND: Kind = Kind::Fan;

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
            .set("optimistic", s.optimistic)
            .set("directionCommandTemplate", s.direction_command_template.clone())
            .set("directionCommandTopic", s.direction_command_topic.clone())
            .set("directionStateTopic", s.direction_state_topic.clone())
            .set("directionValueTemplate", s.direction_value_template.clone())
            .set("oscillationCommandTemplate", s.oscillation_command_template.clone())
            .set("oscillationCommandTopic", s.oscillation_command_topic.clone())
            .set("oscillationStateTopic", s.oscillation_state_topic.clone())
            .set("oscillationValueTemplate", s.oscillation_value_template.clone())
            .set("payloadOff", s.payload_off.clone())
            .set("payloadOn", s.payload_on.clone())
            .set("payloadOscillationOff", s.payload_oscillation_off.clone())
            .set("payloadOscillationOn", s.payload_oscillation_on.clone())
            .set("payloadResetPercentage", s.payload_reset_percentage.clone())
            .set("payloadResetPresetMode", s.payload_reset_preset_mode.clone())
            .set("percentageCommandTemplate", s.percentage_command_template.clone())
            .set("percentageCommandTopic", s.percentage_command_topic.clone())
            .set("percentageStateTopic", s.percentage_state_topic.clone())
            .set("percentageValueTemplate", s.percentage_value_template.clone())
            .set("presetModeCommandTemplate", s.preset_mode_command_template.clone())
            .set("presetModeCommandTopic", s.preset_mode_command_topic.clone())
            .set("presetModeStateTopic", s.preset_mode_state_topic.clone())
            .set("presetModeValueTemplate", s.preset_mode_value_template.clone())
            .set("presetModes", s.preset_modes.clone())
            .set("speedRangeMax", s.speed_range_max)
            .set("speedRangeMin", s.speed_range_min)
            .set("stateTopic", s.state_topic.clone())
            .set("stateValueTemplate", s.state_value_template.clone());
    }
}
