//! An HVAC/thermostat entity — the largest fan-out of topics and templates
//! among the 28 kinds (spec §3).

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
    kind = "Climate",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct ClimateSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub action_template: Option<String>,
    pub action_topic: Option<String>,
    pub current_humidity_template: Option<String>,
    pub current_humidity_topic: Option<String>,
    pub current_temperature_template: Option<String>,
    pub current_temperature_topic: Option<String>,
    pub fan_mode_command_template: Option<String>,
    pub fan_mode_command_topic: Option<String>,
    pub fan_mode_state_template: Option<String>,
    pub fan_mode_state_topic: Option<String>,
    pub fan_modes: Option<Vec<String>>,
    pub initial: Option<f64>,
    pub max_humidity: Option<f64>,
    pub max_temp: Option<f64>,
    pub min_humidity: Option<f64>,
    pub min_temp: Option<f64>,
    pub mode_command_template: Option<String>,
    pub mode_command_topic: Option<String>,
    pub mode_state_template: Option<String>,
    pub mode_state_topic: Option<String>,
    pub modes: Option<Vec<String>>,
    pub optimistic: Option<bool>,
    pub power_command_template: Option<String>,
    pub power_command_topic: Option<String>,
    pub precision: Option<f64>,
    pub preset_mode_command_template: Option<String>,
    pub preset_mode_command_topic: Option<String>,
    pub preset_mode_state_topic: Option<String>,
    pub preset_mode_value_template: Option<String>,
    pub preset_modes: Option<Vec<String>>,
    pub swing_mode_command_template: Option<String>,
    pub swing_mode_command_topic: Option<String>,
    pub swing_mode_state_template: Option<String>,
    pub swing_mode_state_topic: Option<String>,
    pub swing_modes: Option<Vec<String>>,
    pub target_humidity_command_template: Option<String>,
    pub target_humidity_command_topic: Option<String>,
    pub target_humidity_state_topic: Option<String>,
    pub target_humidity_state_template: Option<String>,
    pub temperature_command_template: Option<String>,
    pub temperature_command_topic: Option<String>,
    pub temperature_high_command_template: Option<String>,
    pub temperature_high_command_topic: Option<String>,
    pub temperature_high_state_template: Option<String>,
    pub temperature_high_state_topic: Option<String>,
    pub temperature_low_command_template: Option<String>,
    pub temperature_low_command_topic: Option<String>,
    pub temperature_low_state_template: Option<String>,
    pub temperature_low_state_topic: Option<String>,
    pub temperature_state_template: Option<String>,
    pub temperature_state_topic: Option<String>,
    pub temperature_unit: Option<String>,
    pub temp_step: Option<f64>,
    pub value_template: Option<String>,
}

impl Reconcilable for Climate {
    const KIND: Kind = Kind::Climate;

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
            .set("currentTemperatureTemplate", s.current_temperature_template.clone())
            .set("currentTemperatureTopic", s.current_temperature_topic.clone())
            .set("fanModeCommandTemplate", s.fan_mode_command_template.clone())
            .set("fanModeCommandTopic", s.fan_mode_command_topic.clone())
            .set("fanModeStateTemplate", s.fan_mode_state_template.clone())
            .set("fanModeStateTopic", s.fan_mode_state_topic.clone())
            .set("fanModes", s.fan_modes.clone())
            .set("initial", s.initial)
            .set("maxHumidity", s.max_humidity)
            .set("maxTemp", s.max_temp)
            .set("minHumidity", s.min_humidity)
            .set("minTemp", s.min_temp)
            .set("modeCommandTemplate", s.mode_command_template.clone())
            .set("modeCommandTopic", s.mode_command_topic.clone())
            .set("modeStateTemplate", s.mode_state_template.clone())
            .set("modeStateTopic", s.mode_state_topic.clone())
            .set("modes", s.modes.clone())
            .set("optimistic", s.optimistic)
            .set("powerCommandTemplate", s.power_command_template.clone())
            .set("powerCommandTopic", s.power_command_topic.clone())
            .set("precision", s.precision)
            .set("presetModeCommandTemplate", s.preset_mode_command_template.clone())
            .set("presetModeCommandTopic", s.preset_mode_command_topic.clone())
            .set("presetModeStateTopic", s.preset_mode_state_topic.clone())
            .set("presetModeValueTemplate", s.preset_mode_value_template.clone())
            .set("presetModes", s.preset_modes.clone())
            .set("swingModeCommandTemplate", s.swing_mode_command_template.clone())
            .set("swingModeCommandTopic", s.swing_mode_command_topic.clone())
            .set("swingModeStateTemplate", s.swing_mode_state_template.clone())
            .set("swingModeStateTopic", s.swing_mode_state_topic.clone())
            .set("swingModes", s.swing_modes.clone())
            .set("targetHumidityCommandTemplate", s.target_humidity_command_template.clone())
            .set("targetHumidityCommandTopic", s.target_humidity_command_topic.clone())
            .set("targetHumidityStateTopic", s.target_humidity_state_topic.clone())
            .set("targetHumidityStateTemplate", s.target_humidity_state_template.clone())
            .set("temperatureCommandTemplate", s.temperature_command_template.clone())
            .set("temperatureCommandTopic", s.temperature_command_topic.clone())
            .set("temperatureHighCommandTemplate", s.temperature_high_command_template.clone())
            .set("temperatureHighCommandTopic", s.temperature_high_command_topic.clone())
            .set("temperatureHighStateTemplate", s.temperature_high_state_template.clone())
            .set("temperatureHighStateTopic", s.temperature_high_state_topic.clone())
            .set("temperatureLowCommandTemplate", s.temperature_low_command_template.clone())
            .set("temperatureLowCommandTopic", s.temperature_low_command_topic.clone())
            .set("temperatureLowStateTemplate", s.temperature_low_state_template.clone())
            .set("temperatureLowStateTopic", s.temperature_low_state_topic.clone())
            .set("temperatureStateTemplate", s.temperature_state_template.clone())
            .set("temperatureStateTopic", s.temperature_state_topic.clone())
            .set("temperatureUnit", s.temperature_unit.clone())
            .set("tempStep", s.temp_step)
            .set("valueTemplate", s.value_template.clone());
    }
}
