//! A water heater with temperature and away/operation mode control.

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
    kind = "WaterHeater",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct WaterHeaterSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub current_temperature_template: Option<String>,
    pub current_temperature_topic: Option<String>,
    pub initial: Option<i32>,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub mode_command_template: Option<String>,
    pub mode_command_topic: Option<String>,
    pub mode_state_template: Option<String>,
    pub mode_state_topic: Option<String>,
    pub modes: Option<Vec<String>>,
    pub optimistic: Option<bool>,
    pub payload_off: Option<String>,
    pub payload_on: Option<String>,
    pub power_command_template: Option<String>,
    pub power_command_topic: Option<String>,
    pub precision: Option<f64>,
    pub temperature_command_template: Option<String>,
    pub temperature_command_topic: Option<String>,
    pub temperature_state_template: Option<String>,
    pub temperature_state_topic: Option<String>,
    pub temperature_unit: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for WaterHeater {
    const KIND: Kind = Kind::WaterHeater;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("currentTemperatureTemplate", s.current_temperature_template.clone())
            .set("currentTemperatureTopic", s.current_temperature_topic.clone())
            .set("initial", s.initial)
            .set("maxTemp", s.max_temp)
            .set("minTemp", s.min_temp)
            .set("modeCommandTemplate", s.mode_command_template.clone())
            .set("modeCommandTopic", s.mode_command_topic.clone())
            .set("modeStateTemplate", s.mode_state_template.clone())
            .set("modeStateTopic", s.mode_state_topic.clone())
            .set("modes", s.modes.clone())
            .set("optimistic", s.optimistic)
            .set("payloadOff", s.payload_off.clone())
            .set("payloadOn", s.payload_on.clone())
            .set("powerCommandTemplate", s.power_command_template.clone())
            .set("powerCommandTopic", s.power_command_topic.clone())
            .set("precision", s.precision)
            .set("temperatureCommandTemplate", s.temperature_command_template.clone())
            .set("temperatureCommandTopic", s.temperature_command_topic.clone())
            .set("temperatureStateTemplate", s.temperature_state_template.clone())
            .set("temperatureStateTopic", s.temperature_state_topic.clone())
            .set("temperatureUnit", s.temperature_unit.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
