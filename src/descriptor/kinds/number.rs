//! A settable numeric value within optional min/max/step bounds.

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
    kind = "Number",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub state_topic: Option<String>,
    pub value_template: Option<String>,
    pub command_topic: Option<String>,
    pub command_template: Option<String>,
    pub optimistic: Option<bool>,
    pub device_class: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mode: Option<String>,
    pub payload_reset: Option<String>,
    pub step: Option<f64>,
    pub unit_of_measurement: Option<String>,
}

impl Reconcilable for Number {
    const KIND: Kind = Kind::Number;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("stateTopic", s.state_topic.clone())
            .set("valueTemplate", s.value_template.clone())
            .set("commandTopic", s.command_topic.clone())
            .set("commandTemplate", s.command_template.clone())
            .set("optimistic", s.optimistic)
            .set("deviceClass", s.device_class.clone())
            .set("min", s.min)
            .set("max", s.max)
            .set("mode", s.mode.clone())
            .set("payloadReset", s.payload_reset.clone())
            .set("step", s.step)
            .set("unitOfMeasurement", s.unit_of_measurement.clone());
    }
}
