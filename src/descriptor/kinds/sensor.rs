//! A read-only measurement entity (spec §4.5).

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
    kind = "Sensor",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct SensorSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub state_topic: Option<String>,
    pub value_template: Option<String>,
    pub device_class: Option<String>,
    pub force_update: Option<bool>,
    pub last_reset_value_template: Option<String>,
    pub suggested_display_precision: Option<u8>,
    pub state_class: Option<String>,
    pub unit_of_measurement: Option<String>,
}

impl Reconcilable for Sensor {
    const KIND: Kind = Kind::Sensor;

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
            .set("deviceClass", s.device_class.clone())
            .set("forceUpdate", s.force_update)
            .set("lastResetValueTemplate", s.last_reset_value_template.clone())
            .set("suggestedDisplayPrecision", s.suggested_display_precision)
            .set("stateClass", s.state_class.clone())
            .set("unitOfMeasurement", s.unit_of_measurement.clone());
    }
}
