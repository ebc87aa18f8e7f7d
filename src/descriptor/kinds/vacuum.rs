//! A state-based robot vacuum with fan speed and command set.

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
    kind = "Vacuum",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct VacuumSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    /// `legacy` or `state` (spec §4.5).
    pub schema: Option<String>,
    pub command_topic: Option<String>,
    pub fan_speed_list: Option<Vec<String>>,
    pub payload_clean_spot: Option<String>,
    pub payload_locate: Option<String>,
    pub payload_pause: Option<String>,
    pub payload_return_to_base: Option<String>,
    pub payload_start: Option<String>,
    pub payload_stop: Option<String>,
    pub send_command_topic: Option<String>,
    pub set_fan_speed_topic: Option<String>,
    pub state_topic: Option<String>,
    pub supported_features: Option<Vec<String>>,
}

impl Reconcilable for Vacuum {
    const KIND: Kind = Kind::Vacuum;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("schema", s.schema.clone())
            .set("commandTopic", s.command_topic.clone())
            .set("fanSpeedList", s.fan_speed_list.clone())
            .set("payloadCleanSpot", s.payload_clean_spot.clone())
            .set("payloadLocate", s.payload_locate.clone())
            .set("payloadPause", s.payload_pause.clone())
            .set("payloadReturnToBase", s.payload_return_to_base.clone())
            .set("payloadStart", s.payload_start.clone())
            .set("payloadStop", s.payload_stop.clone())
            .set("sendCommandTopic", s.send_command_topic.clone())
            .set("setFanSpeedTopic", s.set_fan_speed_topic.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("supportedFeatures", s.supported_features.clone());
    }
}
