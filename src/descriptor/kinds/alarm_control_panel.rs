//! An alarm control panel: arm/disarm/trigger commands and a required code gate.

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
    kind = "AlarmControlPanel",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct AlarmControlPanelSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub code: Option<String>,
    pub code_arm_required: Option<bool>,
    pub code_disarm_required: Option<bool>,
    pub code_trigger_required: Option<bool>,
    pub command_template: Option<String>,
    pub command_topic: Option<String>,
    pub payload_arm_away: Option<String>,
    pub payload_arm_home: Option<String>,
    pub payload_arm_night: Option<String>,
    pub payload_arm_vacation: Option<String>,
    pub payload_arm_custom_bypass: Option<String>,
    pub payload_disarm: Option<String>,
    pub payload_trigger: Option<String>,
    pub state_topic: Option<String>,
    pub supported_features: Option<Vec<String>>,
    pub value_template: Option<String>,
}

impl Reconcilable for AlarmControlPanel {
    const KIND: Kind = Kind::AlarmControlPanel;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("code", s.code.clone())
            .set("codeArmRequired", s.code_arm_required)
            .set("codeDisarmRequired", s.code_disarm_required)
            .set("codeTriggerRequired", s.code_trigger_required)
            .set("commandTemplate", s.command_template.clone())
            .set("commandTopic", s.command_topic.clone())
            .set("payloadArmAway", s.payload_arm_away.clone())
            .set("payloadArmHome", s.payload_arm_home.clone())
            .set("payloadArmNight", s.payload_arm_night.clone())
            .set("payloadArmVacation", s.payload_arm_vacation.clone())
            .set("payloadArmCustomBypass", s.payload_arm_custom_bypass.clone())
            .set("payloadDisarm", s.payload_disarm.clone())
            .set("payloadTrigger", s.payload_trigger.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("supportedFeatures", s.supported_features.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
