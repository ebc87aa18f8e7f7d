//! A robotic lawn mower: dock/pause/start-mowing commands and activity state.

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
    kind = "LawnMower",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct LawnMowerSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub activity_state_topic: Option<String>,
    pub activity_value_template: Option<String>,
    pub dock_command_template: Option<String>,
    pub dock_command_topic: Option<String>,
    pub optimistic: Option<bool>,
    pub pause_command_template: Option<String>,
    pub pause_command_topic: Option<String>,
    pub start_mowing_template: Option<String>,
    pub start_mowing_command_topic: Option<String>,
}

impl Reconcilable for LawnMower {
    const KIND: Kind = Kind::LawnMower;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("activityStateTopic", s.activity_state_topic.clone())
            .set("activityValueTemplate", s.activity_value_template.clone())
            .set("dockCommandTemplate", s.dock_command_template.clone())
            .set("dockCommandTopic", s.dock_command_topic.clone())
            .set("optimistic", s.optimistic)
            .set("pauseCommandTemplate", s.pause_command_template.clone())
            .set("pauseCommandTopic", s.pause_command_topic.clone())
            .set("startMowingTemplate", s.start_mowing_template.clone())
            .set("startMowingCommandTopic", s.start_mowing_command_topic.clone());
    }
}
