//! A light. Carries a schema tag (spec §4.5) selecting which template fields
//! are meaningful: `default` (discrete command/state topics per feature),
//! `json` (one JSON-encoded state/command pair) or `template` (command
//! rendered from a user template). All declared fields are forwarded
//! regardless of schema — the consumer ignores what its schema doesn't use.

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
    kind = "Light",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct LightSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub schema: Option<String>,
    pub command_topic: Option<String>,
    pub command_on_template: Option<String>,
    pub command_off_template: Option<String>,
    pub state_topic: Option<String>,
    pub state_value_template: Option<String>,
    pub payload_on: Option<String>,
    pub payload_off: Option<String>,
    pub optimistic: Option<bool>,

    pub brightness_command_topic: Option<String>,
    pub brightness_command_template: Option<String>,
    pub brightness_state_topic: Option<String>,
    pub brightness_value_template: Option<String>,
    pub brightness_scale: Option<i32>,

    pub color_mode_state_topic: Option<String>,
    pub color_mode_value_template: Option<String>,
    pub supported_color_modes: Option<Vec<String>>,

    pub rgb_command_topic: Option<String>,
    pub rgb_command_template: Option<String>,
    pub rgb_state_topic: Option<String>,
    pub rgb_value_template: Option<String>,

    pub color_temp_command_topic: Option<String>,
    pub color_temp_command_template: Option<String>,
    pub color_temp_state_topic: Option<String>,
    pub color_temp_value_template: Option<String>,
    pub max_mireds: Option<i32>,
    pub min_mireds: Option<i32>,

    pub effect_command_topic: Option<String>,
    pub effect_command_template: Option<String>,
    pub effect_state_topic: Option<String>,
    pub effect_value_template: Option<String>,
    pub effect_list: Option<Vec<String>>,

    pub hs_command_topic: Option<String>,
    pub hs_state_topic: Option<String>,
    pub hs_value_template: Option<String>,

    pub xy_command_topic: Option<String>,
    pub xy_state_topic: Option<String>,
    pub xy_value_template: Option<String>,

    pub on_command_type: Option<String>,
}

impl Reconcilable for Light {
    const KIND: Kind = Kind::Light;

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
            .set("commandOnTemplate", s.command_on_template.clone())
            .set("commandOffTemplate", s.command_off_template.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("stateValueTemplate", s.state_value_template.clone())
            .set("payloadOn", s.payload_on.clone())
            .set("payloadOff", s.payload_off.clone())
            .set("optimistic", s.optimistic)
            .set("brightnessCommandTopic", s.brightness_command_topic.clone())
            .set("brightnessCommandTemplate", s.brightness_command_template.clone())
            .set("brightnessStateTopic", s.brightness_state_topic.clone())
            .set("brightnessValueTemplate", s.brightness_value_template.clone())
            .set("brightnessScale", s.brightness_scale)
            .set("colorModeStateTopic", s.color_mode_state_topic.clone())
            .set("colorModeValueTemplate", s.color_mode_value_template.clone())
            .set("supportedColorModes", s.supported_color_modes.clone())
            .set("rgbCommandTopic", s.rgb_command_topic.clone())
            .set("rgbCommandTemplate", s.rgb_command_template.clone())
            .set("rgbStateTopic", s.rgb_state_topic.clone())
            .set("rgbValueTemplate", s.rgb_value_template.clone())
            .set("colorTempCommandTopic", s.color_temp_command_topic.clone())
            .set("colorTempCommandTemplate", s.color_temp_command_template.clone())
            .set("colorTempStateTopic", s.color_temp_state_topic.clone())
            .set("colorTempValueTemplate", s.color_temp_value_template.clone())
            .set("maxMireds", s.max_mireds)
            .set("minMireds", s.min_mireds)
            .set("effectCommandTopic", s.effect_command_topic.clone())
            .set("effectCommandTemplate", s.effect_command_template.clone())
            .set("effectStateTopic", s.effect_state_topic.clone())
            .set("effectValueTemplate", s.effect_value_template.clone())
            .set("effectList", s.effect_list.clone())
            .set("hsCommandTopic", s.hs_command_topic.clone())
            .set("hsStateTopic", s.hs_state_topic.clone())
            .set("hsValueTemplate", s.hs_value_template.clone())
            .set("xyCommandTopic", s.xy_command_topic.clone())
            .set("xyStateTopic", s.xy_state_topic.clone())
            .set("xyValueTemplate", s.xy_value_template.clone())
            .set("onCommandType", s.on_command_type.clone());
    }
}
