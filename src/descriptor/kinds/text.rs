//! A settable free-form text value, optionally masked or pattern-constrained.

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
    kind = "Text",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_topic: Option<String>,
    pub command_template: Option<String>,
    /// `text` or `password` (masks the entry field in the consumer's UI).
    pub mode: Option<String>,
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub pattern: Option<String>,
    pub state_topic: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Text {
    const KIND: Kind = Kind::Text;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("commandTopic", s.command_topic.clone())
            .set("commandTemplate", s.command_template.clone())
            .set("mode", s.mode.clone())
            .set("min", s.min)
            .set("max", s.max)
            .set("pattern", s.pattern.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
