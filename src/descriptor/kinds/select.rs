//! A settable value constrained to a fixed list of options.

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
    kind = "Select",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_topic: Option<String>,
    pub command_template: Option<String>,
    pub options: Option<Vec<String>>,
    pub optimistic: Option<bool>,
    pub state_topic: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Select {
    const KIND: Kind = Kind::Select;

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
            .set("options", s.options.clone())
            .set("optimistic", s.optimistic)
            .set("stateTopic", s.state_topic.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
