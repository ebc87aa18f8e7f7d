//! An NFC/RFID tag scanner entry (spec §4.5: minimal kind-specific surface).

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
    kind = "Tag",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct TagSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub topic: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Tag {
    const KIND: Kind = Kind::Tag;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("topic", s.topic.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
