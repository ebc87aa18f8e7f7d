//! A device automation trigger. Discovery topic uses the `device_automation`
//! component (see [`crate::topic::COMPONENT_TABLE`]); the wire payload omits
//! `unique_id` entirely (spec §4.5).

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
    kind = "DeviceTrigger",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceTriggerSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub automation_type: Option<String>,
    pub payload: Option<String>,
    pub topic: Option<String>,
    pub r#type: Option<String>,
    pub subtype: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for DeviceTrigger {
    const KIND: Kind = Kind::DeviceTrigger;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("automationType", s.automation_type.clone())
            .set("payload", s.payload.clone())
            .set("topic", s.topic.clone())
            .set("type", s.r#type.clone())
            .set("subtype", s.subtype.clone())
            .set("valueTemplate", s.value_template.clone());
    }

    fn stamps_unique_id() -> bool {
        false
    }
}
