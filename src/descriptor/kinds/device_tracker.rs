//! A presence-detection entity reporting home/away/zone state.

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
    kind = "DeviceTracker",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceTrackerSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub payload_home: Option<String>,
    pub payload_not_home: Option<String>,
    pub payload_reset: Option<String>,
    pub source_type: Option<String>,
    pub state_topic: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for DeviceTracker {
    const KIND: Kind = Kind::DeviceTracker;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("payloadHome", s.payload_home.clone())
            .set("payloadNotHome", s.payload_not_home.clone())
            .set("payloadReset", s.payload_reset.clone())
            .set("sourceType", s.source_type.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
