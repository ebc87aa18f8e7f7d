//! A firmware/software update entity with install command and release metadata.

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
    kind = "Update",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub command_topic: Option<String>,
    pub device_class: Option<String>,
    pub display_precision: Option<i32>,
    pub latest_version_template: Option<String>,
    pub latest_version_topic: Option<String>,
    pub payload_install: Option<String>,
    pub release_summary: Option<String>,
    pub release_url: Option<String>,
    pub state_topic: Option<String>,
    pub title: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Update {
    const KIND: Kind = Kind::Update;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("commandTopic", s.command_topic.clone())
            .set("deviceClass", s.device_class.clone())
            .set("displayPrecision", s.display_precision)
            .set("latestVersionTemplate", s.latest_version_template.clone())
            .set("latestVersionTopic", s.latest_version_topic.clone())
            .set("payloadInstall", s.payload_install.clone())
            .set("releaseSummary", s.release_summary.clone())
            .set("releaseUrl", s.release_url.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("title", s.title.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
