//! A still-image camera fed by a raw-bytes MQTT topic (spec §4.5).

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
    kind = "Camera",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub topic: Option<String>,
    pub image_encoding: Option<String>,
    pub state_class: Option<String>,
    pub expire_after: Option<i64>,
}

impl Reconcilable for Camera {
    const KIND: Kind = Kind::Camera;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("topic", s.topic.clone())
            .set("imageEncoding", s.image_encoding.clone())
            .set("stateClass", s.state_class.clone())
            .set("expireAfter", s.expire_after);
    }
}
