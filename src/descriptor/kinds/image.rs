//! An image entity fed by a URL or a raw-bytes MQTT topic.

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
    kind = "Image",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub content_type: Option<String>,
    pub image_encoding: Option<String>,
    pub image_topic: Option<String>,
    pub url_template: Option<String>,
    pub url_topic: Option<String>,
}

impl Reconcilable for Image {
    const KIND: Kind = Kind::Image;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("contentType", s.content_type.clone())
            .set("imageEncoding", s.image_encoding.clone())
            .set("imageTopic", s.image_topic.clone())
            .set("urlTemplate", s.url_template.clone())
            .set("urlTopic", s.url_topic.clone());
    }
}
