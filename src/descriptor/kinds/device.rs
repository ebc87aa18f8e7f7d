//! The standalone device descriptor a `deviceRef` points at (spec §3, §14).
//! Not itself reconciled or published to a discovery topic — it exists only
//! to be resolved by the base reconciler when a kind declares a reference
//! instead of an inline device block.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::descriptor::common::DeviceBlock;

#[derive(CustomResource, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "hass-crds.spontus.dev",
    version = "v1alpha1",
    kind = "MQTTDevice",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct MQTTDeviceSpec {
    #[serde(flatten)]
    pub device: DeviceBlock,
}
