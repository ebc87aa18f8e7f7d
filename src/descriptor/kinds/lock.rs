//! A lock with jammed/locking/unlocking intermediate states.

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
    kind = "Lock",
    namespaced,
    status = "EntityStatus"
)]
#[serde(rename_all = "camelCase", default)]
pub struct LockSpec {
    #[serde(flatten)]
    pub common: CommonSpec,

    pub code_format: Option<String>,
    pub command_template: Option<String>,
    pub command_topic: Option<String>,
    pub optimistic: Option<bool>,
    pub payload_lock: Option<String>,
    pub payload_unlock: Option<String>,
    pub payload_open: Option<String>,
    pub payload_reset: Option<String>,
    pub state_jammed: Option<String>,
    pub state_locked: Option<String>,
    pub state_locking: Option<String>,
    pub state_topic: Option<String>,
    pub state_unlocked: Option<String>,
    pub state_unlocking: Option<String>,
    pub value_template: Option<String>,
}

impl Reconcilable for Lock {
    const KIND: Kind = Kind::Lock;

    fn common(&self) -> &CommonSpec {
        &self.spec.common
    }

    fn status(&self) -> Option<&EntityStatus> {
        self.status.as_ref()
    }

    fn build_payload(&self, b: &mut PayloadBuilder) {
        let s = &self.spec;
        b.set("codeFormat", s.code_format.clone())
            .set("commandTemplate", s.command_template.clone())
            .set("commandTopic", s.command_topic.clone())
            .set("optimistic", s.optimistic)
            .set("payloadLock", s.payload_lock.clone())
            .set("payloadUnlock", s.payload_unlock.clone())
            .set("payloadOpen", s.payload_open.clone())
            .set("payloadReset", s.payload_reset.clone())
            .set("stateJammed", s.state_jammed.clone())
            .set("stateLocked", s.state_locked.clone())
            .set("stateLocking", s.state_locking.clone())
            .set("stateTopic", s.state_topic.clone())
            .set("stateUnlocked", s.state_unlocked.clone())
            .set("stateUnlocking", s.state_unlocking.clone())
            .set("valueTemplate", s.value_template.clone());
    }
}
