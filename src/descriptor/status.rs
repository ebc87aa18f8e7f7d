//! Entity status (spec §3): observed state co-located with the descriptor.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ConditionType {
    Published,
    #[serde(rename = "MQTTConnected")]
    MqttConnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,
    pub status: ConditionStatus,
    pub reason: String,
    pub message: String,
    pub last_transition_time: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityStatus {
    pub observed_generation: Option<i64>,
    pub last_published: Option<DateTime<Utc>>,
    pub discovery_topic: Option<String>,
    pub conditions: Vec<Condition>,
}

impl EntityStatus {
    pub fn condition(&self, type_: ConditionType) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.type_ == type_)
    }

    /// Sets a condition, following spec §4.4's update rule: if the type
    /// already exists and the status is unchanged, only `reason`/`message`
    /// are updated and the transition timestamp is preserved; otherwise the
    /// transition timestamp advances to `now`.
    pub fn set_condition(&mut self, type_: ConditionType, status: ConditionStatus, reason: &str, message: &str, now: DateTime<Utc>) {
        if let Some(existing) = self.conditions.iter_mut().find(|c| c.type_ == type_) {
            existing.reason = reason.to_string();
            existing.message = message.to_string();
            if existing.status != status {
                existing.status = status;
                existing.last_transition_time = now;
            }
            return;
        }
        self.conditions.push(Condition {
            type_,
            status,
            reason: reason.to_string(),
            message: message.to_string(),
            last_transition_time: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn new_condition_gets_current_transition_time() {
        let mut status = EntityStatus::default();
        status.set_condition(ConditionType::Published, ConditionStatus::True, "Success", "ok", t(100));
        let c = status.condition(ConditionType::Published).unwrap();
        assert_eq!(c.last_transition_time, t(100));
    }

    #[test]
    fn unchanged_status_preserves_transition_time() {
        let mut status = EntityStatus::default();
        status.set_condition(ConditionType::Published, ConditionStatus::True, "Success", "ok", t(100));
        status.set_condition(ConditionType::Published, ConditionStatus::True, "Success", "still ok", t(200));
        let c = status.condition(ConditionType::Published).unwrap();
        assert_eq!(c.last_transition_time, t(100));
        assert_eq!(c.message, "still ok");
    }

    #[test]
    fn changed_status_advances_transition_time() {
        let mut status = EntityStatus::default();
        status.set_condition(ConditionType::Published, ConditionStatus::True, "Success", "ok", t(100));
        status.set_condition(ConditionType::Published, ConditionStatus::False, "PublishFailed", "broker down", t(200));
        let c = status.condition(ConditionType::Published).unwrap();
        assert_eq!(c.last_transition_time, t(200));
        assert_eq!(c.status, ConditionStatus::False);
    }
}
