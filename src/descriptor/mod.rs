//! The entity descriptor data model (spec §3) and the dispatch surface the
//! base reconciler drives every kind through (spec §9's Design Notes: one
//! dispatch table rather than 28 bespoke adapters).

pub mod common;
pub mod kinds;
pub mod status;

use crate::payload::PayloadBuilder;
use common::CommonSpec;
use status::EntityStatus;

/// The ~28 entity categories this controller knows how to publish, plus the
/// non-published `MQTTDevice` reference target (excluded from the discovery
/// component table, see [`crate::topic`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Button,
    Switch,
    Sensor,
    BinarySensor,
    Number,
    Select,
    Text,
    Scene,
    Tag,
    Light,
    Cover,
    Lock,
    Valve,
    Fan,
    Siren,
    Camera,
    Image,
    Notify,
    Update,
    Climate,
    Humidifier,
    WaterHeater,
    Vacuum,
    LawnMower,
    AlarmControlPanel,
    DeviceTracker,
    DeviceTrigger,
    Event,
}

impl Kind {
    /// All known kinds, in the order spec §6's table lists them.
    pub const ALL: [Kind; 28] = [
        Kind::Button,
        Kind::Switch,
        Kind::Sensor,
        Kind::BinarySensor,
        Kind::Number,
        Kind::Select,
        Kind::Text,
        Kind::Scene,
        Kind::Tag,
        Kind::Light,
        Kind::Cover,
        Kind::Lock,
        Kind::Valve,
        Kind::Fan,
        Kind::Siren,
        Kind::Camera,
        Kind::Image,
        Kind::Notify,
        Kind::Update,
        Kind::Climate,
        Kind::Humidifier,
        Kind::WaterHeater,
        Kind::Vacuum,
        Kind::LawnMower,
        Kind::AlarmControlPanel,
        Kind::DeviceTracker,
        Kind::DeviceTrigger,
        Kind::Event,
    ];
}

/// The three obligations spec §4.5 asks of each per-kind reconciler, modeled
/// as a trait instead of one adapter file per kind: fetch the concrete type
/// (via `kube::Resource`, already implied by `#[derive(CustomResource)]`),
/// expose the common block and status, and build the kind-specific payload.
pub trait Reconcilable: kube::Resource + Clone + Send + Sync + 'static {
    const KIND: Kind;

    fn common(&self) -> &CommonSpec;
    fn status(&self) -> Option<&EntityStatus>;

    /// Records this kind's attribute set into `builder`. Common fields
    /// (unique_id, device, availability, origin) are stamped by the base
    /// reconciler, not here — see spec §4.4 step 4.
    fn build_payload(&self, builder: &mut PayloadBuilder);

    /// Device-trigger and tag payloads omit `unique_id` from the wire
    /// contract (spec §4.5); every other kind includes it.
    fn stamps_unique_id() -> bool {
        true
    }
}
