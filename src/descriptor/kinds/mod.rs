//! One module per entity kind, mirroring `api/v1alpha1/*_types.go` in the
//! original source: a `#[derive(CustomResource)]` spec struct plus the
//! kind-specific builder function spec §4.5 asks for.

pub mod alarm_control_panel;
pub mod binary_sensor;
pub mod button;
pub mod camera;
pub mod climate;
pub mod cover;
pub mod device;
pub mod device_tracker;
pub mod device_trigger;
pub mod event;
pub mod fan;
pub mod humidifier;
pub mod image;
pub mod lawn_mower;
pub mod light;
pub mod lock;
pub mod notify;
pub mod number;
pub mod scene;
pub mod select;
pub mod sensor;
pub mod siren;
pub mod switch;
pub mod tag;
pub mod text;
pub mod update;
pub mod vacuum;
pub mod valve;
pub mod water_heater;
