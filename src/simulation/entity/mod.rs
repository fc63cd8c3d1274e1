//! Entities: physiology, sensing, digestion and hormone feedback.

mod digestion;
mod entity;
mod hormones;
mod physiology;
mod sensors;

pub use digestion::{DigestionQueue, DigestionStep, Meal};
pub use entity::*;
pub use hormones::HormoneResponse;
pub use physiology::{MAX_HUNGER, Physiology};
pub use sensors::{EmptyWorld, EntityRef, FoodSighting, WorldView, assemble as assemble_sensors};
