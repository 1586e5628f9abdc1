//! # Course Scheduling Core
//!
//! Domain types and scheduling logic for assigning course sections to a
//! teacher, a classroom and a weekly time slot without double-booking either.
//!
//! - [`conflict`]: overlap detection between weekly time slots
//! - [`engine`]: manual and automatic assignment on top of a [`store::ScheduleStore`]
//! - [`store`]: the storage boundary and an in-memory implementation
//! - [`config`]: the candidate space searched by automatic scheduling

pub mod config;
pub mod conflict;
pub mod engine;
pub mod errors;
pub mod models;
pub mod store;

pub use config::SchedulerConfig;
pub use engine::SchedulingEngine;
pub use errors::{SchedError, SchedResult};
pub use store::{ScheduleStore, memory::MemoryStore};
