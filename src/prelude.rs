//! Convenience re-exports for the common entry points.

pub use crate::config::WayfinderConfig;
pub use crate::error::{Result, WayfinderError};
pub use crate::planner::{PlanResult, PlanningSession, SessionManager, TripPlanner, TripRequest};
pub use crate::types::{ChatRole, ChatTurn};
