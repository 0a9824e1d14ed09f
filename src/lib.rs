//! Wayfinder — conversational trip-planning assistant.
//!
//! Accepts free-text travel requests, hands them to an LLM-backed agent
//! that can call a weather lookup, an event lookup, and an itinerary
//! drafting tool, and returns the model's final answer in a
//! success/error envelope.
//!
//! # Quick Start
//!
//! ```no_run
//! use wayfinder::prelude::*;
//!
//! # async fn example() -> wayfinder::error::Result<()> {
//! let config = WayfinderConfig::from_env();
//! let planner = TripPlanner::from_config(&config)?;
//!
//! let mut sessions = SessionManager::new();
//! let session = sessions.get_or_create("demo");
//!
//! let result = planner
//!     .plan_trip(session, TripRequest::new("Plan a trip to Kyoto from 12/23 to 1/2"))
//!     .await;
//! if result.success {
//!     println!("{}", result.data.unwrap());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod forecast;
pub mod generation;
pub mod planner;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;
