//! Scheduler layer for the engine
//!
//! This layer drives status polling for every tracked job. One tick loop
//! serves all job kinds; it suspends itself when nothing is left to poll
//! and is restarted by the orchestrator on the next submission.

pub mod poller;

pub use poller::{PollState, Poller};
