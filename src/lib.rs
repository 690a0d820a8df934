//! Keeps API status indicators in sync with the reachability of a single
//! health endpoint.
//!
//! A [`status::StatusProbe`] discovers the indicators that link to the probe
//! path, marks them as checking, issues one time-bounded GET and writes the
//! resulting presentation to all of them. The [`scheduler::Scheduler`] runs
//! those cycles on load, on an interval and when the viewer comes back.

pub mod config;
pub mod error;
pub mod http_probe;
pub mod indicator;
pub mod scheduler;
pub mod status;
