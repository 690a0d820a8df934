pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::probe::{build_client, classify, fetch_status};
    pub use super::result::{HttpReply, ProbeOutcome};
}
