use std::fmt;

/// What the transport saw when the GET completed.
/// `status` is `None` when the response is opaque and cannot be inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpReply {
    pub status: Option<u16>,
}

impl HttpReply {
    pub fn status(code: u16) -> Self {
        HttpReply { status: Some(code) }
    }

    pub fn opaque() -> Self {
        HttpReply { status: None }
    }
}

/// The perceived reachability of the endpoint after one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Online,
    /// The endpoint answered with a non-success status or the request
    /// failed; the reason is shown to the user.
    Offline { reason: String },
    /// No answer within the budget, in milliseconds.
    Timeout { after_ms: u64 },
    /// The failure cannot be told apart from success (opaque mode).
    Unknown,
}

impl ProbeOutcome {
    pub fn is_online(&self) -> bool {
        matches!(self, ProbeOutcome::Online)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Online => write!(f, "online"),
            ProbeOutcome::Offline { reason } => write!(f, "offline ({reason})"),
            ProbeOutcome::Timeout { after_ms } => write!(f, "timeout after {after_ms}ms"),
            ProbeOutcome::Unknown => write!(f, "unknown"),
        }
    }
}
