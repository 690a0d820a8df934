use crate::http_probe::result::ProbeOutcome;

pub const GREEN: &str = "#16A34A";
pub const RED: &str = "#DC2626";
pub const AMBER: &str = "#F59E0B";

/// The three fields written to an indicator.
/// `color` is `None` until the first probe cycle touches the indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub label: String,
    pub color: Option<&'static str>,
    pub tooltip: String,
}

impl Presentation {
    /// The state of an indicator no probe has touched yet.
    pub fn idle() -> Self {
        Presentation {
            label: "API Status".to_string(),
            color: None,
            tooltip: String::new(),
        }
    }

    /// Shown between discovery and the probe result.
    pub fn checking() -> Self {
        Presentation {
            label: "🟡 API Status (Checking...)".to_string(),
            color: Some(AMBER),
            tooltip: "Checking API status...".to_string(),
        }
    }

    pub fn for_outcome(outcome: &ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Online => Presentation {
                label: "🟢 API Status (Online)".to_string(),
                color: Some(GREEN),
                tooltip: "API is online and responding".to_string(),
            },
            ProbeOutcome::Offline { reason } => Presentation {
                label: "🔴 API Status (Offline)".to_string(),
                color: Some(RED),
                tooltip: format!("API is offline: {reason}"),
            },
            ProbeOutcome::Timeout { after_ms } => Presentation {
                label: "🔴 API Status (Timeout)".to_string(),
                color: Some(RED),
                tooltip: format!("API did not respond within {after_ms} ms"),
            },
            ProbeOutcome::Unknown => Presentation {
                label: "🟠 API Status (Unknown)".to_string(),
                color: Some(AMBER),
                tooltip: "API status could not be determined".to_string(),
            },
        }
    }

    pub fn is_checking(&self) -> bool {
        *self == Presentation::checking()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_online() {
        let p = Presentation::for_outcome(&ProbeOutcome::Online);
        assert!(p.label.contains("Online"));
        assert_eq!(p.color, Some("#16A34A"));
        assert_eq!(p.tooltip, "API is online and responding");
    }

    #[test]
    fn test_offline_carries_reason() {
        let p = Presentation::for_outcome(&ProbeOutcome::Offline {
            reason: "HTTP 500".to_string(),
        });
        assert!(p.label.contains("Offline"));
        assert_eq!(p.color, Some("#DC2626"));
        assert_eq!(p.tooltip, "API is offline: HTTP 500");
    }

    #[test]
    fn test_timeout_and_unknown() {
        let timeout = Presentation::for_outcome(&ProbeOutcome::Timeout { after_ms: 5000 });
        assert!(timeout.label.contains("Timeout"));
        assert_eq!(timeout.tooltip, "API did not respond within 5000 ms");

        let unknown = Presentation::for_outcome(&ProbeOutcome::Unknown);
        assert!(unknown.label.contains("Unknown"));
        assert_eq!(unknown.color, Some("#F59E0B"));
    }

    #[test]
    fn test_checking_is_distinct_from_outcomes() {
        assert!(Presentation::checking().is_checking());
        assert!(!Presentation::idle().is_checking());
        assert!(!Presentation::for_outcome(&ProbeOutcome::Unknown).is_checking());
    }
}
