use std::sync::Arc;

use parking_lot::RwLock;
use unicode_truncate::UnicodeTruncateStr;

use super::{LinkIndicator, StatusIndicator};

/// The set of indicators currently published. Cheap to clone; clones share
/// the same indicators, so links can be added or removed while probes run.
#[derive(Debug, Clone, Default)]
pub struct IndicatorBoard {
    links: Arc<RwLock<Vec<Arc<LinkIndicator>>>>,
}

impl IndicatorBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, link: LinkIndicator) -> Arc<LinkIndicator> {
        let link = Arc::new(link);
        self.links.write().push(link.clone());
        link
    }

    /// Remove every indicator with the given name. Returns how many were removed.
    pub fn remove(&self, name: &str) -> usize {
        let mut links = self.links.write();
        let before = links.len();
        links.retain(|link| link.name() != name);
        before - links.len()
    }

    /// All indicators whose link target contains `marker`.
    pub fn query(&self, marker: &str) -> Vec<Arc<LinkIndicator>> {
        self.links
            .read()
            .iter()
            .filter(|link| link.href().contains(marker))
            .cloned()
            .collect()
    }

    pub fn snapshot(&self) -> Vec<Arc<LinkIndicator>> {
        self.links.read().clone()
    }

    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }

    /// One aligned line per indicator: `name | label | tooltip`.
    pub fn render(&self) -> Vec<String> {
        let links = self.snapshot();
        let width = links.iter().map(|l| l.name().len()).max().unwrap_or(10);
        links
            .iter()
            .map(|link| {
                let p = link.presentation();
                format!(
                    "{} | {} | {}",
                    to_fixed_width(link.name(), width),
                    p.label,
                    p.tooltip
                )
            })
            .collect()
    }
}

fn to_fixed_width(input: &str, width: usize) -> String {
    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}
