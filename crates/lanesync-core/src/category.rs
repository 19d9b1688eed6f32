use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of groupings the attachment panel renders.
///
/// Persisted categories are free-form strings; this enum exists only at the
/// display layer, where anything unrecognized degrades to `Other`. The store
/// keeps the original string so custom categories are never silently lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentCategory {
    RateCon,
    Bol,
    Pod,
    Invoice,
    Lumper,
    Other,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 6] = [
        DocumentCategory::RateCon,
        DocumentCategory::Bol,
        DocumentCategory::Pod,
        DocumentCategory::Invoice,
        DocumentCategory::Lumper,
        DocumentCategory::Other,
    ];

    /// Reconcile a stored category string against the fixed display list.
    /// Matching ignores case and whitespace ("RateCon", "rate con" and
    /// "Rate Con" all group together); everything else is `Other`.
    pub fn from_label(label: &str) -> Self {
        let folded: String = label
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "ratecon" => DocumentCategory::RateCon,
            "bol" => DocumentCategory::Bol,
            "pod" => DocumentCategory::Pod,
            "invoice" => DocumentCategory::Invoice,
            "lumper" => DocumentCategory::Lumper,
            _ => DocumentCategory::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentCategory::RateCon => "Rate Con",
            DocumentCategory::Bol => "BOL",
            DocumentCategory::Pod => "POD",
            DocumentCategory::Invoice => "Invoice",
            DocumentCategory::Lumper => "Lumper",
            DocumentCategory::Other => "Other",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_resolve() {
        assert_eq!(DocumentCategory::from_label("RateCon"), DocumentCategory::RateCon);
        assert_eq!(DocumentCategory::from_label("Rate Con"), DocumentCategory::RateCon);
        assert_eq!(DocumentCategory::from_label("bol"), DocumentCategory::Bol);
        assert_eq!(DocumentCategory::from_label("POD"), DocumentCategory::Pod);
        assert_eq!(DocumentCategory::from_label("invoice"), DocumentCategory::Invoice);
        assert_eq!(DocumentCategory::from_label("Lumper"), DocumentCategory::Lumper);
        assert_eq!(DocumentCategory::from_label("Other"), DocumentCategory::Other);
    }

    #[test]
    fn unrecognized_labels_degrade_to_other() {
        assert_eq!(
            DocumentCategory::from_label("Customs Paperwork"),
            DocumentCategory::Other
        );
        assert_eq!(DocumentCategory::from_label(""), DocumentCategory::Other);
    }

    #[test]
    fn labels_match_panel_headings() {
        let labels: Vec<&str> = DocumentCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec!["Rate Con", "BOL", "POD", "Invoice", "Lumper", "Other"]
        );
    }
}
