//! Presentation layer: maps raw comparison slices onto display panels a
//! client can render without knowing the marker conventions.

use serde::Serialize;

use crate::analysis::partitioner::{clean_text_block, SkillComparison};

/// Display title of the comparison section, heading chrome stripped.
pub const COMPARISON_SECTION_TITLE: &str = "🔍 Resume vs Job Description Skills";

/// Visual weight of a panel. Serialized lowercase for the JSON surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// One renderable block of the comparison section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub title: String,
    pub severity: Severity,
    pub body: String,
}

/// Builds the panel list for a partitioned comparison. Subsections whose
/// marker was absent produce no panel; the rest keep marker order.
pub fn comparison_panels(comparison: &SkillComparison) -> Vec<Panel> {
    let blocks = [
        (&comparison.matching, "✅ Matching Skills", Severity::Success),
        (&comparison.missing, "❌ Missing Skills", Severity::Error),
        (&comparison.extra, "💡 Extra Skills", Severity::Warning),
        (&comparison.score, "📊 Match Score", Severity::Info),
    ];

    blocks
        .into_iter()
        .filter_map(|(block, title, severity)| {
            block.as_deref().map(|text| Panel {
                title: title.to_string(),
                severity,
                body: clean_text_block(text),
            })
        })
        .collect()
}
