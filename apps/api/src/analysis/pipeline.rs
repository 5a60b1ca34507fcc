//! Resume Analysis — orchestrates the full analysis pipeline.
//!
//! Flow: load_resume → combined text + preview → build prompt →
//!       LLM complete → partition response → panels → response.
//!
//! The model's output is treated as opaque Markdown: partitioning happens on
//! literal markers, and anything malformed degrades to fewer sections rather
//! than an error.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::partitioner::partition_response;
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::loader::{combined_text, load_resume, preview_text, ResumeUpload, TextSegment};
use crate::render::{comparison_panels, Panel, COMPARISON_SECTION_TITLE};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Rendered comparison section of an analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSection {
    pub heading: String,
    pub panels: Vec<Panel>,
}

/// Response from the analysis pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub file_name: String,
    pub preview: String,
    /// Everything before the comparison heading, served as-is.
    pub resume_info: String,
    /// Absent when no JD was given or the model skipped the comparison.
    pub comparison: Option<ComparisonSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full resume analysis pipeline.
///
/// Steps:
/// 1. load_resume() → Vec<TextSegment> (temp-file spool + extraction)
/// 2. combined_text() + preview_text()
/// 3. build_analysis_prompt() (sentinel stands in for a missing JD)
/// 4. llm.complete() → Markdown response
/// 5. partition_response() → AnalysisBreakdown
/// 6. comparison_panels() → display panels
pub async fn analyze_resume(
    llm: &dyn ChatModel,
    upload: ResumeUpload,
    jd_text: Option<String>,
) -> Result<AnalyzeResponse, AppError> {
    let file_name = upload.file_name.clone();

    // Step 1: Extraction is blocking file and parser work. spawn_blocking
    // keeps it off the async executor.
    info!("Extracting text from {}", file_name);
    let segments: Vec<TextSegment> = tokio::task::spawn_blocking(move || load_resume(&upload))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
        })??;

    // Step 2: Combine segments for the prompt; preview is capped separately.
    let text = combined_text(&segments);
    let preview = preview_text(&segments);
    info!(
        "Extracted {} text segment(s) from {}",
        segments.len(),
        file_name
    );

    // Step 3: Build the prompt. A blank JD counts as absent.
    let jd = jd_text.as_deref().filter(|jd| !jd.trim().is_empty());
    let jd_provided = jd.is_some();
    let prompt = build_analysis_prompt(&text, jd);

    // Step 4: Single model call. No response-format retry; the partitioning
    // below tolerates whatever comes back.
    let response = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis call failed: {e}")))?;

    // Step 5: Partition on the literal markers.
    let breakdown = partition_response(&response);
    if jd_provided && breakdown.comparison.is_none() {
        warn!(
            "Response for {} has no comparison heading despite a JD — serving resume info only",
            file_name
        );
    }

    // Step 6: Map raw subsections onto display panels.
    let comparison = breakdown.comparison.map(|c| ComparisonSection {
        heading: COMPARISON_SECTION_TITLE.to_string(),
        panels: comparison_panels(&c),
    });

    let analysis_id = Uuid::new_v4();
    info!(
        "Analysis {} complete for {} (comparison: {})",
        analysis_id,
        file_name,
        comparison.is_some()
    );

    Ok(AnalyzeResponse {
        analysis_id,
        analyzed_at: Utc::now(),
        file_name,
        preview,
        resume_info: breakdown.resume_info,
        comparison,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use crate::analysis::partitioner::COMPARISON_HEADING;
    use crate::analysis::prompts::JD_SENTINEL;
    use crate::llm_client::LlmError;
    use crate::render::Severity;

    struct ScriptedModel {
        response: String,
        seen_prompt: Mutex<Option<String>>,
    }

    impl ScriptedModel {
        fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn txt_upload() -> ResumeUpload {
        ResumeUpload {
            file_name: "resume.txt".to_string(),
            bytes: Bytes::from_static(b"John Doe, Python, SQL"),
        }
    }

    fn scripted_markdown() -> String {
        format!(
            "### 👤 Personal Details\n- **Name:** John Doe\n\n{COMPARISON_HEADING}\n\
             - ✅ **Matching Skills:** Python\n\
             - ❌ **Missing Skills (JD requires but resume lacks):** AWS\n\
             - 💡 **Extra Skills (in resume but not in JD):** SQL\n\
             - 📊 **Match Score:** 50%\n"
        )
    }

    #[tokio::test]
    async fn test_analyze_renders_matching_and_missing_skills() {
        let model = ScriptedModel::new(scripted_markdown());
        let response = analyze_resume(&model, txt_upload(), Some("Python, AWS".to_string()))
            .await
            .unwrap();

        assert_eq!(response.file_name, "resume.txt");
        assert!(response.preview.contains("John Doe, Python, SQL"));
        assert!(response.resume_info.contains("John Doe"));

        let comparison = response.comparison.expect("comparison section");
        assert_eq!(comparison.heading, COMPARISON_SECTION_TITLE);

        let matching = comparison
            .panels
            .iter()
            .find(|p| p.severity == Severity::Success)
            .expect("matching panel");
        assert!(matching.body.contains("Python"));

        let missing = comparison
            .panels
            .iter()
            .find(|p| p.severity == Severity::Error)
            .expect("missing panel");
        assert!(missing.body.contains("AWS"));
    }

    #[tokio::test]
    async fn test_prompt_carries_extracted_text_and_jd() {
        let model = ScriptedModel::new("anything");
        analyze_resume(&model, txt_upload(), Some("Python, AWS".to_string()))
            .await
            .unwrap();

        let prompt = model.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("John Doe, Python, SQL"));
        assert!(prompt.contains("Python, AWS"));
        assert!(!prompt.contains(JD_SENTINEL));
    }

    #[tokio::test]
    async fn test_missing_jd_substitutes_the_sentinel() {
        let model = ScriptedModel::new("anything");
        analyze_resume(&model, txt_upload(), None).await.unwrap();

        let prompt = model.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains(JD_SENTINEL));
    }

    #[tokio::test]
    async fn test_response_without_heading_serves_resume_info_only() {
        let markdown = "### 👤 Personal Details\n- **Name:** John Doe\n";
        let model = ScriptedModel::new(markdown);
        let response = analyze_resume(&model, txt_upload(), Some("Python".to_string()))
            .await
            .unwrap();

        assert_eq!(response.resume_info, markdown);
        assert!(response.comparison.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_rejected_before_the_model_call() {
        let upload = ResumeUpload {
            file_name: "resume.rtf".to_string(),
            bytes: Bytes::from_static(b"whatever"),
        };
        let err = analyze_resume(&ScriptedModel::new(""), upload, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFileType(_)));
    }

    #[tokio::test]
    async fn test_model_failure_maps_to_llm_error() {
        let err = analyze_resume(&FailingModel, txt_upload(), None)
            .await
            .unwrap_err();
        match err {
            AppError::Llm(message) => assert!(message.contains("Resume analysis call failed")),
            other => panic!("expected Llm error, got {other:?}"),
        }
    }
}
