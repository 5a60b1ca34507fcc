//! Response Partitioner — deterministic string splitting over the model's
//! Markdown response. Not a parser: a fixed sequence of at most five split
//! operations on literal markers. An absent marker silently skips its
//! subsection; malformed output degrades to missing sections, never an error.

/// Heading separating resume info from the skill comparison.
pub const COMPARISON_HEADING: &str = "### 🔍 Resume vs Job Description Skills";

const MATCHING_MARKER: &str = "✅";
const MISSING_MARKER: &str = "❌";
const EXTRA_MARKER: &str = "💡";
const SCORE_MARKER: &str = "📊";

/// The model's response split into its two top-level sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisBreakdown {
    /// Everything before the comparison heading, verbatim.
    pub resume_info: String,
    /// Present only when the response contains the comparison heading.
    pub comparison: Option<SkillComparison>,
}

/// Raw comparison subsections, each the exact text between its marker and
/// the next one. Cleaning happens at presentation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillComparison {
    pub matching: Option<String>,
    pub missing: Option<String>,
    pub extra: Option<String>,
    pub score: Option<String>,
}

/// Stage 1: split once on [`COMPARISON_HEADING`]. Without the heading the
/// whole response is resume info, which is also the served behavior when
/// the model ignores a supplied JD.
pub fn partition_response(content: &str) -> AnalysisBreakdown {
    match content.split_once(COMPARISON_HEADING) {
        Some((resume_info, comparison)) => AnalysisBreakdown {
            resume_info: resume_info.to_string(),
            comparison: Some(partition_comparison(comparison)),
        },
        None => AnalysisBreakdown {
            resume_info: content.to_string(),
            comparison: None,
        },
    }
}

/// Stage 2: slice the comparison body on the four markers in order.
/// The ✅ block runs to the first ❌, ❌ to 💡, 💡 to 📊, 📊 to the end.
fn partition_comparison(text: &str) -> SkillComparison {
    SkillComparison {
        matching: slice_between(text, MATCHING_MARKER, Some(MISSING_MARKER)),
        missing: slice_between(text, MISSING_MARKER, Some(EXTRA_MARKER)),
        extra: slice_between(text, EXTRA_MARKER, Some(SCORE_MARKER)),
        score: slice_between(text, SCORE_MARKER, None),
    }
}

/// The text after the first `marker`, cut at the first `until` when one is
/// given and present. `None` when the marker itself is absent.
fn slice_between(text: &str, marker: &str, until: Option<&str>) -> Option<String> {
    let (_, after) = text.split_once(marker)?;
    let block = match until.and_then(|m| after.split_once(m)) {
        Some((block, _)) => block,
        None => after,
    };
    Some(block.to_string())
}

/// Strips Markdown chrome for panel display: `###`/`##` sequences are
/// removed, each line loses leading `#`, `-`, `•` and whitespace plus
/// trailing `-`, `•` and whitespace, and blank lines are dropped.
/// Only leading `#` is stripped, so skills like "C#" keep their name.
pub fn clean_text_block(text: &str) -> String {
    text.replace("###", "")
        .replace("##", "")
        .lines()
        .map(|line| {
            line.trim_start_matches(|c: char| matches!(c, '#' | '-' | '•') || c.is_whitespace())
                .trim_end_matches(|c: char| matches!(c, '-' | '•') || c.is_whitespace())
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME_PART: &str =
        "### 👤 Personal Details\n- **Name:** John Doe\n\n### 🛠 Skills\n- Python, SQL\n\n";

    fn full_response() -> String {
        format!(
            "{RESUME_PART}{COMPARISON_HEADING}\n\
             - ✅ **Matching Skills:** Python\n\
             - ❌ **Missing Skills (JD requires but resume lacks):** AWS\n\
             - 💡 **Extra Skills (in resume but not in JD):** SQL\n\
             - 📊 **Match Score:** 50%\n"
        )
    }

    #[test]
    fn test_resume_info_is_everything_before_the_heading() {
        let breakdown = partition_response(&full_response());
        assert_eq!(breakdown.resume_info, RESUME_PART);
    }

    #[test]
    fn test_each_subsection_is_the_exact_text_between_markers() {
        let comparison = partition_response(&full_response()).comparison.unwrap();
        assert_eq!(
            comparison.matching.as_deref(),
            Some(" **Matching Skills:** Python\n- ")
        );
        assert_eq!(
            comparison.missing.as_deref(),
            Some(" **Missing Skills (JD requires but resume lacks):** AWS\n- ")
        );
        assert_eq!(
            comparison.extra.as_deref(),
            Some(" **Extra Skills (in resume but not in JD):** SQL\n- ")
        );
        assert_eq!(comparison.score.as_deref(), Some(" **Match Score:** 50%\n"));
    }

    #[test]
    fn test_without_heading_the_whole_response_is_resume_info() {
        let content = "### 👤 Personal Details\n- **Name:** Jane\n";
        let breakdown = partition_response(content);
        assert_eq!(breakdown.resume_info, content);
        assert!(breakdown.comparison.is_none());
    }

    #[test]
    fn test_absent_matching_marker_skips_only_that_subsection() {
        let response = full_response().replace("✅ **Matching Skills:** Python\n- ", "");
        let comparison = partition_response(&response).comparison.unwrap();
        assert!(comparison.matching.is_none());
        assert_eq!(
            comparison.missing.as_deref(),
            Some(" **Missing Skills (JD requires but resume lacks):** AWS\n- ")
        );
        assert!(comparison.extra.is_some());
        assert!(comparison.score.is_some());
    }

    #[test]
    fn test_heading_without_markers_yields_empty_comparison() {
        let response = format!("{RESUME_PART}{COMPARISON_HEADING}\nNothing to compare.\n");
        let breakdown = partition_response(&response);
        assert_eq!(breakdown.comparison, Some(SkillComparison::default()));
    }

    #[test]
    fn test_score_block_runs_to_end_of_response() {
        let response = format!("{COMPARISON_HEADING}\n📊 85% of JD skills covered");
        let comparison = partition_response(&response).comparison.unwrap();
        assert_eq!(comparison.score.as_deref(), Some(" 85% of JD skills covered"));
    }

    #[test]
    fn test_empty_response_degrades_to_empty_resume_info() {
        let breakdown = partition_response("");
        assert_eq!(breakdown.resume_info, "");
        assert!(breakdown.comparison.is_none());
    }

    #[test]
    fn test_clean_removes_headers_and_bullets() {
        let cleaned = clean_text_block("### Skills\n- Python\n• SQL\n## Notes ##\n");
        assert_eq!(cleaned, "Skills\nPython\nSQL\nNotes");
    }

    #[test]
    fn test_clean_drops_blank_lines() {
        assert_eq!(clean_text_block("\n\n  \n- a\n\n- b\n"), "a\nb");
    }

    #[test]
    fn test_clean_keeps_trailing_hash_in_skill_names() {
        assert_eq!(clean_text_block("- C#, F#\n"), "C#, F#");
    }

    /// No output line may begin with '#', '-', '•', or whitespace,
    /// whatever the input looks like.
    #[test]
    fn test_clean_postcondition_on_hostile_input() {
        let hostile = "#lead\n  indented\n-•-# mixed\n\t\ttabbed\n###### deep header\nplain";
        for line in clean_text_block(hostile).lines() {
            let first = line.chars().next().expect("blank line survived cleaning");
            assert!(
                !matches!(first, '#' | '-' | '•') && !first.is_whitespace(),
                "line {line:?} starts with a stripped character"
            );
        }
    }
}
