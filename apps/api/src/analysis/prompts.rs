//! The analysis prompt — one fixed template, filled by substitution.
//!
//! The template enumerates the exact output shape the model is asked to
//! follow; the partitioner depends on the model honoring the section
//! heading and the four emoji markers named here.

/// Substituted for `{jd_text}` when the user supplied no job description.
pub const JD_SENTINEL: &str = "No JD provided";

/// Analysis prompt template. Replace `{text}` and `{jd_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert resume parser and job match evaluator.
Given the resume text and job description, do two tasks:

---

### 1. Extract Resume Information
Present the resume details in a **professional Markdown layout** with sections:

### 👤 Personal Details
- **Name:** ...
- **Email:** ...
- **Phone:** ...
- **LinkedIn:** ...

### 🛠 Skills
- Skill1, Skill2, Skill3

### 🎓 Education
- Degree | Institute | Year

### 💼 Experience
- Role at Company (Duration)
- Short bullet point achievements

### 📂 Projects
- Project Name — short description

### 🏅 Certifications
- Certification Name — Issuer

### 🌐 Languages
- Language1, Language2

---

### 2. Compare Resume Skills with Job Description Skills
If job description is provided, add a section:

### 🔍 Resume vs Job Description Skills
- ✅ **Matching Skills:** list of skills found in both
- ❌ **Missing Skills (JD requires but resume lacks):** list of missing skills
- 💡 **Extra Skills (in resume but not in JD):** list of extra skills
- 📊 **Match Score:** percentage of JD skills that appear in resume

Rules:
- If no JD is provided, skip the comparison.
- Use bullet points for clarity.
- Keep it short, clean, and professional.

---

Resume text:
{text}

Job description:
{jd_text}"#;

/// Builds the full instruction prompt for one analysis.
///
/// Pure: identical inputs produce identical output. A missing or blank JD
/// substitutes [`JD_SENTINEL`], which the template's rules turn into
/// "skip the comparison".
pub fn build_analysis_prompt(resume_text: &str, jd_text: Option<&str>) -> String {
    let jd = match jd_text {
        Some(jd) if !jd.trim().is_empty() => jd,
        _ => JD_SENTINEL,
    };

    ANALYSIS_PROMPT_TEMPLATE
        .replace("{text}", resume_text)
        .replace("{jd_text}", jd)
}
