// Resume Analysis Engine
// Implements: prompt assembly, the analysis pipeline, marker partitioning.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod partitioner;
pub mod pipeline;
pub mod prompts;
