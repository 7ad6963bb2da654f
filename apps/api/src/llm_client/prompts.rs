// Shared prompt fragments. Each feature that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text before or after it. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction for single-token label output.
pub const LABEL_ONLY_INSTRUCTION: &str = "Respond with ONLY the category name, \
    in lowercase, with no punctuation and no explanation.";
