use crate::domain::generation::DifficultyDistribution;

/// Character budget for the embedded source text. Longer inputs are
/// silently truncated to a prefix; bounding the request beats failing it.
pub const MAX_SOURCE_CHARS: usize = 4000;

pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an expert curriculum designer for an adaptive learning platform.

Your task is to generate high-quality educational questions from the provided text.

**CRITICAL RULES:**
1. Output ONLY valid JSON - no markdown, no explanations, no extra text.
2. Each question MUST follow the exact schema provided.
3. For multiple_choice questions:
   - Include an "options" array with objects: [{"id": "a", "text": "..."}, ...]
   - Set "solution" as: {"correct_option_id": "a"}
4. For text_input questions:
   - Set "options" as: {"placeholder": "Enter your answer"}
   - Set "solution" as: {"exact_match": "correct answer", "case_sensitive": false}
5. For boolean questions:
   - Set "options" as: {}
   - Set "solution" as: {"correct_value": true}
6. Always include a clear "explanation" for pedagogical value.
7. Distribute difficulties as requested.

**OUTPUT FORMAT:**
Return a JSON array of question objects ONLY. Example:
[
  {
    "content": "What is 2+2?",
    "type": "multiple_choice",
    "options": {"options": [{"id": "a", "text": "3"}, {"id": "b", "text": "4"}, {"id": "c", "text": "5"}]},
    "solution": {"correct_option_id": "b"},
    "explanation": "Basic arithmetic: 2+2=4",
    "points": 1,
    "difficulty": "easy"
  }
]"#;

/// Renders the full generation prompt: fixed system preamble plus a user
/// section with the requested counts, the (possibly truncated) source
/// text, and any custom instructions verbatim.
///
/// Pure function: no I/O, no randomness, byte-identical output for
/// identical inputs.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(
        text: &str,
        distribution: &DifficultyDistribution,
        custom_instructions: Option<&str>,
    ) -> String {
        let total = distribution.total();
        let distribution_text = Self::describe_distribution(distribution);
        let source = truncate_chars(text, MAX_SOURCE_CHARS);

        let instructions_section = match custom_instructions {
            Some(instructions) => format!("**Additional Instructions:** {}\n\n", instructions),
            None => String::new(),
        };

        format!(
            "{system}\n\nGenerate exactly {total} questions from the following text.\n\n\
             **Distribution Required:**\n{distribution_text}\n\n\
             **Source Text:**\n{source}\n\n\
             {instructions_section}\
             Remember: Output ONLY the JSON array. No markdown, no explanations.\n",
            system = DEFAULT_SYSTEM_PROMPT,
            total = total,
            distribution_text = distribution_text,
            source = source,
            instructions_section = instructions_section,
        )
    }

    /// Only levels with a non-zero count are listed, in fixed
    /// easy, medium, hard order.
    fn describe_distribution(distribution: &DifficultyDistribution) -> String {
        distribution
            .counts()
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(level, count)| format!("{} {}", count, level))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}
