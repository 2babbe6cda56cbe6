/// Sentence the model is told to give, and the reply when retrieval finds nothing
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't find that in the website content.";

/// Reply when the generator produced no usable text
pub const NO_ANSWER_GENERATED: &str = "Sorry, no answer was generated.";

/// Fixed template turning a context block and a question into a prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAssembler;

impl PromptAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, context: &str, query: &str) -> String {
        format!(
            "Answer the question based **only** on the context below.\n\
             If the answer is not in the context, say \"{FALLBACK_ANSWER}\"\n\
             \n\
             Context:\n\
             {context}\n\
             \n\
             Question:\n\
             {query}\n\
             \n\
             Answer:"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prompt_layout() {
        let prompt = PromptAssembler::new().build("Source: a\nAzure covers networking", "azure");

        assert_eq!(
            prompt,
            "Answer the question based **only** on the context below.\n\
             If the answer is not in the context, say \"Sorry, I couldn't find that in the website content.\"\n\
             \n\
             Context:\n\
             Source: a\nAzure covers networking\n\
             \n\
             Question:\n\
             azure\n\
             \n\
             Answer:"
        );
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let assembler = PromptAssembler::new();
        assert_eq!(
            assembler.build("ctx", "q"),
            assembler.build("ctx", "q")
        );
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = PromptAssembler::new().build("the context", "the question");
        let context_at = prompt.find("Context:\nthe context").unwrap();
        let question_at = prompt.find("Question:\nthe question").unwrap();
        assert!(context_at < question_at);
        assert!(prompt.ends_with("Answer:"));
    }
}
