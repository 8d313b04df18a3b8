//! Prompt composition for the two generation stages.
//!
//! Both composers are pure and deterministic: the same state always yields
//! the same prompt text. Every interpolated free-text field passes through
//! [`escape_quotes`] before emission so embedded quotes cannot break the
//! backend invocation.

/// Escape double quotes in interpolated text (`"` becomes `\"`).
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Inputs for the reflection prompt, borrowed from the session state.
#[derive(Debug, Clone, Copy)]
pub struct ReflectionContext<'a> {
    pub topic: &'a str,
    pub user_input: &'a str,
    pub previous_reflection: &'a str,
    pub previous_response: &'a str,
    pub personality: &'a str,
    pub emotion: &'a str,
    pub confidence: f64,
}

/// Compose the private reflection prompt: one cohesive analytical paragraph
/// relating the question to topic, prior reasoning, certainty, decomposition
/// and the agent's own affect and personality.
pub fn reflection_prompt(ctx: &ReflectionContext<'_>) -> String {
    let previous = if ctx.previous_reflection.is_empty() {
        String::new()
    } else {
        format!(
            "Previous reflection: \"{}\"\nPrevious response: \"{}\"\n",
            escape_quotes(ctx.previous_reflection),
            escape_quotes(ctx.previous_response),
        )
    };

    format!(
        "General topic: {topic}.\n\
         User question: \"{input}\".\n\
         {previous}\
         {personality}\n\
         {emotion}\n\
         Confidence level: {confidence}.\n\n\
         Generate a deep, nuanced reflection on the user's question, considering the following aspects:\n\
         1. Relation to the general topic and prior knowledge.\n\
         2. Analysis of the validity and certainty of the available information.\n\
         3. Decomposition of the problem into simpler parts.\n\
         4. Logical connections between the topic, the question and previous reflections.\n\
         5. Impact of your emotional state and personality on the analysis.\n\
         6. Critical evaluation of your ability to answer adequately.\n\n\
         The reflection must be one cohesive paragraph, without bullets or numbering, \
         flowing naturally between these aspects, and must not repeat the previous reflection.",
        topic = escape_quotes(ctx.topic),
        input = escape_quotes(ctx.user_input),
        previous = previous,
        personality = escape_quotes(ctx.personality),
        emotion = escape_quotes(ctx.emotion),
        confidence = ctx.confidence,
    )
}

/// Compose the user-facing response prompt: empathetic, conversational,
/// shaped as acknowledgment + body + follow-up question, and explicitly
/// distinct from the reflection it is based on.
pub fn response_prompt(
    user_input: &str,
    reflection: &str,
    dominant_emotion: &str,
    strongest_trait: &str,
) -> String {
    format!(
        "Based on the following reflection: \"{reflection}\"\n\n\
         And considering that:\n\
         - My dominant emotion is {emotion}\n\
         - My strongest personality trait is {strongest}\n\
         - The topic of the conversation is \"{input}\"\n\n\
         Generate a response that is:\n\
         1. Coherent with my personality and emotional state\n\
         2. Informative and relevant to the topic of the conversation\n\
         3. Empathetic toward the user\n\
         4. Natural and conversational, as if a human were responding\n\n\
         The response must include:\n\
         - An introduction that acknowledges the user's question or comment\n\
         - The main body of the response, addressing the topic\n\
         - A conclusion or follow-up question to keep the conversation going\n\n\
         The response must be clearly distinct from the reflection.",
        reflection = escape_quotes(reflection),
        emotion = dominant_emotion,
        strongest = strongest_trait,
        input = escape_quotes(user_input),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context<'a>() -> ReflectionContext<'a> {
        ReflectionContext {
            topic: "philosophy of mind",
            user_input: "what is consciousness?",
            previous_reflection: "",
            previous_response: "",
            personality: "I am an AI with high openness.",
            emotion: "My dominant emotion is joy with intensity 0.50.",
            confidence: 0.5,
        }
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_quotes(r#"say "hi" now"#), r#"say \"hi\" now"#);
        assert_eq!(escape_quotes("no quotes"), "no quotes");
    }

    #[test]
    fn test_reflection_prompt_is_deterministic() {
        let ctx = context();
        assert_eq!(reflection_prompt(&ctx), reflection_prompt(&ctx));
    }

    #[test]
    fn test_reflection_prompt_omits_previous_block_on_first_turn() {
        let prompt = reflection_prompt(&context());
        assert!(!prompt.contains("Previous reflection"));
        assert!(prompt.contains("General topic: philosophy of mind."));
        assert!(prompt.contains("must not repeat the previous reflection"));
    }

    #[test]
    fn test_reflection_prompt_includes_previous_block_after_first_turn() {
        let mut ctx = context();
        ctx.previous_reflection = "earlier thoughts";
        ctx.previous_response = "earlier answer";
        let prompt = reflection_prompt(&ctx);
        assert!(prompt.contains("Previous reflection: \"earlier thoughts\""));
        assert!(prompt.contains("Previous response: \"earlier answer\""));
    }

    #[test]
    fn test_reflection_prompt_escapes_interpolated_quotes() {
        let mut ctx = context();
        ctx.user_input = r#"he said "stop""#;
        let prompt = reflection_prompt(&ctx);
        assert!(prompt.contains(r#"he said \"stop\""#));
    }

    #[test]
    fn test_response_prompt_names_emotion_and_trait() {
        let prompt = response_prompt("what now?", "a reflection", "trust", "openness");
        assert!(prompt.contains("My dominant emotion is trust"));
        assert!(prompt.contains("My strongest personality trait is openness"));
        assert!(prompt.contains("clearly distinct from the reflection"));
    }

    #[test]
    fn test_response_prompt_escapes_reflection_quotes() {
        let prompt = response_prompt("q", r#"it "depends""#, "joy", "openness");
        assert!(prompt.contains(r#"it \"depends\""#));
    }
}
