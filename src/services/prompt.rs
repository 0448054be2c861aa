use crate::models::exam::{Difficulty, QuestionType};

/// Renders the generation instruction. Callers guarantee a non-empty guide.
pub fn build_prompt(
    num_questions: u32,
    difficulty: Difficulty,
    question_types: &[QuestionType],
    exam_guide: &str,
    additional_info: &str,
) -> String {
    let types = question_types
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Given the following exam guide content, generate mock exam questions (see specifications below) with answers. \n\
         - total number of questions: {num_questions} \n\
         - difficulty level: {difficulty} \n\
         - question types: {types} \n\
         - output format: JSON \n\n\
         - exam guide: {exam_guide} \n\
         - additional information: {additional_info} \n\n\
         Please ensure the output is a valid JSON object strictly conforming to the provided schema."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_parameters_in_order() {
        let prompt = build_prompt(
            5,
            Difficulty::Mixed,
            &[QuestionType::MultipleChoice, QuestionType::Essay],
            "Chapter 1: Lifetimes",
            "Focus on elision rules",
        );

        let expected = "Given the following exam guide content, generate mock exam questions (see specifications below) with answers. \n\
- total number of questions: 5 \n\
- difficulty level: Mixed \n\
- question types: Multiple Choice, Essay \n\
- output format: JSON \n\n\
- exam guide: Chapter 1: Lifetimes \n\
- additional information: Focus on elision rules \n\n\
Please ensure the output is a valid JSON object strictly conforming to the provided schema.";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn prompt_is_deterministic() {
        let build = || build_prompt(3, Difficulty::Hard, &[QuestionType::TrueFalse], "guide", "");
        assert_eq!(build(), build());
        assert!(build().contains("- additional information:  \n"));
    }
}
