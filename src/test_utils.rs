#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::QuizQuestion;

    /// A valid question whose numbers depend on `i`, so lists have distinct entries.
    pub fn sample_question(i: usize) -> QuizQuestion {
        let a = 12 + i as u32;
        let b = 3 + (i as u32 % 5);
        let product = a * b;

        QuizQuestion {
            prompt: format!("What is {} x {}?", a, b),
            options: vec![
                (product - 2).to_string(),
                product.to_string(),
                (product + 3).to_string(),
                (product + 10).to_string(),
            ],
            correct_answer: product.to_string(),
            hint: format!("Split {} into {} + {} first.", a, 10, a - 10),
            explanation: format!("{} x {} = {}.", a, b, product),
        }
    }

    pub fn sample_questions(count: usize) -> Vec<QuizQuestion> {
        (0..count).map(sample_question).collect()
    }

    /// First option that is not the correct answer.
    pub fn wrong_option(question: &QuizQuestion) -> String {
        question
            .options
            .iter()
            .find(|option| **option != question.correct_answer)
            .cloned()
            .expect("fixture questions always have a wrong option")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::quiz_question::OPTION_COUNT;

    #[test]
    fn test_sample_question_is_well_formed() {
        let question = sample_question(4);

        assert_eq!(question.options.len(), OPTION_COUNT);
        assert!(question.options.contains(&question.correct_answer));
        assert!(!question.hint.is_empty());
        assert!(!question.explanation.is_empty());
    }

    #[test]
    fn test_wrong_option_differs_from_answer() {
        let question = sample_question(0);
        assert_ne!(wrong_option(&question), question.correct_answer);
    }

    #[test]
    fn test_sample_questions_are_distinct() {
        let questions = sample_questions(3);
        assert_ne!(questions[0].prompt, questions[1].prompt);
        assert_ne!(questions[1].prompt, questions[2].prompt);
    }
}
