//! Built-in demo catalog for the compounded-medication storefront.
//!
//! Used when no `CATALOG_URL` is configured. Product keys must match the
//! product names the storefront cart sends.

use intake_flow::{Category, DetailsQuestion, PhotoRule, Question, QuestionType};

fn radio(
    id: &str,
    text: &str,
    category: Category,
    product_key: Option<&str>,
    options: &[&str],
) -> Question {
    Question {
        question_id: id.to_string(),
        question_text: text.to_string(),
        question_type: QuestionType::Radio,
        options: Some(options.iter().map(|o| o.to_string()).collect()),
        category,
        product_key: product_key.map(|k| k.to_string()),
        details_question: None,
    }
}

fn text(id: &str, text_: &str, category: Category, product_key: Option<&str>) -> Question {
    Question {
        question_id: id.to_string(),
        question_text: text_.to_string(),
        question_type: QuestionType::Text,
        options: None,
        category,
        product_key: product_key.map(|k| k.to_string()),
        details_question: None,
    }
}

fn with_details(mut question: Question, prompt: &str, show_if: &[&str]) -> Question {
    question.details_question = Some(DetailsQuestion {
        question_text: prompt.to_string(),
        show_if: show_if.iter().map(|s| s.to_string()).collect(),
    });
    question
}

pub fn demo_questions() -> Vec<Question> {
    vec![
        radio("over18", "Are you over 18?", Category::Personal, None, &["Yes", "No"]),
        radio(
            "biologicalSex",
            "What is your biological sex?",
            Category::Personal,
            None,
            &["Female", "Male"],
        ),
        with_details(
            radio(
                "allergies",
                "Do you have any known allergies?",
                Category::Medical,
                None,
                &["No", "Yes"],
            ),
            "Please list your allergies",
            &["Yes"],
        ),
        text(
            "currentMedications",
            "List any medications you are currently taking",
            Category::Medical,
            None,
        ),
        with_details(
            radio(
                "pregnantOrNursing",
                "Are you pregnant, nursing, or planning to become pregnant?",
                Category::Medical,
                None,
                &["No", "Yes", "Other"],
            ),
            "Please explain",
            &["Other"],
        ),
        radio(
            "whichArea",
            "Which area will you be treating?",
            Category::Product,
            Some("Tretinoin Cream"),
            &["Face", "Body"],
        ),
        radio(
            "skinSensitivity",
            "How sensitive is your skin?",
            Category::Product,
            Some("Tretinoin Cream"),
            &["Not sensitive", "Somewhat sensitive", "Very sensitive"],
        ),
        with_details(
            radio(
                "hairLossPattern",
                "How would you describe your hair loss?",
                Category::Product,
                Some("Minoxidil Solution"),
                &["Receding hairline", "Thinning crown", "Overall thinning", "Other"],
            ),
            "Please describe it",
            &["Other"],
        ),
    ]
}

pub fn demo_photo_rules() -> Vec<PhotoRule> {
    vec![
        PhotoRule {
            product_key: "Tretinoin Cream".to_string(),
            question_id: Some("whichArea".to_string()),
            if_answer: vec!["Face".to_string()],
            categories: vec!["face-front".to_string(), "face-side".to_string()],
        },
        PhotoRule {
            product_key: "Tretinoin Cream".to_string(),
            question_id: Some("whichArea".to_string()),
            if_answer: vec!["Body".to_string()],
            categories: vec!["affected-area".to_string()],
        },
        PhotoRule {
            product_key: "Minoxidil Solution".to_string(),
            question_id: None,
            if_answer: vec![],
            categories: vec!["scalp-top".to_string(), "hairline".to_string()],
        },
    ]
}
