use serde::{Deserialize, Serialize};

/// Input widget of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Radio,
    Text,
}

/// Which section family a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Medical,
    Product,
}

/// Conditional follow-up rendered under its parent question when the parent's
/// current answer is a member of `show_if`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsQuestion {
    pub question_text: String,
    #[serde(default)]
    pub show_if: Vec<String>,
}

/// A single catalog question. Immutable once loaded; owned by the external
/// catalog collaborator and fetched as plain JSON records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: String,
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_question: Option<DetailsQuestion>,
}

impl Question {
    pub fn has_option(&self, value: &str) -> bool {
        self.options
            .as_ref()
            .is_some_and(|opts| opts.iter().any(|o| o == value))
    }

    /// Whether the details sub-field is shown for the given primary answer:
    /// a details question exists, the answer is one of the declared options
    /// (when options are declared), and the answer is in `show_if`.
    pub fn details_shown_for(&self, answer: &str) -> bool {
        let Some(details) = &self.details_question else {
            return false;
        };
        if self.options.is_some() && !self.has_option(answer) {
            return false;
        }
        details.show_if.iter().any(|v| v == answer)
    }
}

/// One line of the cart collaborator's view, as consumed from the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
}

/// Sorted, de-duplicated set of product names currently in the cart. This is
/// the invalidation signal for re-deriving sections: any change to this set
/// forces a full rebuild of sections, steps and the resume position.
pub fn product_names(cart: &[CartItem]) -> Vec<String> {
    let mut names: Vec<String> = cart.iter().map(|item| item.name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radio_with_details(show_if: &[&str]) -> Question {
        Question {
            question_id: "allergies".to_string(),
            question_text: "Do you have any allergies?".to_string(),
            question_type: QuestionType::Radio,
            options: Some(vec!["Yes".to_string(), "No".to_string()]),
            category: Category::Medical,
            product_key: None,
            details_question: Some(DetailsQuestion {
                question_text: "Please list them".to_string(),
                show_if: show_if.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    #[test]
    fn details_shown_only_for_declared_trigger() {
        let q = radio_with_details(&["Yes"]);
        assert!(q.details_shown_for("Yes"));
        assert!(!q.details_shown_for("No"));
        // not a declared option, even though it is in show_if
        let q = radio_with_details(&["Maybe"]);
        assert!(!q.details_shown_for("Maybe"));
    }

    #[test]
    fn product_names_are_sorted_and_deduplicated() {
        let cart = vec![
            CartItem { id: "2".into(), name: "Minoxidil Solution".into(), quantity: 1 },
            CartItem { id: "1".into(), name: "Tretinoin Cream".into(), quantity: 2 },
            CartItem { id: "3".into(), name: "Tretinoin Cream".into(), quantity: 1 },
        ];
        assert_eq!(
            product_names(&cart),
            vec!["Minoxidil Solution".to_string(), "Tretinoin Cream".to_string()]
        );
    }

    #[test]
    fn question_wire_format_is_camel_case() {
        let json = r#"{
            "questionId": "over18",
            "questionText": "Are you over 18?",
            "type": "radio",
            "options": ["Yes", "No"],
            "category": "personal"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.question_id, "over18");
        assert_eq!(q.question_type, QuestionType::Radio);
        assert!(q.product_key.is_none());
        assert!(q.details_question.is_none());
    }
}
