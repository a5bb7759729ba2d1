//! Photo-Requirement Aggregator.
//!
//! Product metadata declares which photo categories must be collected before
//! checkout, optionally gated on a specific answer. The aggregate is rebuilt
//! from scratch on every recomputation, so keys for products no longer in the
//! cart cannot survive as stale entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerStore;

/// Photo categories required per product name, filtered to the current cart.
pub type CartPhotosRequirement = BTreeMap<String, Vec<String>>;

/// One piece of product metadata: when `question_id` is unset the categories
/// are always required while the product is in the cart; otherwise they are
/// required only when that question's answer matches `if_answer` (any answer
/// counts when `if_answer` is empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRule {
    pub product_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub if_answer: Vec<String>,
    pub categories: Vec<String>,
}

/// Derive the requirement map for the current cart and answer set.
pub fn aggregate(
    rules: &[PhotoRule],
    cart_product_names: &[String],
    answers: &AnswerStore,
) -> CartPhotosRequirement {
    let mut required = CartPhotosRequirement::new();
    for rule in rules {
        if !cart_product_names.iter().any(|n| n == &rule.product_key) {
            continue;
        }
        let triggered = match &rule.question_id {
            None => true,
            Some(question_id) => match answers.get(question_id) {
                None => false,
                Some(answer) => {
                    rule.if_answer.is_empty()
                        || rule.if_answer.iter().any(|expected| {
                            // composite answers carry ", <details>" after the primary
                            answer == expected
                                || answer.starts_with(&format!("{expected}, "))
                        })
                }
            },
        };
        if triggered {
            let categories = required.entry(rule.product_key.clone()).or_default();
            for category in &rule.categories {
                if !categories.contains(category) {
                    categories.push(category.clone());
                }
            }
        }
    }
    required
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<PhotoRule> {
        vec![
            PhotoRule {
                product_key: "Minoxidil Solution".to_string(),
                question_id: None,
                if_answer: vec![],
                categories: vec!["scalp-top".to_string(), "hairline".to_string()],
            },
            PhotoRule {
                product_key: "Tretinoin Cream".to_string(),
                question_id: Some("whichArea".to_string()),
                if_answer: vec!["Face".to_string()],
                categories: vec!["face-front".to_string()],
            },
        ]
    }

    #[test]
    fn unconditional_rule_applies_while_product_in_cart() {
        let answers = AnswerStore::new();
        let cart = vec!["Minoxidil Solution".to_string()];
        let required = aggregate(&rules(), &cart, &answers);
        assert_eq!(
            required.get("Minoxidil Solution").unwrap(),
            &vec!["scalp-top".to_string(), "hairline".to_string()]
        );
    }

    #[test]
    fn conditional_rule_requires_matching_answer() {
        let mut answers = AnswerStore::new();
        let cart = vec!["Tretinoin Cream".to_string()];

        assert!(aggregate(&rules(), &cart, &answers).is_empty());

        answers.set("whichArea", "Body");
        assert!(aggregate(&rules(), &cart, &answers).is_empty());

        answers.set("whichArea", "Face");
        let required = aggregate(&rules(), &cart, &answers);
        assert_eq!(required.get("Tretinoin Cream").unwrap(), &vec!["face-front".to_string()]);
    }

    #[test]
    fn composite_answer_still_triggers_rule() {
        let mut answers = AnswerStore::new();
        answers.set("whichArea", "Face, around the jawline");
        let cart = vec!["Tretinoin Cream".to_string()];
        assert!(!aggregate(&rules(), &cart, &answers).is_empty());
    }

    #[test]
    fn products_removed_from_cart_never_appear() {
        let mut answers = AnswerStore::new();
        answers.set("whichArea", "Face");
        // answers still reference the removed product's question
        let cart = vec!["Minoxidil Solution".to_string()];
        let required = aggregate(&rules(), &cart, &answers);
        assert!(!required.contains_key("Tretinoin Cream"));
        assert!(required.contains_key("Minoxidil Solution"));
    }
}
