//! Section Builder and Step Sequence Deriver.
//!
//! Both functions are pure and deterministic: the same catalog and cart
//! snapshot always produce the same sections and the same flattened step
//! list. They are recomputed wholesale on every cart change; a step list is
//! never patched in place, because inserting or removing a middle section
//! shifts every subsequent flat index.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Question};

pub const PERSONAL_SECTION: &str = "Personal Information";
pub const MEDICAL_SECTION: &str = "Medical History";

/// A derived group of questions. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Pointer into the section list. Only meaningful against the section list it
/// was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub section_index: usize,
    pub question_index: usize,
}

/// Group the flat catalog into ordered sections: Personal Information,
/// Medical History, then one section per cart product (in the order the
/// product names appear in `cart_product_names`). Product questions whose
/// key is not in the cart are dropped, as is any section with no questions.
pub fn build_sections(catalog: &[Question], cart_product_names: &[String]) -> Vec<Section> {
    let mut sections = Vec::new();

    let personal: Vec<Question> = catalog
        .iter()
        .filter(|q| q.category == Category::Personal)
        .cloned()
        .collect();
    if !personal.is_empty() {
        sections.push(Section { name: PERSONAL_SECTION.to_string(), questions: personal });
    }

    let medical: Vec<Question> = catalog
        .iter()
        .filter(|q| q.category == Category::Medical)
        .cloned()
        .collect();
    if !medical.is_empty() {
        sections.push(Section { name: MEDICAL_SECTION.to_string(), questions: medical });
    }

    let mut seen: Vec<&str> = Vec::new();
    for name in cart_product_names {
        if seen.contains(&name.as_str()) {
            continue;
        }
        seen.push(name);
        let questions: Vec<Question> = catalog
            .iter()
            .filter(|q| {
                q.category == Category::Product && q.product_key.as_deref() == Some(name.as_str())
            })
            .cloned()
            .collect();
        if !questions.is_empty() {
            sections.push(Section { name: name.clone(), questions });
        }
    }

    sections
}

/// Flatten sections into the linear traversal order of the wizard.
pub fn flatten_steps(sections: &[Section]) -> Vec<Step> {
    let mut steps = Vec::new();
    for (section_index, section) in sections.iter().enumerate() {
        for question_index in 0..section.questions.len() {
            steps.push(Step { section_index, question_index });
        }
    }
    steps
}

/// Resolve the question a step points at.
pub fn question_at<'a>(sections: &'a [Section], step: Step) -> Option<&'a Question> {
    sections
        .get(step.section_index)
        .and_then(|s| s.questions.get(step.question_index))
}
