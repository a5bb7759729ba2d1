pub mod answers;
pub mod catalog;
#[cfg(feature = "http")]
pub mod client;
pub mod error;
pub mod photos;
pub mod runner;
pub mod sections;
pub mod storage;
pub mod wizard;

// Re-export commonly used types
pub use answers::{AnswerRecord, AnswerStore, SyncReport};
pub use catalog::{CartItem, Category, DetailsQuestion, Question, QuestionType, product_names};
#[cfg(feature = "http")]
pub use client::{HttpAnswerRepository, HttpQuestionCatalog};
pub use error::{Result, WizardError};
pub use photos::{CartPhotosRequirement, PhotoRule, aggregate};
pub use runner::{QuestionView, WizardEvent, WizardResponse, WizardRunner};
pub use sections::{Section, Step, build_sections, flatten_steps};
pub use storage::{
    AnswerRepository, InMemoryAnswerRepository, InMemoryQuestionCatalog, InMemorySessionStorage,
    PostgresSessionStorage, QuestionCatalog, Session, SessionStorage,
};
pub use wizard::{NavigationTarget, ReviewEntry, Wizard, WizardState, split_composite};
