pub mod question;
pub mod section;
pub mod template;

pub use question::{QuestionSpec, QuestionType};
pub use section::SectionSpec;
pub use template::{SectionGroup, Template, VisibilityRule};
