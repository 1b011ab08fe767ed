#![allow(missing_docs)]

pub mod model;
pub mod outline;
pub mod public;
pub mod registry;
pub mod render;
pub mod snapshot;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use model::{FormState, ModelError, SectionCompletion};
pub use outline::{
    ExportMode, ExportOptions, InstanceBody, NO_ANSWER, NOT_ANSWERED, Outline, OutlineEntry,
    OutlineGroup, OutlineInstance, OutlineSection, build_outline,
};
pub use public::{PublicView, build_public_view, render_public_text};
pub use registry::{DEFAULT_TEMPLATE_ID, TemplateError, TemplateRegistry};
pub use render::{
    RenderPayload, RenderProgress, RenderQuestion, RenderSection, RenderStatus,
    build_render_payload, render_json_ui, render_text,
};
pub use snapshot::{AnswerInstance, FormData, FormSnapshot, answer_text, default_template_id};
pub use spec::{QuestionSpec, QuestionType, SectionGroup, SectionSpec, Template, VisibilityRule};
pub use validate::{
    MissingAnswer, TemplateReport, ValidationError, ValidationResult, missing_required,
    validate_snapshot, validate_template,
};
pub use visibility::{VisibilityMap, is_visible, resolve_visibility};
