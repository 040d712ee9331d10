mod document_templates;
mod template_engine;

pub use document_templates::{DocumentTemplate, document_templates, openapi_document};
pub use template_engine::{build_template_environment, render_template_by_name};
