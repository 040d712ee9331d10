use include_dir::{Dir, include_dir};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");
static OPENAPI: &str = include_str!("../../assets/openapi.json");

const TEMPLATE_SUFFIX: &str = ".j2";

/// One embedded document template.
#[derive(Debug, Clone, Copy)]
pub struct DocumentTemplate {
    pub name: &'static str,
    pub content: &'static str,
}

/// Every embedded `*.j2` template, sorted by name.
pub fn document_templates() -> Vec<DocumentTemplate> {
    let mut templates: Vec<DocumentTemplate> = TEMPLATES_DIR
        .files()
        .filter_map(|file| {
            let name = file.path().to_str()?;
            if !name.ends_with(TEMPLATE_SUFFIX) {
                return None;
            }
            Some(DocumentTemplate { name, content: file.contents_utf8()? })
        })
        .collect();
    templates.sort_by(|a, b| a.name.cmp(b.name));
    templates
}

/// The OpenAPI description served at `/swagger.json`.
pub fn openapi_document() -> &'static str {
    OPENAPI
}
