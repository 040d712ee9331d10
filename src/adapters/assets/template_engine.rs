use minijinja::{Environment, Value};

use crate::domain::AppError;

use super::DocumentTemplate;

pub fn build_template_environment(
    templates: &[DocumentTemplate],
) -> Result<Environment<'static>, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_filter("shell_quote", shell_quote);

    for template in templates {
        env.add_template(template.name, template.content).map_err(|e| {
            AppError::InternalError(format!(
                "Failed to register template '{}': {}",
                template.name, e
            ))
        })?;
    }

    Ok(env)
}

/// Quote a value as one literal POSIX shell word.
fn shell_quote(value: String) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

pub fn render_template_by_name(
    env: &Environment<'_>,
    template_name: &str,
    ctx: &Value,
) -> Result<String, AppError> {
    let template = env.get_template(template_name).map_err(|e| {
        AppError::InternalError(format!("Failed to load template '{}': {}", template_name, e))
    })?;

    Ok(template.render(ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    const GREETING: DocumentTemplate =
        DocumentTemplate { name: "greeting.j2", content: "Hello {{ name }}\n" };

    #[test]
    fn renders_registered_template() {
        let env = build_template_environment(&[GREETING]).unwrap();
        let out = render_template_by_name(&env, "greeting.j2", &context! { name => "Acme" })
            .unwrap();

        assert_eq!(out, "Hello Acme\n");
    }

    #[test]
    fn unknown_template_is_internal_error() {
        let env = build_template_environment(&[]).unwrap();
        let err = render_template_by_name(&env, "missing.j2", &context! {}).unwrap_err();

        assert!(matches!(err, AppError::InternalError(msg) if msg.contains("missing.j2")));
    }

    #[test]
    fn shell_quote_keeps_value_literal() {
        let template =
            DocumentTemplate { name: "quote.sh.j2", content: "T={{ title | shell_quote }}" };
        let env = build_template_environment(&[template]).unwrap();
        let out = render_template_by_name(
            &env,
            "quote.sh.j2",
            &context! { title => "Joe's \"Best\" $(id) `id` Shop" },
        )
        .unwrap();

        assert_eq!(out, r#"T='Joe'\''s "Best" $(id) `id` Shop'"#);
    }

    #[test]
    fn syntax_error_fails_to_register() {
        let broken = DocumentTemplate { name: "broken.j2", content: "{% if %}" };
        assert!(build_template_environment(&[broken]).is_err());
    }
}
