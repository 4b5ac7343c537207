//! Config-driven text rendering.
//!
//! # Data Flow
//! ```text
//! POST body (template source)
//!     → nesting.rs (iterative depth check)            ← compile errors
//!     → gtmpl parse, helpers.rs functions registered  ← compile errors
//!     → value.rs (JSON → template value)
//!     → gtmpl execute                                 ← exec errors
//!     → rendered text
//! ```
//!
//! # Template Language
//! Go text/template: `{{.db.host}}`, pipelines `{{ .hosts | len }}`,
//! `if`/`else`/`range`/`with` blocks and `$` for the root value. Template
//! definitions (`define`, `template`, `block`) are rejected.
//!
//! # Design Decisions
//! - Compilation and execution fail separately
//! - Executing never mutates the data value
//! - The helper table is fixed at startup

pub mod error;
pub mod helpers;
pub mod nesting;
mod value;

use gtmpl::{Context, Template};
use serde_json::Value;

pub use error::{Result, TemplateError};

use nesting::check_nesting;
use value::to_template_value;

/// Compiles caller-supplied templates and runs them against resolved values.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    name: String,
}

impl TemplateRenderer {
    /// `name` prefixes error messages.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn render(&self, source: &str, data: &Value) -> Result<String> {
        let template = self.compile(source)?;
        template
            .render(&Context::from(to_template_value(data)))
            .map_err(|e| TemplateError::Exec {
                name: self.name.clone(),
                message: e.to_string(),
            })
    }

    fn compile(&self, source: &str) -> Result<Template> {
        let compile_error = |message: String| TemplateError::Compile {
            name: self.name.clone(),
            message,
        };

        check_nesting(source).map_err(compile_error)?;

        let mut template = Template::default();
        helpers::register_helpers(&mut template);
        template
            .parse(source)
            .map_err(|e| compile_error(e.to_string()))?;
        Ok(template)
    }

    /// Names of the helpers registered on top of the built-ins, sorted.
    pub fn helpers(&self) -> Vec<&'static str> {
        helpers::names()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new("confserver")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(src: &str, data: Value) -> Result<String> {
        TemplateRenderer::default().render(src, &data)
    }

    #[test]
    fn test_render_field() {
        assert_eq!(render("{{.name}}", json!({"name": "x"})).unwrap(), "x");
        assert_eq!(render("{{.db.port}}", json!({"db": {"port": 5432}})).unwrap(), "5432");
        assert_eq!(render("{{.}}", json!("leaf")).unwrap(), "leaf");
    }

    #[test]
    fn test_compile_and_exec_errors_are_distinct() {
        let err = render("{{.name", json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::Compile { .. }));

        let err = render("{{nosuchhelper .name}}", json!({"name": "x"})).unwrap_err();
        assert!(err.to_string().starts_with("template: confserver:"));

        let err = render("{{first .items}}", json!({"items": []})).unwrap_err();
        assert!(matches!(err, TemplateError::Exec { .. }));
        assert!(err.to_string().starts_with("template: confserver: executing:"));
    }

    #[test]
    fn test_command_line_template() {
        let data = json!({"host": "db1", "port": 3306, "username": "app", "password": "s3cret"});
        let out = render(
            "--host={{.host}}:{{.port}} --user={{.username}} --password={{.password}}",
            data,
        )
        .unwrap();
        assert_eq!(out, "--host=db1:3306 --user=app --password=s3cret");
    }

    #[test]
    fn test_multiline_template_with_trim() {
        let data = json!({"upstreams": ["10.0.0.1:80", "10.0.0.2:80"]});
        let src = "upstream app {\n{{- range .upstreams }}\n  server {{ . }};\n{{- end }}\n}\n";
        assert_eq!(
            render(src, data).unwrap(),
            "upstream app {\n  server 10.0.0.1:80;\n  server 10.0.0.2:80;\n}\n"
        );
    }

    #[test]
    fn test_helpers_in_pipelines() {
        let data = json!({"hosts": "a b c", "port": 5432, "list": ["a", "b", 3]});
        assert_eq!(render(r#"{{ join (split .hosts " ") "," }}"#, data.clone()).unwrap(), "a,b,c");
        assert_eq!(render(r#"{{ split .hosts " " | len }}"#, data.clone()).unwrap(), "3");
        assert_eq!(render(r#"{{ split .hosts " " | last }}"#, data.clone()).unwrap(), "c");
        assert_eq!(render("{{ add .port 1 }}", data.clone()).unwrap(), "5433");
        assert_eq!(render(r#"{{ join .list "-" }}"#, data.clone()).unwrap(), "a-b");
        assert_eq!(render(r#"{{ trim "--x--" "-" }}"#, data.clone()).unwrap(), "x");
        assert_eq!(
            render(r#"{{ path_join "/srv/" "../etc" "conf" }}"#, data).unwrap(),
            "/etc/conf"
        );
    }

    #[test]
    fn test_blocks_and_root() {
        let data = json!({"on": true, "off": 0, "db": {"host": "h"}, "prefix": "p-", "xs": ["a", "b"]});
        assert_eq!(
            render("{{if .off}}a{{else if .on}}b{{else}}c{{end}}", data.clone()).unwrap(),
            "b"
        );
        assert_eq!(render("{{with .db}}{{.host}}{{end}}", data.clone()).unwrap(), "h");
        assert_eq!(
            render("{{range .xs}}{{$.prefix}}{{.}} {{end}}", data.clone()).unwrap(),
            "p-a p-b "
        );
        assert_eq!(render("{{range .none}}x{{else}}empty{{end}}", json!({"none": []})).unwrap(), "empty");
    }

    #[test]
    fn test_missing_key_is_not_an_error() {
        assert!(render("{{.nope}}", json!({"name": "x"})).is_ok());
    }

    #[test]
    fn test_deep_nesting_is_a_compile_error() {
        let parens = format!("{{{{{}1{}}}}}", "(".repeat(100_000), ")".repeat(100_000));
        let err = render(&parens, json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::Compile { .. }));

        let blocks = format!("{}x{}", "{{if true}}".repeat(100_000), "{{end}}".repeat(100_000));
        assert!(matches!(render(&blocks, json!({})).unwrap_err(), TemplateError::Compile { .. }));
    }

    #[test]
    fn test_recursive_definitions_rejected() {
        let err = render(r#"{{define "a"}}{{template "a"}}{{end}}{{template "a"}}"#, json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::Compile { .. }));
    }

    #[test]
    fn test_does_not_mutate_data() {
        let data = json!({"items": ["a", "b"]});
        let renderer = TemplateRenderer::default();
        assert_eq!(renderer.render("{{index .items 0}}{{last .items}}", &data).unwrap(), "ab");
        assert_eq!(data, json!({"items": ["a", "b"]}));
    }

    #[test]
    fn test_helpers_listed() {
        let names = TemplateRenderer::default().helpers();
        for expected in ["path_join", "split", "trim", "join", "add", "first", "last", "now", "today"] {
            assert!(names.contains(&expected), "missing helper {}", expected);
        }
    }
}
