//! Application shell rendering.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::config::GatewayConfig;

const BUILTIN_SHELL: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{ app_name }}</title>
    <link rel="icon" href="{{ static_prefix }}/images/favicon.png" />
    <link rel="stylesheet" href="{{ static_prefix }}/theme.css" />
  </head>
  <body>
    <div id="app" data-bootstrap="{{ bootstrap }}"></div>
    <script src="{{ static_prefix }}/spa.entry.js"></script>
  </body>
</html>
"#;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read shell template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pre-rendered shell page, shared by the root and list routes.
#[derive(Debug, Clone)]
pub struct AppShell {
    html: Arc<str>,
}

impl AppShell {
    /// Render from the configured template file, or the built-in one.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, TemplateError> {
        let template = match config.templates.shell_path.as_deref() {
            Some(path) => read_template(Path::new(path))?,
            None => BUILTIN_SHELL.to_string(),
        };
        Ok(Self::render(&template, config))
    }

    /// Substitute `{{ app_name }}`, `{{ static_prefix }}` and `{{ bootstrap }}`.
    pub fn render(template: &str, config: &GatewayConfig) -> Self {
        let bootstrap = json!({
            "application_root": config.app.route_base,
            "static_assets_prefix": config.templates.static_prefix,
        })
        .to_string();

        let html = template
            .replace("{{ app_name }}", &escape_html(&config.app.name))
            .replace("{{ static_prefix }}", &escape_html(&config.templates.static_prefix))
            .replace("{{ bootstrap }}", &escape_html(&bootstrap));

        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl IntoResponse for AppShell {
    fn into_response(self) -> Response {
        Html(self.html.to_string()).into_response()
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Escape text for use in HTML content and double-quoted attributes.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_render() {
        let shell = AppShell::from_config(&GatewayConfig::default()).unwrap();
        let html = shell.html();
        assert!(html.contains("<title>Superset</title>"));
        assert!(html.contains(r#"src="/static/assets/spa.entry.js""#));
        assert!(html.contains("&quot;application_root&quot;:&quot;/immersa&quot;"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_escapes_app_name() {
        let mut config = GatewayConfig::default();
        config.app.name = "<Ops & Co>".into();
        let shell = AppShell::render("<title>{{ app_name }}</title>", &config);
        assert_eq!(shell.html(), "<title>&lt;Ops &amp; Co&gt;</title>");
    }

    #[test]
    fn test_custom_template_file() {
        let path = std::env::temp_dir().join(format!("immersa-shell-{}.html", uuid::Uuid::new_v4()));
        std::fs::write(&path, "<p>{{ app_name }}</p>").unwrap();

        let mut config = GatewayConfig::default();
        config.templates.shell_path = Some(path.to_string_lossy().into_owned());
        let shell = AppShell::from_config(&config).unwrap();
        assert_eq!(shell.html(), "<p>Superset</p>");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_template_file() {
        let mut config = GatewayConfig::default();
        config.templates.shell_path = Some("/nonexistent/shell.html".into());
        assert!(matches!(
            AppShell::from_config(&config),
            Err(TemplateError::Read { .. })
        ));
    }
}
