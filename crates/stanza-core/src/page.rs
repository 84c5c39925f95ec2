//! Standalone HTML pages
//!
//! Wraps a formatted poem fragment in a full document so the output can be
//! opened directly in a browser. Templates are minijinja; the template name
//! ends in `.html` so `title` and `author` are auto-escaped while the poem
//! fragment is passed through as safe markup.

use minijinja::{Environment, Value, context};

use crate::config::Config;
use crate::error::Result;
use crate::poem::PoemRecord;

const TEMPLATE_NAME: &str = "page.html";

/// Template used when none is configured
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ title }} by {{ author }}</title>
</head>
<body>
  <main id="poem">{{ poem }}</main>
</body>
</html>
"#;

/// Renders standalone pages around poem fragments
#[derive(Debug)]
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Compile `template`, or the built-in page when `None`
    pub fn new(template: Option<&str>) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, template.unwrap_or(DEFAULT_TEMPLATE).to_string())?;
        Ok(Self { env })
    }

    /// Use the template configured under `page.template`, if any
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.page_template_path() {
            Some(path) => {
                tracing::debug!("Loading page template {}", path.display());
                let source = std::fs::read_to_string(&path)?;
                Self::new(Some(&source))
            }
            None => Self::new(None),
        }
    }

    /// Render a full page for `poem`, embedding the already formatted `fragment`
    pub fn render(&self, poem: &PoemRecord, fragment: &str) -> Result<String> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let page = template.render(context! {
            title => &poem.title,
            author => &poem.author,
            poem => Value::from_safe_string(fragment.to_string()),
        })?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use crate::error::Error;
    use crate::poem::PoemFormatter;

    #[test]
    fn test_default_page_embeds_fragment() {
        let poem = PoemRecord::new("T", "A", ["x", "", "y"]);
        let fragment = PoemFormatter::default().format(&poem);
        let page = PageRenderer::new(None).unwrap().render(&poem, &fragment).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>T by A</title>"));
        assert!(page.contains(&format!("<main id=\"poem\">{fragment}</main>")));
    }

    #[test]
    fn test_page_title_is_escaped() {
        let poem = PoemRecord::new("<i>T</i>", "A", ["x"]);
        let page = PageRenderer::new(None).unwrap().render(&poem, "").unwrap();
        assert!(page.contains("<title>&lt;i&gt;T"));
    }

    #[test]
    fn test_custom_template() {
        let renderer = PageRenderer::new(Some("<article>{{ poem }}</article>")).unwrap();
        let poem = PoemRecord::new("T", "A", ["x"]);
        let page = renderer.render(&poem, "<p>x</p>").unwrap();
        assert_eq!(page, "<article><p>x</p></article>");
    }

    #[test]
    fn test_broken_template_is_rejected() {
        let result = PageRenderer::new(Some("{% if %}"));
        assert!(matches!(result, Err(Error::Template(_))));
    }

    #[test]
    fn test_template_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "page:\n  template: poem.html\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("poem.html"), "<div>{{ author }}</div>").unwrap();

        let config = Config::load(dir.path()).unwrap();
        let renderer = PageRenderer::from_config(&config).unwrap();
        let poem = PoemRecord::new("T", "Rumi", ["x"]);
        assert_eq!(renderer.render(&poem, "").unwrap(), "<div>Rumi</div>");
    }
}
