//! OpenSearch description generation.
//!
//! Renders the `opensearch.xml` document that lets browsers discover the site
//! search. See <https://github.com/dewitt/opensearch>.

use crate::template::{RenderConfig, Result, TemplateCache, TemplateContext};

/// File name of the description document in the build output.
pub const OPENSEARCH_FILENAME: &str = "opensearch.xml";

/// Media type of the description document.
pub const OPENSEARCH_MIME_TYPE: &str = "application/opensearchdescription+xml";

/// OpenSearch 1.1 description template.
pub const OPENSEARCH_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/"
                       xmlns:moz="http://www.mozilla.org/2006/browser/search/">
  <ShortName>{{ title }}</ShortName>
  <Description>Search {{ title }}</Description>
  <InputEncoding>UTF-8</InputEncoding>
  {{#if favicon}}
  <Image width="16" height="16" type="image/x-icon">{{ favicon }}</Image>
  {{/if}}
  <Url type="text/html" method="get" template="{{ url }}search?q={searchTerms}"/>
  <Url type="application/opensearchdescription+xml" rel="self" template="{{ url }}opensearch.xml"/>
  <moz:SearchForm>{{ url }}</moz:SearchForm>
</OpenSearchDescription>"#;

static OPENSEARCH_TEMPLATE_CACHE: TemplateCache =
    TemplateCache::new("opensearch", OPENSEARCH_TEMPLATE);

/// Process-wide cache of the compiled OpenSearch template.
#[must_use]
pub fn shared_template() -> &'static TemplateCache {
    &OPENSEARCH_TEMPLATE_CACHE
}

/// Values interpolated into the description.
///
/// All URLs are absolute and already normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSearchData<'a> {
    /// Site title.
    pub title: &'a str,

    /// Site root URL including the base URL, ending with `/`.
    pub url: &'a str,

    /// Absolute favicon URL. `None` omits the `<Image>` element.
    pub favicon: Option<&'a str>,
}

impl OpenSearchData<'_> {
    fn to_context(self) -> TemplateContext {
        TemplateContext::new()
            .with_var("title", self.title)
            .with_var("url", self.url)
            .with_optional_var("favicon", self.favicon)
    }
}

/// Renders OpenSearch descriptions from a template cache.
#[derive(Debug, Clone, Copy)]
pub struct OpenSearchRenderer {
    template: &'static TemplateCache,
    config: RenderConfig,
}

impl OpenSearchRenderer {
    /// Create a renderer backed by the given template cache.
    #[must_use]
    pub fn new(template: &'static TemplateCache) -> Self {
        Self {
            template,
            config: RenderConfig::default(),
        }
    }

    /// Render the description, compiling the template on first use.
    pub fn render(&self, data: OpenSearchData<'_>) -> Result<String> {
        self.template.get()?.render(&data.to_context(), &self.config)
    }

    /// The template cache this renderer reads from.
    #[must_use]
    pub fn template(&self) -> &'static TemplateCache {
        self.template
    }
}

impl Default for OpenSearchRenderer {
    fn default() -> Self {
        Self::new(shared_template())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_WITH_FAVICON: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/"
                       xmlns:moz="http://www.mozilla.org/2006/browser/search/">
  <ShortName>My Site</ShortName>
  <Description>Search My Site</Description>
  <InputEncoding>UTF-8</InputEncoding>
  <Image width="16" height="16" type="image/x-icon">https://x.io/img/icon.png</Image>
  <Url type="text/html" method="get" template="https://x.io/search?q={searchTerms}"/>
  <Url type="application/opensearchdescription+xml" rel="self" template="https://x.io/opensearch.xml"/>
  <moz:SearchForm>https://x.io/</moz:SearchForm>
</OpenSearchDescription>"#;

    fn data(favicon: Option<&str>) -> OpenSearchData<'_> {
        OpenSearchData {
            title: "My Site",
            url: "https://x.io/",
            favicon,
        }
    }

    #[test]
    fn test_render_with_favicon() {
        let xml = OpenSearchRenderer::default()
            .render(data(Some("https://x.io/img/icon.png")))
            .unwrap();
        assert_eq!(xml, EXPECTED_WITH_FAVICON);
    }

    #[test]
    fn test_document_ends_at_closing_tag() {
        let xml = OpenSearchRenderer::default().render(data(None)).unwrap();
        assert!(xml.ends_with("</OpenSearchDescription>"));
        assert!(!xml.ends_with('\n'));
    }

    #[test]
    fn test_default_renderer_uses_shared_template() {
        let renderer = OpenSearchRenderer::default();
        assert!(std::ptr::eq(renderer.template(), shared_template()));
    }

    #[test]
    fn test_render_without_favicon_omits_image() {
        let xml = OpenSearchRenderer::default().render(data(None)).unwrap();

        assert!(!xml.contains("<Image"));
        assert!(!xml.contains("null"));
        assert!(
            xml.contains("  <InputEncoding>UTF-8</InputEncoding>\n  <Url type=\"text/html\"")
        );
    }

    #[test]
    fn test_render_is_byte_identical() {
        let renderer = OpenSearchRenderer::default();
        let first = renderer.render(data(Some("https://x.io/favicon.ico"))).unwrap();
        let second = renderer.render(data(Some("https://x.io/favicon.ico"))).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_title_is_escaped() {
        let xml = OpenSearchRenderer::default()
            .render(OpenSearchData {
                title: "Docs & <Guides>",
                url: "https://x.io/",
                favicon: None,
            })
            .unwrap();
        assert!(xml.contains("<ShortName>Docs &amp; &lt;Guides&gt;</ShortName>"));
    }

    #[test]
    fn test_template_compiled_once_across_renders() {
        static CACHE: TemplateCache = TemplateCache::new("opensearch", OPENSEARCH_TEMPLATE);
        let renderer = OpenSearchRenderer::new(&CACHE);

        assert_eq!(CACHE.compilations(), 0);
        renderer.render(data(None)).unwrap();
        renderer.render(data(Some("https://x.io/icon.png"))).unwrap();
        OpenSearchRenderer::new(&CACHE).render(data(None)).unwrap();

        assert_eq!(CACHE.compilations(), 1);
    }

    #[test]
    fn test_shared_template_compiles_at_most_once() {
        OpenSearchRenderer::default().render(data(None)).unwrap();
        OpenSearchRenderer::default().render(data(None)).unwrap();
        assert_eq!(shared_template().compilations(), 1);
    }
}
