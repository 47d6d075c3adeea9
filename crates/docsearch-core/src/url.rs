//! URL composition.
//!
//! Joins site URLs, base paths and sub-paths into a single URL with exactly one
//! `/` between fragments.

/// Join URL fragments into one normalized URL.
///
/// - Empty fragments are skipped.
/// - Runs of `/` in the path collapse to one, except the `scheme://` prefix
///   (`file:///` keeps its third slash).
/// - A leading `/` on the first fragment and a trailing `/` on the last one are
///   preserved.
/// - A `/` directly before `?` or `#` is dropped, and any extra `?` in the query
///   becomes `&`.
///
/// Normalizing an already normalized URL returns it unchanged.
///
/// ```
/// use docsearch_core::normalize_url;
///
/// assert_eq!(
///     normalize_url(&["https://example.com/", "/docs/", "search"]),
///     "https://example.com/docs/search"
/// );
/// assert_eq!(normalize_url(&["/", "opensearch.xml"]), "/opensearch.xml");
/// ```
pub fn normalize_url<S: AsRef<str>>(parts: &[S]) -> String {
    let parts: Vec<&str> = parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return String::new();
    }

    let joined = parts.join("/");
    let (prefix, rest) = split_scheme(&joined);

    let path_end = rest.find(['?', '#']).unwrap_or(rest.len());
    let (path, tail) = rest.split_at(path_end);

    let mut url = String::with_capacity(joined.len());
    url.push_str(&prefix);

    let path_start = url.len();
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        url.push(c);
    }

    if url.len() - path_start > 1 && url.ends_with('/') && drops_slash_before(tail) {
        url.pop();
    }

    let mut in_query = false;
    let mut in_fragment = false;
    for c in tail.chars() {
        match c {
            '#' => {
                in_fragment = true;
                url.push(c);
            }
            '?' if !in_fragment => {
                url.push(if in_query { '&' } else { '?' });
                in_query = true;
            }
            _ => url.push(c),
        }
    }

    url
}

/// Split a leading `scheme:` followed by slashes off `url`.
///
/// Returns the canonical prefix (`scheme://`, or `file:///`) and the remainder
/// with its leading slashes removed. Without a scheme the prefix is empty.
fn split_scheme(url: &str) -> (String, &str) {
    let Some(colon) = url.find(':') else {
        return (String::new(), url);
    };

    let scheme = &url[..colon];
    let after = &url[colon + 1..];
    let valid = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && after.starts_with('/');

    if !valid {
        return (String::new(), url);
    }

    let prefix = if scheme.eq_ignore_ascii_case("file") {
        format!("{scheme}:///")
    } else {
        format!("{scheme}://")
    };
    (prefix, after.trim_start_matches('/'))
}

/// A trailing path slash is dropped before a query or a plain fragment.
/// Hash-bang and hash-path fragments (`#!`, `#/`) keep it.
fn drops_slash_before(tail: &str) -> bool {
    let mut chars = tail.chars();
    match chars.next() {
        Some('?') => true,
        Some('#') => !matches!(chars.next(), Some('!' | '/')),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_absolute_url_with_padded_fragments() {
        assert_eq!(
            normalize_url(&["https://example.com", "/docs/", "/search"]),
            "https://example.com/docs/search"
        );
        assert_eq!(
            normalize_url(&["https://example.com/", "docs", "search"]),
            "https://example.com/docs/search"
        );
    }

    #[test]
    fn test_base_url_and_search_page() {
        assert_eq!(normalize_url(&["/docs/", "/search"]), "/docs/search");
        assert_eq!(normalize_url(&["/", "search"]), "/search");
        assert_eq!(normalize_url(&["/docs/", "search/"]), "/docs/search/");
    }

    #[test]
    fn test_favicon_under_root_base_url() {
        assert_eq!(
            normalize_url(&["https://x.io", "/", "/img/icon.png"]),
            "https://x.io/img/icon.png"
        );
    }

    #[test]
    fn test_idempotent() {
        let urls = [
            "https://example.com/docs/search",
            "/docs/search/",
            "/opensearch.xml",
            "file:///tmp/site/index.html",
            "https://x.io/search?q=rust&page=2#results",
        ];
        for url in urls {
            let once = normalize_url(&[url]);
            assert_eq!(once, url);
            assert_eq!(normalize_url(&[once.as_str()]), once);
        }
    }

    #[test]
    fn test_collapses_duplicate_slashes() {
        assert_eq!(
            normalize_url(&["https://example.com//docs", "//guide///intro"]),
            "https://example.com/docs/guide/intro"
        );
        assert_eq!(normalize_url(&["//docs//"]), "/docs/");
    }

    #[test]
    fn test_plain_protocol_fragment() {
        assert_eq!(normalize_url(&["https://", "example.com"]), "https://example.com");
        assert_eq!(normalize_url(&["https:", "example.com"]), "https://example.com");
    }

    #[test]
    fn test_file_protocol_keeps_three_slashes() {
        assert_eq!(
            normalize_url(&["file://", "/tmp/site", "index.html"]),
            "file:///tmp/site/index.html"
        );
    }

    #[test]
    fn test_query_and_fragment() {
        assert_eq!(normalize_url(&["/search/", "?q=rust"]), "/search?q=rust");
        assert_eq!(
            normalize_url(&["/search", "?q=rust", "?page=2"]),
            "/search?q=rust&page=2"
        );
        assert_eq!(normalize_url(&["/docs/", "#intro"]), "/docs#intro");
        assert_eq!(normalize_url(&["/app/", "#/route"]), "/app/#/route");
    }

    #[test]
    fn test_empty_parts() {
        let empty: [&str; 0] = [];
        assert_eq!(normalize_url(&empty), "");
        assert_eq!(normalize_url(&["", "/docs", ""]), "/docs");
    }

    #[test]
    fn test_host_with_port_is_not_a_scheme() {
        assert_eq!(normalize_url(&["localhost:3000", "docs"]), "localhost:3000/docs");
        assert_eq!(
            normalize_url(&["http://localhost:3000/", "/docs"]),
            "http://localhost:3000/docs"
        );
    }
}
