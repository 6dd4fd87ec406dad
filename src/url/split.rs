//! URI splitting and joining.

/// Characters allowed in a scheme after the leading letter.
const SCHEME_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789+-.";

/// A URL split into its five components; an empty string means the
/// component was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitUrl {
    pub scheme: String,
    pub netloc: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

/// Splits `url` into scheme, netloc, path, query, and fragment.
///
/// The scheme is recognized as a leading letter followed by
/// letters/digits/`+`/`-`/`.` before `:`, and lower-cased. The netloc runs
/// from `//` to the next `/`, `?`, or `#`. The fragment is cut before the
/// query, so a `?` inside the fragment stays in the fragment.
pub fn split_url(url: &str) -> SplitUrl {
    let mut rest = url;
    let mut out = SplitUrl::default();

    if let Some(i) = rest.find(':') {
        if i > 0 {
            let prefix = &rest[..i];
            if prefix.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && prefix.chars().all(|c| SCHEME_CHARS.contains(c))
            {
                out.scheme = prefix.to_ascii_lowercase();
                rest = &rest[i + 1..];
            }
        }
    }

    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        out.netloc = after[..end].to_string();
        rest = &after[end..];
    }

    if let Some(i) = rest.find('#') {
        out.fragment = rest[i + 1..].to_string();
        rest = &rest[..i];
    }

    if let Some(i) = rest.find('?') {
        out.query = rest[i + 1..].to_string();
        rest = &rest[..i];
    }

    out.path = rest.to_string();
    out
}

/// Rebuilds a URL from split components; the inverse of [`split_url`].
///
/// Empty components are omitted together with their delimiters, so a URL
/// with no query gets no `?`.
pub fn unsplit_url(scheme: &str, netloc: &str, path: &str, query: &str, fragment: &str) -> String {
    let mut url = path.to_string();

    if !netloc.is_empty() || url.starts_with("//") {
        if !url.is_empty() && !url.starts_with('/') {
            url.insert(0, '/');
        }
        url = format!("//{netloc}{url}");
    }
    if !scheme.is_empty() {
        url = format!("{scheme}:{url}");
    }
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    if !fragment.is_empty() {
        url.push('#');
        url.push_str(fragment);
    }
    url
}
