//! Tag wrapping
//!
//! Content is inserted verbatim: no escaping and no tag-name validation.
//! Callers that handle untrusted text escape it first (see
//! [`RenderConfig::escape`](crate::config::RenderConfig::escape)).

/// Wrap `content` in a `<tag>...</tag>` element.
pub fn wrap(tag: &str, content: &str) -> String {
    format!("<{tag}>{content}</{tag}>")
}

/// Curried form of [`wrap`]: fix the tag now, supply the content later.
///
/// The returned function composes with [`pipe!`](crate::pipe!):
///
/// ```rust
/// use stanza_core::{make_tag, pipe};
///
/// let heading = pipe!(make_tag("em"), make_tag("h3"));
/// assert_eq!(heading("by Rumi"), "<h3><em>by Rumi</em></h3>");
/// ```
pub fn make_tag<S: AsRef<str>>(tag: impl Into<String>) -> impl Fn(S) -> String {
    let tag = tag.into();
    move |content: S| wrap(&tag, content.as_ref())
}
