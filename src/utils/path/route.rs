//! URL processing utilities for bundle destinations.
//!
//! Destinations are URL-ish strings (`~/assets/site.js?v=1`) that double as
//! output file locations, so these helpers only ever touch the path part and
//! leave query strings intact.

/// Split a URL into path and query parts (query without the `?`).
///
/// # Examples
/// ```
/// use tagpack::utils::path::split_query;
/// assert_eq!(split_query("/site.js?v=1"), ("/site.js", Some("v=1")));
/// assert_eq!(split_query("/site.js"), ("/site.js", None));
/// ```
#[inline]
pub fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Append `key=value` to a URL, using `&` if it already has a query string.
///
/// # Examples
/// ```
/// use tagpack::utils::path::append_query_param;
/// assert_eq!(append_query_param("/site.js", "r", "abc"), "/site.js?r=abc");
/// assert_eq!(append_query_param("/site.js?v=1", "r", "abc"), "/site.js?v=1&r=abc");
/// ```
pub fn append_query_param(url: &str, key: &str, value: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{key}={value}")
}

/// Insert `.{infix}` before the file extension of the path part.
///
/// # Examples
/// ```
/// use tagpack::utils::path::insert_before_extension;
/// assert_eq!(insert_before_extension("~/out/site.js", "head"), "~/out/site.head.js");
/// assert_eq!(insert_before_extension("/site_#.css?v=2", "print"), "/site_#.print.css?v=2");
/// assert_eq!(insert_before_extension("/bundle", "head"), "/bundle.head");
/// ```
pub fn insert_before_extension(url: &str, infix: &str) -> String {
    let (path, query) = split_query(url);
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    let with_infix = match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let dot = name_start + dot;
            format!("{}.{infix}{}", &path[..dot], &path[dot..])
        }
        _ => format!("{path}.{infix}"),
    };
    match query {
        Some(query) => format!("{with_infix}?{query}"),
        None => with_infix,
    }
}

/// Check if a reference contains glob metacharacters.
#[inline]
pub fn is_glob(reference: &str) -> bool {
    reference.contains(['*', '?', '['])
}
