use crate::category::Category;
use scraper::{Html, Selector};

/// Every anchor target in `html`, in document order.
pub fn hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("anchor selector is valid");

    document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(String::from)
        .collect()
}

/// Anchor targets of an index page that carry the category's suffix.
/// Duplicates are kept.
pub fn filter_listing(html: &str, category: Category) -> Vec<String> {
    hrefs(html)
        .into_iter()
        .filter(|href| href.ends_with(category.suffix()))
        .collect()
}

/// Strips the final extension of `name`. Only the last path component is
/// considered and its leading dots never start an extension.
pub fn file_stem(name: &str) -> &str {
    let base_start = name.rfind('/').map_or(0, |i| i + 1);
    let base = &name[base_start..];
    let leading_dots = base.len() - base.trim_start_matches('.').len();

    match base.rfind('.') {
        Some(dot) if dot >= leading_dots => &name[..base_start + dot],
        _ => name,
    }
}
