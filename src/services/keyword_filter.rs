use crate::domain::Headline;

/// Case-insensitive substring match on the title or the published_at text.
/// A missing or blank keyword matches everything.
pub fn matches(item: &Headline, keyword: Option<&str>) -> bool {
    let needle = match keyword.map(str::trim) {
        Some(k) if !k.is_empty() => k.to_lowercase(),
        _ => return true,
    };

    item.title.to_lowercase().contains(&needle)
        || item.published_at.to_lowercase().contains(&needle)
}
