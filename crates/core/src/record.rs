//! Record write rules shared by the repository and HTTP layers.

use crate::types::DbId;

/// Stored as `content` when a record is created without any.
pub const PLACEHOLDER_CONTENT: &str = "Nothing here yet!";

/// Content to store on creation: the supplied text, or the placeholder when
/// the caller sent nothing or an empty string.
pub fn content_or_placeholder(content: Option<&str>) -> &str {
    match content {
        Some(c) if !c.is_empty() => c,
        _ => PLACEHOLDER_CONTENT,
    }
}

/// Drop repeated category ids, keeping first-seen order.
pub fn dedup_category_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut out: Vec<DbId> = Vec::with_capacity(ids.len());
    for &id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Parse a comma-separated id list from a form body (`categoriesId=1,2`).
///
/// Unlike the listing filter, a write must not silently drop ids, so any
/// malformed segment rejects the whole value. Blank input is an empty list.
pub fn parse_strict_id_list(raw: &str) -> Result<Vec<DbId>, String> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|segment| {
            let segment = segment.trim();
            segment
                .parse::<DbId>()
                .map_err(|_| format!("'{segment}' is not a valid id"))
        })
        .collect()
}
