//! Header cleanup shared by the tabular readers.

use std::collections::BTreeMap;

/// Trims whitespace and BOM markers and collapses inner runs of whitespace.
pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Produces a usable, unique column name for every header cell.
///
/// Blank headers become `Unnamed: <position>`; repeated names get a `.1`,
/// `.2`, ... suffix in order of appearance.
pub(crate) fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut headers = Vec::new();
    for (idx, cell) in raw.into_iter().enumerate() {
        let mut name = normalize_header(cell.as_ref());
        if name.is_empty() {
            name = format!("Unnamed: {idx}");
        }
        let base = name.clone();
        while headers.contains(&name) {
            let count = counts.entry(base.clone()).or_insert(0);
            *count += 1;
            name = format!("{base}.{count}");
        }
        headers.push(name);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_bom() {
        assert_eq!(normalize_header("\u{feff} due   date "), "due date");
    }

    #[test]
    fn fills_blank_and_repeated_headers() {
        assert_eq!(
            unique_headers(["id", "", "title", "title", "title"]),
            vec!["id", "Unnamed: 1", "title", "title.1", "title.2"]
        );
    }
}
