//! Display order of the selected categories.

/// `selected` with duplicates dropped (first occurrence wins); when a
/// primary is given it goes first and is removed from the rest, whether or
/// not the user selected it.
pub fn order<S: AsRef<str>>(selected: &[S], primary: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(selected.len() + 1);
    if let Some(p) = primary {
        out.push(p.to_string());
    }
    for label in selected {
        let label = label.as_ref();
        if !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

/// User-facing primary value: "None" (any case) or blank means no primary.
pub fn parse_primary(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") { None } else { Some(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: [&str; 0] = [];

    #[test]
    fn no_primary_keeps_selection() {
        assert!(order(&EMPTY, None).is_empty());
        assert_eq!(order(&["India", "World"], None), vec!["India", "World"]);
    }

    #[test]
    fn primary_moves_to_front() {
        assert_eq!(order(&["India", "World"], Some("World")), vec!["World", "India"]);
    }

    #[test]
    fn primary_injected_when_not_selected() {
        assert_eq!(order(&["EPL", "India"], Some("Tech / AI")), vec!["Tech / AI", "EPL", "India"]);
        assert_eq!(order(&EMPTY, Some("Tech / AI")), vec!["Tech / AI"]);
    }

    #[test]
    fn duplicates_removed_keeping_first() {
        assert_eq!(order(&["NFL", "EPL", "NFL", "EPL"], None), vec!["NFL", "EPL"]);
        assert_eq!(order(&["NFL", "EPL", "NFL"], Some("EPL")), vec!["EPL", "NFL"]);
    }

    #[test]
    fn primary_parsing() {
        assert_eq!(parse_primary("None"), None);
        assert_eq!(parse_primary("none "), None);
        assert_eq!(parse_primary(""), None);
        assert_eq!(parse_primary(" World "), Some("World".to_string()));
    }
}
