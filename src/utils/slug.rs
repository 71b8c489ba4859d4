use regex::Regex;
use std::sync::OnceLock;

fn strip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid slug regex"))
}

fn space_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// "Sea View 3BHK, Andheri!" -> "sea-view-3bhk-andheri"
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = strip_regex().replace_all(&lowered, "");
    space_regex()
        .replace_all(stripped.trim(), "-")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Sea View 3BHK, Andheri!"), "sea-view-3bhk-andheri");
        assert_eq!(slugify("  Luxury   Villa  "), "luxury-villa");
        assert_eq!(slugify("Plot-42 / Phase 2"), "plot-42-phase-2");
        assert_eq!(slugify("!!!"), "");
    }
}
