/// Strips whitespace and the usual separators so that "999-000 1111" and
/// "9990001111" address the same pending code.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("9990001111"), "9990001111");
        assert_eq!(normalize_phone(" 999-000 1111 "), "9990001111");
        assert_eq!(normalize_phone("+91 (999) 000.1111"), "+919990001111");
    }

    #[test]
    fn test_normalize_keeps_free_form_text() {
        assert_eq!(normalize_phone("ext 42"), "ext42");
        assert_eq!(normalize_phone(" - ( ) "), "");
    }
}
