//! The key-translation rule from spec §4.2: a strict character-by-character
//! transform, no acronym awareness. `RGB` becomes `r_g_b`, not `rgb` — this
//! is an intentional, documented edge case (see spec §9's Open Questions)
//! and must be preserved verbatim for wire compatibility.

/// At each uppercase run, lowercase it and prepend `_` unless it's the first rune.
pub fn snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, ch) in input.chars().enumerate() {
        if ch.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_topic() {
        assert_eq!(snake_case("commandTopic"), "command_topic");
    }

    #[test]
    fn rgb_is_not_acronym_aware() {
        assert_eq!(snake_case("RGB"), "r_g_b");
    }

    #[test]
    fn already_snake_case_is_unchanged() {
        assert_eq!(snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn leading_uppercase_gets_no_leading_underscore() {
        assert_eq!(snake_case("Name"), "name");
    }

    #[test]
    fn empty_string() {
        assert_eq!(snake_case(""), "");
    }
}
