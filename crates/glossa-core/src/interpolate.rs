//! `{{name}}` placeholder substitution.
//!
//! # Invariants
//!
//! 1. **Single pass**: substituted values are never scanned again, so a
//!    value containing `{{x}}` stays literal.
//! 2. **Visible misses**: a placeholder with no matching param, an unclosed
//!    `{{`, and stray braces are all copied through unchanged.
//! 3. **Markup is opaque**: `<1>...</1>` spans are plain text here.

/// Substitute `{{name}}` tokens with the matching value from `params`.
///
/// Whitespace inside the braces is ignored (`{{ name }}`). When a name
/// appears more than once in `params`, the first pair wins.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            // Unclosed: emit the remainder as-is.
            out.push_str(&rest[open..]);
            return out;
        };
        let token = &after[..close];
        if token.contains("{{") {
            // `{{a {{b}}`: the first `{{` is literal, rescan from the second.
            out.push_str("{{");
            rest = after;
            continue;
        }
        match lookup(params, token.trim()) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(token);
                out.push_str("}}");
            }
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Placeholder names in order of first appearance, without duplicates.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            break;
        };
        let token = &after[..close];
        if token.contains("{{") {
            rest = after;
            continue;
        }
        let name = token.trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        rest = &after[close + 2..];
    }

    names
}

fn lookup<'a>(params: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    params.iter().find(|(n, _)| *n == name).map(|&(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_placeholder() {
        assert_eq!(
            interpolate("Bonjour {{name}}", &[("name", "Alice")]),
            "Bonjour Alice"
        );
    }

    #[test]
    fn test_missing_param_left_literal() {
        assert_eq!(interpolate("Bonjour {{name}}", &[]), "Bonjour {{name}}");
        assert_eq!(
            interpolate("{{a}} et {{b}}", &[("a", "1")]),
            "1 et {{b}}"
        );
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        for s in [
            "",
            "J'ai compris",
            "Voir <1>la politique</1>.",
            "accolades { simples }",
            "} désordre {",
        ] {
            assert_eq!(interpolate(s, &[]), s);
            assert_eq!(interpolate(s, &[("name", "x")]), s);
        }
    }

    #[test]
    fn test_repeated_and_multiple() {
        assert_eq!(
            interpolate("{{x}} puis {{x}} puis {{y}}", &[("x", "A"), ("y", "B")]),
            "A puis A puis B"
        );
    }

    #[test]
    fn test_whitespace_inside_braces() {
        assert_eq!(interpolate("Recherche par {{ attribute }}", &[("attribute", "nom")]), "Recherche par nom");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        assert_eq!(
            interpolate("{{a}}", &[("a", "{{b}}"), ("b", "boom")]),
            "{{b}}"
        );
    }

    #[test]
    fn test_malformed_braces() {
        assert_eq!(interpolate("Bonjour {{name", &[("name", "x")]), "Bonjour {{name");
        assert_eq!(interpolate("vide {{}}", &[("", "x")]), "vide {{}}");
        // Authored with a stray third brace; the extra `}` survives.
        assert_eq!(
            interpolate("Mettre à jour ({{email}}}", &[("email", "a@b.c")]),
            "Mettre à jour (a@b.c}"
        );
        assert_eq!(interpolate("{{a {{b}}", &[("b", "x")]), "{{a x");
    }

    #[test]
    fn test_markup_untouched() {
        assert_eq!(
            interpolate("<1>{{name}}</1>", &[("name", "Alice")]),
            "<1>Alice</1>"
        );
    }

    #[test]
    fn test_placeholders_in_order() {
        assert_eq!(
            placeholders("{{status}} : {{ count }} / {{status}} {{"),
            vec!["status", "count"]
        );
        assert!(placeholders("aucun").is_empty());
    }
}
