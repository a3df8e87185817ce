//! Input composition and sentence segmentation.

/// Join title and body with a single space, skipping empty parts.
pub fn compose(title: &str, body: &str) -> String {
    let title = title.trim();
    let body = body.trim();
    match (title.is_empty(), body.is_empty()) {
        (_, true) => title.to_string(),
        (true, false) => body.to_string(),
        (false, false) => format!("{} {}", title, body),
    }
}

/// Split on `.`, `!` or `?` followed by whitespace. The punctuation stays with
/// the sentence it ends; the whitespace run is dropped. Blank input yields no
/// sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(end, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        out.push(&text[start..end]);
        while let Some(&(_, w)) = chars.peek()
            && w.is_whitespace()
        {
            chars.next();
        }
        start = chars.peek().map(|&(i, _)| i).unwrap_or(text.len());
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_joins_non_empty_parts() {
        assert_eq!(compose("  Title ", ""), "Title");
        assert_eq!(compose("", " body "), "body");
        assert_eq!(compose("Title", "body"), "Title body");
        assert_eq!(compose("  ", "\n"), "");
    }

    #[test]
    fn splits_keep_terminal_punctuation() {
        let s = split_sentences("Claude 3.5 just dropped. Sonnet is fantastic!  Really?\nYes");
        assert_eq!(
            s,
            vec!["Claude 3.5 just dropped.", "Sonnet is fantastic!", "Really?", "Yes"]
        );
    }

    #[test]
    fn no_terminal_punctuation_is_one_sentence() {
        assert_eq!(split_sentences("  GPT-4.5 vs o3 "), vec!["GPT-4.5 vs o3"]);
        assert_eq!(split_sentences("v4.5 is out."), vec!["v4.5 is out."]);
    }

    #[test]
    fn blank_input_has_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" \t\n").is_empty());
    }

    #[test]
    fn non_ascii_text_splits_on_char_boundaries() {
        assert_eq!(
            split_sentences("Très bien. Ça marche — Claude!"),
            vec!["Très bien.", "Ça marche — Claude!"]
        );
    }
}
