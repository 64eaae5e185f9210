use std::borrow::Cow;

/// Trims overlong values to `max_chars`, keeping both ends; URLs lose the
/// middle because the page name and the panel segments carry the meaning.
pub fn truncate_middle(value: &str, max_chars: usize) -> Cow<'_, str> {
    let total = value.chars().count();
    if total <= max_chars {
        return Cow::Borrowed(value);
    }

    if max_chars <= 3 {
        return Cow::Owned(".".repeat(max_chars));
    }

    let keep = max_chars - 3;
    let left = keep / 2;
    let right = keep - left;
    let head_end = value
        .char_indices()
        .nth(left)
        .map(|(index, _)| index)
        .unwrap_or(value.len());
    let tail_start = value
        .char_indices()
        .nth(total - right)
        .map(|(index, _)| index)
        .unwrap_or(0);
    Cow::Owned(format!("{}...{}", &value[..head_end], &value[tail_start..]))
}

/// Left text with a right-aligned hint when the line has room for both.
pub fn compose_status(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    if right.is_empty() || used + 1 >= width {
        return left.to_string();
    }

    let mut out = String::with_capacity(width);
    out.push_str(left);
    for _ in 0..width - used {
        out.push(' ');
    }
    out.push_str(right);
    out
}

#[cfg(test)]
mod tests {
    use super::{compose_status, truncate_middle};

    #[test]
    fn short_values_pass_through_unchanged() {
        assert_eq!(truncate_middle("/p/wiki/Home/", 40), "/p/wiki/Home/");
    }

    #[test]
    fn long_urls_keep_head_and_tail() {
        let got = truncate_middle("/project123/wiki/Home/view/v2/compare/", 20);
        assert_eq!(got.chars().count(), 20);
        assert!(got.starts_with("/proj"));
        assert!(got.ends_with("compare/"));
    }

    #[test]
    fn tiny_width_degrades_to_dots() {
        assert_eq!(truncate_middle("abcdef", 2), "..");
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let got = truncate_middle("éééééééééééééééééééé", 10);
        assert_eq!(got.chars().count(), 10);
    }

    #[test]
    fn status_right_hint_is_right_aligned() {
        let out = compose_status("Ready", "^Q quit", 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.starts_with("Ready"));
        assert!(out.ends_with("^Q quit"));
    }

    #[test]
    fn status_drops_hint_when_cramped() {
        assert_eq!(compose_status("a long status", "hint", 10), "a long status");
    }
}
