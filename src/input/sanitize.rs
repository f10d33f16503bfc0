use std::collections::HashSet;

const MAX_PURIFY_ROUNDS: usize = 16;

fn strip_tags(input: &str) -> String {
    let cleaned = ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string();

    html_escape::decode_html_entities(&cleaned).into_owned()
}

/// Removes every tag, and the content of `script`/`style` elements, returning
/// plain text. Character references are decoded and the result cleaned again
/// until it stops changing, so markup spelled with entities is removed too.
pub fn purify(input: &str) -> String {
    let mut text = strip_tags(input);

    for _ in 0..MAX_PURIFY_ROUNDS {
        let next = strip_tags(&text);
        if next == text {
            return text;
        }
        text = next;
    }

    // Still unstable after every round: keep the text but drop anything that
    // could open a tag.
    text.replace(|c: char| c == '<' || c == '>', "")
}

/// Prepares a user-supplied string for persistence.
///
/// Markup is stripped first, then `&`, `<`, `>`, `"` and `'` are written as
/// entities. Because the purified text is decoded before escaping, a value
/// that was already escaped is stored once-escaped, never twice.
pub fn sanitize_for_storage(input: &str) -> String {
    html_escape::encode_quoted_attribute(&purify(input)).into_owned()
}

/// Reverses the entity escaping applied by [`sanitize_for_storage`].
pub fn unescape_for_display(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: [&str; 7] = [
        "Run a marathon",
        "Tom & Jerry",
        "5 > 3 and 2 < 4",
        "He said \"hi\" and it's fine",
        "Café ☕ 日本語",
        "  padded  ",
        "line one\nline two",
    ];

    #[test]
    fn plain_text_round_trips() {
        for input in PLAIN {
            assert_eq!(unescape_for_display(&sanitize_for_storage(input)), input);
        }
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            sanitize_for_storage("Tom & \"Jerry\""),
            "Tom &amp; &quot;Jerry&quot;"
        );
        assert_eq!(sanitize_for_storage("2 < 4"), "2 &lt; 4");
    }

    #[test]
    fn strips_scripts_and_tags() {
        let stored = sanitize_for_storage("<script>alert(1)</script>Buy <b>milk</b>");

        assert_eq!(stored, "Buy milk");
        assert_eq!(unescape_for_display(&stored), "Buy milk");
    }

    #[test]
    fn strips_event_handler_markup() {
        let stored = sanitize_for_storage("<img src=x onerror=alert(1)>Photo");

        assert_eq!(stored, "Photo");
    }

    #[test]
    fn round_trip_with_markup_equals_purified_input() {
        let input = "<em>Learn</em> Rust & <i>Go</i>";

        assert_eq!(
            unescape_for_display(&sanitize_for_storage(input)),
            purify(input)
        );
        assert_eq!(purify(input), "Learn Rust & Go");
    }

    #[test]
    fn sanitizing_twice_changes_nothing() {
        for input in PLAIN {
            let once = sanitize_for_storage(input);

            assert_eq!(sanitize_for_storage(&once), once);
        }
    }

    #[test]
    fn edit_save_reload_is_stable() {
        let stored = sanitize_for_storage("Tom & Jerry");
        let shown = unescape_for_display(&stored);
        let stored_again = sanitize_for_storage(&shown);

        assert_eq!(stored_again, stored);
        assert_eq!(unescape_for_display(&stored_again), "Tom & Jerry");
    }

    #[test]
    fn strips_markup_spelled_with_entities() {
        for input in [
            "&lt;script&gt;alert(1)&lt;/script&gt;Buy milk",
            "&#60;script&#62;alert(1)&#60;/script&#62;Buy milk",
            "&amp;lt;script&amp;gt;alert(1)&amp;lt;/script&amp;gt;Buy milk",
        ] {
            let stored = sanitize_for_storage(input);
            let shown = unescape_for_display(&stored);

            assert_eq!(stored, "Buy milk");
            assert!(!shown.contains("<script>"), "{:?} shown as {:?}", input, shown);
        }
    }

    #[test]
    fn entity_references_are_read_as_the_characters_they_name() {
        let stored = sanitize_for_storage("&lt;b&gt;bold&lt;/b&gt; text");
        assert_eq!(stored, "bold text");
        assert_eq!(unescape_for_display(&stored), "bold text");

        let stored = sanitize_for_storage("Tom &amp; Jerry");
        assert_eq!(stored, "Tom &amp; Jerry");
        assert_eq!(unescape_for_display(&stored), "Tom & Jerry");

        let stored = sanitize_for_storage("2 &lt; 4");
        assert_eq!(stored, "2 &lt; 4");
        assert_eq!(unescape_for_display(&stored), "2 < 4");
    }

    #[test]
    fn sanitizing_entity_input_twice_changes_nothing() {
        for input in ["&lt;b&gt;x&lt;/b&gt;", "Tom &amp; Jerry", "&#60;script&#62;"] {
            let once = sanitize_for_storage(input);

            assert_eq!(sanitize_for_storage(&once), once);
        }
    }

    #[test]
    fn unescape_only_touches_entities() {
        assert_eq!(unescape_for_display("&lt;b&gt; &amp; &#x27;"), "<b> & '");
        assert_eq!(unescape_for_display("no entities"), "no entities");
    }
}
