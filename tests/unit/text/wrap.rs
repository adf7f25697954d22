use super::*;

#[test]
fn default_copy_wraps_into_three_lines() {
    assert_eq!(
        wrap_headline("GPT-5.2-Codex now available in GitHub Copilot"),
        vec!["GPT-5.2-Codex", "now available in", "GitHub Copilot"]
    );
}

#[test]
fn empty_copy_has_no_lines() {
    assert!(wrap_headline("").is_empty());
}

#[test]
fn overflow_is_dropped_not_reflowed() {
    let text = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen";
    let lines = wrap_headline(text);
    assert_eq!(lines.len(), HEADLINE_MAX_LINES);
    assert_eq!(lines[0], "one two three");
    assert!(lines.iter().all(|l| !l.contains("fourteen")));
}

#[test]
fn blank_paragraphs_are_preserved() {
    assert_eq!(wrap_headline("Hello\n\nWorld"), vec!["Hello", "", "World"]);
    assert_eq!(wrap_headline("  \nx"), vec!["", "x"]);
}

#[test]
fn long_words_keep_their_own_line() {
    assert_eq!(
        wrap_headline("a supercalifragilistic b"),
        vec!["a", "supercalifragilistic", "b"]
    );
}

#[test]
fn boundary_is_inclusive() {
    // 16 characters fit, 17 do not.
    assert_eq!(wrap_words("abcdefg hijklmno", 16, 4), vec!["abcdefg hijklmno"]);
    assert_eq!(wrap_words("abcdefg hijklmnop", 16, 4), vec!["abcdefg", "hijklmnop"]);
}

#[test]
fn counts_characters_not_bytes() {
    assert_eq!(wrap_words("éééé éééé", 9, 4), vec!["éééé éééé"]);
}
