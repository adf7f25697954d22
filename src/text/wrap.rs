/// Soft per-line budget for the headline, in characters.
pub const HEADLINE_MAX_CHARS: usize = 16;
/// Lines past this are dropped.
pub const HEADLINE_MAX_LINES: usize = 4;

/// Greedy character-count word wrap for the headline.
///
/// Explicit newlines split paragraphs first and a blank paragraph is kept as an empty line.
/// Words are packed while the line stays within `max_chars`; a single word longer than the budget
/// gets a line of its own and is never split. At most `max_lines` lines are returned; the rest
/// are dropped. An empty `text` yields no lines.
pub fn wrap_words(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split(' ') {
            let candidate_len = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if candidate_len > max_chars && !current.is_empty() {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines.truncate(max_lines);
    lines
}

/// [`wrap_words`] with the headline budget.
pub fn wrap_headline(text: &str) -> Vec<String> {
    wrap_words(text, HEADLINE_MAX_CHARS, HEADLINE_MAX_LINES)
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
