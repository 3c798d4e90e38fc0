//! Greedy word wrapping

/// Anything that can report the rendered width of a string
///
/// Widths are in whatever unit the caller uses for `max_width`.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f64;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn text_width(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Split text into lines no wider than `max_width`
///
/// Words are accumulated until the next one would overflow, then a new
/// line starts. A word wider than the column sits alone on its line and
/// is never split. Hard line breaks in the input are kept; blank or
/// whitespace-only input yields no lines at all.
pub fn wrap_text<M>(text: &str, max_width: f64, measure: &M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let text = text.trim_end();
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        wrap_paragraph(paragraph, max_width, measure, &mut lines);
    }
    lines
}

fn wrap_paragraph<M>(paragraph: &str, max_width: f64, measure: &M, lines: &mut Vec<String>)
where
    M: TextMeasure + ?Sized,
{
    let mut current_line = String::new();

    for word in paragraph.split_whitespace() {
        if current_line.is_empty() {
            current_line.push_str(word);
            continue;
        }

        let candidate = format!("{current_line} {word}");
        if measure.text_width(&candidate) <= max_width {
            current_line = candidate;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
        }
    }

    // Blank paragraphs still take a line
    lines.push(current_line);
}

/// Height taken by `line_count` lines
pub fn measure_block_height(line_count: usize, line_height: f64) -> f64 {
    line_count as f64 * line_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(text: &str) -> f64 {
        text.chars().count() as f64
    }

    #[test]
    fn test_wrap_basic() {
        let lines = wrap_text("Hello world this is a test", 12.0, &chars);
        assert_eq!(lines, vec!["Hello world", "this is a", "test"]);
    }

    #[test]
    fn test_wrap_exact_fit() {
        let lines = wrap_text("Hello world", 11.0, &chars);
        assert_eq!(lines, vec!["Hello world"]);
    }

    #[test]
    fn test_wrap_just_over() {
        let lines = wrap_text("Hello world", 10.0, &chars);
        assert_eq!(lines, vec!["Hello", "world"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text("", 10.0, &chars).is_empty());
        assert!(wrap_text("   \n  ", 10.0, &chars).is_empty());
    }

    #[test]
    fn test_long_word_is_not_split() {
        let lines = wrap_text("a Supercalifragilisticexpialidocious b", 10.0, &chars);
        assert_eq!(lines, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
    }

    #[test]
    fn test_collapses_spaces() {
        let lines = wrap_text("Hello    world", 20.0, &chars);
        assert_eq!(lines, vec!["Hello world"]);
    }

    #[test]
    fn test_hard_breaks() {
        let lines = wrap_text("12 Main Street\n\nSpringfield 4000\n", 40.0, &chars);
        assert_eq!(lines, vec!["12 Main Street", "", "Springfield 4000"]);
    }

    #[test]
    fn test_measure_with_struct() {
        struct Fixed(f64);
        impl TextMeasure for Fixed {
            fn text_width(&self, text: &str) -> f64 {
                text.len() as f64 * self.0
            }
        }

        let lines = wrap_text("aa bb cc", 10.0, &Fixed(2.0));
        assert_eq!(lines, vec!["aa bb", "cc"]);
    }

    #[test]
    fn test_measure_block_height() {
        assert_eq!(measure_block_height(0, 4.0), 0.0);
        assert_eq!(measure_block_height(3, 4.0), 12.0);
    }
}
