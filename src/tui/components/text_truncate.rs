//! Text truncation helpers for fixed-size terminal views.
//!
//! Widths are measured in terminal columns rather than Unicode scalar
//! values, so place names in Cyrillic or CJK scripts line up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Truncates output to a maximum number of lines.
///
/// When `max_height` is non-zero and the output exceeds that number of lines,
/// the content is cut and an ellipsis line is appended. The final output
/// contains at most `max_height` lines.
///
/// # Examples
///
/// ```rust,ignore
/// let mut output = String::from("one\ntwo\nthree\n");
/// truncate_to_height(&mut output, 2);
///
/// assert_eq!(output, "one\n...\n");
/// ```
pub(crate) fn truncate_to_height(output: &mut String, max_height: usize) {
    if max_height == 0 || output.lines().count() <= max_height {
        return;
    }

    let lines_to_keep = max_height.saturating_sub(1);
    let cut = output
        .lines()
        .take(lines_to_keep)
        .fold(String::new(), |mut kept, line| {
            kept.push_str(line);
            kept.push('\n');
            kept
        });
    *output = cut;
    output.push_str(ELLIPSIS);
    output.push('\n');
}

/// Truncates text to the provided display width and appends an ellipsis.
///
/// Widths of three columns or fewer fall back to dots only.
pub(crate) fn truncate_to_display_width_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }

    let target_width = max_width.saturating_sub(ELLIPSIS.len());
    let mut truncated = String::new();
    let mut current_width = 0_usize;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width.saturating_add(char_width) > target_width {
            break;
        }
        truncated.push(ch);
        current_width = current_width.saturating_add(char_width);
    }
    format!("{truncated}{ELLIPSIS}")
}

/// Pads `text` with spaces to `width` columns, truncating when it is wider.
pub(crate) fn fit_to_width(text: &str, width: usize) -> String {
    let fitted = truncate_to_display_width_with_ellipsis(text, width);
    let padding = width.saturating_sub(fitted.width());
    format!("{fitted}{}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{fit_to_width, truncate_to_display_width_with_ellipsis, truncate_to_height};

    #[rstest]
    #[case::short_output("one\ntwo\n", 3, "one\ntwo\n")]
    #[case::cut_output("one\ntwo\nthree\n", 2, "one\n...\n")]
    #[case::zero_height("one\ntwo\n", 0, "one\ntwo\n")]
    fn truncate_to_height_limits_lines(
        #[case] input: &str,
        #[case] max_height: usize,
        #[case] expected: &str,
    ) {
        let mut output = input.to_owned();

        truncate_to_height(&mut output, max_height);

        assert_eq!(output, expected);
    }

    #[rstest]
    #[case::fits("Toshkent", 10, "Toshkent")]
    #[case::zero("Toshkent", 0, "")]
    #[case::dots_only("Toshkent", 2, "..")]
    #[case::ellipsis("Samarqand viloyati", 9, "Samarq...")]
    #[case::wide_characters("你好世界", 5, "你...")]
    fn display_width_truncation(#[case] text: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(truncate_to_display_width_with_ellipsis(text, width), expected);
    }

    #[rstest]
    fn fit_to_width_pads_short_text() {
        assert_eq!(fit_to_width("Buxoro", 8), "Buxoro  ");
        assert_eq!(fit_to_width("Andijon shahri", 8), "Andij...");
    }
}
