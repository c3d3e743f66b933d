use thousands::Separable;
use unicode_width::UnicodeWidthStr;

pub fn wrap_text(s: &str, width: usize) -> String {
    if width == 0 {
        return String::from("");
    }

    s.split('\n')
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(s: &str, width: usize) -> String {
    s.chars().fold(String::from(""), |acc: String, c: char| {
        let last_line = acc.lines().last().unwrap_or(&acc);
        if last_line.width() + c.to_string().width() > width {
            format!("{acc}\n{c}")
        } else {
            format!("{acc}{c}")
        }
    })
}

pub fn truncate_text(s: &str, max_height: usize) -> String {
    if max_height == 0 {
        return String::from("");
    }

    let lines: Vec<&str> = s.lines().collect();
    if lines.len() > max_height {
        if max_height == 1 {
            String::from("...")
        } else {
            #[cfg(windows)]
            {
                format!("{}\r\n...", lines[..max_height - 1].join("\r\n"))
            }
            #[cfg(not(windows))]
            {
                format!("{}\n...", lines[..max_height - 1].join("\n"))
            }
        }
    } else {
        s.to_string()
    }
}

/// `$1,299.99` style amount
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        (cents / 100).separate_with_commas(),
        cents % 100
    )
}

/// Shortens `s` to `max` display columns, ending with an ellipsis
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + c.to_string().width() + 1 > max {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_wrap_text_no_wrap_alnum() {
        let actual = wrap_text("hello, world!", 13);
        let expected = "hello, world!";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_wrap_text_wrap_alnum() {
        let actual = wrap_text("hello, world!", 4);
        let expected = "hell\no, w\norld\n!";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_wrap_text_wrap_double_width() {
        let actual = wrap_text("こんにちは、世界！", 7);
        let expected = "こんに\nちは、\n世界！";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_wrap_text_keeps_line_breaks() {
        let actual = wrap_text("ab\ncd", 4);
        let expected = "ab\ncd";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        let actual = wrap_text("hello, world!", 0);
        let expected = "";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_truncate_text_no_truncate() {
        let actual = truncate_text("foo\nbar\nbaz", 3);
        let expected = "foo\nbar\nbaz";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_truncate_text_truncate() {
        let actual = truncate_text("foo\nbar\nbaz", 2);
        let expected = "foo\n...";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_truncate_text_single_line() {
        let actual = truncate_text("foo\nbar", 1);
        let expected = "...";
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case(0.0, "$0.00")]
    #[case(8.99, "$8.99")]
    #[case(2299.99, "$2,299.99")]
    #[case(1234567.5, "$1,234,567.50")]
    #[case(-3.5, "-$3.50")]
    fn test_format_price(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(format_price(amount), expected);
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("Red Shirt", 20), "Red Shirt");
        assert_eq!(ellipsize("The Book - Limited Edition", 10), "The Book …");
        assert_eq!(ellipsize("abc", 0), "");
    }
}
