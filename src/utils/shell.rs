/// Escape a string for safe use in shell single quotes
/// Converts: foo'bar -> 'foo'\''bar'
///
/// # Examples
///
/// ```
/// use gsh::utils::shell::single_quote;
///
/// assert_eq!(single_quote("ssh-agent"), "'ssh-agent'");
/// assert_eq!(single_quote("foo'bar"), "'foo'\\''bar'");
/// ```
pub fn single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Wrap a string in double quotes, escaping the characters the shell still
/// interprets inside them (`\`, `"`, `$` and backtick).
///
/// # Examples
///
/// ```
/// use gsh::utils::shell::double_quote;
///
/// assert_eq!(double_quote("some-file"), "\"some-file\"");
/// assert_eq!(double_quote("a\"b"), "\"a\\\"b\"");
/// ```
pub fn double_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quote_simple() {
        assert_eq!(single_quote("hello"), "'hello'");
    }

    #[test]
    fn test_single_quote_with_single_quote() {
        assert_eq!(single_quote("foo'bar"), "'foo'\\''bar'");
    }

    #[test]
    fn test_single_quote_with_special_chars() {
        assert_eq!(single_quote("$(whoami)"), "'$(whoami)'");
    }

    #[test]
    fn test_double_quote_plain() {
        assert_eq!(double_quote("/tmp/ssh-XXXX/agent.42"), "\"/tmp/ssh-XXXX/agent.42\"");
    }

    #[test]
    fn test_double_quote_empty() {
        assert_eq!(double_quote(""), "\"\"");
    }

    #[test]
    fn test_double_quote_escapes_expansions() {
        assert_eq!(double_quote("$(rm -rf /)"), "\"\\$(rm -rf /)\"");
        assert_eq!(double_quote("`id`"), "\"\\`id\\`\"");
        assert_eq!(double_quote("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_double_quote_keeps_single_quotes() {
        assert_eq!(double_quote("it's"), "\"it's\"");
    }
}
