use serde::de::DeserializeOwned;
use thiserror::Error;

/// Maximum accepted length of a single list literal, in bytes (DOS protection)
pub const MAX_LITERAL_LENGTH: usize = 4 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid groups literal: {0}")]
    InvalidGroups(String),

    #[error("Invalid contributions literal: {0}")]
    InvalidContributions(String),

    #[error("Invalid boolean '{0}' (expected true or false)")]
    InvalidFlag(String),

    #[error("Literal too long: {0} bytes exceeds maximum of {MAX_LITERAL_LENGTH}")]
    TooLong(usize),
}

/// Parse a groups literal such as `[[0, 1], [1, 2]]`.
///
/// # Examples
///
/// ```
/// use plural_qf::parsing::literal::parse_groups;
///
/// let groups = parse_groups("[[0, 1], (1, 2),]").unwrap();
/// assert_eq!(groups, vec![vec![0, 1], vec![1, 2]]);
/// ```
///
/// # Errors
///
/// Returns `ParseError::InvalidGroups` if the text is not a list of lists of
/// non-negative integers, or `ParseError::TooLong` if it exceeds
/// [`MAX_LITERAL_LENGTH`].
pub fn parse_groups(text: &str) -> Result<Vec<Vec<usize>>, ParseError> {
    parse_literal(text, ParseError::InvalidGroups)
}

/// Parse a contributions literal such as `[10, 20.5, 0]`.
///
/// # Errors
///
/// Returns `ParseError::InvalidContributions` if the text is not a list of
/// numbers, or `ParseError::TooLong` if it exceeds [`MAX_LITERAL_LENGTH`].
pub fn parse_contributions(text: &str) -> Result<Vec<f64>, ParseError> {
    parse_literal(text, ParseError::InvalidContributions)
}

/// Parse a boolean option, accepting `True`/`False` in any case.
///
/// # Errors
///
/// Returns `ParseError::InvalidFlag` for anything else.
pub fn parse_flag(text: &str) -> Result<bool, ParseError> {
    match text.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidFlag(text.to_string())),
    }
}

fn parse_literal<T: DeserializeOwned>(
    text: &str,
    invalid: fn(String) -> ParseError,
) -> Result<T, ParseError> {
    if text.len() > MAX_LITERAL_LENGTH {
        return Err(ParseError::TooLong(text.len()));
    }
    serde_json::from_str(&normalize(text)).map_err(|e| invalid(e.to_string()))
}

/// Rewrite tuple parentheses as brackets and drop trailing commas so that
/// Python-style list literals become valid JSON.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_comma = false;
    let mut held = String::new();

    for c in text.chars() {
        let c = match c {
            '(' => '[',
            ')' => ']',
            other => other,
        };

        if pending_comma {
            if c.is_whitespace() {
                held.push(c);
                continue;
            }
            // A comma directly before a closing bracket is dropped
            if c != ']' {
                out.push(',');
            }
            out.push_str(&held);
            held.clear();
            pending_comma = false;
        }

        if c == ',' {
            pending_comma = true;
        } else {
            out.push(c);
        }
    }

    if pending_comma {
        out.push(',');
        out.push_str(&held);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups() {
        assert_eq!(
            parse_groups("[[0, 1], [1, 2]]").unwrap(),
            vec![vec![0, 1], vec![1, 2]]
        );
        assert_eq!(parse_groups("[]").unwrap(), Vec::<Vec<usize>>::new());
        assert_eq!(parse_groups("[[]]").unwrap(), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_parse_python_style() {
        assert_eq!(
            parse_groups("[(0, 1), (2,),]").unwrap(),
            vec![vec![0, 1], vec![2]]
        );
        assert_eq!(parse_contributions("[10, 20.5, 0, ]").unwrap(), vec![10.0, 20.5, 0.0]);
    }

    #[test]
    fn test_invalid_groups() {
        assert!(matches!(
            parse_groups("[[0, -1]]"),
            Err(ParseError::InvalidGroups(_))
        ));
        assert!(matches!(
            parse_groups("[0, 1]"),
            Err(ParseError::InvalidGroups(_))
        ));
        assert!(matches!(
            parse_groups("not a list"),
            Err(ParseError::InvalidGroups(_))
        ));
    }

    #[test]
    fn test_invalid_contributions() {
        assert!(matches!(
            parse_contributions("[10, 'a']"),
            Err(ParseError::InvalidContributions(_))
        ));
        // Negative amounts parse; rejecting them is the formulas' job
        assert_eq!(parse_contributions("[-1]").unwrap(), vec![-1.0]);
    }

    #[test]
    fn test_too_long() {
        let text = format!("[{}]", "0,".repeat(MAX_LITERAL_LENGTH));
        assert!(matches!(
            parse_contributions(&text),
            Err(ParseError::TooLong(_))
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("True").unwrap());
        assert!(!parse_flag("false").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_normalize_keeps_inner_commas() {
        assert_eq!(normalize("[1 ,2, 3 , ]"), "[1 ,2, 3  ]");
        assert_eq!(normalize("[[0,1],]"), "[[0,1]]");
    }
}
