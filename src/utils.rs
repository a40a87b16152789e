

/// First `max_chars` characters of `s`, never splitting a code point.
#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", safe_truncate(s, max_chars))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_query_preview() {
        assert_eq!(safe_truncate("pizza near me", 5), "pizza");
    }

    #[test]
    fn test_truncate_accented() {
        assert_eq!(safe_truncate("café crème brûlée", 9), "café crèm");
    }

    #[test]
    fn test_truncate_shorter_than_limit() {
        assert_eq!(safe_truncate("gym", 50), "gym");
    }

    #[test]
    fn test_truncate_ellipsis_error_body() {
        assert_eq!(safe_truncate_ellipsis("permission denied for table", 10), "permission...");
        assert_eq!(safe_truncate_ellipsis("timeout", 10), "timeout");
    }
}
