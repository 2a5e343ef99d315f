/// Joins fragments so that exactly one space separates neighbours.
///
/// Empty fragments are skipped. No space is inserted when the left side already ends with
/// whitespace or the right side starts with it.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut joined = String::new();
    for fragment in fragments {
        push_fragment(&mut joined, fragment.as_ref());
    }
    joined
}

pub(crate) fn push_fragment(joined: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if !joined.is_empty()
        && !joined.ends_with(char::is_whitespace)
        && !fragment.starts_with(char::is_whitespace)
    {
        joined.push(' ');
    }
    joined.push_str(fragment);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_inserts_single_space() {
        assert_eq!(join_fragments(&["Hello", "world"]), "Hello world");
        assert_eq!(join_fragments(&["Hello", " world"]), "Hello world");
        assert_eq!(join_fragments(&["Hello ", "world"]), "Hello world");
        assert_eq!(join_fragments(&["line\n", "next"]), "line\nnext");
    }

    #[test]
    fn test_join_skips_empty() {
        assert_eq!(join_fragments(&["", "a", "", "b", ""]), "a b");
        assert_eq!(join_fragments::<&str>(&[]), "");
    }
}
