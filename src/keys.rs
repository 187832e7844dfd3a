//! Object key composition.
//!
//! S3 keys never start with `/`. Fragments may come from constants, version
//! strings or file names, so every fragment is normalized the same way before
//! joining.

/// Separator used inside object keys
pub const KEY_SEPARATOR: char = '/';

/// Join key fragments into a normalized object key.
///
/// Backslashes become `/`, leading and trailing `/` are stripped from each
/// fragment, and fragments that end up empty are dropped.
pub fn compose_key<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::new();
    for fragment in fragments {
        let normalized = fragment.as_ref().replace('\\', "/");
        let trimmed = normalized.trim_matches(KEY_SEPARATOR);
        if trimmed.is_empty() {
            continue;
        }
        if !key.is_empty() {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(trimmed);
    }
    key
}

/// Render a fully qualified `s3://bucket/key` destination
pub fn s3_uri(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_separator() {
        assert_eq!(
            compose_key(["firmware/ESPRelayBoard/", "latest"]),
            "firmware/ESPRelayBoard/latest"
        );
        assert_eq!(compose_key(["/a/", "/b", "c/"]), "a/b/c");
    }

    #[test]
    fn normalizes_backslashes() {
        assert_eq!(compose_key(["\\firmware\\board\\", "2.3.0"]), "firmware/board/2.3.0");
    }

    #[test]
    fn empty_and_separator_only_fragments_are_ignored() {
        let base = compose_key(["P", "2.3.0", "storage.bin"]);
        let noisy_inputs: &[&[&str]] = &[
            &["", "P", "2.3.0", "storage.bin"],
            &["P", "/", "2.3.0", "//", "storage.bin", ""],
            &["\\", "P", "\\/", "2.3.0", "storage.bin"],
            &["", "", "/P/", "", "/2.3.0/", "storage.bin", "///"],
        ];
        for input in noisy_inputs {
            assert_eq!(compose_key(input.iter()), base, "input: {:?}", input);
        }
    }

    #[test]
    fn never_starts_with_separator() {
        let inputs: &[&[&str]] = &[&["/"], &["//x"], &["\\x", "/y"], &["", "/"], &[]];
        for input in inputs {
            let key = compose_key(input.iter());
            assert!(!key.starts_with('/'), "{:?} -> {}", input, key);
        }
        assert_eq!(compose_key(Vec::<String>::new()), "");
    }

    #[test]
    fn inner_separators_survive() {
        // only the edges of a fragment are trimmed
        assert_eq!(compose_key(["a//b"]), "a//b");
    }

    #[test]
    fn s3_uri_format() {
        assert_eq!(s3_uri("B", "P/latest/x.bin"), "s3://B/P/latest/x.bin");
    }
}
