//! Text chunking for TTS processing.

/// Default maximum token budget per chunk.
pub const DEFAULT_MAX_TOKENS: usize = 7000;

/// Average number of characters per API token.
pub const DEFAULT_TOKEN_CHARS: usize = 4;

/// Split text into chunks bounded by `max_tokens * token_chars` characters.
///
/// Boundaries are chosen purely by character count; no attempt is made to
/// align to word, sentence, or paragraph boundaries, so a chunk can end
/// mid-word. Each chunk has trailing whitespace stripped and a blank-line
/// marker appended, which the downstream synthesizer treats as a paragraph
/// boundary.
///
/// # Arguments
/// * `text` - The text to chunk
/// * `max_tokens` - Token budget per chunk (default: 7000)
/// * `token_chars` - Average characters per token (default: 4)
///
/// # Returns
/// Chunks in source order; empty input yields an empty list.
pub fn split_text_to_chunks(text: &str, max_tokens: usize, token_chars: usize) -> Vec<String> {
    let max_chars = max_tokens * token_chars;

    if text.is_empty() || max_chars == 0 {
        return Vec::new();
    }

    // Slice by character count, never by byte offset
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = std::cmp::min(start + max_chars, chars.len());
        let piece: String = chars[start..end].iter().collect();

        let mut chunk = piece.trim_end().to_string();
        chunk.push_str("\n\n");
        chunks.push(chunk);

        start = end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Collapse all whitespace runs so reassembled chunks can be compared
    /// against the original text.
    fn normalize(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split_text_to_chunks("Hello world.", DEFAULT_MAX_TOKENS, DEFAULT_TOKEN_CHARS);
        assert_eq!(chunks, vec!["Hello world.\n\n"]);
    }

    #[test]
    fn test_empty_text() {
        let chunks = split_text_to_chunks("", DEFAULT_MAX_TOKENS, DEFAULT_TOKEN_CHARS);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_exact_budget_split() {
        // 30000 chars at a 28000-char limit: one full chunk plus a 2000-char remainder
        let text = "a".repeat(30000);
        let chunks = split_text_to_chunks(&text, 7000, 4);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 28000 + 2);
        assert_eq!(chunks[1].len(), 2000 + 2);
        assert!(chunks[0].ends_with("\n\n"));
    }

    #[test]
    fn test_chunks_preserve_order() {
        let text = "abcdefghij";
        let chunks = split_text_to_chunks(text, 1, 3);
        assert_eq!(chunks, vec!["abc\n\n", "def\n\n", "ghi\n\n", "j\n\n"]);
    }

    #[test]
    fn test_trailing_whitespace_stripped() {
        let text = "one two   ";
        let chunks = split_text_to_chunks(text, 5, 2);
        assert_eq!(chunks, vec!["one two\n\n"]);
        // The character before the marker is never whitespace
        for chunk in &chunks {
            let body = chunk.strip_suffix("\n\n").unwrap();
            assert_eq!(body, body.trim_end());
        }
    }

    #[test]
    fn test_multibyte_boundaries() {
        // Slicing counts characters, so multi-byte text must not panic
        let text = "é".repeat(10);
        let chunks = split_text_to_chunks(&text, 1, 3);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], "ééé\n\n");
    }

    #[test]
    fn test_zero_budget_yields_nothing() {
        assert!(split_text_to_chunks("some text", 0, 4).is_empty());
    }

    proptest! {
        #[test]
        fn prop_chunk_length_bounded(text in ".{0,2000}", max_tokens in 1usize..50) {
            let token_chars = DEFAULT_TOKEN_CHARS;
            let chunks = split_text_to_chunks(&text, max_tokens, token_chars);
            for chunk in &chunks {
                let body = chunk.strip_suffix("\n\n").unwrap();
                prop_assert!(body.chars().count() <= max_tokens * token_chars);
            }
        }

        #[test]
        fn prop_reassembly_roundtrip(text in ".{0,2000}", max_tokens in 1usize..50) {
            let chunks = split_text_to_chunks(&text, max_tokens, DEFAULT_TOKEN_CHARS);
            let reassembled = chunks.concat();
            prop_assert_eq!(normalize(&reassembled), normalize(&text));
        }

        #[test]
        fn prop_chunks_in_source_order(text in "[a-z]{0,500}", max_tokens in 1usize..10) {
            // With no whitespace to strip, stripping the markers must
            // reproduce the input exactly
            let chunks = split_text_to_chunks(&text, max_tokens, 1);
            let joined: String = chunks
                .iter()
                .map(|c| c.strip_suffix("\n\n").unwrap())
                .collect();
            prop_assert_eq!(joined, text);
        }
    }
}
