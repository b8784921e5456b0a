/*!
 * Sentence-aligned text chunking.
 *
 * Translation APIs cap the size of a single query, so longer text is cut at
 * sentence boundaries into pieces that each fit under the limit.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest run of text ending in `.`, `!` or `?` followed by whitespace or end of text
static SENTENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s).*?[.!?]+(?:\s+|$)").unwrap()
});

/// Length of a text as the chunker counts it
fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split text into sentences, keeping trailing whitespace with each sentence.
///
/// Concatenating the result yields the input unchanged. Text after the last
/// terminator forms a final sentence of its own.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last_end = 0;

    for m in SENTENCE_REGEX.find_iter(text) {
        if m.end() == m.start() {
            continue;
        }
        sentences.push(m.as_str());
        last_end = m.end();
    }

    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    sentences
}

/// Split text into chunks of at most `max_length` characters.
///
/// Sentences are packed greedily. A single sentence longer than `max_length`
/// is kept whole as its own oversized chunk.
pub fn split_text(text: &str, max_length: usize) -> Vec<String> {
    if char_len(text) <= max_length {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(text) {
        let sentence_len = char_len(sentence);
        if current_len + sentence_len <= max_length {
            current.push_str(sentence);
            current_len += sentence_len;
        } else {
            push_chunk(&mut chunks, &current);
            current = sentence.to_string();
            current_len = sentence_len;
        }
    }
    push_chunk(&mut chunks, &current);

    chunks
}

fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
