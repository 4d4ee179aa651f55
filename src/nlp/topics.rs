//! Candidate topic extraction.
//!
//! A small rule-based chunker stands in for a full parser: a chunk is an
//! optional run of determiners followed by a run of content words, and any
//! punctuation, line break or other stopword closes it. A participle after
//! the head noun ("the people living") closes it too and is dropped.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Words that open a noun phrase rather than end one.
const DETERMINERS: &[&str] = &[
    "a", "an", "the", "my", "your", "his", "her", "its", "our", "their", "this", "that", "these",
    "those", "every", "some", "all", "no", "each", "any", "another",
];

const STOP_WORDS_LIST: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "been",
    "before", "beforehand", "behind", "being", "below", "beside", "besides", "between", "beyond",
    "both", "but", "by", "ca", "call", "can", "cannot", "could", "did", "do", "does", "doing",
    "done", "down", "due", "during", "each", "either", "else", "elsewhere", "empty", "enough",
    "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few", "first",
    "for", "former", "formerly", "from", "front", "full", "further", "get", "give", "go", "had",
    "has", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "indeed", "into", "is",
    "it", "its", "itself", "just", "keep", "last", "latter", "least", "less", "made", "make",
    "many", "may", "me", "meanwhile", "might", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless",
    "next", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of",
    "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
    "quite", "rather", "re", "really", "regarding", "same", "say", "see", "seem", "seemed",
    "seeming", "seems", "several", "she", "should", "show", "side", "since", "so", "some",
    "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still", "such",
    "take", "than", "that", "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they", "this",
    "those", "though", "through", "throughout", "thru", "thus", "to", "together", "too", "top",
    "toward", "towards", "under", "unless", "until", "up", "upon", "us", "used", "using",
    "various", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves", "oh", "ooh", "yeah", "la", "na", "hey", "'s", "'m", "'re", "'ll", "'ve", "'d",
    "n't", "i'm", "you're", "it's", "don't", "can't", "won't", "ain't", "i'll", "i've", "gonna",
    "wanna",
];

/// Common nouns that end in "-ing" and must not be read as participles.
const ING_NOUNS: &[&str] = &[
    "anything", "beginning", "blessing", "building", "ceiling", "clothing", "darling", "ending",
    "evening", "everything", "feeling", "king", "lightning", "meaning", "morning", "nothing",
    "ring", "something", "spring", "string", "thing", "wedding", "wing",
];

static ING_NOUN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ING_NOUNS.iter().copied().collect());

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS_LIST.iter().copied().collect());

static DETERMINER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DETERMINERS.iter().copied().collect());

#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

fn is_participle(word: &str) -> bool {
    word.len() > 4 && word.ends_with("ing") && !ING_NOUN_SET.contains(word)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '-'
}

/// Derives multi-word candidate phrases from raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicExtractor;

impl TopicExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Splits text into noun-phrase-like chunks, original casing kept.
    #[must_use]
    pub fn noun_chunks(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();

        // Anything that is not part of a word or plain spacing ends a phrase.
        for segment in text.split(|c: char| !(is_word_char(c) || c == ' ' || c == '\t')) {
            let mut determiners: Vec<&str> = Vec::new();
            let mut content: Vec<&str> = Vec::new();

            for word in segment.split_whitespace() {
                let lower = word.to_lowercase();
                if DETERMINER_SET.contains(lower.as_str()) {
                    flush_chunk(&mut chunks, &mut determiners, &mut content);
                    determiners.push(word);
                } else if is_stop_word(&lower)
                    || (!content.is_empty() && is_participle(&lower))
                {
                    flush_chunk(&mut chunks, &mut determiners, &mut content);
                    determiners.clear();
                } else {
                    content.push(word);
                }
            }
            flush_chunk(&mut chunks, &mut determiners, &mut content);
        }

        chunks
    }

    /// Lower-cased, deduplicated multi-word candidates in first-seen order.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.noun_chunks(text)
            .into_iter()
            .map(|chunk| chunk.to_lowercase())
            .filter(|chunk| !is_stop_word(chunk) && chunk.trim().chars().count() > 1)
            .filter(|chunk| chunk.split_whitespace().count() > 1)
            .filter(|chunk| seen.insert(chunk.clone()))
            .collect()
    }
}

fn flush_chunk(chunks: &mut Vec<String>, determiners: &mut Vec<&str>, content: &mut Vec<&str>) {
    if !content.is_empty() {
        let phrase = determiners
            .iter()
            .chain(content.iter())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        chunks.push(phrase);
        determiners.clear();
    }
    content.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_keep_determiners() {
        let chunks =
            TopicExtractor::new().noun_chunks("Imagine all the people living life in peace");
        assert_eq!(chunks, ["Imagine", "all the people", "life", "peace"]);
    }

    #[test]
    fn test_participle_after_noun_ends_chunk() {
        let chunks = TopicExtractor::new().noun_chunks("the children singing songs");
        assert_eq!(chunks, ["the children", "songs"]);
    }

    #[test]
    fn test_leading_participle_and_ing_nouns_stay_in_chunk() {
        let chunks = TopicExtractor::new().noun_chunks("the dancing queen\nthe early morning");
        assert_eq!(chunks, ["the dancing queen", "the early morning"]);
    }

    #[test]
    fn test_punctuation_and_newlines_break_chunks() {
        let chunks = TopicExtractor::new().noun_chunks("the river, the sea\nthe sky");
        assert_eq!(chunks, ["the river", "the sea", "the sky"]);
    }

    #[test]
    fn test_extract_lowercases_and_dedupes() {
        let topics = TopicExtractor::new()
            .extract("The Long Road.\nthe long road!\nA brotherhood of man");
        assert_eq!(topics, ["the long road", "a brotherhood"]);
    }

    #[test]
    fn test_single_words_and_stopwords_yield_nothing() {
        let topics = TopicExtractor::new().extract("Oh yeah, love. Heaven! I, you, me.");
        assert!(topics.is_empty());
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(TopicExtractor::new().extract("").is_empty());
    }
}
