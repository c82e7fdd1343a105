//! Tokenization and n-gram generation for the TF-IDF vectorizer

use regex::Regex;
use std::collections::HashSet;

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        // Keeps tech spellings like c++, c#, node.js and ci-cd in one token
        let token_regex = Regex::new(r"[\w+#.\-]+").expect("Invalid token regex");

        Self {
            stop_words: Self::create_stop_words(),
            token_regex,
        }
    }

    /// Lowercased tokens without stop words, pure numbers or single characters
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();

        self.token_regex
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| token.chars().count() > 1)
            .filter(|token| !self.stop_words.contains(token))
            .filter(|token| !token.chars().all(|c| c.is_ascii_digit()))
            .map(|token| token.to_string())
            .collect()
    }

    /// Space-joined windows of `n` consecutive tokens
    pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
        if n == 0 || tokens.len() < n {
            return Vec::new();
        }
        tokens.windows(n).map(|window| window.join(" ")).collect()
    }

    /// Unigrams followed by bigrams and trigrams
    pub fn preprocess_text(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let bigrams = Self::ngrams(&tokens, 2);
        let trigrams = Self::ngrams(&tokens, 3);

        let mut terms = tokens;
        terms.extend(bigrams);
        terms.extend(trigrams);
        terms
    }

    fn create_stop_words() -> HashSet<&'static str> {
        [
            "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
            "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
            "between", "among", "within", "without", "against", "toward", "across", "behind", "beyond",
            "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him",
            "her", "us", "them", "my", "your", "his", "its", "our", "their", "mine", "yours",
            "ours", "theirs", "myself", "yourself", "himself", "herself", "itself", "ourselves",
            "yourselves", "themselves", "what", "which", "who", "whom", "whose", "where", "when",
            "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
            "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "can",
            "will", "just", "should", "now", "also", "have", "has", "had", "be", "been", "being",
            "is", "are", "was", "were", "do", "does", "did", "doing", "get", "got", "getting",
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("I have 3 years with C++, C# and Node.js in 2023!");

        assert!(tokens.contains(&"years".to_string()));
        assert!(tokens.contains(&"c++".to_string()));
        assert!(tokens.contains(&"c#".to_string()));
        assert!(tokens.contains(&"node.js".to_string()));

        // Stop words, numbers and single characters are dropped
        assert!(!tokens.contains(&"have".to_string()));
        assert!(!tokens.contains(&"3".to_string()));
        assert!(!tokens.contains(&"2023".to_string()));
        assert!(!tokens.contains(&"i".to_string()));
    }

    #[test]
    fn test_ngrams() {
        let tokens: Vec<String> = ["python", "data", "scientist"].iter().map(|s| s.to_string()).collect();

        assert_eq!(TextProcessor::ngrams(&tokens, 2), vec!["python data", "data scientist"]);
        assert_eq!(TextProcessor::ngrams(&tokens, 3), vec!["python data scientist"]);
        assert!(TextProcessor::ngrams(&tokens, 4).is_empty());
    }

    #[test]
    fn test_preprocess_text_order() {
        let processor = TextProcessor::new();
        let terms = processor.preprocess_text("python developer");
        assert_eq!(terms, vec!["python", "developer", "python developer"]);
    }

    #[test]
    fn test_empty_text() {
        let processor = TextProcessor::new();
        assert!(processor.preprocess_text("").is_empty());
        assert!(processor.preprocess_text("the and of").is_empty());
    }
}
