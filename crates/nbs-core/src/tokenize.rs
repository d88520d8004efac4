//! Tweet tokenization.
//!
//! Turns a raw message into the normalized words a model was trained on.
//! The trainer and the scorer must agree on this normalization; nothing
//! downstream can detect a mismatch.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Splits raw text into scoring tokens.
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

static TICKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\w*").unwrap());
static RETWEET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^RT\s+").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static HANDLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());

static EMOTICON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{}$", EMOTICON)).unwrap());
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "{}|{}|{}|{}|{}|{}",
        EMOTICON,
        r"[^\W\d_](?:[^\W\d_]|['\-_])+[^\W\d_]", // words with apostrophes or dashes
        r"[+\-]?\d+(?:[,/.:\-]\d+[+\-]?)?",      // numbers, fractions, times
        r"\w+",                                  // remaining word characters
        r"\.(?:\s*\.)+",                         // ellipsis
        r"\S",                                   // anything else
    ))
    .unwrap()
});

const EMOTICON: &str = concat!(
    r"(?:[<>]?[:;=8][\-o*']?[)\](\[dDpP/:}{@|\\]",
    r"|[)\](\[dDpP/:}{@|\\][\-o*']?[:;=8][<>]?",
    r"|<3)"
);

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// ASCII punctuation run. A token found verbatim inside it is noise;
/// emoticons such as `:)` are not substrings and survive.
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// English stopwords removed before stemming.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
    "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't",
    "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't",
    "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// Characters that, directly before `@`, make it part of a word such as
/// an email address rather than the start of a handle.
fn joins_handle(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_!@#$%&*".contains(c)
}

/// Replace `@handles` with a space, leaving `name@host` intact.
fn remove_handles(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in HANDLE_RE.find_iter(text) {
        if text[..m.start()].chars().next_back().is_some_and(joins_handle) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push(' ');
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

fn is_punctuation(token: &str) -> bool {
    PUNCTUATION.contains(token)
}

/// Decode the HTML entities Twitter escapes in message bodies.
fn replace_html_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse runs of three or more identical characters to exactly three.
fn reduce_lengthening(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= 3 {
            out.push(c);
        }
    }
    out
}

/// Tokenizer for short social-media messages.
///
/// Pipeline: strip tickers, a leading `RT`, hyperlinks and the `#` sign;
/// drop `@handles`; collapse character runs; split into words and
/// emoticons; lowercase words; drop stopwords and punctuation; stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweetTokenizer {
    stem: bool,
    remove_stopwords: bool,
    strip_handles: bool,
}

impl Default for TweetTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetTokenizer {
    pub fn new() -> Self {
        Self {
            stem: true,
            remove_stopwords: true,
            strip_handles: true,
        }
    }

    /// Enable or disable English Snowball stemming.
    pub fn with_stemming(mut self, stem: bool) -> Self {
        self.stem = stem;
        self
    }

    /// Enable or disable stopword removal.
    pub fn with_stopwords(mut self, remove: bool) -> Self {
        self.remove_stopwords = remove;
        self
    }

    /// Enable or disable removal of `@handles`.
    pub fn with_handles(mut self, strip: bool) -> Self {
        self.strip_handles = strip;
        self
    }

    fn clean(&self, text: &str) -> String {
        let text = TICKER_RE.replace_all(text, "");
        let text = RETWEET_RE.replace(&text, "");
        let text = URL_RE.replace_all(&text, "");
        let text = text.replace('#', "");
        let text = replace_html_entities(&text);
        let text = if self.strip_handles {
            remove_handles(&text)
        } else {
            text
        };
        reduce_lengthening(&text)
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        let word = if EMOTICON_RE.is_match(raw) {
            raw.to_string()
        } else {
            raw.to_lowercase()
        };

        if self.remove_stopwords && is_stopword(&word) {
            return None;
        }
        if is_punctuation(&word) {
            return None;
        }

        if self.stem {
            Some(STEMMER.stem(&word).into_owned())
        } else {
            Some(word)
        }
    }
}

impl Tokenize for TweetTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean(text);
        TOKEN_RE
            .find_iter(&cleaned)
            .filter_map(|m| self.normalize(m.as_str()))
            .collect()
    }
}

/// Splits on whitespace and nothing else. For input that is already
/// tokenized the same way the model's vocabulary was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceTokenizer;

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> TweetTokenizer {
        TweetTokenizer::new().with_stemming(false)
    }

    #[test]
    fn strips_urls_handles_tickers_and_retweet_marker() {
        let tokens = plain().tokenize("RT @alice: $AAPL looks great https://t.co/xyz #winning");
        assert_eq!(tokens, vec!["looks", "great", "winning"]);
    }

    #[test]
    fn email_addresses_are_not_handles() {
        assert_eq!(remove_handles("mail me@example.com"), "mail me@example.com");
        assert_eq!(remove_handles("(@bob) hi"), "( ) hi");
        let tokens = plain().tokenize("mail me@example.com");
        assert_eq!(tokens, vec!["mail", "example", "com"]);
    }

    #[test]
    fn keeps_handles_when_asked() {
        let tokens = plain().with_handles(false).tokenize("thanks @bob");
        assert_eq!(tokens, vec!["thanks", "bob"]);
    }

    #[test]
    fn lowercases_words_but_not_emoticons() {
        let tokens = plain().tokenize("GREAT day :D");
        assert_eq!(tokens, vec!["great", "day", ":D"]);
    }

    #[test]
    fn keeps_smiley_and_sad_faces() {
        let tokens = plain().tokenize("love it :) hate it :(");
        assert_eq!(tokens, vec!["love", ":)", "hate", ":("]);
    }

    #[test]
    fn drops_stopwords_and_punctuation() {
        let tokens = plain().tokenize("This is the best, isn't it !");
        assert_eq!(tokens, vec!["best"]);
    }

    #[test]
    fn stopwords_can_be_kept() {
        let tokens = plain().with_stopwords(false).tokenize("not good");
        assert_eq!(tokens, vec!["not", "good"]);
    }

    #[test]
    fn collapses_character_runs() {
        assert_eq!(reduce_lengthening("sooooo goooood"), "sooo goood");
        let tokens = plain().tokenize("waaaaaay");
        assert_eq!(tokens, vec!["waaay"]);
    }

    #[test]
    fn decodes_html_entities() {
        let tokens = plain().tokenize("fish &amp; chips");
        assert_eq!(tokens, vec!["fish", "chips"]);
    }

    #[test]
    fn stems_words() {
        let tokens = TweetTokenizer::new().tokenize("running followers loved");
        assert_eq!(tokens, vec!["run", "follow", "love"]);
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert!(TweetTokenizer::new().tokenize("").is_empty());
        assert!(TweetTokenizer::new().tokenize("   \t\n").is_empty());
        assert!(TweetTokenizer::new().tokenize("the and of").is_empty());
    }

    #[test]
    fn deterministic() {
        let text = "Loving the new release!!! :) @dev https://example.com";
        let tokenizer = TweetTokenizer::new();
        assert_eq!(tokenizer.tokenize(text), tokenizer.tokenize(text));
    }

    #[test]
    fn whitespace_tokenizer_splits_only() {
        let tokens = WhitespaceTokenizer.tokenize("  good  GOOD\tbad,  ");
        assert_eq!(tokens, vec!["good", "GOOD", "bad,"]);
    }

    #[test]
    fn tokenizers_are_object_safe() {
        let tokenizers: Vec<Box<dyn Tokenize>> =
            vec![Box::new(TweetTokenizer::new()), Box::new(WhitespaceTokenizer)];
        for t in &tokenizers {
            assert!(t.tokenize("").is_empty());
        }
    }
}
