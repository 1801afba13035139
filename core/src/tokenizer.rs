use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE_URL: Regex = Regex::new(r"https?://\S+|www\.\S+").expect("valid regex");
    static ref RE_EMAIL: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex");
    static ref RE_DIGITS: Regex = Regex::new(r"\d+").expect("valid regex");
    static ref RE_TAG: Regex = Regex::new(r"<.*?>").expect("valid regex");
    static ref RE_NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Strip URLs, email addresses, digits, HTML-like tags, and punctuation from
/// lowercased (NFKC-folded) text, leaving word characters and whitespace.
pub fn clean(text: &str) -> String {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    let stripped = RE_URL.replace_all(&lowered, "");
    let stripped = RE_EMAIL.replace_all(&stripped, "");
    let stripped = RE_DIGITS.replace_all(&stripped, "");
    let stripped = RE_TAG.replace_all(&stripped, "");
    RE_NON_WORD.replace_all(&stripped, "").into_owned()
}

/// Normalize text into index terms: clean, split on whitespace, drop
/// stopwords, stem. Token order and duplicates are preserved so callers can
/// count frequencies downstream. Any input, including empty, is valid.
pub fn normalize(text: &str) -> Vec<String> {
    clean(text)
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(|token| STEMMER.stem(token).to_string())
        .collect()
}
