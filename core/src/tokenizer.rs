use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","able","about","above","across","after","again","against","all","almost","also","although","am","among","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "dear","did","do","does","doing","down","during",
            "each","either","else","ever","every",
            "few","for","from","further",
            "get","got",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how","however",
            "i","if","in","into","is","it","its","itself",
            "just","least","let","like","likely",
            "may","me","might","more","most","must","my","myself",
            "neither","no","nor","not",
            "of","off","often","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "rather","said","same","say","says","she","should","since","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","tis","to","too","twas",
            "under","unless","until","up","upon","us","very",
            "wants","was","we","were","what","when","where","whether","which","while","who","whom","whose","why","will","with","within","without","would",
            "yet","you","your","yours","yourself","yourselves",
            // contraction fragments left over after splitting on non-word characters
            "aren","couldn","didn","doesn","hadn","hasn","haven","isn","ll","mustn","re","s","shouldn","t","ve","wasn","weren","wouldn",
        ];
        words.iter().copied().collect()
    };
}

/// The process-wide stopword set.
pub fn stopwords() -> &'static HashSet<&'static str> {
    &STOPWORDS
}

/// True iff `term` is in the stopword set. Expects a lowercased term.
pub fn is_stopword(term: &str) -> bool {
    STOPWORDS.contains(term)
}

/// Lowercased candidate terms of `line`: every maximal run of word characters.
pub fn terms(line: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(line).map(|m| m.as_str().to_lowercase())
}

/// True iff `term` may become an index key. Expects an already lowercased candidate.
pub fn is_indexable(term: &str) -> bool {
    !term.is_empty() && !is_stopword(term)
}

/// Split, lowercase and stopword-filter a line. Used for documents and queries alike.
pub fn normalize(line: &str) -> impl Iterator<Item = String> + '_ {
    terms(line).filter(|t| is_indexable(t))
}
