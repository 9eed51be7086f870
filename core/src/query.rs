use std::collections::{BTreeSet, HashSet};

use crate::index::{InvertedIndex, PostingList};
use crate::tokenizer::normalize;

/// Conjunctive search: documents containing every indexable query term.
///
/// Each input term goes through the same normalization as document text, so a
/// single input may contribute several terms or none. Stopwords impose no
/// constraint. A query left with no terms after normalization matches nothing.
pub fn search<I, S>(index: &InvertedIndex, terms: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut wanted: BTreeSet<String> = BTreeSet::new();
    for term in terms {
        wanted.extend(normalize(term.as_ref()));
    }
    if wanted.is_empty() {
        tracing::debug!("query has no indexable terms");
        return HashSet::new();
    }

    let mut lists: Vec<PostingList> = Vec::with_capacity(wanted.len());
    for term in &wanted {
        let plist = index.lookup(term);
        if plist.is_empty() {
            return HashSet::new();
        }
        lists.push(plist);
    }

    lists.sort_by_key(|l| l.len());
    let mut lists = lists.into_iter();
    let mut result = lists.next().unwrap_or_default();
    for other in lists {
        result.retain(|doc| other.contains(doc));
        if result.is_empty() {
            break;
        }
    }
    result.into_iter().map(|doc| doc.to_string()).collect()
}

/// [`search`] over a free-form query string.
pub fn search_str(index: &InvertedIndex, query: &str) -> HashSet<String> {
    search(index, [query])
}

impl InvertedIndex {
    pub fn search<I, S>(&self, terms: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        search(self, terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TextDocument;
    use crate::scheduler::index_document;

    fn index_of(docs: &[(&str, &str)]) -> InvertedIndex {
        let index = InvertedIndex::new();
        for (id, text) in docs {
            index_document(&index, &TextDocument::new(*id, *text)).unwrap();
        }
        index
    }

    #[test]
    fn unknown_term_empties_the_result() {
        let index = index_of(&[("a", "bad wolf")]);
        assert!(search(&index, ["bad", "zebra"]).is_empty());
    }

    #[test]
    fn punctuated_input_constrains_on_each_part() {
        let index = index_of(&[("a", "bad wolf"), ("b", "bad day")]);
        assert_eq!(search_str(&index, "Bad-Wolf"), HashSet::from(["a".to_string()]));
    }

    #[test]
    fn stopword_only_query_matches_nothing() {
        let index = index_of(&[("a", "bad")]);
        assert!(search(&index, ["the", "and"]).is_empty());
        assert!(search(&index, Vec::<String>::new()).is_empty());
    }
}
