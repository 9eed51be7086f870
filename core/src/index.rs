use parking_lot::RwLock;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared identifier of an indexed document.
pub type DocId = Arc<str>;

pub type PostingList = HashSet<DocId>;

const NUM_SHARDS: usize = 32;

/// Concurrent term -> posting list map.
///
/// Terms are spread over a fixed set of shards, each behind its own `RwLock`,
/// so writers touching different terms rarely contend. Within a shard the
/// insert is "create the list if absent, then add the document if absent",
/// done under one write lock, so concurrent first inserts of the same term
/// neither lose documents nor duplicate them.
pub struct InvertedIndex {
    shards: Vec<RwLock<HashMap<String, PostingList>>>,
}

impl Default for InvertedIndex {
    fn default() -> Self { Self::new() }
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self { shards: (0..NUM_SHARDS).map(|_| RwLock::new(HashMap::new())).collect() }
    }

    fn shard(&self, term: &str) -> &RwLock<HashMap<String, PostingList>> {
        let mut hasher = DefaultHasher::new();
        term.hash(&mut hasher);
        &self.shards[hasher.finish() as usize % NUM_SHARDS]
    }

    /// Add `doc` to the posting list of `term`. Idempotent.
    pub fn record(&self, term: &str, doc: &DocId) {
        let shard = self.shard(term);
        // Most records of a common term hit an existing entry; check under the read lock first.
        if shard.read().get(term).is_some_and(|plist| plist.contains(doc)) {
            return;
        }
        let mut guard = shard.write();
        match guard.get_mut(term) {
            Some(plist) => {
                plist.insert(Arc::clone(doc));
            }
            None => {
                guard.insert(term.to_owned(), HashSet::from([Arc::clone(doc)]));
            }
        }
    }

    /// Record every term of one document.
    pub fn record_all<'a, I>(&self, terms: I, doc: &DocId)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for term in terms {
            self.record(term, doc);
        }
    }

    /// Current posting list for `term`, empty when the term is unknown.
    pub fn lookup(&self, term: &str) -> PostingList {
        self.shard(term).read().get(term).cloned().unwrap_or_default()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.read().is_empty())
    }

    /// Number of distinct documents referenced by any posting list.
    pub fn document_count(&self) -> usize {
        let mut docs: HashSet<DocId> = HashSet::new();
        for shard in &self.shards {
            for plist in shard.read().values() {
                docs.extend(plist.iter().cloned());
            }
        }
        docs.len()
    }

    /// Ordered copy of the whole mapping, for comparing two indexes.
    pub fn snapshot(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut out = BTreeMap::new();
        for shard in &self.shards {
            for (term, plist) in shard.read().iter() {
                out.insert(term.clone(), plist.iter().map(|d| d.to_string()).collect());
            }
        }
        out
    }
}
