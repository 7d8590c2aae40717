use std::collections::BTreeMap;

use shared::domain::{CompanyIndex, CompanyRecord};

/// Index-to-record map rebuilt from each company search.
#[derive(Debug, Default, Clone)]
pub struct CompanyCache {
    records: BTreeMap<CompanyIndex, CompanyRecord>,
}

impl CompanyCache {
    /// Replaces every entry with the given raw backend entries, indexed
    /// 0..N-1 in arrival order. Returns the display names in index order.
    pub fn rebuild<I, S>(&mut self, entries: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records.clear();
        for (position, entry) in entries.into_iter().enumerate() {
            self.records
                .insert(CompanyIndex(position), CompanyRecord::from_entry(entry));
        }
        self.names()
    }

    pub fn get(&self, index: CompanyIndex) -> Option<&CompanyRecord> {
        self.records.get(&index)
    }

    pub fn names(&self) -> Vec<String> {
        self.records.values().map(|r| r.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CompanyIndex, &CompanyRecord)> {
        self.records.iter().map(|(index, record)| (*index, record))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_assigns_sequential_indices_and_names() {
        let mut cache = CompanyCache::default();
        let names = cache.rebuild(["Acme Corp||tag1", "Globex||tag2"]);

        assert_eq!(names, vec!["Acme Corp".to_string(), "Globex".to_string()]);
        assert_eq!(cache.len(), 2);
        let keys: Vec<_> = cache.iter().map(|(index, _)| index).collect();
        assert_eq!(keys, vec![CompanyIndex(0), CompanyIndex(1)]);
        assert_eq!(
            cache.get(CompanyIndex(1)).map(|r| r.full_info.as_str()),
            Some("Globex||tag2")
        );
    }

    #[test]
    fn rebuild_discards_previous_entries() {
        let mut cache = CompanyCache::default();
        cache.rebuild(["A||x", "B||y", "C||z"]);
        cache.rebuild(["D||w"]);

        assert_eq!(cache.len(), 1);
        assert!(cache.get(CompanyIndex(2)).is_none());
        assert_eq!(cache.get(CompanyIndex(0)).map(|r| r.name.as_str()), Some("D"));
    }

    #[test]
    fn rebuild_with_no_entries_leaves_cache_empty() {
        let mut cache = CompanyCache::default();
        cache.rebuild(["A||x"]);
        let names = cache.rebuild(Vec::<String>::new());

        assert!(names.is_empty());
        assert!(cache.is_empty());
    }
}
