//! Output sequence assembly.
//!
//! Walks the normalized identifiers in order and splits them into
//! placements (identifier + source page) and missing identifiers.

use ordersort_shared::{OrderId, Placement};

use crate::index::PageIndex;

/// The assembled page order plus the identifiers that had no page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Matched identifiers in key order.
    pub placements: Vec<Placement>,
    /// Unmatched identifiers in key order.
    pub missing: Vec<OrderId>,
}

impl Assembly {
    /// Source page numbers in output order. Not deduplicated.
    pub fn page_sequence(&self) -> Vec<usize> {
        self.placements.iter().map(|p| p.page).collect()
    }
}

/// Split `ids` into placements and missing identifiers using `index`.
pub fn assemble(ids: &[OrderId], index: &PageIndex) -> Assembly {
    let mut assembly = Assembly::default();

    for id in ids {
        match index.get(id.as_str()) {
            Some(page) => assembly.placements.push(Placement {
                order_id: id.clone(),
                page,
            }),
            None => assembly.missing.push(id.clone()),
        }
    }

    assembly
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::index::build_page_index;

    fn ids(values: &[&str]) -> Vec<OrderId> {
        values.iter().filter_map(|v| OrderId::new(v)).collect()
    }

    fn index_for(pages: &[&str], keys: &[OrderId]) -> PageIndex {
        build_page_index(pages, keys, &|_: usize, _: usize| {}).unwrap()
    }

    #[test]
    fn sequence_follows_key_order() {
        let keys = ids(&["A1", "A2"]);
        let index = index_for(&["contains A2", "contains A1", "contains A1"], &keys);

        let assembly = assemble(&keys, &index);
        assert_eq!(assembly.page_sequence(), vec![1, 0]);
        assert!(assembly.missing.is_empty());
    }

    #[test]
    fn unmatched_keys_go_to_missing() {
        let keys = ids(&["A1", "B2"]);
        let index = index_for(&["A1 only", "nothing here"], &keys);

        let assembly = assemble(&keys, &index);
        assert_eq!(assembly.page_sequence(), vec![0]);
        assert_eq!(assembly.missing, ids(&["B2"]));
    }

    #[test]
    fn shared_page_is_not_deduplicated() {
        let keys = ids(&["A1", "A2"]);
        let index = index_for(&["A1 and A2"], &keys);

        let assembly = assemble(&keys, &index);
        assert_eq!(assembly.page_sequence(), vec![0, 0]);
    }

    #[test]
    fn empty_keys_yield_empty_assembly() {
        let assembly = assemble(&[], &PageIndex::default());
        assert_eq!(assembly, Assembly::default());
    }

    #[test]
    fn placements_and_missing_partition_the_keys() {
        let keys = ids(&["K3", "K1", "K9", "K2", "K7"]);
        let index = index_for(&["K1 K2", "K7", "K3"], &keys);

        let assembly = assemble(&keys, &index);

        let placed: Vec<&OrderId> = assembly.placements.iter().map(|p| &p.order_id).collect();
        let placed_set: HashSet<&OrderId> = placed.iter().copied().collect();
        let missing_set: HashSet<&OrderId> = assembly.missing.iter().collect();

        assert!(placed_set.is_disjoint(&missing_set));
        assert_eq!(placed.len() + assembly.missing.len(), keys.len());

        // Placements keep key order restricted to matched keys.
        let expected: Vec<&OrderId> = keys.iter().filter(|k| index.contains(k.as_str())).collect();
        assert_eq!(placed, expected);
        assert_eq!(assembly.missing, ids(&["K9"]));
        assert_eq!(assembly.page_sequence(), vec![2, 0, 0, 1]);
    }
}
