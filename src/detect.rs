//! Duplicate detection over position keys

use std::collections::HashMap;
use std::hash::Hash;

/// A note that can be grouped by position
pub trait PositionKeyed {
    type Key: Eq + Hash + Clone;

    /// Key shared by every note at the same position
    fn position_key(&self) -> Self::Key;
}

/// Notes that share one position key
///
/// `entries` keeps file order and always holds at least two notes.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup<K, T> {
    pub key: K,
    pub entries: Vec<T>,
}

/// Group notes by position and return every group with more than one member
///
/// Groups come back in the order their key was first seen.
pub fn find_duplicates<T, I>(notes: I) -> Vec<DuplicateGroup<T::Key, T>>
where
    T: PositionKeyed,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T::Key, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup<T::Key, T>> = Vec::new();

    for note in notes {
        let key = note.position_key();
        match index.get(&key) {
            Some(&slot) => groups[slot].entries.push(note),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DuplicateGroup {
                    key,
                    entries: vec![note],
                });
            }
        }
    }

    groups.retain(|group| group.entries.len() > 1);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Mark {
        pos: u32,
        id: &'static str,
    }

    impl PositionKeyed for Mark {
        type Key = u32;

        fn position_key(&self) -> u32 {
            self.pos
        }
    }

    fn mark(pos: u32, id: &'static str) -> Mark {
        Mark { pos, id }
    }

    #[test]
    fn test_empty_input() {
        let groups = find_duplicates(Vec::<Mark>::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_no_duplicates() {
        let groups = find_duplicates(vec![mark(1, "a"), mark(2, "b"), mark(3, "c")]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_group_keeps_first_member() {
        let groups = find_duplicates(vec![
            mark(1, "a"),
            mark(2, "b"),
            mark(1, "c"),
            mark(1, "d"),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, 1);
        let ids: Vec<_> = groups[0].entries.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let groups = find_duplicates(vec![
            mark(5, "a"),
            mark(2, "b"),
            mark(2, "c"),
            mark(5, "d"),
        ]);
        let keys: Vec<_> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![5, 2]);
    }
}
