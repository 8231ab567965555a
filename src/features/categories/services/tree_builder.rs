use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use crate::features::categories::dtos::CategoryTreeDto;
use crate::features::categories::models::Category;

/// Sibling ordering: `order` ascending (absent = 0), then newest first
pub fn compare_categories(a: &Category, b: &Category) -> Ordering {
    a.sort_weight()
        .cmp(&b.sort_weight())
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Stable in-place sort by [`compare_categories`]
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(compare_categories);
}

/// Build the category forest from a flat snapshot.
///
/// Records are grouped by parent once, then assembled recursively from the
/// root group. Nodes whose parent id is not in the snapshot are unreachable
/// and do not appear. A node nobody references gets `children: None`.
pub fn build_tree(mut categories: Vec<Category>) -> Vec<CategoryTreeDto> {
    sort_categories(&mut categories);

    let mut groups: HashMap<Option<Uuid>, Vec<&Category>> = HashMap::new();
    for category in &categories {
        groups.entry(category.parent_id).or_default().push(category);
    }

    build_level(None, &groups)
}

// Only nodes with a path to a root are visited, so a parent loop (which can
// never reach a root) is never entered.
fn build_level(
    parent: Option<Uuid>,
    groups: &HashMap<Option<Uuid>, Vec<&Category>>,
) -> Vec<CategoryTreeDto> {
    groups
        .get(&parent)
        .map(|siblings| {
            siblings
                .iter()
                .map(|category| {
                    let children = groups
                        .contains_key(&Some(category.id))
                        .then(|| build_level(Some(category.id), groups));
                    CategoryTreeDto::from_category(category, children)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, Utc};

    struct Fixture {
        base: DateTime<Utc>,
        tick: i64,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                base: Utc::now(),
                tick: 0,
            }
        }

        /// Each call is created one second after the previous one
        fn category(&mut self, name: &str, parent_id: Option<Uuid>, order: Option<i32>) -> Category {
            self.tick += 1;
            let at = self.base + TimeDelta::seconds(self.tick);
            Category {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: None,
                parent_id,
                order,
                is_enabled: true,
                created_at: at,
                updated_at: at,
            }
        }
    }

    fn names(nodes: &[CategoryTreeDto]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    fn count(nodes: &[CategoryTreeDto]) -> usize {
        nodes.iter().map(CategoryTreeDto::node_count).sum()
    }

    #[test]
    fn test_ties_sort_newest_first() {
        let mut f = Fixture::new();
        let p = f.category("P", None, Some(0));
        let c1 = f.category("C1", Some(p.id), Some(0));
        let c2 = f.category("C2", Some(p.id), Some(0));

        let tree = build_tree(vec![p, c1, c2]);

        assert_eq!(names(&tree), vec!["P"]);
        let children = tree[0].children.as_ref().unwrap();
        assert_eq!(names(children), vec!["C2", "C1"]);
        assert!(children.iter().all(|c| c.children.is_none()));
    }

    #[test]
    fn test_order_beats_creation_time() {
        let mut f = Fixture::new();
        let heavy = f.category("Heavy", None, Some(5));
        let light = f.category("Light", None, Some(-1));
        let default = f.category("Default", None, None);
        let zero = f.category("Zero", None, Some(0));

        let tree = build_tree(vec![heavy, default, light, zero]);

        // Absent order counts as 0, and "Zero" is newer than "Default"
        assert_eq!(names(&tree), vec!["Light", "Zero", "Default", "Heavy"]);
    }

    #[test]
    fn test_deleted_parent_hides_children() {
        let mut f = Fixture::new();
        let p = f.category("P", None, None);
        let c1 = f.category("C1", Some(p.id), None);
        let c2 = f.category("C2", Some(p.id), None);

        assert!(build_tree(vec![c1, c2]).is_empty());
    }

    #[test]
    fn test_nested_levels_and_node_count() {
        let mut f = Fixture::new();
        let a = f.category("A", None, Some(1));
        let b = f.category("B", None, Some(2));
        let a1 = f.category("A1", Some(a.id), None);
        let a1x = f.category("A1x", Some(a1.id), None);
        let orphan = f.category("Orphan", Some(Uuid::new_v4()), None);

        let tree = build_tree(vec![a1x, orphan, b, a1, a]);

        assert_eq!(names(&tree), vec!["A", "B"]);
        assert!(tree[1].children.is_none());
        let a1_node = &tree[0].children.as_ref().unwrap()[0];
        assert_eq!(a1_node.name, "A1");
        assert_eq!(names(a1_node.children.as_ref().unwrap()), vec!["A1x"]);
        // Orphan is unreachable
        assert_eq!(count(&tree), 4);
    }

    #[test]
    fn test_parent_loop_is_unreachable() {
        let mut f = Fixture::new();
        let root = f.category("Root", None, None);
        let mut x = f.category("X", None, None);
        let y = f.category("Y", Some(x.id), None);
        x.parent_id = Some(y.id);

        let tree = build_tree(vec![root, x, y]);
        assert_eq!(names(&tree), vec!["Root"]);
        assert_eq!(count(&tree), 1);
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut f = Fixture::new();
        let p = f.category("P", None, None);
        let c = f.category("C", Some(p.id), Some(2));
        let d = f.category("D", Some(p.id), Some(1));
        let flat = vec![p, c, d];

        assert_eq!(build_tree(flat.clone()), build_tree(flat));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(Vec::new()).is_empty());
    }
}
