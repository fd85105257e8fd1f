// Filter domain model and filter algebra
use super::attribute::Attribute;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterPredicate {
    Members {
        members: Vec<String>,
        #[serde(default)]
        exclude: bool,
    },
    Range {
        #[serde(default)]
        from: Option<f64>,
        #[serde(default)]
        to: Option<f64>,
    },
    /// Backend-specific predicate passed through untouched
    Custom { jaql: serde_json::Value },
}

/// Immutable filter on one dimension. Filters are combined, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub attribute: Attribute,
    pub predicate: FilterPredicate,
}

impl Filter {
    pub fn new(attribute: Attribute, predicate: FilterPredicate) -> Self {
        Self {
            attribute,
            predicate,
        }
    }

    pub fn members(attribute: Attribute, members: Vec<String>) -> Self {
        Self::new(
            attribute,
            FilterPredicate::Members {
                members,
                exclude: false,
            },
        )
    }

    pub fn identity(&self) -> &str {
        self.attribute.identity()
    }

    /// Selected members for an inclusive members filter
    pub fn selected_members(&self) -> Option<&[String]> {
        match &self.predicate {
            FilterPredicate::Members {
                members,
                exclude: false,
            } => Some(members),
            _ => None,
        }
    }
}

/// Merge two filter lists, `b` winning per dimension.
///
/// Filters of `a` on a dimension that `b` also filters are dropped. The result
/// is the surviving filters of `a` followed by all of `b`, each in original
/// order, so `merge(merge(merge(a, b), c), d)` gives precedence d > c > b > a.
pub fn merge_filters(a: &[Filter], b: &[Filter]) -> Vec<Filter> {
    let overridden: HashSet<&str> = b.iter().map(Filter::identity).collect();

    a.iter()
        .filter(|f| !overridden.contains(f.identity()))
        .chain(b.iter())
        .cloned()
        .collect()
}

/// Apply a dimension allow-list: `None` keeps everything, an empty list keeps
/// nothing, otherwise only filters whose attribute expression is listed survive.
pub fn filter_by_allowed_dimensions(filters: &[Filter], allow_list: Option<&[String]>) -> Vec<Filter> {
    match allow_list {
        None => filters.to_vec(),
        Some(allowed) => filters
            .iter()
            .filter(|f| allowed.iter().any(|dim| dim == f.identity()))
            .cloned()
            .collect(),
    }
}

/// Collapse filters per dimension, unioning member lists.
///
/// Member filters on the same dimension (and with the same include/exclude
/// mode) are combined into one filter whose members keep first-seen order
/// without duplicates. Any other collision is resolved last-wins, in the slot
/// where the dimension first appeared.
pub fn union_members_by_dimension(filters: Vec<Filter>) -> Vec<Filter> {
    let mut merged: Vec<Filter> = Vec::with_capacity(filters.len());
    let mut slots: HashMap<String, usize> = HashMap::new();

    for filter in filters {
        let Some(&slot) = slots.get(filter.identity()) else {
            slots.insert(filter.identity().to_string(), merged.len());
            merged.push(filter);
            continue;
        };

        let combinable = matches!(
            (&merged[slot].predicate, &filter.predicate),
            (
                FilterPredicate::Members { exclude: current, .. },
                FilterPredicate::Members { exclude: incoming, .. },
            ) if current == incoming
        );
        if !combinable {
            merged[slot] = filter;
            continue;
        }

        if let (
            FilterPredicate::Members { members: current, .. },
            FilterPredicate::Members { members: incoming, .. },
        ) = (&mut merged[slot].predicate, &filter.predicate)
        {
            for member in incoming {
                if !current.contains(member) {
                    current.push(member.clone());
                }
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(expression: &str) -> Attribute {
        Attribute::new(expression, expression.trim_matches(|c: char| c == '[' || c == ']'))
    }

    fn members(expression: &str, values: &[&str]) -> Filter {
        Filter::members(attr(expression), values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_merge_later_argument_wins_per_dimension() {
        let a = vec![members("[Division]", &["Cardiology"]), members("[Gender]", &["F"])];
        let b = vec![members("[Division]", &["Neurology"]), members("[Year]", &["2024"])];

        let merged = merge_filters(&a, &b);

        assert_eq!(
            merged,
            vec![
                members("[Gender]", &["F"]),
                members("[Division]", &["Neurology"]),
                members("[Year]", &["2024"]),
            ]
        );
        // inputs untouched
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_merge_chain_gives_strict_precedence() {
        let a = vec![members("[X]", &["a"])];
        let b = vec![members("[X]", &["b"])];
        let c = vec![members("[X]", &["c"])];
        let d = vec![members("[X]", &["d"])];

        let merged = merge_filters(&merge_filters(&merge_filters(&a, &b), &c), &d);
        assert_eq!(merged, d);

        let merged = merge_filters(&merge_filters(&a, &b), &c);
        assert_eq!(merged, c);
    }

    #[test]
    fn test_merge_with_empty_sides() {
        let a = vec![members("[X]", &["a"])];
        assert_eq!(merge_filters(&a, &[]), a);
        assert_eq!(merge_filters(&[], &a), a);
        assert!(merge_filters(&[], &[]).is_empty());
    }

    #[test]
    fn test_allow_list_semantics() {
        let filters = vec![members("[Division]", &["Cardiology"]), members("[Gender]", &["F"])];

        assert_eq!(filter_by_allowed_dimensions(&filters, None), filters);
        assert!(filter_by_allowed_dimensions(&filters, Some(&[][..])).is_empty());

        let allowed = vec!["[Gender]".to_string()];
        assert_eq!(
            filter_by_allowed_dimensions(&filters, Some(allowed.as_slice())),
            vec![members("[Gender]", &["F"])]
        );
    }

    #[test]
    fn test_union_combines_members_on_same_dimension() {
        let unioned = union_members_by_dimension(vec![
            members("[Division]", &["Cardiology"]),
            members("[Gender]", &["F"]),
            members("[Division]", &["Neurology", "Cardiology"]),
        ]);

        assert_eq!(
            unioned,
            vec![
                members("[Division]", &["Cardiology", "Neurology"]),
                members("[Gender]", &["F"]),
            ]
        );
    }

    #[test]
    fn test_union_replaces_non_member_collisions() {
        let range = Filter::new(
            attr("[Cost]"),
            FilterPredicate::Range {
                from: Some(10.0),
                to: None,
            },
        );
        let unioned = union_members_by_dimension(vec![members("[Cost]", &["5"]), range.clone()]);
        assert_eq!(unioned, vec![range]);
    }

    #[test]
    fn test_selected_members_only_for_inclusive_filters() {
        let include = members("[Division]", &["Cardiology"]);
        assert_eq!(include.selected_members(), Some(&["Cardiology".to_string()][..]));

        let exclude = Filter::new(
            attr("[Division]"),
            FilterPredicate::Members {
                members: vec!["Cardiology".to_string()],
                exclude: true,
            },
        );
        assert_eq!(exclude.selected_members(), None);
    }
}
