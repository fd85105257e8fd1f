// Drilldown controller - Drill chain state machine of one chart/pivot widget
use crate::domain::attribute::Attribute;
use crate::domain::data_point::DataPoint;
use crate::domain::drilldown::{Breadcrumb, DrilldownSelection};
use crate::domain::filter::{merge_filters, Filter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrilldownState {
    /// Showing the configured dimension
    Idle,
    /// Drilled this many levels deep
    Drilled(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrilldownController {
    initial_dimension: Attribute,
    selections: Vec<DrilldownSelection>,
}

impl DrilldownController {
    pub fn new(initial_dimension: Attribute) -> Self {
        Self {
            initial_dimension,
            selections: Vec::new(),
        }
    }

    /// Restore a previously authored or persisted chain
    pub fn with_selections(initial_dimension: Attribute, selections: Vec<DrilldownSelection>) -> Self {
        Self {
            initial_dimension,
            selections,
        }
    }

    pub fn initial_dimension(&self) -> &Attribute {
        &self.initial_dimension
    }

    pub fn selections(&self) -> &[DrilldownSelection] {
        &self.selections
    }

    pub fn state(&self) -> DrilldownState {
        match self.selections.len() {
            0 => DrilldownState::Idle,
            n => DrilldownState::Drilled(n),
        }
    }

    /// Drill into `attribute`, narrowing the current dimension to `members`.
    /// An empty member list would filter out everything and is ignored;
    /// returns whether a level was added.
    pub fn push(&mut self, attribute: Attribute, members: Vec<String>) -> bool {
        if members.is_empty() {
            return false;
        }
        tracing::debug!(
            "Drilling from {} into {} on {} members",
            self.drilldown_dimension().expression,
            attribute.expression,
            members.len()
        );
        self.selections.push(DrilldownSelection::new(attribute, members));
        true
    }

    /// Drill using the category members of clicked points. Returns false when
    /// the points carry no members, leaving the chain untouched.
    pub fn push_points(&mut self, next_dimension: Attribute, points: &[DataPoint]) -> bool {
        let mut members: Vec<String> = Vec::new();
        for member in points.iter().flat_map(DataPoint::category_members) {
            if !members.contains(&member) {
                members.push(member);
            }
        }

        self.push(next_dimension, members)
    }

    /// Keep the first `index` levels. Indexes past the end leave the chain as is.
    pub fn slice(&mut self, index: usize) {
        self.selections.truncate(index);
    }

    pub fn reset(&mut self) {
        self.slice(0);
    }

    /// Swap the configured starting dimension. Drilling state does not survive
    /// a change of identity; returns whether the chain was reset.
    pub fn set_initial_dimension(&mut self, initial_dimension: Attribute) -> bool {
        let changed = !self.initial_dimension.same_dimension(&initial_dimension);
        self.initial_dimension = initial_dimension;
        if changed {
            tracing::debug!(
                "Initial drill dimension changed to {}, resetting chain",
                self.initial_dimension.expression
            );
            self.reset();
        }
        changed
    }

    /// Innermost drilled dimension, or the initial one when idle
    pub fn drilldown_dimension(&self) -> &Attribute {
        self.selections
            .last()
            .map_or(&self.initial_dimension, |s| &s.attribute)
    }

    /// Dimension active before each chain level was pushed
    fn parent_dimensions(&self) -> impl Iterator<Item = &Attribute> {
        std::iter::once(&self.initial_dimension).chain(self.selections.iter().map(|s| &s.attribute))
    }

    /// One members filter per chain level, on the dimension it narrowed
    pub fn drilldown_filters(&self) -> Vec<Filter> {
        self.parent_dimensions()
            .zip(self.selections.iter())
            .fold(Vec::new(), |acc, (parent, selection)| {
                let level = Filter::members(parent.clone(), selection.selected_members.clone());
                merge_filters(&acc, std::slice::from_ref(&level))
            })
    }

    /// Attributes already on screen or in the chain; they cannot be drilled into again
    pub fn selected_attributes(&self) -> Vec<&Attribute> {
        self.parent_dimensions().collect()
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            label: self.initial_dimension.title.clone(),
            slice_index: 0,
            current: self.selections.is_empty(),
        }];
        if self.selections.is_empty() {
            return crumbs;
        }

        crumbs.extend(self.selections.iter().enumerate().map(|(i, selection)| Breadcrumb {
            label: selection.selected_members.join(", "),
            slice_index: i + 1,
            current: false,
        }));
        crumbs.push(Breadcrumb {
            label: self.drilldown_dimension().title.clone(),
            slice_index: self.selections.len(),
            current: true,
        });
        crumbs
    }
}
