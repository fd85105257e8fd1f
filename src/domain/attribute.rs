// Attribute, data source and measure domain models
use super::filter::Filter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSource {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl DataSource {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: None,
        }
    }

    /// Identity used for caching hierarchy lookups; the id when known, else the title
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }
}

/// A dimension column, e.g. `[Admissions.Division]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub expression: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
}

impl Attribute {
    pub fn new(expression: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            title: title.into(),
            data_source: None,
        }
    }

    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_source = Some(data_source);
        self
    }

    /// Identity key used when merging filters: two attributes address the
    /// same dimension iff their expressions are equal
    pub fn identity(&self) -> &str {
        &self.expression
    }

    pub fn same_dimension(&self, other: &Attribute) -> bool {
        self.identity() == other.identity()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormulaContextItem {
    Filter(Filter),
    Measure(Measure),
    Attribute(Attribute),
}

/// A plain or calculated measure. Calculated measures may carry filters
/// (directly or through nested measures) in their formula context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default)]
    pub context: Vec<FormulaContextItem>,
}

impl Measure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: None,
            context: Vec::new(),
        }
    }

    pub fn calculated(
        name: impl Into<String>,
        expression: impl Into<String>,
        context: Vec<FormulaContextItem>,
    ) -> Self {
        Self {
            name: name.into(),
            expression: Some(expression.into()),
            context,
        }
    }

    /// Filters found in this measure's formula context, depth-first
    pub fn context_filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        self.collect_context_filters(&mut filters);
        filters
    }

    fn collect_context_filters(&self, out: &mut Vec<Filter>) {
        for item in &self.context {
            match item {
                FormulaContextItem::Filter(filter) => out.push(filter.clone()),
                FormulaContextItem::Measure(nested) => nested.collect_context_filters(out),
                FormulaContextItem::Attribute(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn division() -> Attribute {
        Attribute::new("[Admissions.Division]", "Division")
    }

    #[test]
    fn test_data_source_identity_prefers_id() {
        let mut ds = DataSource::new("Sample Healthcare");
        assert_eq!(ds.identity(), "Sample Healthcare");
        ds.id = Some("localhost_aSampleIAAaHealthcare".to_string());
        assert_eq!(ds.identity(), "localhost_aSampleIAAaHealthcare");
    }

    #[test]
    fn test_same_dimension_ignores_title() {
        let renamed = Attribute::new("[Admissions.Division]", "Dept");
        assert!(division().same_dimension(&renamed));
        assert!(!division().same_dimension(&Attribute::new("[Doctors.Name]", "Division")));
    }

    #[test]
    fn test_context_filters_are_collected_recursively() {
        let cardiology = Filter::members(division(), vec!["Cardiology".to_string()]);
        let surgery = Filter::members(
            Attribute::new("[Admissions.Surgical]", "Surgical"),
            vec!["Yes".to_string()],
        );
        let inner = Measure::calculated(
            "surgical cost",
            "sum([Cost])",
            vec![FormulaContextItem::Filter(surgery.clone())],
        );
        let outer = Measure::calculated(
            "cardiology surgical cost",
            "[inner]",
            vec![
                FormulaContextItem::Filter(cardiology.clone()),
                FormulaContextItem::Attribute(division()),
                FormulaContextItem::Measure(inner),
            ],
        );

        assert_eq!(outer.context_filters(), vec![cardiology, surgery]);
        assert!(Measure::new("count").context_filters().is_empty());
    }
}
