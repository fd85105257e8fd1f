// Filter synthesis - Build the filters handed to a destination dashboard
use crate::domain::data_point::{member_of, PivotDataOptions, WidgetPoint};
use crate::domain::filter::{
    filter_by_allowed_dimensions, merge_filters, union_members_by_dimension, Filter,
};
use crate::domain::jtd::{FormulaDuplicatePolicy, JtdConfig};
use serde::{Deserialize, Serialize};

/// Ambient filters known to the widget at interaction time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationContext {
    pub dashboard_filters: Vec<Filter>,
    pub widget_filters: Vec<Filter>,
    pub extra_filters: Vec<Filter>,
    /// Needed to resolve pivot entries to their attributes and measures
    pub pivot_data_options: Option<PivotDataOptions>,
}

/// One members filter per category/break-by entry of a chart point, or per
/// row/column entry of a pivot cell
pub fn filters_from_point(point: &WidgetPoint, data_options: Option<&PivotDataOptions>) -> Vec<Filter> {
    match point {
        WidgetPoint::Chart(point) => point
            .entries
            .iter()
            .flat_map(|e| e.category.iter().chain(e.break_by.iter()))
            .filter_map(|entry| {
                let attribute = entry.attribute.as_ref()?;
                let member = member_of(&entry.value)?;
                Some(Filter::members(attribute.clone(), vec![member]))
            })
            .collect(),
        WidgetPoint::Pivot(point) => {
            let Some(data_options) = data_options else {
                return Vec::new();
            };
            point
                .entries
                .iter()
                .flat_map(|e| e.rows.iter().chain(e.columns.iter()))
                .filter_map(|entry| {
                    let location = entry.data_option_location.as_ref()?;
                    let attribute = data_options.attribute_at(location)?;
                    let member = member_of(&entry.value)?;
                    Some(Filter::members(attribute.clone(), vec![member]))
                })
                .collect()
        }
    }
}

/// Filters embedded in the formula context of the measures behind a point
pub fn extract_formula_context_filters(
    point: &WidgetPoint,
    data_options: Option<&PivotDataOptions>,
) -> Vec<Filter> {
    match point {
        WidgetPoint::Chart(point) => point
            .entries
            .iter()
            .flat_map(|e| e.value.iter())
            .filter_map(|entry| entry.measure.as_ref())
            .flat_map(|measure| measure.context_filters())
            .collect(),
        WidgetPoint::Pivot(point) => {
            let Some(data_options) = data_options else {
                return Vec::new();
            };
            point
                .entries
                .iter()
                .flat_map(|e| e.values.iter())
                .filter_map(|entry| entry.data_option_location.as_ref())
                .filter_map(|location| data_options.measure_at(location))
                .flat_map(|measure| measure.context_filters())
                .collect()
        }
    }
}

/// Bound how many identical formula filters are forwarded.
///
/// Identical filters are grouped in first-seen order; `None` forwards each
/// distinct filter once, `Limit(n)` forwards up to `n` copies of each.
pub fn apply_formula_duplicate_policy(filters: Vec<Filter>, policy: FormulaDuplicatePolicy) -> Vec<Filter> {
    let cap = match policy {
        FormulaDuplicatePolicy::None => 1,
        FormulaDuplicatePolicy::Limit(n) => n,
    };

    let mut forwarded: Vec<(Filter, usize)> = Vec::new();
    for filter in filters {
        match forwarded.iter().position(|(seen, _)| *seen == filter) {
            Some(slot) => forwarded[slot].1 += 1,
            None => forwarded.push((filter, 1)),
        }
    }

    forwarded
        .into_iter()
        .flat_map(|(filter, count)| std::iter::repeat_n(filter, count.min(cap)))
        .collect()
}

/// Leave one filter per dimension in the formula tier, the later measure
/// winning. Identical copies of the winner survive for the duplicate policy.
pub fn resolve_formula_conflicts(filters: Vec<Filter>) -> Vec<Filter> {
    filters.into_iter().fold(Vec::new(), |mut resolved, filter| {
        resolved.retain(|f| f.identity() != filter.identity() || *f == filter);
        resolved.push(filter);
        resolved
    })
}

/// Merge with precedence extra > generated > formula > widget > dashboard
fn merge_sources(
    config: &JtdConfig,
    context: &NavigationContext,
    generated: &[Filter],
    formula: Vec<Filter>,
) -> Vec<Filter> {
    let widget_dims = config.include_widget_filter_dims.as_deref();
    let formula = filter_by_allowed_dimensions(&resolve_formula_conflicts(formula), widget_dims);
    let dashboard = filter_by_allowed_dimensions(
        &context.dashboard_filters,
        config.include_dash_filter_dims.as_deref(),
    );
    let widget = filter_by_allowed_dimensions(&context.widget_filters, widget_dims);
    let extra = merge_filters(&config.extra_filters, &context.extra_filters);

    let merged = merge_filters(&dashboard, &widget);
    let merged = merge_filters(&merged, &formula);
    let merged = merge_filters(&merged, generated);
    merge_filters(&merged, &extra)
}

pub fn build_navigation_filters(
    config: &JtdConfig,
    context: &NavigationContext,
    point: &WidgetPoint,
) -> Vec<Filter> {
    let data_options = context.pivot_data_options.as_ref();
    let generated = filters_from_point(point, data_options);
    let formula = extract_formula_context_filters(point, data_options);

    let filters = merge_sources(config, context, &generated, formula);
    tracing::debug!(
        "Built {} navigation filters ({} generated from point)",
        filters.len(),
        generated.len()
    );
    filters
}

/// Multi-select variant: generated filters are unioned per dimension so the
/// destination receives "any of the selected members"
pub fn build_navigation_filters_for_points(
    config: &JtdConfig,
    context: &NavigationContext,
    points: &[WidgetPoint],
) -> Vec<Filter> {
    let data_options = context.pivot_data_options.as_ref();
    let generated = union_members_by_dimension(
        points
            .iter()
            .flat_map(|p| filters_from_point(p, data_options))
            .collect(),
    );
    let formula = apply_formula_duplicate_policy(
        points
            .iter()
            .flat_map(|p| extract_formula_context_filters(p, data_options))
            .collect(),
        config.send_formula_filters_duplicate,
    );

    let filters = merge_sources(config, context, &generated, formula);
    tracing::debug!(
        "Built {} navigation filters from {} selected points",
        filters.len(),
        points.len()
    );
    filters
}
