use crate::chart::ChartKind;
use crate::table::ColumnType;

/// Which chart kinds are valid for a given axis type combination. The slice
/// order is the display order of the chart-choice buttons. Combinations with
/// no defined chart yield an empty slice, not an error: axis order matters,
/// so (numerical, categorical) is not the mirror of (categorical, numerical).
pub fn eligible_charts(x: ColumnType, y: Option<ColumnType>) -> &'static [ChartKind] {
    use ChartKind::*;
    use ColumnType::*;

    match (x, y) {
        (Numerical, None) => &[Histogram],
        (Categorical, None) => &[],
        (Numerical, Some(Numerical)) => &[Line, Scatter, Bubble],
        (Categorical, Some(Numerical)) => &[Bar, StackedBar, Pie],
        (Numerical, Some(Categorical)) | (Categorical, Some(Categorical)) => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ChartKind::*;
    use ColumnType::*;

    #[test]
    fn test_numerical_pair_in_display_order() {
        assert_eq!(
            eligible_charts(Numerical, Some(Numerical)),
            &[Line, Scatter, Bubble]
        );
    }

    #[test]
    fn test_categorical_numerical_in_display_order() {
        assert_eq!(
            eligible_charts(Categorical, Some(Numerical)),
            &[Bar, StackedBar, Pie]
        );
    }

    #[test]
    fn test_single_axis() {
        assert_eq!(eligible_charts(Numerical, None), &[Histogram]);
        assert!(eligible_charts(Categorical, None).is_empty());
    }

    #[test]
    fn test_reversed_and_categorical_pairs_are_empty() {
        assert!(eligible_charts(Numerical, Some(Categorical)).is_empty());
        assert!(eligible_charts(Categorical, Some(Categorical)).is_empty());
    }
}
