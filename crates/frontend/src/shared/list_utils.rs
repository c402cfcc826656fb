//! Sort helpers for grid headers addressed by column index
use contracts::domain::a001_transactions::SortOrder;

/// Get the sort indicator for a header
pub fn get_sort_indicator(
    order_column: Option<usize>,
    column: usize,
    order: Option<SortOrder>,
) -> &'static str {
    if order_column == Some(column) {
        match order {
            Some(SortOrder::Desc) => " ▼",
            _ => " ▲",
        }
    } else {
        " ⇅"
    }
}

/// CSS class of the sort indicator (active vs inactive)
pub fn get_sort_class(order_column: Option<usize>, column: usize) -> &'static str {
    if order_column == Some(column) {
        "sort-icon active"
    } else {
        "sort-icon"
    }
}

/// Order to request when a header is clicked: the active column flips,
/// any other column starts ascending
pub fn next_sort_order(
    order_column: Option<usize>,
    column: usize,
    order: Option<SortOrder>,
) -> SortOrder {
    if order_column == Some(column) {
        order.unwrap_or(SortOrder::Desc).toggled()
    } else {
        SortOrder::Asc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(Some(2), 2, Some(SortOrder::Asc)), " ▲");
        assert_eq!(get_sort_indicator(Some(2), 2, Some(SortOrder::Desc)), " ▼");
        assert_eq!(get_sort_indicator(Some(2), 3, Some(SortOrder::Desc)), " ⇅");
        assert_eq!(get_sort_indicator(None, 0, None), " ⇅");
        assert_eq!(get_sort_class(Some(1), 1), "sort-icon active");
    }

    #[test]
    fn test_next_sort_order() {
        assert_eq!(next_sort_order(Some(1), 1, Some(SortOrder::Asc)), SortOrder::Desc);
        assert_eq!(next_sort_order(Some(1), 1, Some(SortOrder::Desc)), SortOrder::Asc);
        assert_eq!(next_sort_order(Some(1), 4, Some(SortOrder::Desc)), SortOrder::Asc);
        assert_eq!(next_sort_order(None, 4, None), SortOrder::Asc);
    }
}
