use contracts::domain::a001_transactions::ChartPoint;
use leptos::prelude::*;

/// Bar width in percent of the largest value of the first series
pub fn bar_widths(dataset: &[ChartPoint]) -> Vec<(String, f64, f64)> {
    let series = dataset
        .iter()
        .find_map(|point| point.values.keys().next().cloned());
    let Some(series) = series else {
        return dataset.iter().map(|p| (p.name.clone(), 0.0, 0.0)).collect();
    };

    let value_of = |point: &ChartPoint| point.values.get(&series).copied().unwrap_or(0.0);
    let max = dataset.iter().map(value_of).fold(0.0_f64, f64::max);

    dataset
        .iter()
        .map(|point| {
            let value = value_of(point);
            let width = if max > 0.0 { value / max * 100.0 } else { 0.0 };
            (point.name.clone(), value, width)
        })
        .collect()
}

#[component]
pub fn TransactionsChart(#[prop(into)] dataset: Signal<Vec<ChartPoint>>) -> impl IntoView {
    view! {
        <div class="transactions-chart">
            {move || {
                let bars = bar_widths(&dataset.get());
                if bars.is_empty() {
                    view! { <div class="transactions-chart__empty">"No data"</div> }.into_any()
                } else {
                    bars.into_iter()
                        .map(|(name, value, width)| {
                            view! {
                                <div class="transactions-chart__row">
                                    <span class="transactions-chart__label">{name}</span>
                                    <div
                                        class="transactions-chart__bar"
                                        style=format!("width: {:.1}%;", width)
                                    ></div>
                                    <span class="transactions-chart__value">{value.to_string()}</span>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn point(name: &str, count: f64) -> ChartPoint {
        ChartPoint {
            name: name.to_string(),
            values: BTreeMap::from([("count".to_string(), count)]),
        }
    }

    #[test]
    fn test_bar_widths_scale_to_max() {
        let bars = bar_widths(&[point("paid", 50.0), point("refused", 25.0), point("refunded", 0.0)]);
        assert_eq!(bars[0], ("paid".to_string(), 50.0, 100.0));
        assert_eq!(bars[1], ("refused".to_string(), 25.0, 50.0));
        assert_eq!(bars[2], ("refunded".to_string(), 0.0, 0.0));
    }

    #[test]
    fn test_bar_widths_empty() {
        assert!(bar_widths(&[]).is_empty());
        assert_eq!(bar_widths(&[point("paid", 0.0)])[0].2, 0.0);
    }
}
