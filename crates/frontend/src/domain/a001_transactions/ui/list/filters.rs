use crate::domain::a001_transactions::query::{DateRange, FilterChange, Query};
use crate::shared::date_utils::{format_date_input, parse_date_input_end, parse_date_input_start};
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::collections::BTreeMap;
use thaw::*;

/// A select in the filter panel, stored under `key` in the query filters
pub struct FilterOption {
    pub key: &'static str,
    pub title: &'static str,
    pub items: &'static [(&'static str, &'static str)],
}

pub const FILTER_OPTIONS: &[FilterOption] = &[
    FilterOption {
        key: "status",
        title: "Status",
        items: &[
            ("paid", "Paid"),
            ("authorized", "Authorized"),
            ("refused", "Refused"),
            ("refunded", "Refunded"),
            ("waiting_payment", "Waiting payment"),
            ("pending_refund", "Pending refund"),
            ("processing", "Processing"),
            ("chargedback", "Chargedback"),
        ],
    },
    FilterOption {
        key: "payment_method",
        title: "Payment method",
        items: &[
            ("credit_card", "Credit card"),
            ("debit_card", "Debit card"),
            ("boleto", "Boleto"),
        ],
    },
];

/// Turns the raw panel inputs into a filter change.
///
/// Empty inputs become `None`; a date range with only one end filled in is
/// dropped rather than sent half-open.
pub fn build_filter_change(
    search: &str,
    date_from: &str,
    date_to: &str,
    values: &[(&str, String)],
) -> FilterChange {
    let search = search.trim();
    let dates = match (parse_date_input_start(date_from), parse_date_input_end(date_to)) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        (None, None) => None,
        _ => {
            log::warn!("Ignoring incomplete date range '{}'..'{}'", date_from, date_to);
            None
        }
    };
    let values: BTreeMap<String, String> = values
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();

    FilterChange {
        search: (!search.is_empty()).then(|| search.to_string()),
        dates,
        values: (!values.is_empty()).then_some(values),
    }
}

#[component]
pub fn TransactionsFilters(
    /// Query currently shown; the inputs follow it after every search
    #[prop(into)]
    query: Signal<Query>,
    #[prop(into)]
    disabled: Signal<bool>,
    on_change: Callback<FilterChange>,
) -> impl IntoView {
    let search = RwSignal::new(String::new());
    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());
    let values: Vec<(&'static str, RwSignal<String>)> = FILTER_OPTIONS
        .iter()
        .map(|option| (option.key, RwSignal::new(String::new())))
        .collect();
    let values = StoredValue::new(values);

    Effect::new(move |_| {
        let q = query.get();
        search.set(q.search.clone().unwrap_or_default());
        date_from.set(q.dates.map(|d| format_date_input(&d.start)).unwrap_or_default());
        date_to.set(q.dates.map(|d| format_date_input(&d.end)).unwrap_or_default());
        values.with_value(|values| {
            for (key, signal) in values {
                let value = q
                    .filters
                    .as_ref()
                    .and_then(|filters| filters.get(*key).cloned())
                    .unwrap_or_default();
                signal.set(value);
            }
        });
    });

    let apply = move || {
        let current: Vec<(&str, String)> = values.with_value(|values| {
            values
                .iter()
                .map(|(key, signal)| (*key, signal.get_untracked()))
                .collect()
        });
        on_change.run(build_filter_change(
            &search.get_untracked(),
            &date_from.get_untracked(),
            &date_to.get_untracked(),
            &current,
        ));
    };

    let clear = move || {
        search.set(String::new());
        date_from.set(String::new());
        date_to.set(String::new());
        values.with_value(|values| {
            for (_, signal) in values {
                signal.set(String::new());
            }
        });
        on_change.run(FilterChange::default());
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                {icon("filter")}
                <span class="filter-panel__title">"Filters"</span>
            </div>
            <div class="filter-panel-content">
                <input
                    type="text"
                    class="filter-panel__search"
                    placeholder="Search transactions..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            apply();
                        }
                    }
                />
                <label class="filter-panel__field">
                    "From"
                    <input
                        type="date"
                        prop:value=move || date_from.get()
                        on:change=move |ev| date_from.set(event_target_value(&ev))
                    />
                </label>
                <label class="filter-panel__field">
                    "To"
                    <input
                        type="date"
                        prop:value=move || date_to.get()
                        on:change=move |ev| date_to.set(event_target_value(&ev))
                    />
                </label>
                {FILTER_OPTIONS
                    .iter()
                    .map(|option| {
                        let signal = values
                            .with_value(|values| {
                                values
                                    .iter()
                                    .find(|(key, _)| *key == option.key)
                                    .map(|(_, signal)| *signal)
                            })
                            .unwrap_or_else(|| RwSignal::new(String::new()));
                        view! {
                            <label class="filter-panel__field">
                                {option.title}
                                <select
                                    prop:value=move || signal.get()
                                    on:change=move |ev| signal.set(event_target_value(&ev))
                                >
                                    <option value="">"All"</option>
                                    {option
                                        .items
                                        .iter()
                                        .map(|(value, label)| {
                                            view! { <option value=*value>{*label}</option> }
                                        })
                                        .collect_view()}
                                </select>
                            </label>
                        }
                    })
                    .collect_view()}
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| apply()
                    disabled=disabled
                >
                    "Apply"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| clear()
                    disabled=disabled
                >
                    "Clear"
                </Button>
            </div>
        </div>
    }
}
