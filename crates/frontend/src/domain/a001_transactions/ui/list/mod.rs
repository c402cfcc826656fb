pub mod chart;
pub mod filters;
pub mod state;

use self::chart::TransactionsChart;
use self::filters::TransactionsFilters;
use self::state::{SearchStatus, TransactionsStore};
use crate::domain::a001_transactions::api::HttpSearchClient;
use crate::domain::a001_transactions::columns::{column_index_for_accessor, COLUMNS};
use crate::domain::a001_transactions::controller::{SearchController, UrlHistory};
use crate::domain::a001_transactions::error::SearchError;
use crate::domain::a001_transactions::formatters::{format_currency, status_class};
use crate::domain::a001_transactions::query::{FilterChange, Query};
use crate::shared::browser::{current_search, BrowserHistory};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::SearchConfig;
use crate::shared::debounce::Debounced;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, next_sort_order};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::rc::Rc;
use thaw::*;

type TransactionsController = SearchController<HttpSearchClient, TransactionsStore, BrowserHistory>;
type SharedController = StoredValue<Rc<TransactionsController>, LocalStorage>;

impl UrlHistory for BrowserHistory {
    fn replace_search(&self, search: &str) {
        BrowserHistory::replace_search(self, search);
    }
}

/// Index of the column the current query is sorted by
fn order_column(query: &Query) -> Option<usize> {
    query
        .sort
        .as_ref()
        .and_then(|sort| column_index_for_accessor(sort.field.as_slice()))
}

/// Runs a controller action in the background; its failure is already in the
/// store, so here it is only logged
fn dispatch<F, Fut>(controller: SharedController, action: &'static str, f: F)
where
    F: FnOnce(Rc<TransactionsController>) -> Fut,
    Fut: Future<Output = Result<(), SearchError>> + 'static,
{
    let Some(controller) = controller.try_get_value() else {
        log::debug!("{} skipped: page is gone", action);
        return;
    };
    let task = f(controller);
    spawn_local(async move {
        if let Err(e) = task.await {
            log::warn!("{} failed: {}", action, e);
        }
    });
}

#[component]
pub fn TransactionsList() -> impl IntoView {
    let config = SearchConfig::default();
    let store = TransactionsStore::new(config.default_page_size);
    let state = store.state;
    let controller: SharedController = StoredValue::new_local(Rc::new(SearchController::new(
        HttpSearchClient::from_location(&config),
        store,
        BrowserHistory,
    )));
    let collapsed = RwSignal::new(true);

    // The URL (or the retained query) decides the first search
    dispatch(controller, "Initial search", |c| async move {
        c.on_navigate(&current_search()).await
    });

    // Back/forward navigation
    let popstate = window_event_listener(leptos::ev::popstate, move |_| {
        dispatch(controller, "Navigation", |c| async move {
            c.on_navigate(&current_search()).await
        });
    });
    on_cleanup(move || popstate.remove());

    let page_change = Debounced::new(
        config.page_change_debounce_ms,
        Callback::new(move |page: u32| {
            dispatch(controller, "Page change", move |c| async move {
                c.on_page_change(page).await
            });
        }),
    );
    let on_page_change = Callback::new(move |page: u32| page_change.run(page));

    let on_page_size_change = Callback::new(move |count: u32| {
        dispatch(controller, "Page size change", move |c| async move {
            c.on_page_count_change(count).await
        });
    });

    let on_filter_change = Callback::new(move |change: FilterChange| {
        dispatch(controller, "Filter change", move |c| async move {
            c.on_filter_change(change).await
        });
    });

    let on_order_change = move |index: usize| {
        let (current, order) = state.with_untracked(|s| {
            (order_column(&s.query), s.query.sort.as_ref().map(|sort| sort.order))
        });
        let order = next_sort_order(current, index, order);
        dispatch(controller, "Sort change", move |c| async move {
            c.on_order_change(index, order).await
        });
    };

    let on_retry = move |_: leptos::ev::MouseEvent| {
        dispatch(controller, "Retry", |c| async move { c.retry().await });
    };

    let on_charts_collapse = move |_: leptos::ev::MouseEvent| collapsed.update(|c| *c = !*c);

    let query = Memo::new(move |_| state.with(|s| s.query.clone()));
    let loading = Signal::derive(move || state.with(|s| s.is_loading()));
    let total_count = Signal::derive(move || state.with(|s| s.result.total.count));
    let paid_amount = Signal::derive(move || state.with(|s| s.result.total.paid_amount()));
    let current_page = Signal::derive(move || state.with(|s| s.pagination.offset));
    let total_pages = Signal::derive(move || state.with(|s| s.pagination.total));
    let page_size = Signal::derive(move || query.with(|q| q.count));
    let dataset = Signal::derive(move || state.with(|s| s.result.chart.dataset.clone()));
    let sorting = Signal::derive(move || {
        query.with(|q| (order_column(q), q.sort.as_ref().map(|sort| sort.order)))
    });

    view! {
        <div class="page" id="a001_transactions--list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Transactions"</h1>
                    <span class="badge badge--primary">{move || total_count.get().to_string()}</span>
                    <span class="page__summary">{move || format_currency(paid_amount.get())}</span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=on_charts_collapse
                    >
                        {icon("bar-chart")}
                        {move || if collapsed.get() { " Show charts" } else { " Hide charts" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <TransactionsFilters query=query disabled=loading on_change=on_filter_change />

                {move || match state.with(|s| s.status.clone()) {
                    SearchStatus::Loading => view! {
                        <div class="page__status">"Loading..."</div>
                    }.into_any(),
                    SearchStatus::Failed(e) => view! {
                        <div class="page__error">
                            <span>{format!("Search failed: {}", e)}</span>
                            <Button appearance=ButtonAppearance::Subtle on_click=on_retry>
                                {icon("refresh")}
                                " Retry"
                            </Button>
                        </div>
                    }.into_any(),
                    SearchStatus::Idle | SearchStatus::Loaded => view! { <></> }.into_any(),
                }}

                <Show when=move || !collapsed.get()>
                    <TransactionsChart dataset=dataset />
                </Show>

                <PaginationControls
                    current_page=current_page
                    total_pages=total_pages
                    total_count=total_count
                    page_size=page_size
                    disabled=loading
                    on_page_change=on_page_change
                    on_page_size_change=on_page_size_change
                    page_size_options=config.page_size_options.clone()
                />

                <div class="table-wrapper">
                    <table class="table__data transactions-table">
                        <thead>
                            <tr>
                                {COLUMNS
                                    .iter()
                                    .enumerate()
                                    .map(|(index, column)| {
                                        if column.orderable {
                                            view! {
                                                <th
                                                    class="table__header-cell table__sortable-header"
                                                    on:click=move |_| on_order_change(index)
                                                >
                                                    {column.title}
                                                    <span class=move || get_sort_class(sorting.get().0, index)>
                                                        {move || {
                                                            let (current, order) = sorting.get();
                                                            get_sort_indicator(current, index, order)
                                                        }}
                                                    </span>
                                                </th>
                                            }.into_any()
                                        } else {
                                            view! {
                                                <th class="table__header-cell">{column.title}</th>
                                            }.into_any()
                                        }
                                    })
                                    .collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let rows = state.with(|s| s.result.list.rows.clone());
                                rows.into_iter()
                                    .map(|row| {
                                        let status = row.get("status").and_then(|s| s.as_str()).unwrap_or_default();
                                        let row_class = format!("table__row {}", status_class(status));
                                        view! {
                                            <tr class=row_class>
                                                {COLUMNS
                                                    .iter()
                                                    .map(|column| view! {
                                                        <td class="table__cell">{column.render(&row)}</td>
                                                    })
                                                    .collect_view()}
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
