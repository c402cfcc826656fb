use crate::domain::a001_transactions::ui::list::TransactionsList;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <TransactionsList />
    }
}
