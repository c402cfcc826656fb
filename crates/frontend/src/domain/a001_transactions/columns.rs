//! Column registry of the transactions grid
//!
//! Visual column order is the order of `COLUMNS`; sort headers are addressed
//! by index into this table, so it must never be reordered at runtime.

use super::formatters::{
    format_card_brand, format_cpf_cnpj, format_currency, format_payment_method,
    format_refuse_reason, format_status,
};
use crate::shared::date_utils::format_date_br;
use serde_json::Value;

/// Turns a whole transaction record into the text of one cell
pub type Renderer = fn(&Value) -> String;

pub struct ColumnDef {
    pub title: &'static str,
    /// Path into the nested transaction record, also used as the sort field
    pub accessor: &'static [&'static str],
    pub renderer: Option<Renderer>,
    pub orderable: bool,
}

impl ColumnDef {
    /// Cell text: the custom renderer if any, otherwise the raw value at `accessor`
    pub fn render(&self, record: &Value) -> String {
        match self.renderer {
            Some(renderer) => renderer(record),
            None => value_at(record, self.accessor)
                .map(display_value)
                .unwrap_or_default(),
        }
    }
}

pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        title: "Status",
        accessor: &["status"],
        renderer: Some(render_status),
        orderable: true,
    },
    ColumnDef {
        title: "Transaction Id",
        accessor: &["id"],
        renderer: None,
        orderable: true,
    },
    ColumnDef {
        title: "Date created",
        accessor: &["created_at"],
        renderer: Some(render_created_at),
        orderable: true,
    },
    ColumnDef {
        title: "CPF / CNPJ",
        accessor: &["customer", "document_number"],
        renderer: Some(render_document_number),
        orderable: false,
    },
    ColumnDef {
        title: "Payment method",
        accessor: &["payment", "method"],
        renderer: Some(render_payment_method),
        orderable: true,
    },
    ColumnDef {
        title: "Paid amount",
        accessor: &["payment", "paid_amount"],
        renderer: Some(render_paid_amount),
        orderable: true,
    },
    ColumnDef {
        title: "Cost",
        accessor: &["payment", "cost_amount"],
        renderer: Some(render_cost_amount),
        orderable: true,
    },
    ColumnDef {
        title: "Net amount",
        accessor: &["payment", "net_amount"],
        renderer: Some(render_net_amount),
        orderable: false,
    },
    ColumnDef {
        title: "E-mail",
        accessor: &["customer", "email"],
        renderer: None,
        orderable: true,
    },
    ColumnDef {
        title: "Refuse Reason",
        accessor: &["refuse_reason"],
        renderer: Some(render_refuse_reason),
        orderable: true,
    },
    ColumnDef {
        title: "Antifraud",
        accessor: &["antifraud", "recommendation"],
        renderer: None,
        orderable: true,
    },
    ColumnDef {
        title: "Installments",
        accessor: &["payment", "installments"],
        renderer: None,
        orderable: true,
    },
    ColumnDef {
        title: "Name",
        accessor: &["customer", "name"],
        renderer: None,
        orderable: true,
    },
    ColumnDef {
        title: "Card brand",
        accessor: &["card", "brand_name"],
        renderer: Some(render_card_brand),
        orderable: true,
    },
    ColumnDef {
        title: "Boleto Link",
        accessor: &["boleto", "url"],
        renderer: None,
        orderable: true,
    },
];

/// Index of the first column whose accessor equals `path` element-wise
pub fn column_index_for_accessor<S: AsRef<str>>(path: &[S]) -> Option<usize> {
    COLUMNS.iter().position(|column| {
        column.accessor.len() == path.len()
            && column
                .accessor
                .iter()
                .zip(path)
                .all(|(segment, other)| *segment == other.as_ref())
    })
}

pub fn accessor_for_column_index(index: usize) -> Option<&'static [&'static str]> {
    COLUMNS.get(index).map(|column| column.accessor)
}

/// Walks a nested record along `path`
pub fn value_at<'a, S: AsRef<str>>(record: &'a Value, path: &[S]) -> Option<&'a Value> {
    path.iter()
        .try_fold(record, |value, segment| value.get(segment.as_ref()))
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn str_at<'a>(record: &'a Value, path: &[&str]) -> Option<&'a str> {
    value_at(record, path).and_then(Value::as_str)
}

fn cents_at(record: &Value, path: &[&str]) -> String {
    value_at(record, path)
        .and_then(Value::as_i64)
        .map(format_currency)
        .unwrap_or_default()
}

fn render_status(record: &Value) -> String {
    str_at(record, &["status"]).map(format_status).unwrap_or_default()
}

fn render_created_at(record: &Value) -> String {
    str_at(record, &["created_at"])
        .map(format_date_br)
        .unwrap_or_default()
}

fn render_document_number(record: &Value) -> String {
    str_at(record, &["customer", "document_number"])
        .map(format_cpf_cnpj)
        .unwrap_or_default()
}

fn render_payment_method(record: &Value) -> String {
    let international = value_at(record, &["payment", "international"])
        .and_then(Value::as_bool)
        .unwrap_or(false);
    str_at(record, &["payment", "method"])
        .map(|method| format_payment_method(method, international))
        .unwrap_or_default()
}

fn render_paid_amount(record: &Value) -> String {
    cents_at(record, &["payment", "paid_amount"])
}

fn render_cost_amount(record: &Value) -> String {
    cents_at(record, &["payment", "cost_amount"])
}

fn render_net_amount(record: &Value) -> String {
    cents_at(record, &["payment", "net_amount"])
}

fn render_refuse_reason(record: &Value) -> String {
    format_refuse_reason(str_at(record, &["refuse_reason"]))
}

fn render_card_brand(record: &Value) -> String {
    format_card_brand(str_at(record, &["card", "brand_name"]))
}
