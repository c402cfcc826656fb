pub mod api;
pub mod columns;
pub mod controller;
pub mod error;
pub mod formatters;
pub mod pagination;
pub mod query;
pub mod query_codec;
pub mod ui;
