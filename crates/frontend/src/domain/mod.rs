pub mod a001_transactions;
