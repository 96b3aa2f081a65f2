//! costbot - Azure subscription cost chatbot
//!
//! Answers natural-language questions about Azure spend in a chat channel:
//! a language model turns the question into a [`query::CostQuery`], the
//! cost-management API returns billing rows, and the rows are ordered (and
//! optionally summed by month) into a table for the reply.

pub mod api;
pub mod billing;
pub mod bot;
pub mod cli;
pub mod config;
pub mod llm;
pub mod logging;
pub mod query;
pub mod series;
