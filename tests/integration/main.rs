//! Integration tests driving the full router over the in-memory store.

mod helpers;

mod auth_test;
mod company_test;
mod employee_test;
mod pipeline_test;
