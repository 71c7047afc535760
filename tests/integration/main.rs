//! End-to-end tests against a real PostgreSQL database.
//!
//! Set `CINEDESK_TEST_DATABASE_URL` to run them; without it every test
//! returns early. Tests share one database and run one at a time.

mod auth_test;
mod catalog_test;
mod engagement_test;
mod helpers;
mod member_test;
mod notification_test;
