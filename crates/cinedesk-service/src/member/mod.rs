//! Actor and translator management.

pub mod service;

pub use service::MemberService;
