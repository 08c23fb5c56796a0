//! API route modules
//!
//! One module per collection, each exposing a `router()` merged into the
//! application in `core::server::build_app`.

pub mod extract;
pub mod health;
pub mod upload;

// Collection APIs
pub mod contact;
pub mod customers;
pub mod faqs;
pub mod feedback;
pub mod gallery;
pub mod invoices;
pub mod orders;
pub mod products;
