//! SecuryFlex marketplace library.
//!
//! Matches ZZP security guards, security companies (bedrijven), and clients
//! (opdrachtgevers) around job postings, applications, ND-nummer compliance,
//! and Finqle payment reconciliation. HTTP wiring lives in the `api` service;
//! this crate owns the domain rules, the storage traits, and the routers.

pub mod accounts;
pub mod cache;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod notifications;
pub mod payments;
pub mod response;
pub mod store;
pub mod telemetry;
