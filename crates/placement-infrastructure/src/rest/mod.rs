//! Gateway to the hosted database-as-a-service.
//!
//! Records go through a PostgREST-style API (`/rest/v1/{table}` with
//! `column=eq.value` filters); uploads go to `/storage/v1/object`.

mod client;
mod records;

pub use client::RestClient;
pub use records::RestRecordGateway;
