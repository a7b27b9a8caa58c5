//! Clients for the two Supabase services the seeder writes through: the
//! GoTrue admin API (auth users) and PostgREST (table rows).

pub mod auth_admin;
pub mod rest;

pub use auth_admin::GoTrueAdmin;
pub use rest::PostgrestClient;
