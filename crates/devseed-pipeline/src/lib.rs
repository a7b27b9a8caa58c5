//! Drives a seeding run: one pipeline per user fixture, users in order.

pub mod seeder;
pub mod tables;

pub use seeder::{SeedFailure, SeedReport, Seeder};
