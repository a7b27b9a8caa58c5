#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod traits;
pub mod types;

pub use config::{Secret, Settings};
pub use error::{Error, Result};
