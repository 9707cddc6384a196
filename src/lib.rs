pub mod client;
pub mod config;
pub mod data_models;
pub mod error;
pub mod query;
pub mod scenarios;
pub mod validators;
pub mod verifier;
