pub mod api;
pub mod config;
pub mod data_models;
pub mod db;
pub mod error;
pub mod search;
pub mod seed;
