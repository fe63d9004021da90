#![allow(non_snake_case)]

pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;
pub mod store;
pub mod time_utils;
