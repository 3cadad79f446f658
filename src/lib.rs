// src/lib.rs

//! Curriculum library: the guide's section/chapter/module registry, archive
//! search, reading progress, and problem metadata parsing.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
