#![allow(async_fn_in_trait)]

pub mod api;
pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod page;
pub mod utils;
pub mod view;
