//! HTTP request handlers

pub mod geocode;
pub mod health;
pub mod map;
pub mod pages;
pub mod sessions;
