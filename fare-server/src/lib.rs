//! Bus fare estimation server.
//!
//! Looks up named locations from a bilingual (English/Bengali) gazetteer
//! and prices bus trips by distance, bus category and discount.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod fare;
pub mod routing;
pub mod search;
pub mod web;
