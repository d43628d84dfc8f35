//! Bundleboard Admin library.
//!
//! This crate provides the admin panel as a library, allowing it to be
//! tested and reused. It is thin plumbing: the grouping, paging and
//! export logic lives in `bundleboard-core`; this crate fetches order
//! pages from the Shopify Admin API and renders them.
//!
//! # Security
//!
//! The configured Admin API access token grants read access to the
//! store's orders. Only deploy behind the merchant's private network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod shopify;
pub mod state;
