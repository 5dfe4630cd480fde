//! Use-case services above the store layer.
//!
//! # Responsibility
//! - Compose user and book stores into multi-entity use cases.
//! - Stay storage-agnostic: services are generic over the store traits.

pub mod user_data_facade;
