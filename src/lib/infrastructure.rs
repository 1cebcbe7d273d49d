//! Implementations of domain traits backed by external services

pub mod email;
