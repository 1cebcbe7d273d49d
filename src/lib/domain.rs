//! Domain types

pub mod communication;
