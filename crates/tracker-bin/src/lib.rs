//! Library half of the `hackathon-tracker` binary.
//!
//! Split out so initialization and command dispatch can be tested without
//! spawning a process.

#![deny(unsafe_code)]

pub mod commands;
pub mod initialization;
