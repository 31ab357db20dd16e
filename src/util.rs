//! Shared utility modules used across invidx components.

pub mod varint;
