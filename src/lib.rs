// ABOUTME: Library module for postgres-table-transfer
// ABOUTME: Exports configuration, connection, copy and reconciliation functionality

pub mod commands;
pub mod config;
pub mod migration;
pub mod postgres;
pub mod utils;
