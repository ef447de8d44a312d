//! Integration test modules

mod config_flow;
mod round_flow;
mod tui_keys;
