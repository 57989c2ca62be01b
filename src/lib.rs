//! tgcnc - CNC cutting-mode assistant for Telegram
//!
//! An HTTP backend for a Telegram Mini App that computes cutting speeds,
//! spindle speeds and feeds, a material database filled by a language model,
//! an admin panel and a companion bot.

pub mod auth;
pub mod bot;
pub mod calc;
pub mod cli;
pub mod config;
pub mod history;
pub mod http_server;
pub mod lenient;
pub mod materials;
pub mod observability;
pub mod storage;
