//! HTTP request handlers.
//!
//! - `tasks` - task creation (`POST /push`)
//! - `events` - SSE progress streaming (`GET /stream`)

pub mod events;
pub mod tasks;
