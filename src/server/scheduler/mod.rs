//! Cron jobs that run alongside the HTTP server.

pub mod invitation_expiry;
