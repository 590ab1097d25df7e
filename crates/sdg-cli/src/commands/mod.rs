pub mod config;
pub mod confirm;
pub mod decision;
pub mod dispatch;
pub mod prediction;
pub mod publication;
pub mod stats;
pub mod vote;
