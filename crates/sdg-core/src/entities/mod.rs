//! Entity structs for the consensus domain.
//!
//! Each entity maps to a table in the libSQL database (see
//! `sdg-db/migrations/001_initial.sql`). Associations are held as ids and
//! resolved through the repositories rather than as embedded object graphs.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod decision;
mod history;
mod prediction;
mod publication;
mod summary;
mod vote;

pub use decision::Decision;
pub use history::History;
pub use prediction::Prediction;
pub use publication::Publication;
pub use summary::Summary;
pub use vote::Vote;
