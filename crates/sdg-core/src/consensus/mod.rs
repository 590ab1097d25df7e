//! Pure consensus algorithms.
//!
//! - [`aggregate`] reduces raw votes to one label per user (latest wins).
//! - [`scenario`] classifies a label distribution for moderation.
//! - [`majority`] decides whether an absolute majority exists.
//!
//! All functions are side-effect free; persistence and finalization live in
//! `sdg-db`.

pub mod aggregate;
pub mod majority;
pub mod scenario;

pub use aggregate::{label_counts, latest_labels, latest_per_user, latest_votes};
pub use majority::{ConsensusOutcome, evaluate, majority_label};
pub use scenario::{ScenarioThresholds, classify};
