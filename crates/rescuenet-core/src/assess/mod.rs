//! Pure read-side assessors: confidence, stress, and distribution.
//!
//! All three are deterministic functions over snapshots. They hold no
//! state and are recomputed on every read so they can never drift from
//! the committed incident/resource collections.

pub mod confidence;
pub mod distribution;
pub mod stress;

pub use confidence::{PROXIMITY_WINDOW_DEG, classify, corroboration_count};
pub use distribution::{CATEGORY_ORDER, CategorySlice, distribution};
pub use stress::{StressLevel, compute_stress};
