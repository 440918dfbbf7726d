//! Property tests
//!
//! Laws of the visibility threshold and progress arithmetic, checked over
//! generated comment sets.

mod progress_proptest;
mod visibility_proptest;
