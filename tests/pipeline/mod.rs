//! End-to-end runs over generated inputs.

mod batch;
mod formats;
mod overlap;
