//! Whole-program rewrites over finished flat programs.
//!
//! Rewrites never insert, remove or move instructions: many instructions hold
//! absolute addresses of others, so only slot contents may change.

mod tail_call;


pub use tail_call::{TailCallRewriter, optimize};
