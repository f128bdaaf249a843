//! The pieces of the 65816 the video core interacts with.
//!
//! Instruction decode lives outside this crate; it reaches memory through
//! [`crate::bus::Bus`] and the stack through [`Stack`].

mod stack;

pub use stack::{Stack, STACK_POINTER_DEFAULT};
