#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

extern crate alloc;

mod arena;
pub use arena::NodeId;

mod tree;
pub use tree::RbTree;

mod iter;
pub use iter::InOrder;

mod dump;
pub use dump::Structure;
