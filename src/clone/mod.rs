// src/clone/mod.rs

//! Plans and runs one `git clone` per project of a group tree.
//!
//! `plan_clones` walks a `GroupNode` into an ordered list of `CloneRequest`s,
//! `dispatch` feeds them to a `CloneRunner`, and `GitCli` is the runner that
//! shells out to git.

mod dispatch;
mod runner;

pub use dispatch::{dispatch, plan_clones, CloneResult, DispatchOptions};
pub use runner::{CloneOutcome, CloneOutput, CloneRequest, CloneRunner, GitCli};
