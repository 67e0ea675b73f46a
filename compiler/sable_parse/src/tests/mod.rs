//! Parser tests.
//!
//! - `expr`: operator precedence, delayed division, lists, maps and atoms
//! - `selector`: the selector grammar and parent-reference rules
//! - `stmt`: statements, at-rules and context errors

mod selector;
mod stmt;
