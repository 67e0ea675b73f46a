// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end compiler tests.
//!
//! Source text goes in through the public facade and the evaluated tree
//! comes out, so these exercise parser, evaluator, selector engine and
//! import resolution together.
//!
//! - `scenarios/` - the reference expressions every build must agree on
//! - `stylesheets/` - whole stylesheets: nesting, mixins, `@extend`
//! - `imports/` - `@import` through [`sablec::MapImporter`]
//! - `options/` - precision, quiet mode and nesting limits
//! - `common/` - shared helpers
//!
//! ```bash
//! cargo test -p sablec --test end_to_end
//! ```

#[path = "end_to_end/common/mod.rs"]
mod common;

#[path = "end_to_end/scenarios.rs"]
mod scenarios;

#[path = "end_to_end/stylesheets.rs"]
mod stylesheets;

#[path = "end_to_end/imports.rs"]
mod imports;

#[path = "end_to_end/options.rs"]
mod options;
