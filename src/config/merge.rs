//! Config merge policy: defaults and source precedence.

pub mod merge_policy;
