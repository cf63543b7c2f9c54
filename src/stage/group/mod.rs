//! Parameter-based grouping.
//!
//! Grouping classifies cases into named buckets by matching identifier
//! substrings against the values a case was invoked with. It is built from
//! three pieces:
//! - [`GroupMap`] declares the buckets: group name → identifier substrings
//! - [`ParamGrouper`] is the stage doing the classification
//! - [`ParamGroups`] is the result: members per group plus the unmatched rest
//!
//! Attaching a tag to a matched case is delegated to the host through a
//! [`TagSink`]; the stage itself never mutates a case.

mod grouper;
pub use grouper::*;

mod groups;
pub use groups::*;

mod tags;
pub use tags::*;
