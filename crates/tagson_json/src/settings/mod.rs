//! Per-call configuration.
//!
//! - [`SerializeSettings`]: output layout, type tags, references and ignore
//!   flags for the write engine.
//! - [`DeserializeSettings`]: matching rules, strictness, type-name
//!   resolution and construction hooks for the read engine.
//! - [`TypeOverrides`]: per-type aliases, ignored members, bind-to types and
//!   member defaults, shared by both.
//!
//! Settings are plain values passed into every call. Nothing is read from the
//! environment.

// -----------------------------------------------------------------------------
// Modules

mod deserialize;
mod overrides;
mod serialize;

// -----------------------------------------------------------------------------
// Exports

pub use deserialize::{Activator, CtorParamMatcher, DeserializeSettings, match_ctor_param};
pub use overrides::{TypeOverride, TypeOverrides};
pub use serialize::{Formatting, SerializeSettings, TypeNameInfo, TypeTagPolicy};
