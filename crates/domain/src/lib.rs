//! Domain layer for Ari
//!
//! Contains the conversation entities, the capability model shared by all
//! providers, value objects, and the uniform capability error taxonomy.
//! This layer has no I/O dependencies and defines the ubiquitous language.

pub mod capability;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use capability::{CapabilityKind, CapabilityPayload, CapabilityRequest};
pub use entities::*;
pub use errors::{CapabilityError, CapabilityResult};
pub use value_objects::*;
