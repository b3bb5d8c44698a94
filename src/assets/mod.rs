//! Asset and resource management system
//!
//! Provides name-keyed resource management with:
//! - Extension-based kind classification
//! - A uniform, type-safe resource envelope
//! - One generic registry per media family

mod error;
mod kind;
mod resource;
mod storage;

pub use error::{AssetError, DecodeError};
pub use kind::{AssetKind, Category, classify};
pub use resource::{AssetResource, BoxedSource, CollisionPolicy, MediaSource, Payload};
pub use storage::Registry;
