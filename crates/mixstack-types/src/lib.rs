//! Frame model for mixstack.
//!
//! This crate provides the value types shared by every mixstack crate: the
//! records produced by the two capture sources and the tagged union the merge
//! engine emits. All types are plain immutable data; nothing here validates
//! or normalizes field contents.
//!
//! # Key Types
//!
//! - [`NativeFrame`] -- Frame captured by native sampling (instruction pointer + location)
//! - [`ScriptFrame`] -- Frame captured by runtime introspection, with its locals
//! - [`MergedFrame`] -- Either of the above, carried verbatim
//! - [`LocalValue`] / [`Locals`] -- Insertion-ordered local-variable snapshot

pub mod frame;
pub mod merged;
pub mod value;

pub use frame::{make_native_frame, make_script_frame, NativeFrame, ScriptFrame};
pub use merged::{FrameKind, MergedFrame};
pub use value::{LocalValue, Locals, OpaqueValue};
