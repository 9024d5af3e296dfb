//! Element and attribute model.
//!
//! - Attribute: typed, validated value bound to one element
//! - Element: tree node holding one attribute per kind
//! - ElementKey: structural or identity based map key over an element
//! - AttributeVisitor: exhaustive dispatch over attribute kinds

mod attribute;
mod element;
mod key;
mod visitor;

pub use attribute::{Attribute, AttributeKind, AttributeValue};
pub use element::{Capability, Element, ElementKind, IdentityMode, Layout, Location};
pub use key::ElementKey;
pub use visitor::AttributeVisitor;
