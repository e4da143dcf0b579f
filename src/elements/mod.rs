//! Elemental infusions.
//!
//! Six elements, each `Inert`, `Waning`, or `Strong`. Actions infuse and
//! consume elements; at the end of every round the whole board decays one
//! step (`Strong → Waning → Inert`).

mod board;

pub use board::{Element, ElementState, ElementalBoard};
