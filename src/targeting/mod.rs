//! Monster targeting.
//!
//! Monsters focus on the nearest eligible enemy. Ties go to summons over
//! characters, then to the lower initiative.

mod focus;

pub use focus::select_focus_target;
