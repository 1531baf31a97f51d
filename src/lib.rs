pub mod animation;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod memdom;

pub use animation::{Animate, Animation, DoneFn, Speed};
pub use config::{
    Cause, CompleteFn, ToggleConfig, ToggleOptions, Trigger, HANDLE_ACTIVE_CLASS, HANDLE_SELECTOR,
    TARGET_ATTR, TARGET_FALLBACK_SELECTOR,
};
pub use controller::{bind, ToggleController};
pub use dom::{ActivateHandler, Display, Element};
pub use error::ToggleError;
pub use memdom::{MemDom, MemElement};
