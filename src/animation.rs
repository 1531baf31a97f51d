//! Animation styles and the primitives the hosting engine supplies for them.

use std::str::FromStr;
use std::time::Duration;

use crate::dom::Element;
use crate::error::ToggleError;

/// Completion callback for an animation primitive. Invoked exactly once, when
/// the element has reached its end state.
pub type DoneFn = Box<dyn FnOnce() + Send>;

/// Animation speed: a named preset or an explicit millisecond count.
///
/// Opaque to the toggle logic; it is converted to a [`Duration`] and passed
/// through to the animation primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
    Millis(u64),
}

impl Speed {
    /// Duration of one transition at this speed.
    pub fn duration(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(600),
            Speed::Normal => Duration::from_millis(400),
            Speed::Fast => Duration::from_millis(200),
            Speed::Millis(ms) => Duration::from_millis(ms),
        }
    }
}

impl FromStr for Speed {
    type Err = ToggleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(Speed::Slow),
            "normal" => Ok(Speed::Normal),
            "fast" => Ok(Speed::Fast),
            other => other
                .parse()
                .map(Speed::Millis)
                .map_err(|_| ToggleError::UnknownSpeed(other.to_string())),
        }
    }
}

/// Animation primitives the hosting engine supplies for toggleable elements.
///
/// Each primitive animates over `speed` and invokes `done` exactly once when
/// the element reaches its end state. Nothing here queues or interrupts: how
/// overlapping animations on the same element behave is the engine's call.
pub trait Animate: Element {
    /// Collapse the element's layout box until its display mode is
    /// [`Display::None`](crate::dom::Display::None).
    fn slide_up(&self, speed: Speed, done: DoneFn);

    /// Expand the element's layout box, restoring its display mode.
    fn slide_down(&self, speed: Speed, done: DoneFn);

    /// Animate opacity to `1.0`.
    fn fade_in(&self, speed: Speed, done: DoneFn);

    /// Animate opacity to `0.0`.
    fn fade_out(&self, speed: Speed, done: DoneFn);
}

/// Which pair of transition primitives a controller drives, and which
/// presentation property it derives visibility from.
///
/// The two predicates are intentionally different: slide transitions end in a
/// collapsed layout box (display `None`), fade transitions end fully
/// transparent, so each style inspects the property it actually changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    Slide,
    Fade,
}

impl Animation {
    /// Whether `target` currently reads as visible under this style.
    pub fn is_visible<E: Element>(self, target: &E) -> bool {
        match self {
            Animation::Slide => !target.display().is_none(),
            // Exactly zero: the fade-out end state, not "mostly faded".
            Animation::Fade => target.opacity() != 0.0,
        }
    }

    /// Animate `target` to its hidden end state.
    pub fn hide<E: Animate>(self, target: &E, speed: Speed, done: DoneFn) {
        match self {
            Animation::Slide => target.slide_up(speed, done),
            Animation::Fade => target.fade_out(speed, done),
        }
    }

    /// Animate `target` to its shown end state.
    pub fn show<E: Animate>(self, target: &E, speed: Speed, done: DoneFn) {
        match self {
            Animation::Slide => target.slide_down(speed, done),
            Animation::Fade => target.fade_in(speed, done),
        }
    }
}

impl FromStr for Animation {
    type Err = ToggleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slide" => Ok(Animation::Slide),
            "fade" => Ok(Animation::Fade),
            other => Err(ToggleError::UnknownAnimation(other.to_string())),
        }
    }
}
