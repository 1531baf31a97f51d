//! Controller configuration: the partial options accepted by `bind` and the
//! resolved, immutable configuration a controller owns.

use std::fmt;
use std::sync::Arc;

use crate::animation::{Animation, Speed};
use crate::dom::Element;

/// Class applied to the handle element while the target is visible.
pub const HANDLE_ACTIVE_CLASS: &str = "toggle-handle-active";

/// Toggler attribute naming a document-scoped selector for the target.
pub const TARGET_ATTR: &str = "data-toggle-target";

/// Default target lookup: a content region under the toggler's parent.
pub const TARGET_FALLBACK_SELECTOR: &str = ".toggler-content";

/// Default handle lookup: a label element under the toggler.
pub const HANDLE_SELECTOR: &str = "span";

/// What fired a completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    /// The initial synchronization performed by `bind`. No transition ran.
    Bind,
    /// An activation event, or an explicit show/hide/toggle call.
    Activation,
}

/// Context passed to the completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    /// What fired the callback.
    pub cause: Cause,
    /// The visibility fact the housekeeping just established.
    pub shown: bool,
}

/// Completion callback. Invoked after housekeeping, once per completed
/// transition and once for the initial synchronization.
pub type CompleteFn<E> = Arc<dyn Fn(&ToggleConfig<E>, &Trigger) + Send + Sync>;

enum HandleOption<E> {
    /// Fall back to the first descendant matching [`HANDLE_SELECTOR`].
    Lookup,
    Explicit(E),
    /// Skip handle synchronization entirely.
    Disabled,
}

/// Partial configuration for [`bind`](crate::controller::bind).
///
/// Every field is optional. Unset fields take the documented defaults, and
/// target/handle fall back to lookups relative to the toggler, resolved once
/// at bind time — transitions never re-query.
pub struct ToggleOptions<E> {
    active_class: Option<String>,
    animation: Option<Animation>,
    speed: Option<Speed>,
    target: Option<E>,
    handle: HandleOption<E>,
    show_label: Option<String>,
    hide_label: Option<String>,
    on_complete: Option<CompleteFn<E>>,
}

impl<E: Element> ToggleOptions<E> {
    pub fn new() -> Self {
        Self {
            active_class: None,
            animation: None,
            speed: None,
            target: None,
            handle: HandleOption::Lookup,
            show_label: None,
            hide_label: None,
            on_complete: None,
        }
    }

    /// Class toggled on the toggler element. Default `"active"`.
    pub fn active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = Some(class.into());
        self
    }

    /// Animation style. Default [`Animation::Slide`].
    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Transition speed. Default [`Speed::Normal`].
    pub fn speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }

    /// The region to toggle. Overrides the fallback lookup.
    pub fn target(mut self, target: E) -> Self {
        self.target = Some(target);
        self
    }

    /// The label element tracking the toggle state. Overrides the fallback
    /// lookup.
    pub fn handle(mut self, handle: E) -> Self {
        self.handle = HandleOption::Explicit(handle);
        self
    }

    /// Disable handle synchronization: no label or indicator-class updates.
    pub fn no_handle(mut self) -> Self {
        self.handle = HandleOption::Disabled;
        self
    }

    /// Handle text while the target is hidden. Default `"Show"`.
    pub fn show_label(mut self, label: impl Into<String>) -> Self {
        self.show_label = Some(label.into());
        self
    }

    /// Handle text while the target is visible. Default `"Hide"`.
    pub fn hide_label(mut self, label: impl Into<String>) -> Self {
        self.hide_label = Some(label.into());
        self
    }

    /// Callback fired after every completed transition (and once for the
    /// initial synchronization), with housekeeping already applied.
    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: Fn(&ToggleConfig<E>, &Trigger) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(f));
        self
    }

    /// Resolve defaults and fallback lookups against `toggler`, producing the
    /// immutable configuration.
    pub(crate) fn resolve(self, toggler: &E) -> ToggleConfig<E> {
        let target = self.target.or_else(|| lookup_target(toggler));
        if target.is_none() {
            log::debug!("toggler has no resolvable target; activations will be no-ops");
        }
        let handle = match self.handle {
            HandleOption::Explicit(el) => Some(el),
            HandleOption::Lookup => toggler.find(HANDLE_SELECTOR),
            HandleOption::Disabled => None,
        };

        ToggleConfig {
            active_class: self.active_class.unwrap_or_else(|| "active".into()),
            animation: self.animation.unwrap_or_default(),
            speed: self.speed.unwrap_or_default(),
            target,
            handle,
            show_label: self.show_label.unwrap_or_else(|| "Show".into()),
            hide_label: self.hide_label.unwrap_or_else(|| "Hide".into()),
            on_complete: self.on_complete.unwrap_or_else(|| Arc::new(|_, _| {})),
        }
    }
}

impl<E: Element> Default for ToggleOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// The target fallback chain: a [`TARGET_ATTR`] attribute names a
/// document-scoped selector; without the attribute, the toggler's parent is
/// searched for a content region. An attribute whose selector matches nothing
/// resolves to no target — it does not fall through to the parent lookup.
fn lookup_target<E: Element>(toggler: &E) -> Option<E> {
    if let Some(selector) = toggler.attr(TARGET_ATTR) {
        let found = toggler.query(&selector);
        if found.is_none() {
            log::debug!("{TARGET_ATTR}=\"{selector}\" matched nothing");
        }
        return found;
    }
    toggler
        .parent()
        .and_then(|parent| parent.find(TARGET_FALLBACK_SELECTOR))
}

/// Resolved, immutable configuration owned by a controller.
pub struct ToggleConfig<E> {
    /// Class on the toggler while the target is visible.
    pub active_class: String,
    /// Animation style driving transitions and the visibility predicate.
    pub animation: Animation,
    /// Transition speed, passed through to the animation primitives.
    pub speed: Speed,
    /// The region being toggled. `None` (empty resolution) makes every
    /// activation a no-op; it is not an error.
    pub target: Option<E>,
    /// The label element tracking the toggle state. `None` disables handle
    /// synchronization.
    pub handle: Option<E>,
    /// Handle text while the target is hidden.
    pub show_label: String,
    /// Handle text while the target is visible.
    pub hide_label: String,
    pub(crate) on_complete: CompleteFn<E>,
}

impl<E: fmt::Debug> fmt::Debug for ToggleConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleConfig")
            .field("active_class", &self.active_class)
            .field("animation", &self.animation)
            .field("speed", &self.speed)
            .field("target", &self.target)
            .field("handle", &self.handle)
            .field("show_label", &self.show_label)
            .field("hide_label", &self.hide_label)
            .finish_non_exhaustive()
    }
}
