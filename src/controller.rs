//! The toggle state machine: one controller per bound toggler element.

use std::sync::Arc;

use log::{debug, trace};

use crate::animation::{Animate, DoneFn};
use crate::config::{Cause, ToggleConfig, ToggleOptions, Trigger, HANDLE_ACTIVE_CLASS};

/// Bind a visibility-toggle behavior to `toggler`.
///
/// Resolves the configuration (defaults and fallback lookups), synchronizes
/// the toggler and handle with the target's current visibility without
/// running a transition, and registers an activation handler on the toggler.
/// The returned controller is a handle the caller holds explicitly; there is
/// no hidden global registration.
///
/// Binding the same element twice registers two activation handlers; nothing
/// guards against it.
pub fn bind<E>(toggler: E, options: ToggleOptions<E>) -> ToggleController<E>
where
    E: Animate + Send + Sync + 'static,
{
    ToggleController::bind(toggler, options)
}

/// A visibility-toggle behavior bound to one toggler element.
///
/// The controller holds no mutable state: visibility is re-derived from the
/// target's presentation state on every operation, so it stays correct when
/// something other than this controller shows or hides the target. Clones
/// share the same binding.
pub struct ToggleController<E> {
    inner: Arc<ToggleInner<E>>,
}

struct ToggleInner<E> {
    toggler: E,
    config: ToggleConfig<E>,
}

impl<E> Clone for ToggleController<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> ToggleController<E>
where
    E: Animate + Send + Sync + 'static,
{
    /// See [`bind`].
    pub fn bind(toggler: E, options: ToggleOptions<E>) -> Self {
        let config = options.resolve(&toggler);
        let controller = Self {
            inner: Arc::new(ToggleInner { toggler, config }),
        };

        // The target's initial presentation comes from the host (markup/CSS
        // applied before this controller existed); synchronize to whatever it
        // is rather than assuming a default.
        let shown = controller.is_visible();
        controller.inner.apply_rest_state(shown, Cause::Bind);
        debug!(
            "bound toggler: {:?}, initially {}",
            controller.inner.config.animation,
            if shown { "shown" } else { "hidden" }
        );

        let handler = controller.clone();
        controller
            .inner
            .toggler
            .on_activate(Arc::new(move || handler.toggle()));

        controller
    }

    /// Handle one activation: derive the current visibility and run the
    /// opposite transition. Housekeeping (handle label and indicator class,
    /// toggler active class, completion callback) runs when the animation
    /// primitive reports completion, never before.
    ///
    /// Activations during an in-flight transition are neither queued nor
    /// locked out here; the animation primitive's own queuing/interruption
    /// behavior governs.
    pub fn toggle(&self) {
        let shown = self.is_visible();
        debug!("toggle: {} -> transition", if shown { "shown" } else { "hidden" });
        self.transition_to(!shown);
    }

    /// Show the target if it is hidden. An already-visible target is left
    /// untouched: no transition, no callbacks.
    pub fn show(&self) {
        if !self.is_visible() {
            self.transition_to(true);
        }
    }

    /// Hide the target if it is visible. An already-hidden target is left
    /// untouched: no transition, no callbacks.
    pub fn hide(&self) {
        if self.is_visible() {
            self.transition_to(false);
        }
    }

    /// Whether the target currently reads as visible under the configured
    /// animation style. Derived from the target's presentation state on every
    /// call; `false` when no target resolved.
    pub fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ToggleConfig<E> {
        &self.inner.config
    }

    fn transition_to(&self, to_shown: bool) {
        let Some(target) = self.inner.config.target.clone() else {
            debug!("activation ignored: toggler has no target");
            return;
        };
        let animation = self.inner.config.animation;
        let speed = self.inner.config.speed;
        let inner = Arc::clone(&self.inner);
        let done: DoneFn = Box::new(move || inner.apply_rest_state(to_shown, Cause::Activation));
        if to_shown {
            animation.show(&target, speed, done);
        } else {
            animation.hide(&target, speed, done);
        }
    }
}

impl<E: Animate> ToggleInner<E> {
    fn is_visible(&self) -> bool {
        match &self.config.target {
            Some(target) => self.config.animation.is_visible(target),
            None => false,
        }
    }

    /// Establish the rest-state facts for `shown`: handle label and indicator
    /// class, toggler active class, then the completion callback. These three
    /// stay mutually consistent at every rest point.
    fn apply_rest_state(&self, shown: bool, cause: Cause) {
        let config = &self.config;
        if let Some(handle) = &config.handle {
            if shown {
                handle.set_text(&config.hide_label);
                handle.add_class(HANDLE_ACTIVE_CLASS);
            } else {
                handle.set_text(&config.show_label);
                handle.remove_class(HANDLE_ACTIVE_CLASS);
            }
        }
        if shown {
            self.toggler.add_class(&config.active_class);
        } else {
            self.toggler.remove_class(&config.active_class);
        }
        trace!("rest state applied: shown={shown}, cause={cause:?}");
        (config.on_complete)(config, &Trigger { cause, shown });
    }
}
