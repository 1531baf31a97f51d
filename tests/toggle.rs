use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use toggler::{
    bind, Animation, Cause, Display, Element, MemDom, MemElement, ToggleConfig, ToggleOptions,
    HANDLE_ACTIVE_CLASS, TARGET_ATTR,
};

/// `wrap > (a > span) + div.toggler-content`: the markup shape the default
/// lookups expect. The span starts with placeholder text so tests can see
/// that binding overwrites it.
fn fixture(dom: &MemDom) -> (MemElement, MemElement, MemElement) {
    let wrap = dom.root().append("div");
    let toggler = wrap.append("a").with_class("toggler");
    let handle = toggler.append("span").with_text("More");
    let content = wrap.append("div").with_class("toggler-content");
    (toggler, handle, content)
}

fn counting_options(counter: &Arc<AtomicUsize>) -> ToggleOptions<MemElement> {
    let counter = Arc::clone(counter);
    ToggleOptions::new().on_complete(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

// =============================================================================
// Bind-Time Synchronization Tests
// =============================================================================

#[test]
fn test_bind_syncs_to_visible_target() {
    let dom = MemDom::instant();
    let (toggler, handle, _content) = fixture(&dom);

    let controller = bind(toggler.clone(), ToggleOptions::new());

    assert!(controller.is_visible());
    assert_eq!(handle.text(), "Hide");
    assert!(handle.has_class(HANDLE_ACTIVE_CLASS));
    assert!(toggler.has_class("active"));
}

#[test]
fn test_bind_syncs_to_hidden_target() {
    let dom = MemDom::instant();
    let (toggler, handle, content) = fixture(&dom);
    content.set_display(Display::None);

    let controller = bind(toggler.clone(), ToggleOptions::new());

    assert!(!controller.is_visible());
    assert_eq!(handle.text(), "Show");
    assert!(!handle.has_class(HANDLE_ACTIVE_CLASS));
    assert!(!toggler.has_class("active"));
}

#[test]
fn test_bind_runs_no_transition() {
    // Initial sync writes the rest-state facts directly; nothing animates.
    let dom = MemDom::new();
    let (toggler, _handle, content) = fixture(&dom);

    bind(toggler, ToggleOptions::new());

    assert_eq!(dom.pending(), 0);
    assert_eq!(content.display(), Display::Block);
}

#[test]
fn test_bind_fires_completion_with_bind_cause() {
    let dom = MemDom::instant();
    let (toggler, _handle, _content) = fixture(&dom);

    let triggers = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&triggers);
    bind(
        toggler,
        ToggleOptions::new().on_complete(move |_, trigger| {
            seen.lock().unwrap().push(*trigger);
        }),
    );

    let triggers = triggers.lock().unwrap();
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].cause, Cause::Bind);
    assert!(triggers[0].shown);
}

#[test]
fn test_bind_fade_reads_opacity_not_display() {
    // A fully transparent target is hidden under the fade style even though
    // its layout box is still there.
    let dom = MemDom::instant();
    let (toggler, handle, content) = fixture(&dom);
    content.set_opacity(0.0);

    let controller = bind(
        toggler,
        ToggleOptions::new().animation(Animation::Fade),
    );

    assert!(!controller.is_visible());
    assert_eq!(handle.text(), "Show");
    assert_eq!(content.display(), Display::Block);
}

// =============================================================================
// Toggle Tests
// =============================================================================

#[test]
fn test_toggle_hides_visible_target() {
    let dom = MemDom::instant();
    let (toggler, handle, content) = fixture(&dom);
    let controller = bind(toggler.clone(), ToggleOptions::new());

    controller.toggle();

    assert_eq!(content.display(), Display::None);
    assert!(!controller.is_visible());
    assert_eq!(handle.text(), "Show");
    assert!(!handle.has_class(HANDLE_ACTIVE_CLASS));
    assert!(!toggler.has_class("active"));
}

#[test]
fn test_toggle_shows_hidden_target() {
    let dom = MemDom::instant();
    let (toggler, handle, content) = fixture(&dom);
    content.set_display(Display::None);
    let controller = bind(toggler.clone(), ToggleOptions::new());

    controller.toggle();

    assert_eq!(content.display(), Display::Block);
    assert!(controller.is_visible());
    assert_eq!(handle.text(), "Hide");
    assert!(toggler.has_class("active"));
}

#[test]
fn test_repeated_activations_alternate() {
    let dom = MemDom::instant();
    let (toggler, _handle, _content) = fixture(&dom);
    let controller = bind(toggler.clone(), ToggleOptions::new());

    let mut seen = Vec::new();
    for _ in 0..4 {
        toggler.click();
        seen.push(controller.is_visible());
    }

    assert_eq!(seen, vec![false, true, false, true]);
}

#[test]
fn test_fade_toggle_moves_opacity_between_endpoints() {
    let dom = MemDom::instant();
    let (toggler, _handle, content) = fixture(&dom);
    let controller = bind(
        toggler,
        ToggleOptions::new().animation(Animation::Fade),
    );

    controller.toggle();
    assert_eq!(content.opacity(), 0.0);
    // Fading never touches the layout box.
    assert_eq!(content.display(), Display::Block);

    controller.toggle();
    assert_eq!(content.opacity(), 1.0);
}

#[test]
fn test_visibility_rederived_after_external_change() {
    // Something else hides the target after binding; the next activation
    // works from the state it finds, not from a remembered one.
    let dom = MemDom::instant();
    let (toggler, handle, content) = fixture(&dom);
    let controller = bind(toggler, ToggleOptions::new());

    content.set_display(Display::None);
    controller.toggle();

    assert_eq!(content.display(), Display::Block);
    assert!(controller.is_visible());
    assert_eq!(handle.text(), "Hide");
}

// =============================================================================
// Completion Ordering Tests
// =============================================================================

#[test]
fn test_housekeeping_applied_before_completion_callback() {
    let dom = MemDom::instant();
    let (toggler, _handle, _content) = fixture(&dom);

    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&snapshots);
    let controller = bind(
        toggler.clone(),
        ToggleOptions::new().on_complete(move |config: &ToggleConfig<MemElement>, trigger| {
            let handle = config.handle.as_ref().unwrap();
            seen.lock().unwrap().push((
                trigger.cause,
                trigger.shown,
                handle.text(),
                handle.has_class(HANDLE_ACTIVE_CLASS),
                toggler.has_class("active"),
            ));
        }),
    );

    controller.toggle();
    controller.toggle();

    // The callback observes the handle and toggler already synchronized to
    // the state the trigger reports.
    let snapshots = snapshots.lock().unwrap();
    assert_eq!(
        *snapshots,
        vec![
            (Cause::Bind, true, "Hide".to_string(), true, true),
            (Cause::Activation, false, "Show".to_string(), false, false),
            (Cause::Activation, true, "Hide".to_string(), true, true),
        ]
    );
}

#[test]
fn test_completion_fires_once_per_transition() {
    let dom = MemDom::instant();
    let (toggler, _handle, _content) = fixture(&dom);
    let counter = Arc::new(AtomicUsize::new(0));
    let controller = bind(toggler, counting_options(&counter));

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    controller.toggle();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    controller.toggle();
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[test]
fn test_queued_transition_defers_housekeeping() {
    let dom = MemDom::new();
    let (toggler, handle, content) = fixture(&dom);
    let counter = Arc::new(AtomicUsize::new(0));
    let controller = bind(toggler.clone(), counting_options(&counter));

    controller.toggle();

    // In flight: the target and all housekeeping still read as shown.
    assert_eq!(dom.pending(), 1);
    assert_eq!(content.display(), Display::Block);
    assert_eq!(handle.text(), "Hide");
    assert!(toggler.has_class("active"));
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    assert!(dom.complete_next());

    assert_eq!(content.display(), Display::None);
    assert_eq!(handle.text(), "Show");
    assert!(!toggler.has_class("active"));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_activation_during_transition_rederives_state() {
    // Two activations before anything completes: both read the target as
    // still shown, so both enqueue the hiding transition. Nothing queues an
    // alternation on the controller's behalf.
    let dom = MemDom::new();
    let (toggler, _handle, content) = fixture(&dom);
    let counter = Arc::new(AtomicUsize::new(0));
    let controller = bind(toggler, counting_options(&counter));

    controller.toggle();
    controller.toggle();
    assert_eq!(dom.pending(), 2);

    dom.complete_all();

    assert_eq!(content.display(), Display::None);
    assert!(!controller.is_visible());
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

// =============================================================================
// Show/Hide Tests
// =============================================================================

#[test]
fn test_show_is_noop_on_visible_target() {
    let dom = MemDom::new();
    let (toggler, _handle, _content) = fixture(&dom);
    let counter = Arc::new(AtomicUsize::new(0));
    let controller = bind(toggler, counting_options(&counter));

    controller.show();

    assert_eq!(dom.pending(), 0);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_hide_is_noop_on_hidden_target() {
    let dom = MemDom::new();
    let (toggler, _handle, content) = fixture(&dom);
    content.set_display(Display::None);
    let counter = Arc::new(AtomicUsize::new(0));
    let controller = bind(toggler, counting_options(&counter));

    controller.hide();

    assert_eq!(dom.pending(), 0);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_hide_then_show_round_trip() {
    let dom = MemDom::instant();
    let (toggler, handle, content) = fixture(&dom);
    let controller = bind(toggler, ToggleOptions::new());

    controller.hide();
    assert_eq!(content.display(), Display::None);
    assert_eq!(handle.text(), "Show");

    controller.show();
    assert_eq!(content.display(), Display::Block);
    assert_eq!(handle.text(), "Hide");
}

#[test]
fn test_show_restores_non_default_display_mode() {
    // Sliding down brings back the display mode the target had before it was
    // collapsed, not a hardcoded one.
    let dom = MemDom::instant();
    let (toggler, _handle, content) = fixture(&dom);
    content.set_display(Display::Flex);
    let controller = bind(toggler, ToggleOptions::new());

    controller.hide();
    assert_eq!(content.display(), Display::None);

    controller.show();
    assert_eq!(content.display(), Display::Flex);
}

// =============================================================================
// Configuration-Driven Behavior Tests
// =============================================================================

#[test]
fn test_custom_labels_and_active_class() {
    let dom = MemDom::instant();
    let (toggler, handle, _content) = fixture(&dom);

    let controller = bind(
        toggler.clone(),
        ToggleOptions::new()
            .active_class("open")
            .show_label("Expand")
            .hide_label("Collapse"),
    );

    assert_eq!(handle.text(), "Collapse");
    assert!(toggler.has_class("open"));
    assert!(!toggler.has_class("active"));

    controller.toggle();
    assert_eq!(handle.text(), "Expand");
    assert!(!toggler.has_class("open"));
}

#[test]
fn test_no_handle_skips_label_sync() {
    let dom = MemDom::instant();
    let (toggler, handle, content) = fixture(&dom);
    let counter = Arc::new(AtomicUsize::new(0));

    let controller = bind(
        toggler.clone(),
        counting_options(&counter).no_handle(),
    );
    controller.toggle();

    // The span is never touched, but the toggler class and the callback
    // still track the transitions.
    assert_eq!(handle.text(), "More");
    assert!(!handle.has_class(HANDLE_ACTIVE_CLASS));
    assert_eq!(content.display(), Display::None);
    assert!(!toggler.has_class("active"));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_explicit_target_and_handle_override_lookups() {
    let dom = MemDom::instant();
    let (toggler, handle, content) = fixture(&dom);
    let drawer = dom.root().append("div").with_id("drawer");
    let label = dom.root().append("b").with_text("label");

    let controller = bind(
        toggler,
        ToggleOptions::new()
            .target(drawer.clone())
            .handle(label.clone()),
    );
    controller.toggle();

    assert_eq!(drawer.display(), Display::None);
    assert_eq!(label.text(), "Show");
    // The default lookups lose: sibling content and span stay untouched.
    assert_eq!(content.display(), Display::Block);
    assert_eq!(handle.text(), "More");
}

#[test]
fn test_attr_selected_target() {
    let dom = MemDom::instant();
    let drawer = dom.root().append("div").with_id("drawer");
    let toggler = dom
        .root()
        .append("a")
        .with_attr(TARGET_ATTR, "#drawer");

    let controller = bind(toggler, ToggleOptions::new());

    assert_eq!(controller.config().target.as_ref(), Some(&drawer));
    controller.toggle();
    assert_eq!(drawer.display(), Display::None);
}

#[test]
fn test_missing_target_makes_activations_noops() {
    // No attribute, no sibling content region: the binding still settles the
    // handle into the hidden state, then ignores activations.
    let dom = MemDom::new();
    let toggler = dom.root().append("a");
    let handle = toggler.append("span").with_text("More");
    let counter = Arc::new(AtomicUsize::new(0));

    let controller = bind(toggler.clone(), counting_options(&counter));

    assert!(controller.config().target.is_none());
    assert!(!controller.is_visible());
    assert_eq!(handle.text(), "Show");
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    controller.toggle();
    toggler.click();

    assert_eq!(dom.pending(), 0);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_controller_clones_share_binding() {
    let dom = MemDom::instant();
    let (toggler, _handle, content) = fixture(&dom);
    let controller = bind(toggler, ToggleOptions::new());

    let other = controller.clone();
    other.toggle();

    assert_eq!(content.display(), Display::None);
    assert!(!controller.is_visible());
    assert!(!other.is_visible());
}
