//! In-memory DOM for tests and demos.
//!
//! `MemDom` holds a tree of elements carrying exactly the presentation facts
//! the toggle behavior reads and writes: display mode, opacity, classes, text
//! and attributes. Animation primitives enqueue into a pending list that the
//! owner pumps with [`MemDom::complete_next`]/[`MemDom::complete_all`], so a
//! test controls when a transition finishes; [`MemDom::instant`] completes
//! them inline instead. Nothing here lays out, paints or keeps time — this is
//! a hosting environment for the behavior, not a rendering engine.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::animation::{Animate, DoneFn, Speed};
use crate::dom::{ActivateHandler, Display, Element};

type NodeRef = Arc<RwLock<Node>>;

struct Node {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attrs: HashMap<String, String>,
    text: String,
    display: Display,
    /// Display mode restored by a slide-down after a slide-up.
    natural_display: Display,
    opacity: f32,
    parent: Weak<RwLock<Node>>,
    children: Vec<NodeRef>,
    handlers: Vec<ActivateHandler>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: BTreeSet::new(),
            attrs: HashMap::new(),
            text: String::new(),
            display: Display::Block,
            natural_display: Display::Block,
            opacity: 1.0,
            parent: Weak::new(),
            children: Vec::new(),
            handlers: Vec::new(),
        }
    }
}

/// Minimal selector forms the fallback lookups need.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    fn parse(selector: &str) -> Self {
        if let Some(id) = selector.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else if let Some(class) = selector.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else {
            Selector::Tag(selector.to_string())
        }
    }

    fn matches(&self, node: &Node) -> bool {
        match self {
            Selector::Id(id) => node.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => node.classes.contains(class),
            Selector::Tag(tag) => node.tag == *tag,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    SlideUp,
    SlideDown,
    FadeIn,
    FadeOut,
}

struct Pending {
    element: MemElement,
    op: Op,
    done: DoneFn,
}

struct DomShared {
    root: NodeRef,
    // Mutex, not RwLock: a pending entry holds a `FnOnce` completion, which
    // is `Send` but not `Sync`.
    pending: Mutex<Vec<Pending>>,
    instant: bool,
}

impl DomShared {
    fn lock_pending(&self) -> MutexGuard<'_, Vec<Pending>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// An in-memory document.
pub struct MemDom {
    shared: Arc<DomShared>,
}

impl MemDom {
    /// A document whose animations queue until pumped.
    pub fn new() -> Self {
        Self::with_mode(false)
    }

    /// A document whose animations complete inline, for scripted
    /// walkthroughs that don't care about in-flight states.
    pub fn instant() -> Self {
        Self::with_mode(true)
    }

    fn with_mode(instant: bool) -> Self {
        let root = Arc::new(RwLock::new(Node::new("root")));
        Self {
            shared: Arc::new(DomShared {
                root,
                pending: Mutex::new(Vec::new()),
                instant,
            }),
        }
    }

    /// The document root.
    pub fn root(&self) -> MemElement {
        MemElement {
            shared: Arc::clone(&self.shared),
            node: Arc::clone(&self.shared.root),
        }
    }

    /// First element in the document matching `selector`.
    pub fn get(&self, selector: &str) -> Option<MemElement> {
        self.root().query(selector)
    }

    /// Number of animations waiting to be pumped.
    pub fn pending(&self) -> usize {
        self.shared.lock_pending().len()
    }

    /// Complete the oldest pending animation: apply its end state, then run
    /// its completion callback. Returns `false` if nothing was pending.
    pub fn complete_next(&self) -> bool {
        let next = {
            let mut pending = self.shared.lock_pending();
            if pending.is_empty() {
                return false;
            }
            pending.remove(0)
        };
        log::trace!("completing {:?} on <{}>", next.op, next.element.tag());
        next.element.finish(next.op);
        (next.done)();
        true
    }

    /// Complete every pending animation in order, including any enqueued by
    /// completion callbacks while pumping.
    pub fn complete_all(&self) {
        while self.complete_next() {}
    }
}

impl Default for MemDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one element of a [`MemDom`]. Clones refer to the same element.
#[derive(Clone)]
pub struct MemElement {
    shared: Arc<DomShared>,
    node: NodeRef,
}

impl MemElement {
    fn read(&self) -> RwLockReadGuard<'_, Node> {
        self.node
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Node> {
        self.node
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a child element with the given tag.
    pub fn append(&self, tag: &str) -> MemElement {
        let child = Arc::new(RwLock::new(Node::new(tag)));
        let element = MemElement {
            shared: Arc::clone(&self.shared),
            node: Arc::clone(&child),
        };
        element.write().parent = Arc::downgrade(&self.node);
        self.write().children.push(child);
        element
    }

    // Builder-style setters for fixture construction.

    pub fn with_id(self, id: &str) -> Self {
        self.write().id = Some(id.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    // Direct state access, for presetting fixtures and asserting outcomes.

    pub fn tag(&self) -> String {
        self.read().tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.read().id.clone()
    }

    pub fn text(&self) -> String {
        self.read().text.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.read().classes.contains(class)
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.write().attrs.insert(name.to_string(), value.to_string());
    }

    /// Set the display mode directly, as markup/CSS would before binding.
    /// A non-`None` mode also becomes the mode slide-down restores.
    pub fn set_display(&self, display: Display) {
        let mut node = self.write();
        if !display.is_none() {
            node.natural_display = display;
        }
        node.display = display;
    }

    /// Set the opacity directly, as markup/CSS would before binding.
    pub fn set_opacity(&self, opacity: f32) {
        self.write().opacity = opacity;
    }

    /// Fire the element's activation handlers, as a user click would.
    pub fn click(&self) {
        // Clone the handler list out of the lock: a handler is free to touch
        // this element (or register another handler) while running.
        let handlers: Vec<ActivateHandler> = self.read().handlers.clone();
        for handler in handlers {
            handler();
        }
    }

    fn matches_selector(&self, selector: &Selector) -> bool {
        selector.matches(&self.read())
    }

    fn find_in(&self, selector: &Selector) -> Option<MemElement> {
        let children: Vec<NodeRef> = self.read().children.clone();
        for child in children {
            let element = MemElement {
                shared: Arc::clone(&self.shared),
                node: child,
            };
            if element.matches_selector(selector) {
                return Some(element);
            }
            if let Some(found) = element.find_in(selector) {
                return Some(found);
            }
        }
        None
    }

    /// Apply the end state of one animation primitive.
    fn finish(&self, op: Op) {
        let mut node = self.write();
        match op {
            Op::SlideUp => {
                if !node.display.is_none() {
                    node.natural_display = node.display;
                }
                node.display = Display::None;
            }
            Op::SlideDown => node.display = node.natural_display,
            Op::FadeIn => node.opacity = 1.0,
            Op::FadeOut => node.opacity = 0.0,
        }
    }

    fn animate(&self, op: Op, speed: Speed, done: DoneFn) {
        log::trace!("<{}> {:?} over {:?}", self.tag(), op, speed.duration());
        if self.shared.instant {
            self.finish(op);
            done();
            return;
        }
        self.shared.lock_pending().push(Pending {
            element: self.clone(),
            op,
            done,
        });
    }
}

impl Element for MemElement {
    fn display(&self) -> Display {
        self.read().display
    }

    fn opacity(&self) -> f32 {
        self.read().opacity
    }

    fn add_class(&self, class: &str) {
        self.write().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.write().classes.remove(class);
    }

    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.write().text);
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.read().attrs.get(name).cloned()
    }

    fn parent(&self) -> Option<Self> {
        let parent = self.read().parent.upgrade()?;
        Some(MemElement {
            shared: Arc::clone(&self.shared),
            node: parent,
        })
    }

    fn find(&self, selector: &str) -> Option<Self> {
        self.find_in(&Selector::parse(selector))
    }

    fn query(&self, selector: &str) -> Option<Self> {
        let selector = Selector::parse(selector);
        let root = MemElement {
            shared: Arc::clone(&self.shared),
            node: Arc::clone(&self.shared.root),
        };
        if root.matches_selector(&selector) {
            return Some(root);
        }
        root.find_in(&selector)
    }

    fn on_activate(&self, handler: ActivateHandler) {
        self.write().handlers.push(handler);
    }
}

impl Animate for MemElement {
    fn slide_up(&self, speed: Speed, done: DoneFn) {
        self.animate(Op::SlideUp, speed, done);
    }

    fn slide_down(&self, speed: Speed, done: DoneFn) {
        self.animate(Op::SlideDown, speed, done);
    }

    fn fade_in(&self, speed: Speed, done: DoneFn) {
        self.animate(Op::FadeIn, speed, done);
    }

    fn fade_out(&self, speed: Speed, done: DoneFn) {
        self.animate(Op::FadeOut, speed, done);
    }
}

impl PartialEq for MemElement {
    /// Handle identity: two handles are equal when they point at the same
    /// element.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for MemElement {}

impl fmt::Debug for MemElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.read();
        f.debug_struct("MemElement")
            .field("tag", &node.tag)
            .field("id", &node.id)
            .field("classes", &node.classes)
            .field("display", &node.display)
            .field("opacity", &node.opacity)
            .finish_non_exhaustive()
    }
}
