use std::sync::Arc;

/// Handler fired once per user-initiated activation of a toggler element.
pub type ActivateHandler = Arc<dyn Fn() + Send + Sync>;

/// Layout display mode of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    Inline,
    Flex,
    None,
}

impl Display {
    /// True if the element is removed from layout entirely.
    pub fn is_none(self) -> bool {
        matches!(self, Display::None)
    }
}

/// Reference to an element owned by the hosting DOM layer.
///
/// This is the contract the hosting environment supplies: presentation-state
/// queries, class and text mutation, attribute reads, tree lookup, and an
/// activation-event source. Handles behave like shared references into the
/// tree, so mutation takes `&self` and hosts provide interior mutability.
/// Elements are never created or released through this trait.
pub trait Element: Clone {
    /// Current layout display mode.
    fn display(&self) -> Display;

    /// Current opacity, from `0.0` (fully transparent) to `1.0`.
    fn opacity(&self) -> f32;

    /// Add a class. Adding a class the element already has is a no-op.
    fn add_class(&self, class: &str);

    /// Remove a class. Removing an absent class is a no-op.
    fn remove_class(&self, class: &str);

    /// Replace the element's text content.
    fn set_text(&self, text: &str);

    /// Read an attribute value.
    fn attr(&self, name: &str) -> Option<String>;

    /// The element's parent, if it has one.
    fn parent(&self) -> Option<Self>;

    /// First descendant matching `selector` (`#id`, `.class` or a tag name).
    fn find(&self, selector: &str) -> Option<Self>;

    /// First element in the whole document matching `selector`.
    fn query(&self, selector: &str) -> Option<Self>;

    /// Register a handler fired once per user-initiated activation (e.g. a
    /// click). Handlers stay registered for the element's lifetime.
    fn on_activate(&self, handler: ActivateHandler);
}
