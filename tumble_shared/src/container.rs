//! UI container handles.
//!
//! The presentation layer hands each controller the container its control
//! was mounted into. Controllers only use it to publish small attribute
//! values (like `in-charge`) and to listen to the container's toggle input.
//! Cloning a container clones the handle, not the element.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::event::Observers;

/// What a container hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    AxisRings,
    ModeSwitch,
    DirectionalPad,
    FastDrop,
}

#[derive(Default)]
struct ToggleState {
    checked: bool,
    on_change: Observers<bool>,
}

/// Checkbox-like input inside a container.
#[derive(Clone, Default)]
pub struct ToggleInput {
    inner: Rc<RefCell<ToggleState>>,
}

impl ToggleInput {
    pub fn is_checked(&self) -> bool {
        self.inner.borrow().checked
    }

    /// Sets the checked state, notifying listeners when it changes.
    pub fn set_checked(&self, checked: bool) {
        let listeners = {
            let mut state = self.inner.borrow_mut();
            if state.checked == checked {
                return;
            }
            state.checked = checked;
            state.on_change.snapshot()
        };
        for listener in listeners {
            listener(&checked);
        }
    }

    pub fn on_change(&self, listener: impl Fn(&bool) + 'static) {
        self.inner.borrow_mut().on_change.subscribe(listener);
    }
}

/// Handle to a mounted control container.
#[derive(Clone)]
pub struct ControlContainer {
    kind: ContainerKind,
    attributes: Rc<RefCell<HashMap<String, String>>>,
    toggle: ToggleInput,
}

impl ControlContainer {
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            attributes: Rc::default(),
            toggle: ToggleInput::default(),
        }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn set_attribute(&self, key: &str, value: impl Into<String>) {
        self.attributes
            .borrow_mut()
            .insert(key.to_string(), value.into());
    }

    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes.borrow().get(key).cloned()
    }

    pub fn toggle(&self) -> &ToggleInput {
        &self.toggle
    }

    /// Whether two handles refer to the same container.
    pub fn ptr_eq(&self, other: &ControlContainer) -> bool {
        Rc::ptr_eq(&self.attributes, &other.attributes)
    }
}

impl std::fmt::Debug for ControlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlContainer")
            .field("kind", &self.kind)
            .field("attributes", &self.attributes.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn attributes_are_shared_between_handles() {
        let a = ControlContainer::new(ContainerKind::AxisRings);
        let b = a.clone();
        a.set_attribute("in-charge", "self");
        assert_eq!(b.attribute("in-charge").as_deref(), Some("self"));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&ControlContainer::new(ContainerKind::AxisRings)));
    }

    #[test]
    fn toggle_notifies_only_on_change() {
        let container = ControlContainer::new(ContainerKind::ModeSwitch);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        container.toggle().on_change(move |_| h.set(h.get() + 1));

        container.toggle().set_checked(true);
        container.toggle().set_checked(true);
        container.toggle().set_checked(false);
        assert_eq!(hits.get(), 2);
    }
}
