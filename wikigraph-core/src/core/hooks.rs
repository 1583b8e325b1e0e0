//! Hook registry for UI notifications raised by the graph engine.
//!
//! The rendering layer registers callbacks here; the engine calls them
//! without expecting a return value.

/// Callback invoked with the ID of the node the user selected.
pub type NodeSelectedHook = Box<dyn FnMut(&str) + Send>;

/// Registry for event hooks fired by [`GraphEngine`](super::engine::GraphEngine).
#[derive(Default)]
pub struct HookRegistry {
    node_selected: Vec<NodeSelectedHook>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("node_selected", &self.node_selected.len())
            .finish()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_node_selected(&mut self, hook: NodeSelectedHook) {
        self.node_selected.push(hook);
    }

    /// Calls every node-selection hook in registration order.
    pub fn fire_node_selected(&mut self, node_id: &str) {
        for hook in &mut self.node_selected {
            hook(node_id);
        }
    }

    pub fn node_selected_count(&self) -> usize {
        self.node_selected.len()
    }

    pub fn clear(&mut self) {
        self.node_selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_hooks_fire_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HookRegistry::new();
        for label in ["first", "second"] {
            let calls = Arc::clone(&calls);
            registry.on_node_selected(Box::new(move |id: &str| {
                calls.lock().unwrap().push(format!("{label}:{id}"));
            }));
        }
        registry.fire_node_selected("n1");
        assert_eq!(*calls.lock().unwrap(), vec!["first:n1", "second:n1"]);
    }

    #[test]
    fn test_clear_removes_hooks() {
        let mut registry = HookRegistry::new();
        registry.on_node_selected(Box::new(|_: &str| {}));
        assert_eq!(registry.node_selected_count(), 1);
        registry.clear();
        registry.fire_node_selected("ignored");
        assert_eq!(registry.node_selected_count(), 0);
    }
}
