//! Depth-first traversal over a parsed document tree.
//!
//! Only records and sequences are visited; scalar members are reachable
//! through their parent node. The `enter` hook decides per call whether the
//! walker descends into the current node, so a skip never outlives the call
//! that requested it.

use serde_json::Value;

/// How a node was reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge<'a> {
    /// The document root.
    Root,
    /// A record member, by key.
    Key(&'a str),
    /// A sequence element, by index.
    Index(usize),
}

impl<'a> Edge<'a> {
    /// Path segment contributed by this edge. The root contributes none.
    pub fn segment(&self) -> Option<String> {
        match self {
            Edge::Root => None,
            Edge::Key(key) => Some((*key).to_string()),
            Edge::Index(index) => Some(index.to_string()),
        }
    }

    /// Record key of this edge, if any.
    pub fn key(&self) -> Option<&'a str> {
        match *self {
            Edge::Key(key) => Some(key),
            Edge::Root | Edge::Index(_) => None,
        }
    }
}

/// Decision returned by [`Visitor::enter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    /// Descend into the node's children.
    #[default]
    Continue,
    /// Do not descend; `leave` is still called for the node.
    Skip,
}

/// Pre-order and post-order hooks. Both are optional.
pub trait Visitor<'a> {
    /// Called before the children of `node` are visited.
    fn enter(&mut self, _node: &'a Value, _parent: Option<&'a Value>, _edge: Edge<'a>) -> Flow {
        Flow::Continue
    }

    /// Called after the children of `node` were visited (or skipped).
    fn leave(&mut self, _node: &'a Value, _parent: Option<&'a Value>, _edge: Edge<'a>) {}
}

/// Walk `root` depth-first.
///
/// Record members are visited in the record's key order, sequence elements
/// in index order. The input must be a finite tree.
pub fn walk<'a, V>(root: &'a Value, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    visit(root, None, Edge::Root, visitor);
}

fn visit<'a, V>(node: &'a Value, parent: Option<&'a Value>, edge: Edge<'a>, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    if visitor.enter(node, parent, edge) == Flow::Continue {
        match node {
            Value::Object(members) => {
                for (key, child) in members {
                    if is_container(child) {
                        visit(child, Some(node), Edge::Key(key), visitor);
                    }
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    if is_container(child) {
                        visit(child, Some(node), Edge::Index(index), visitor);
                    }
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }

    visitor.leave(node, parent, edge);
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Records `enter:<segment>` / `leave:<segment>` events and skips nodes
    /// reached through one of `skip_keys`.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        skip_keys: Vec<&'static str>,
    }

    fn label(edge: Edge<'_>) -> String {
        edge.segment().unwrap_or_else(|| "<root>".to_string())
    }

    impl<'a> Visitor<'a> for Recorder {
        fn enter(&mut self, _node: &'a Value, _parent: Option<&'a Value>, edge: Edge<'a>) -> Flow {
            self.events.push(format!("enter:{}", label(edge)));
            match edge.key() {
                Some(key) if self.skip_keys.iter().any(|k| *k == key) => Flow::Skip,
                _ => Flow::Continue,
            }
        }

        fn leave(&mut self, _node: &'a Value, _parent: Option<&'a Value>, edge: Edge<'a>) {
            self.events.push(format!("leave:{}", label(edge)));
        }
    }

    #[test]
    fn test_visits_containers_depth_first() {
        let doc = json!({
            "a": { "b": { "c": 1 } },
            "list": [ { "x": true }, 3, [ {} ] ],
            "scalar": "ignored"
        });

        let mut recorder = Recorder::default();
        walk(&doc, &mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "enter:<root>",
                "enter:a",
                "enter:b",
                "leave:b",
                "leave:a",
                "enter:list",
                "enter:0",
                "leave:0",
                "enter:2",
                "enter:0",
                "leave:0",
                "leave:2",
                "leave:list",
                "leave:<root>",
            ]
        );
    }

    #[test]
    fn test_skip_prevents_descent_but_still_leaves() {
        let doc = json!({
            "skipped": { "inner": { "deep": {} } },
            "sibling": { "inner": {} }
        });

        let mut recorder = Recorder {
            skip_keys: vec!["skipped"],
            ..Recorder::default()
        };
        walk(&doc, &mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "enter:<root>",
                "enter:skipped",
                "leave:skipped",
                "enter:sibling",
                "enter:inner",
                "leave:inner",
                "leave:sibling",
                "leave:<root>",
            ]
        );
    }

    #[test]
    fn test_nested_skip_does_not_leak_into_parent_siblings() {
        let doc = json!({
            "outer": { "skip_me": { "hidden": {} }, "after": { "seen": {} } },
            "next": { "seen": {} }
        });

        let mut recorder = Recorder {
            skip_keys: vec!["skip_me"],
            ..Recorder::default()
        };
        walk(&doc, &mut recorder);

        assert!(!recorder.events.contains(&"enter:hidden".to_string()));
        let seen = recorder
            .events
            .iter()
            .filter(|e| e.as_str() == "enter:seen")
            .count();
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_parent_is_reported() {
        struct ParentCheck {
            checked: usize,
        }

        impl<'a> Visitor<'a> for ParentCheck {
            fn enter(&mut self, node: &'a Value, parent: Option<&'a Value>, edge: Edge<'a>) -> Flow {
                match edge {
                    Edge::Root => assert!(parent.is_none()),
                    Edge::Key(key) => {
                        assert_eq!(parent.and_then(|p| p.get(key)), Some(node));
                        self.checked += 1;
                    }
                    Edge::Index(index) => {
                        assert_eq!(parent.and_then(|p| p.get(index)), Some(node));
                        self.checked += 1;
                    }
                }
                Flow::Continue
            }
        }

        let doc = json!({ "a": [ { "b": {} } ] });
        let mut check = ParentCheck { checked: 0 };
        walk(&doc, &mut check);
        assert_eq!(check.checked, 3);
    }

    #[test]
    fn test_skipping_root_visits_nothing_else() {
        struct SkipAll {
            entered: usize,
            left: usize,
        }

        impl<'a> Visitor<'a> for SkipAll {
            fn enter(&mut self, _: &'a Value, _: Option<&'a Value>, _: Edge<'a>) -> Flow {
                self.entered += 1;
                Flow::Skip
            }

            fn leave(&mut self, _: &'a Value, _: Option<&'a Value>, _: Edge<'a>) {
                self.left += 1;
            }
        }

        let doc = json!({ "a": { "b": {} } });
        let mut visitor = SkipAll { entered: 0, left: 0 };
        walk(&doc, &mut visitor);
        assert_eq!((visitor.entered, visitor.left), (1, 1));
    }
}
