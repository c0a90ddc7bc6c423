use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CharSet, GenerateError, GenerateErrorKind, Result};

/// A node of an automaton.
///
/// The transitions are tried in the order they are declared. The first one whose character set
/// contains the lookahead is taken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// The node id. The start node has id 0.
    pub id: usize,
    /// The outgoing transitions as pairs of character set and destination node id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transitions: Vec<(CharSet, usize)>,
}

/// A deterministic finite automaton as handed over by the grammar compiler.
///
/// The accepting map assigns a final value to each accepting node. How the final value is
/// interpreted depends on the role of the automaton, see [`crate::Definition`] and
/// [`crate::Comment`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Automaton {
    /// The nodes in emission order.
    pub nodes: Vec<Node>,
    /// Maps accepting node ids to their final value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accepting: FxHashMap<usize, usize>,
}

impl Automaton {
    /// Creates an empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node without transitions. Adding an existing node has no effect.
    pub fn node(mut self, id: usize) -> Self {
        if self.find_node(id).is_none() {
            self.nodes.push(Node {
                id,
                transitions: Vec::new(),
            });
        }
        self
    }

    /// Appends a transition to the node `from`, which is added if necessary.
    pub fn transition(mut self, from: usize, chars: CharSet, to: usize) -> Self {
        let index = match self.nodes.iter().position(|n| n.id == from) {
            Some(index) => index,
            None => {
                self.nodes.push(Node {
                    id: from,
                    transitions: Vec::new(),
                });
                self.nodes.len() - 1
            }
        };
        self.nodes[index].transitions.push((chars, to));
        self
    }

    /// Marks the node as accepting with the given final value. The node is added if necessary.
    pub fn accept(mut self, node: usize, value: usize) -> Self {
        self = self.node(node);
        self.accepting.insert(node, value);
        self
    }

    /// Returns the node with the given id.
    pub fn find_node(&self, id: usize) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns the final value of the node if it is accepting.
    #[inline]
    pub fn final_value(&self, id: usize) -> Option<usize> {
        self.accepting.get(&id).copied()
    }

    /// Checks the structure of the automaton: the start node exists, node ids are unique, and
    /// transitions and accepting entries only refer to existing nodes. The start node must not
    /// be accepting, otherwise a scan step could end without consuming anything.
    /// The final values are checked by the caller which knows how to interpret them.
    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        trace!("Validating {} automaton with {} nodes", name, self.nodes.len());
        let mut ids = FxHashSet::default();
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(GenerateError::new(GenerateErrorKind::DuplicateNode {
                    automaton: name.to_string(),
                    node: node.id,
                }));
            }
        }
        if !ids.contains(&0) {
            return Err(GenerateError::new(GenerateErrorKind::MissingStartNode {
                automaton: name.to_string(),
            }));
        }
        for node in &self.nodes {
            if let Some((_, to)) = node.transitions.iter().find(|(_, to)| !ids.contains(to)) {
                return Err(GenerateError::new(GenerateErrorKind::UnknownDestination {
                    automaton: name.to_string(),
                    from: node.id,
                    to: *to,
                }));
            }
        }
        // Report the smallest offending node for deterministic messages.
        if let Some(node) = self
            .accepting
            .keys()
            .filter(|id| !ids.contains(id))
            .min()
        {
            return Err(GenerateError::new(GenerateErrorKind::UnknownAcceptingNode {
                automaton: name.to_string(),
                node: *node,
            }));
        }
        if self.accepting.contains_key(&0) {
            return Err(GenerateError::new(GenerateErrorKind::AcceptingStartNode {
                automaton: name.to_string(),
            }));
        }
        Ok(())
    }
}
