//! Topic requirement graph
//!
//! Directed "requires" edges between topic events, built once per query
//! scope from the records' requirement sets. Uses petgraph for the
//! adjacency. Queries return direct edges only; prerequisite chains are
//! never expanded transitively, so cycles are representable and need no
//! detection here.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use thiserror::Error;

use super::event::{Event, EventKind};
use super::id::EventId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown topic: {0}")]
    UnknownTopic(EventId),

    #[error("a topic cannot require itself: {0}")]
    SelfRequirement(EventId),
}

/// Requirement edges between the topics of one query scope
#[derive(Debug, Default)]
pub struct RequirementGraph {
    /// Edge direction: topic -> required topic
    graph: DiGraph<EventId, ()>,

    /// Map from topic id to node index
    node_map: HashMap<EventId, NodeIndex>,
}

impl RequirementGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds the graph from all topic events in the given scope.
    ///
    /// Non-topic events carry no edges of their own and are skipped, as
    /// are requirement entries pointing outside the scope.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut graph = Self::new();

        let topics: Vec<_> = events
            .into_iter()
            .filter(|event| event.kind == EventKind::Topic)
            .collect();

        for topic in &topics {
            graph.add_topic(topic.id);
        }

        for topic in &topics {
            for required in topic.requirements() {
                if *required != topic.id && graph.contains(*required) {
                    // both endpoints known, record the edge
                    let _ = graph.add_requirement(topic.id, *required);
                }
            }
        }

        graph
    }

    /// Adds a topic node
    pub fn add_topic(&mut self, id: EventId) {
        if !self.node_map.contains_key(&id) {
            let idx = self.graph.add_node(id);
            self.node_map.insert(id, idx);
        }
    }

    /// Adds a requirement edge: `topic` requires `required`
    pub fn add_requirement(&mut self, topic: EventId, required: EventId) -> Result<(), GraphError> {
        if topic == required {
            return Err(GraphError::SelfRequirement(topic));
        }

        let topic_idx = *self
            .node_map
            .get(&topic)
            .ok_or(GraphError::UnknownTopic(topic))?;
        let required_idx = *self
            .node_map
            .get(&required)
            .ok_or(GraphError::UnknownTopic(required))?;

        // update_edge keeps parallel inserts from duplicating the edge
        self.graph.update_edge(topic_idx, required_idx, ());
        Ok(())
    }

    /// Returns true if the topic requires at least one other topic
    pub fn has_requirements(&self, id: EventId) -> bool {
        !self.requirements_of(id).is_empty()
    }

    /// Returns true if at least one other topic requires this one
    pub fn has_dependents(&self, id: EventId) -> bool {
        !self.dependents_of(id).is_empty()
    }

    /// Directly required topics, never transitively expanded
    pub fn requirements_of(&self, id: EventId) -> Vec<EventId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Topics that directly require this one
    pub fn dependents_of(&self, id: EventId) -> Vec<EventId> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: EventId, direction: Direction) -> Vec<EventId> {
        let idx = match self.node_map.get(&id) {
            Some(idx) => *idx,
            None => return vec![],
        };

        let mut ids: Vec<EventId> = self
            .graph
            .neighbors_directed(idx, direction)
            .filter_map(|neighbor| self.graph.node_weight(neighbor).copied())
            .collect();
        ids.sort();
        ids
    }

    /// Returns true if the graph contains the topic
    pub fn contains(&self, id: EventId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Returns the number of topics in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph holds no topics
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// All topic ids in the graph
    pub fn topic_ids(&self) -> impl Iterator<Item = &EventId> {
        self.node_map.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: u32) -> Event {
        Event::new(EventId::new(id), EventKind::Topic, format!("Topic {}", id))
    }

    #[test]
    fn empty_graph() {
        let graph = RequirementGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(!graph.has_requirements(EventId::new(1)));
    }

    #[test]
    fn requirement_edge_is_visible_from_both_sides() {
        let mut a = topic(1);
        let b = topic(2);
        a.add_requirement(b.id).unwrap();

        let graph = RequirementGraph::from_events([&a, &b]);

        assert!(graph.has_requirements(a.id));
        assert!(graph.has_dependents(b.id));
        assert!(!graph.has_requirements(b.id));
        assert!(!graph.has_dependents(a.id));
        assert_eq!(graph.requirements_of(a.id), vec![b.id]);
        assert_eq!(graph.dependents_of(b.id), vec![a.id]);
    }

    #[test]
    fn queries_return_direct_edges_only() {
        // chain: a requires b, b requires c
        let mut a = topic(1);
        let mut b = topic(2);
        let c = topic(3);
        a.add_requirement(b.id).unwrap();
        b.add_requirement(c.id).unwrap();

        let graph = RequirementGraph::from_events([&a, &b, &c]);

        assert_eq!(graph.requirements_of(a.id), vec![b.id]);
        assert_eq!(graph.dependents_of(c.id), vec![b.id]);
    }

    #[test]
    fn cycles_are_representable() {
        let mut graph = RequirementGraph::new();
        let a = EventId::new(1);
        let b = EventId::new(2);
        graph.add_topic(a);
        graph.add_topic(b);

        graph.add_requirement(a, b).unwrap();
        graph.add_requirement(b, a).unwrap();

        // each edge stays an independent, flat fact
        assert_eq!(graph.requirements_of(a), vec![b]);
        assert_eq!(graph.requirements_of(b), vec![a]);
        assert_eq!(graph.dependents_of(a), vec![b]);
        assert_eq!(graph.dependents_of(b), vec![a]);
    }

    #[test]
    fn self_requirement_is_rejected() {
        let mut graph = RequirementGraph::new();
        let a = EventId::new(1);
        graph.add_topic(a);

        assert_eq!(
            graph.add_requirement(a, a),
            Err(GraphError::SelfRequirement(a))
        );
    }

    #[test]
    fn unknown_topic_is_rejected() {
        let mut graph = RequirementGraph::new();
        graph.add_topic(EventId::new(1));

        assert_eq!(
            graph.add_requirement(EventId::new(1), EventId::new(9)),
            Err(GraphError::UnknownTopic(EventId::new(9)))
        );
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut graph = RequirementGraph::new();
        let a = EventId::new(1);
        let b = EventId::new(2);
        graph.add_topic(a);
        graph.add_topic(b);

        graph.add_requirement(a, b).unwrap();
        graph.add_requirement(a, b).unwrap();

        assert_eq!(graph.requirements_of(a), vec![b]);
    }

    #[test]
    fn from_events_ignores_non_topics() {
        let a = topic(1);
        let single = Event::new(EventId::new(2), EventKind::SingleEvent, "Single");
        let mut date = Event::new(EventId::new(3), EventKind::Date, "Date");
        date.topic_ref = Some(a.id);

        let graph = RequirementGraph::from_events([&a, &single, &date]);

        assert_eq!(graph.len(), 1);
        assert!(graph.contains(a.id));
        assert!(!graph.contains(single.id));
        assert!(!graph.contains(date.id));
    }

    #[test]
    fn from_events_skips_edges_out_of_scope() {
        let mut a = topic(1);
        a.add_requirement(EventId::new(42)).unwrap();

        let graph = RequirementGraph::from_events([&a]);

        assert!(!graph.has_requirements(a.id));
    }

    #[test]
    fn requirements_of_multiple_targets_are_sorted() {
        let mut a = topic(1);
        let b = topic(2);
        let c = topic(3);
        a.add_requirement(c.id).unwrap();
        a.add_requirement(b.id).unwrap();

        let graph = RequirementGraph::from_events([&a, &b, &c]);

        assert_eq!(graph.requirements_of(a.id), vec![b.id, c.id]);
    }
}
