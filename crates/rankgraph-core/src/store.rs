//! The adjacency store: an arena of node slots and edge records linked by index, not by
//! `Rc`/`RefCell`. Chosen over a pair of per-node adjacency vectors because removal-by-pointer
//! must be O(1) once an edge has been located, and PageRank iteration wants dense, cache-local
//! access to out-edges.

use crate::error::{CoreError, Result};
use crate::node::{NodeSlot, NONE};
use edge::EdgeRecord;

use crate::edge;

/// Owns every node and edge record. Node indices are stable between calls to
/// [`AdjacencyStore::compact_nodes`]: deletion leaves a vacant slot rather than shifting later
/// nodes down, and edge records are freed onto a free list for reuse since edges carry no
/// externally observable identity of their own.
#[derive(Debug, Default)]
pub struct AdjacencyStore {
    nodes: Vec<NodeSlot>,
    edges: Vec<EdgeRecord>,
    free_edges: Vec<usize>,
    num_nodes: usize,
    num_edges: usize,
}

impl AdjacencyStore {
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity_hint),
            edges: Vec::new(),
            free_edges: Vec::new(),
            num_nodes: 0,
            num_edges: 0,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Size of the node table, including vacant slots. Equals `num_nodes()` once compacted.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_live(&self, id: usize) -> bool {
        self.nodes.get(id).is_some_and(NodeSlot::is_live)
    }

    pub fn get_node(&self, id: usize) -> Option<&NodeSlot> {
        self.nodes.get(id).filter(|n| n.live)
    }

    pub fn get_edge(&self, src: usize, dst: usize) -> Option<&EdgeRecord> {
        let ix = self.find_by_src(src, dst)?;
        Some(&self.edges[ix])
    }

    pub fn out_edges(&self, node_id: usize) -> OutEdges<'_> {
        let cur = self.nodes.get(node_id).map_or(NONE, |n| n.first_out_edge);
        OutEdges {
            edges: &self.edges,
            cur,
        }
    }

    pub fn in_edges(&self, node_id: usize) -> InEdges<'_> {
        let cur = self.nodes.get(node_id).map_or(NONE, |n| n.first_in_edge);
        InEdges {
            edges: &self.edges,
            cur,
        }
    }

    /// Appends a new live node, returning its index. Never reuses a vacated slot.
    pub fn add_node(&mut self) -> usize {
        let id = self.nodes.len();
        self.nodes.push(NodeSlot::new());
        self.num_nodes += 1;
        id
    }

    pub fn add_edge(&mut self, src: usize, dst: usize, weight: f64) -> Result<usize> {
        if !self.is_live(src) {
            return Err(CoreError::UnknownEndpoint { index: src });
        }
        if !self.is_live(dst) {
            return Err(CoreError::UnknownEndpoint { index: dst });
        }
        if self.find_by_src(src, dst).is_some() {
            return Err(CoreError::DuplicateEdge { src, dst });
        }

        let ix = self.alloc_edge(src, dst, weight);

        let old_out_head = self.nodes[src].first_out_edge;
        self.edges[ix].next_same_src = old_out_head;
        self.edges[ix].prev_same_src = NONE;
        if old_out_head != NONE {
            self.edges[old_out_head].prev_same_src = ix;
        }
        self.nodes[src].first_out_edge = ix;
        self.nodes[src].num_out_edges += 1;

        let old_in_head = self.nodes[dst].first_in_edge;
        self.edges[ix].next_same_dst = old_in_head;
        self.edges[ix].prev_same_dst = NONE;
        if old_in_head != NONE {
            self.edges[old_in_head].prev_same_dst = ix;
        }
        self.nodes[dst].first_in_edge = ix;
        self.nodes[dst].num_in_edges += 1;

        self.num_edges += 1;
        Ok(ix)
    }

    pub fn remove_edge(&mut self, src: usize, dst: usize) -> Result<()> {
        if !self.is_live(src) {
            return Err(CoreError::UnknownEndpoint { index: src });
        }
        if !self.is_live(dst) {
            return Err(CoreError::UnknownEndpoint { index: dst });
        }

        let out_deg = self.nodes[src].num_out_edges;
        let in_deg = self.nodes[dst].num_in_edges;
        let ix = if out_deg <= in_deg {
            self.find_by_src(src, dst)
        } else {
            self.find_by_dst(src, dst)
        }
        .ok_or(CoreError::EdgeNotFound { src, dst })?;

        self.unsplice_out(src, ix);
        self.unsplice_in(dst, ix);
        self.nodes[src].num_out_edges -= 1;
        self.nodes[dst].num_in_edges -= 1;
        self.free_edge(ix);
        self.num_edges -= 1;
        Ok(())
    }

    pub fn update_edge_weight(&mut self, src: usize, dst: usize, weight: f64) -> Result<()> {
        let ix = self
            .find_by_src(src, dst)
            .ok_or(CoreError::EdgeNotFound { src, dst })?;
        self.edges[ix].weight = weight;
        Ok(())
    }

    /// Removes `id` and every edge incident to it (in either direction), freeing each edge
    /// exactly once even for a self-loop.
    pub fn remove_node(&mut self, id: usize) -> Result<()> {
        if !self.is_live(id) {
            return Err(CoreError::NodeNotFound { id });
        }

        let mut incident = Vec::new();
        let mut cur = self.nodes[id].first_out_edge;
        while cur != NONE {
            incident.push(cur);
            cur = self.edges[cur].next_same_src;
        }
        let mut cur = self.nodes[id].first_in_edge;
        while cur != NONE {
            let next = self.edges[cur].next_same_dst;
            if self.edges[cur].src != id {
                incident.push(cur);
            }
            cur = next;
        }

        for ix in incident {
            let (src, dst) = (self.edges[ix].src, self.edges[ix].dst);
            if src != id {
                self.unsplice_out(src, ix);
                self.nodes[src].num_out_edges -= 1;
            }
            if dst != id {
                self.unsplice_in(dst, ix);
                self.nodes[dst].num_in_edges -= 1;
            }
            self.free_edge(ix);
            self.num_edges -= 1;
        }

        let slot = &mut self.nodes[id];
        slot.live = false;
        slot.first_out_edge = NONE;
        slot.first_in_edge = NONE;
        slot.num_out_edges = 0;
        slot.num_in_edges = 0;
        self.num_nodes -= 1;
        Ok(())
    }

    /// Rewrites the node table so live nodes occupy `0..num_nodes-1` in their relative order,
    /// and rewrites every edge's `src`/`dst`. Returns `None` (a no-op) if already contiguous,
    /// otherwise `Some(mapping)` where `mapping[old_id] = new_id` (`node::NONE` for a vacant
    /// slot that no longer exists).
    pub fn compact_nodes(&mut self) -> Option<Vec<usize>> {
        if self.num_nodes == self.nodes.len() {
            return None;
        }

        let mut mapping = vec![NONE; self.nodes.len()];
        let mut new_nodes = Vec::with_capacity(self.num_nodes);
        for (old_id, slot) in self.nodes.iter().enumerate() {
            if slot.live {
                mapping[old_id] = new_nodes.len();
                new_nodes.push(slot.clone());
            }
        }
        self.nodes = new_nodes;

        for edge in &mut self.edges {
            if edge.live {
                edge.src = mapping[edge.src];
                edge.dst = mapping[edge.dst];
            }
        }

        Some(mapping)
    }

    fn find_by_src(&self, src: usize, dst: usize) -> Option<usize> {
        let node = self.nodes.get(src).filter(|n| n.live)?;
        let mut cur = node.first_out_edge;
        while cur != NONE {
            let e = &self.edges[cur];
            if e.dst == dst {
                return Some(cur);
            }
            cur = e.next_same_src;
        }
        None
    }

    fn find_by_dst(&self, src: usize, dst: usize) -> Option<usize> {
        let node = self.nodes.get(dst).filter(|n| n.live)?;
        let mut cur = node.first_in_edge;
        while cur != NONE {
            let e = &self.edges[cur];
            if e.src == src {
                return Some(cur);
            }
            cur = e.next_same_dst;
        }
        None
    }

    fn alloc_edge(&mut self, src: usize, dst: usize, weight: f64) -> usize {
        if let Some(ix) = self.free_edges.pop() {
            self.edges[ix] = EdgeRecord::new(src, dst, weight);
            ix
        } else {
            let ix = self.edges.len();
            self.edges.push(EdgeRecord::new(src, dst, weight));
            ix
        }
    }

    fn free_edge(&mut self, ix: usize) {
        self.edges[ix].live = false;
        self.free_edges.push(ix);
    }

    fn unsplice_out(&mut self, node_id: usize, ix: usize) {
        let prev = self.edges[ix].prev_same_src;
        let next = self.edges[ix].next_same_src;
        if prev != NONE {
            self.edges[prev].next_same_src = next;
        } else {
            self.nodes[node_id].first_out_edge = next;
        }
        if next != NONE {
            self.edges[next].prev_same_src = prev;
        }
    }

    fn unsplice_in(&mut self, node_id: usize, ix: usize) {
        let prev = self.edges[ix].prev_same_dst;
        let next = self.edges[ix].next_same_dst;
        if prev != NONE {
            self.edges[prev].next_same_dst = next;
        } else {
            self.nodes[node_id].first_in_edge = next;
        }
        if next != NONE {
            self.edges[next].prev_same_dst = prev;
        }
    }
}

pub struct OutEdges<'a> {
    edges: &'a [EdgeRecord],
    cur: usize,
}

impl<'a> Iterator for OutEdges<'a> {
    type Item = &'a EdgeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == NONE {
            return None;
        }
        let e = &self.edges[self.cur];
        self.cur = e.next_same_src;
        Some(e)
    }
}

pub struct InEdges<'a> {
    edges: &'a [EdgeRecord],
    cur: usize,
}

impl<'a> Iterator for InEdges<'a> {
    type Item = &'a EdgeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == NONE {
            return None;
        }
        let e = &self.edges[self.cur];
        self.cur = e.next_same_dst;
        Some(e)
    }
}
