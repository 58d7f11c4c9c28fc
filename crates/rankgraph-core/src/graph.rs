//! `Graph`: the name-keyed facade over [`AdjacencyStore`] and [`NameRegistry`]. Attribute
//! storage lives here, not in the store — the store and the PageRank kernel only ever see
//! indices and edge weights.

use crate::attr::{AttrMap, AttrValue};
use crate::error::{CoreError, Result};
use crate::pagerank::{self, Config, Outcome};
use crate::registry::NameRegistry;
use crate::store::AdjacencyStore;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct Graph {
    store: AdjacencyStore,
    names: NameRegistry,
    node_attrs: FxHashMap<String, AttrMap>,
    edge_attrs: FxHashMap<(String, String), AttrMap>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            store: AdjacencyStore::with_capacity(capacity_hint),
            ..Self::default()
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.store.num_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.store.num_edges()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn contains_edge(&self, src: &str, dst: &str) -> bool {
        let (Some(s), Some(d)) = (self.names.index_of(src), self.names.index_of(dst)) else {
            return false;
        };
        self.store.get_edge(s, d).is_some()
    }

    pub fn edge_weight(&self, src: &str, dst: &str) -> Result<f64> {
        let s = self
            .names
            .index_of(src)
            .ok_or_else(|| CoreError::NodeMissing {
                name: src.to_string(),
            })?;
        let d = self
            .names
            .index_of(dst)
            .ok_or_else(|| CoreError::NodeMissing {
                name: dst.to_string(),
            })?;
        self.store
            .get_edge(s, d)
            .map(|e| e.weight())
            .ok_or_else(|| CoreError::EdgeMissing {
                src: src.to_string(),
                dst: dst.to_string(),
            })
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.names.names()
    }

    pub fn add_node(&mut self, name: &str) -> Result<()> {
        self.add_node_with_attrs(name, AttrMap::default())
    }

    pub fn add_node_with_attrs(&mut self, name: &str, attrs: AttrMap) -> Result<()> {
        if self.names.contains(name) {
            return Err(CoreError::NodeExists {
                name: name.to_string(),
            });
        }
        let ix = self.store.add_node();
        self.names.insert(name, ix);
        self.node_attrs.insert(name.to_string(), attrs);
        Ok(())
    }

    pub fn node_attrs(&self, name: &str) -> Result<&AttrMap> {
        self.node_attrs
            .get(name)
            .ok_or_else(|| CoreError::NodeMissing {
                name: name.to_string(),
            })
    }

    pub fn remove_node(&mut self, name: &str) -> Result<()> {
        let ix = self
            .names
            .index_of(name)
            .ok_or_else(|| CoreError::NodeMissing {
                name: name.to_string(),
            })?;

        let incident_dsts: Vec<String> = self
            .store
            .out_edges(ix)
            .filter_map(|e| self.names.name_of(e.dst()).map(str::to_string))
            .collect();
        let incident_srcs: Vec<String> = self
            .store
            .in_edges(ix)
            .filter_map(|e| self.names.name_of(e.src()).map(str::to_string))
            .collect();

        self.store.remove_node(ix)?;
        self.names.remove_index(ix);
        self.node_attrs.remove(name);
        for dst in incident_dsts {
            self.names.unmark_edge_present(name, &dst);
            self.edge_attrs.remove(&(name.to_string(), dst));
        }
        for src in incident_srcs {
            self.names.unmark_edge_present(&src, name);
            self.edge_attrs.remove(&(src, name.to_string()));
        }
        Ok(())
    }

    pub fn add_edge(&mut self, src: &str, dst: &str, weight: f64) -> Result<()> {
        self.add_edge_with_attrs(src, dst, weight, AttrMap::default())
    }

    pub fn add_edge_with_attrs(
        &mut self,
        src: &str,
        dst: &str,
        weight: f64,
        attrs: AttrMap,
    ) -> Result<()> {
        if self.names.edge_present(src, dst) {
            return Err(CoreError::EdgeExists {
                src: src.to_string(),
                dst: dst.to_string(),
            });
        }
        let s = self
            .names
            .index_of(src)
            .ok_or_else(|| CoreError::NodeMissing {
                name: src.to_string(),
            })?;
        let d = self
            .names
            .index_of(dst)
            .ok_or_else(|| CoreError::NodeMissing {
                name: dst.to_string(),
            })?;
        match self.store.add_edge(s, d, weight) {
            Ok(_) => {}
            Err(CoreError::DuplicateEdge { .. }) => {
                return Err(CoreError::EdgeExists {
                    src: src.to_string(),
                    dst: dst.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
        self.names.mark_edge_present(src, dst);
        self.edge_attrs
            .insert((src.to_string(), dst.to_string()), attrs);
        Ok(())
    }

    pub fn update_edge(&mut self, src: &str, dst: &str, weight: f64) -> Result<()> {
        let s = self
            .names
            .index_of(src)
            .ok_or_else(|| CoreError::NodeMissing {
                name: src.to_string(),
            })?;
        let d = self
            .names
            .index_of(dst)
            .ok_or_else(|| CoreError::NodeMissing {
                name: dst.to_string(),
            })?;
        self.store
            .update_edge_weight(s, d, weight)
            .map_err(|_| CoreError::EdgeMissing {
                src: src.to_string(),
                dst: dst.to_string(),
            })
    }

    pub fn remove_edge(&mut self, src: &str, dst: &str) -> Result<()> {
        let s = self
            .names
            .index_of(src)
            .ok_or_else(|| CoreError::NodeMissing {
                name: src.to_string(),
            })?;
        let d = self
            .names
            .index_of(dst)
            .ok_or_else(|| CoreError::NodeMissing {
                name: dst.to_string(),
            })?;
        self.store
            .remove_edge(s, d)
            .map_err(|_| CoreError::EdgeMissing {
                src: src.to_string(),
                dst: dst.to_string(),
            })?;
        self.names.unmark_edge_present(src, dst);
        self.edge_attrs
            .remove(&(src.to_string(), dst.to_string()));
        Ok(())
    }

    pub fn edge_attrs(&self, src: &str, dst: &str) -> Result<&AttrMap> {
        self.edge_attrs
            .get(&(src.to_string(), dst.to_string()))
            .ok_or_else(|| CoreError::EdgeMissing {
                src: src.to_string(),
                dst: dst.to_string(),
            })
    }

    pub fn out_neighbors(&self, name: &str) -> Result<Vec<&str>> {
        let ix = self
            .names
            .index_of(name)
            .ok_or_else(|| CoreError::NodeMissing {
                name: name.to_string(),
            })?;
        Ok(self
            .store
            .out_edges(ix)
            .filter_map(|e| self.names.name_of(e.dst()))
            .collect())
    }

    pub fn in_neighbors(&self, name: &str) -> Result<Vec<&str>> {
        let ix = self
            .names
            .index_of(name)
            .ok_or_else(|| CoreError::NodeMissing {
                name: name.to_string(),
            })?;
        Ok(self
            .store
            .in_edges(ix)
            .filter_map(|e| self.names.name_of(e.src()))
            .collect())
    }

    /// Drops vacant node slots and renumbers the adjacency store in place. A no-op if no node
    /// has ever been removed.
    pub fn compact_nodes(&mut self) {
        if let Some(mapping) = self.store.compact_nodes() {
            self.names.remap(&mapping);
        }
    }

    pub fn store(&self) -> &AdjacencyStore {
        &self.store
    }

    /// Runs PageRank and returns scores keyed by node name rather than raw index, skipping
    /// vacant slots. `personalization`, `init_score`, and `dangling_weight`, if given, are
    /// name-keyed maps; any name absent from a given map defaults to weight zero. Omitting
    /// `dangling_weight` entirely (`None`) makes the kernel reuse `personalization` for dangling
    /// redistribution instead.
    pub fn run_pagerank(
        &self,
        damping: f64,
        tolerance: f64,
        max_iterations: usize,
        personalization: Option<&FxHashMap<String, f64>>,
        init_score: Option<&FxHashMap<String, f64>>,
        dangling_weight: Option<&FxHashMap<String, f64>>,
    ) -> Result<(FxHashMap<String, f64>, bool, usize)> {
        let slots = self.store.slot_count();

        let personalization = personalization
            .map(|map| self.dense_vectors_for(map, 0.0))
            .transpose()?;
        let init_score = init_score
            .map(|map| self.dense_vectors_for(map, 0.0))
            .transpose()?;
        let dangling_weight = dangling_weight
            .map(|map| self.dense_vectors_for(map, 0.0))
            .transpose()?;

        let config = Config {
            damping,
            tolerance,
            max_iterations,
            personalization,
            init_score,
            dangling_weight,
        };

        let Outcome {
            scores,
            iterations,
            converged,
        } = pagerank::run(&self.store, &config)?;

        let mut by_name = FxHashMap::default();
        for ix in 0..slots {
            if let Some(name) = self.names.name_of(ix) {
                by_name.insert(name.to_string(), scores[ix]);
            }
        }
        Ok((by_name, converged, iterations))
    }

    /// Expands a name-keyed sparse map into a dense per-slot vector, filling absent live names
    /// with `default_for_missing` and vacant slots with `0.0`.
    fn dense_vectors_for(
        &self,
        sparse: &FxHashMap<String, f64>,
        default_for_missing: f64,
    ) -> Result<Vec<f64>> {
        let slots = self.store.slot_count();
        let mut dense = vec![0.0; slots];
        for ix in 0..slots {
            let Some(name) = self.names.name_of(ix) else {
                continue;
            };
            dense[ix] = match sparse.get(name) {
                Some(&v) => v,
                None => default_for_missing,
            };
        }
        for (name, _) in sparse {
            if !self.names.contains(name) {
                return Err(CoreError::NodeMissing {
                    name: name.to_string(),
                });
            }
        }
        Ok(dense)
    }

    pub fn set_node_attr(&mut self, name: &str, key: &str, value: AttrValue) -> Result<()> {
        let attrs = self
            .node_attrs
            .get_mut(name)
            .ok_or_else(|| CoreError::NodeMissing {
                name: name.to_string(),
            })?;
        attrs.insert(key.to_string(), value);
        Ok(())
    }
}
