//! Undirected, unweighted proximity graphs and their summary statistics.

use serde::Serialize;

/// Undirected graph over vertices `0..n`, stored as sorted adjacency lists.
///
/// Edges are symmetric and never self-loops: `j` is in `neighbors(i)` iff
/// `i` is in `neighbors(j)`, and `i` is never in `neighbors(i)`.
///
/// Graphs are produced by [`crate::GraphBuilder`]; there is no public way
/// to mutate one, so the invariants above hold for every value of this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProximityGraph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl ProximityGraph {
    /// Build from unordered pairs `(i, j)` with `i < j < n`.
    ///
    /// Each pair must appear at most once.
    pub(crate) fn from_pairs<I>(n: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut adjacency = vec![Vec::new(); n];
        let mut edge_count = 0;
        for (i, j) in pairs {
            debug_assert!(i < j && j < n, "bad pair ({i}, {j}) for {n} vertices");
            adjacency[i].push(j);
            adjacency[j].push(i);
            edge_count += 1;
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }
        Self {
            adjacency,
            edge_count,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// True when the graph has no edges.
    #[inline]
    pub fn is_edgeless(&self) -> bool {
        self.edge_count == 0
    }

    /// Sorted neighbours of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v >= self.vertex_count()`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    /// Number of neighbours of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Whether `i` and `j` are adjacent. Out-of-range indices are not.
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency
            .get(i)
            .is_some_and(|list| list.binary_search(&j).is_ok())
    }

    /// Edges as `(i, j)` with `i < j`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(i, list)| {
            // Lists are sorted, so neighbours above `i` form a suffix.
            let start = list.partition_point(|&j| j < i);
            list[start..].iter().map(move |&j| (i, j))
        })
    }

    /// Connected-component label for each vertex.
    ///
    /// Labels are dense (`0..component_count`) and assigned in order of
    /// each component's smallest vertex.
    pub fn component_labels(&self) -> Vec<usize> {
        let n = self.vertex_count();
        let mut uf = UnionFind::new(n);
        for (i, j) in self.edges() {
            uf.union(i, j);
        }

        let mut root_label = vec![usize::MAX; n];
        let mut labels = vec![0; n];
        let mut next = 0;
        for (v, label) in labels.iter_mut().enumerate() {
            let root = uf.find(v);
            if root_label[root] == usize::MAX {
                root_label[root] = next;
                next += 1;
            }
            *label = root_label[root];
        }
        labels
    }

    /// Number of connected components (isolated vertices count as one each).
    pub fn component_count(&self) -> usize {
        self.component_labels().into_iter().max().map_or(0, |m| m + 1)
    }
}

// ── Union-Find ──────────────────────────────────────────────────────────────

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // path halving
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
    }
}

/// Structural summary of a [`ProximityGraph`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphStats {
    /// Vertices.
    pub vertices: usize,
    /// Undirected edges.
    pub edges: usize,
    /// Smallest degree.
    pub min_degree: usize,
    /// Largest degree.
    pub max_degree: usize,
    /// Mean degree, `2E / V`.
    pub mean_degree: f64,
    /// Connected components.
    pub components: usize,
    /// Size of the largest component.
    pub largest_component: usize,
    /// Vertices with degree zero.
    pub isolated: usize,
}

impl GraphStats {
    /// Summarize `graph`.
    pub fn of(graph: &ProximityGraph) -> Self {
        let vertices = graph.vertex_count();
        let degrees = (0..vertices).map(|v| graph.degree(v));

        let labels = graph.component_labels();
        let components = labels.iter().max().map_or(0, |m| m + 1);
        let mut sizes = vec![0usize; components];
        for &l in &labels {
            sizes[l] += 1;
        }

        Self {
            vertices,
            edges: graph.edge_count(),
            min_degree: degrees.clone().min().unwrap_or(0),
            max_degree: degrees.clone().max().unwrap_or(0),
            mean_degree: if vertices == 0 {
                0.0
            } else {
                2.0 * graph.edge_count() as f64 / vertices as f64
            },
            components,
            largest_component: sizes.into_iter().max().unwrap_or(0),
            isolated: degrees.filter(|&d| d == 0).count(),
        }
    }
}
