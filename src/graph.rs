pub mod error;
pub mod orientation;

pub use self::error::*;
pub use self::orientation::*;

use bstr::{BStr, BString, ByteSlice};
use fnv::FnvHashMap;
use log::trace;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::overlap::{EdgeDesc, Overlap};
use crate::params::GraphParams;

/// Handle to a vertex in a `StringGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct VertexId(pub usize);

/// Handle to an edge in a `StringGraph`. Stays valid until the edge
/// (or its twin) is removed; IDs are not reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct EdgeId(pub usize);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    name: BString,
    seq: BString,
    edges: [Vec<EdgeId>; 2],
}

impl Vertex {
    pub fn name(&self) -> &BStr {
        self.name.as_bstr()
    }

    pub fn seq(&self) -> &[u8] {
        self.seq.as_slice()
    }

    pub fn seq_len(&self) -> usize {
        self.seq.len()
    }

    /// IDs of the edges leaving this vertex in the given direction, in
    /// insertion order.
    pub fn edge_ids(&self, dir: Direction) -> &[EdgeId] {
        &self.edges[dir.index()]
    }

    pub fn degree(&self) -> usize {
        self.edges[0].len() + self.edges[1].len()
    }
}

/// One half of an edge pair. The twin runs from `end` back to
/// `start` and carries the swapped overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    start: VertexId,
    end: VertexId,
    dir: Direction,
    orient: Orientation,
    overlap: Overlap,
    twin: EdgeId,
}

impl Edge {
    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn end(&self) -> VertexId {
        self.end
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn orient(&self) -> Orientation {
        self.orient
    }

    /// The overlap as seen from `start`, i.e. `ids[0] == start`.
    pub fn overlap(&self) -> &Overlap {
        &self.overlap
    }

    pub fn twin(&self) -> EdgeId {
        self.twin
    }

    pub fn desc(&self) -> EdgeDesc {
        EdgeDesc::new(self.end, self.dir, self.orient)
    }
}

/// A string graph: vertices are sequences, edges are the overlaps
/// between them. Vertices and edges live in arenas owned by the graph
/// and are referred to by `VertexId` and `EdgeId`.
#[derive(Debug, Clone, Default)]
pub struct StringGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Option<Edge>>,
    names: FnvHashMap<BString, VertexId>,
    params: GraphParams,
}

impl StringGraph {
    pub fn new(params: GraphParams) -> Self {
        StringGraph {
            params,
            ..Default::default()
        }
    }

    pub fn params(&self) -> &GraphParams {
        &self.params
    }

    pub fn set_params(&mut self, params: GraphParams) {
        self.params = params;
    }

    pub fn add_vertex<N, S>(&mut self, name: N, seq: S) -> GraphResult<VertexId>
    where
        N: AsRef<[u8]>,
        S: AsRef<[u8]>,
    {
        let name = BString::from(name.as_ref());
        if self.names.contains_key(&name) {
            return Err(GraphError::DuplicateVertex(name.to_string()));
        }
        let id = VertexId(self.vertices.len());
        self.names.insert(name.clone(), id);
        self.vertices.push(Vertex {
            name,
            seq: BString::from(seq.as_ref()),
            edges: [Vec::new(), Vec::new()],
        });
        Ok(id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    pub fn vertex_by_name<N: AsRef<[u8]>>(&self, name: N) -> Option<VertexId> {
        self.names.get(&BString::from(name.as_ref())).copied()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The sequence of a vertex. Panics if the ID is not from this
    /// graph, like slice indexing.
    pub fn seq(&self, id: VertexId) -> &[u8] {
        self.vertices[id.0].seq()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(|e| e.as_ref())
    }

    /// Number of live edges, counting each twin separately.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// Edges leaving `v` in direction `dir`.
    pub fn edges_of(
        &self,
        v: VertexId,
        dir: Direction,
    ) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.vertices
            .get(v.0)
            .map(|vx| vx.edge_ids(dir))
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&id| self.edge(id).map(|e| (id, e)))
    }

    /// Every edge leaving `v`, left edges first.
    pub fn all_edges_of(
        &self,
        v: VertexId,
    ) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges_of(v, Direction::Left)
            .chain(self.edges_of(v, Direction::Right))
    }

    pub fn find_edge(&self, v: VertexId, desc: &EdgeDesc) -> Option<EdgeId> {
        self.edges_of(v, desc.dir)
            .find(|(_, e)| e.desc() == *desc)
            .map(|(id, _)| id)
    }

    fn check_overlap_side(&self, ovr: &Overlap, i: usize) -> GraphResult<()> {
        let v = ovr.ids[i];
        let vx = self.vertex(v).ok_or(GraphError::UnknownVertex(v))?;
        let coord = &ovr.m.coord[i];
        if !coord.is_valid() || coord.seq_len != vx.seq_len() {
            return Err(GraphError::CoordinateOutOfRange(v));
        }
        Ok(())
    }

    /// Create the edge pair induced by `ovr`, returning the ID of the
    /// edge that starts at `ovr.ids[0]`.
    pub fn create_edges(&mut self, ovr: Overlap) -> GraphResult<EdgeId> {
        let [x, y] = ovr.ids;
        if x == y {
            return Err(GraphError::SelfOverlap(x));
        }
        self.check_overlap_side(&ovr, 0)?;
        self.check_overlap_side(&ovr, 1)?;

        let twin_ovr = ovr.swapped();
        let ed_xy = ovr.edge_desc();
        let ed_yx = twin_ovr.edge_desc();
        if self.find_edge(x, &ed_xy).is_some() {
            return Err(GraphError::DuplicateEdge(x, ed_xy));
        }
        if self.find_edge(y, &ed_yx).is_some() {
            return Err(GraphError::DuplicateEdge(y, ed_yx));
        }

        let id_xy = EdgeId(self.edges.len());
        let id_yx = EdgeId(self.edges.len() + 1);

        self.edges.push(Some(Edge {
            start: x,
            end: y,
            dir: ed_xy.dir,
            orient: ed_xy.orient,
            overlap: ovr,
            twin: id_yx,
        }));
        self.edges.push(Some(Edge {
            start: y,
            end: x,
            dir: ed_yx.dir,
            orient: ed_yx.orient,
            overlap: twin_ovr,
            twin: id_xy,
        }));

        self.vertices[x.0].edges[ed_xy.dir.index()].push(id_xy);
        self.vertices[y.0].edges[ed_yx.dir.index()].push(id_yx);

        trace!("created edge {} {} -> {}", id_xy, x, ed_xy);
        Ok(id_xy)
    }

    fn detach(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.get_mut(id.0)?.take()?;
        self.vertices[edge.start.0].edges[edge.dir.index()]
            .retain(|&e| e != id);
        Some(edge)
    }

    /// Remove an edge together with its twin.
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        let edge = self.detach(id).ok_or(GraphError::UnknownEdge(id))?;
        self.detach(edge.twin)
            .ok_or(GraphError::BrokenTwin(id))?;
        trace!("removed edge {} {} -> {}", id, edge.start, edge.desc());
        Ok(())
    }

    /// Check the structural invariants: every edge is listed under its
    /// start and direction, has a twin that points back with the
    /// swapped overlap, fits the sequences it joins, agrees with any
    /// difference count it carries, and no vertex has two edges with
    /// the same descriptor.
    pub fn validate(&self) -> GraphResult<()> {
        for v in self.vertex_ids() {
            let mut seen = fnv::FnvHashSet::default();
            for (id, edge) in self.all_edges_of(v) {
                if edge.start != v || edge.overlap.ids[0] != v {
                    return Err(GraphError::BrokenTwin(id));
                }
                if !seen.insert(edge.desc()) {
                    return Err(GraphError::DuplicateEdge(v, edge.desc()));
                }
                self.check_overlap_side(&edge.overlap, 0)?;
                self.check_overlap_side(&edge.overlap, 1)?;

                if let Some(recorded) = edge.overlap.m.num_diffs {
                    let found = edge
                        .overlap
                        .m
                        .count_differences(self.seq(v), self.seq(edge.overlap.ids[1]));
                    if found != recorded {
                        return Err(GraphError::DifferenceMismatch {
                            edge: id,
                            recorded,
                            found,
                        });
                    }
                }

                let twin = self
                    .edge(edge.twin)
                    .ok_or(GraphError::BrokenTwin(id))?;
                if twin.twin != id
                    || twin.start != edge.end
                    || twin.overlap != edge.overlap.swapped()
                {
                    return Err(GraphError::BrokenTwin(id));
                }
            }
        }
        Ok(())
    }
}
