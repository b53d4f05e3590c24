//! Rebuilds polygons from linework.
//!
//! Input rings are merged into one planar [`LineNetwork`]: every segment is
//! split where it meets another, vertices closer than the snap distance are
//! merged and coincident edges collapse into one. Dangling edges are removed,
//! then faces are traced from the half-edge structure. Counter-clockwise faces
//! become polygons, clockwise component outlines become holes of the smallest
//! face that encloses them.

use super::NODE_SNAP;
use geo::{
	Area, Contains, Coord, Line, LineString, Point, Polygon,
	algorithm::line_intersection::{LineIntersection, line_intersection},
};
use rstar::{
	AABB, RTree,
	primitives::{GeomWithData, Rectangle},
};
use std::collections::{BTreeSet, HashMap, HashSet};

type IndexedSegment = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Polygonizes the union of `lines`.
pub fn polygonize(lines: &[LineString<f64>]) -> Vec<Polygon<f64>> {
	let mut network = LineNetwork::from_lines(lines, NODE_SNAP);
	let removed = network.remove_dangles();
	if removed > 0 {
		log::debug!("removed {removed} dangling edges before polygonizing");
	}
	network.polygonize()
}

/// Noded, undirected line network with shared vertices.
#[derive(Debug, Default)]
pub struct LineNetwork {
	vertices: Vec<Coord<f64>>,
	edges: BTreeSet<(usize, usize)>,
	snap: f64,
	lookup: HashMap<(i64, i64), usize>,
}

impl LineNetwork {
	/// Nodes all segments of `lines` against each other.
	pub fn from_lines(lines: &[LineString<f64>], snap: f64) -> Self {
		let segments: Vec<Line<f64>> = lines
			.iter()
			.flat_map(|line| line.lines())
			.filter(|segment| segment.start != segment.end)
			.collect();

		let mut cuts: Vec<Vec<Coord<f64>>> = segments.iter().map(|s| vec![s.start, s.end]).collect();

		let tree = RTree::bulk_load(
			segments
				.iter()
				.enumerate()
				.map(|(index, s)| IndexedSegment::new(Rectangle::from_corners(corner(s.start), corner(s.end)), index))
				.collect(),
		);

		for (index, segment) in segments.iter().enumerate() {
			let envelope = AABB::from_corners(
				[segment.start.x.min(segment.end.x) - snap, segment.start.y.min(segment.end.y) - snap],
				[segment.start.x.max(segment.end.x) + snap, segment.start.y.max(segment.end.y) + snap],
			);
			for candidate in tree.locate_in_envelope_intersecting(&envelope) {
				let other = candidate.data;
				if other <= index {
					continue;
				}
				match line_intersection(*segment, segments[other]) {
					Some(LineIntersection::SinglePoint { intersection, .. }) => {
						cuts[index].push(intersection);
						cuts[other].push(intersection);
					}
					Some(LineIntersection::Collinear { intersection }) => {
						for point in [intersection.start, intersection.end] {
							cuts[index].push(point);
							cuts[other].push(point);
						}
					}
					None => {}
				}
			}
		}

		let mut network = LineNetwork {
			snap,
			..LineNetwork::default()
		};
		for (segment, mut points) in segments.iter().zip(cuts) {
			let delta = segment.delta();
			let length_squared = delta.x * delta.x + delta.y * delta.y;
			let position = |c: &Coord<f64>| ((c.x - segment.start.x) * delta.x + (c.y - segment.start.y) * delta.y) / length_squared;
			points.sort_by(|a, b| position(a).total_cmp(&position(b)));

			let mut previous: Option<usize> = None;
			for point in points {
				let vertex = network.vertex(point);
				if let Some(previous) = previous {
					network.add_edge(previous, vertex);
				}
				previous = Some(vertex);
			}
		}
		network
	}

	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Index of the vertex at `coord`, reusing any vertex within the snap grid.
	fn vertex(&mut self, coord: Coord<f64>) -> usize {
		let key = ((coord.x / self.snap).round() as i64, (coord.y / self.snap).round() as i64);
		for dx in -1..=1 {
			for dy in -1..=1 {
				if let Some(&index) = self.lookup.get(&(key.0 + dx, key.1 + dy)) {
					return index;
				}
			}
		}
		let index = self.vertices.len();
		self.vertices.push(coord);
		self.lookup.insert(key, index);
		index
	}

	fn add_edge(&mut self, a: usize, b: usize) {
		if a != b {
			self.edges.insert((a.min(b), a.max(b)));
		}
	}

	fn adjacency(&self) -> Vec<Vec<usize>> {
		let mut adjacency = vec![Vec::new(); self.vertices.len()];
		for &(a, b) in &self.edges {
			adjacency[a].push(b);
			adjacency[b].push(a);
		}
		adjacency
	}

	/// Removes edges that end in a vertex of degree one, repeatedly.
	///
	/// Returns the number of removed edges.
	pub fn remove_dangles(&mut self) -> usize {
		let mut neighbours: Vec<HashSet<usize>> = self
			.adjacency()
			.into_iter()
			.map(|n| n.into_iter().collect())
			.collect();
		let mut queue: Vec<usize> = (0..neighbours.len()).filter(|&v| neighbours[v].len() == 1).collect();
		let mut removed = 0;

		while let Some(vertex) = queue.pop() {
			let Some(&other) = neighbours[vertex].iter().next() else {
				continue;
			};
			if neighbours[vertex].len() != 1 {
				continue;
			}
			neighbours[vertex].clear();
			neighbours[other].remove(&vertex);
			self.edges.remove(&(vertex.min(other), vertex.max(other)));
			removed += 1;
			if neighbours[other].len() == 1 {
				queue.push(other);
			}
		}
		removed
	}

	/// Traces all bounded faces of the network.
	pub fn polygonize(&self) -> Vec<Polygon<f64>> {
		let mut adjacency = self.adjacency();
		for (vertex, neighbours) in adjacency.iter_mut().enumerate() {
			let origin = self.vertices[vertex];
			let angle = |n: &usize| {
				let c = self.vertices[*n];
				(c.y - origin.y).atan2(c.x - origin.x)
			};
			neighbours.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
		}

		let mut visited: HashSet<(usize, usize)> = HashSet::new();
		let mut shells: Vec<Polygon<f64>> = Vec::new();
		let mut outlines: Vec<LineString<f64>> = Vec::new();
		let step_limit = 2 * self.edges.len() + 1;

		for &(a, b) in &self.edges {
			for start in [(a, b), (b, a)] {
				if visited.contains(&start) {
					continue;
				}
				let mut ring = vec![self.vertices[start.0]];
				let (mut from, mut to) = start;
				for _ in 0..step_limit {
					visited.insert((from, to));
					ring.push(self.vertices[to]);
					let neighbours = &adjacency[to];
					let Some(back) = neighbours.iter().position(|&n| n == from) else {
						break;
					};
					let next = neighbours[(back + neighbours.len() - 1) % neighbours.len()];
					(from, to) = (to, next);
					if (from, to) == start {
						break;
					}
				}

				let ring = LineString::from(ring);
				let signed_area = Polygon::new(ring.clone(), vec![]).signed_area();
				if signed_area > 0.0 {
					shells.push(Polygon::new(ring, vec![]));
				} else if signed_area < 0.0 {
					outlines.push(ring);
				}
			}
		}

		let areas: Vec<f64> = shells.iter().map(Area::unsigned_area).collect();
		let mut holes: Vec<Vec<LineString<f64>>> = vec![Vec::new(); shells.len()];
		for outline in outlines {
			let Some(sample) = outline.0.first().map(|c| Point::from(*c)) else {
				continue;
			};
			let enclosing = shells
				.iter()
				.enumerate()
				.filter(|(_, shell)| shell.contains(&sample))
				.min_by(|(i, _), (j, _)| areas[*i].total_cmp(&areas[*j]))
				.map(|(index, _)| index);
			if let Some(index) = enclosing {
				holes[index].push(outline);
			}
		}

		shells
			.into_iter()
			.zip(holes)
			.map(|(shell, holes)| Polygon::new(shell.into_inner().0, holes))
			.collect()
	}
}

fn corner(c: Coord<f64>) -> [f64; 2] {
	[c.x, c.y]
}
