//! Bookkeeping between raw neighbour pairs and final clusters.
//!
//! The grouper reports `(query, neighbour)` pairs. These are folded into an
//! [`AdjacencyMap`], saturated to connected components and finally reduced to
//! one entry per component in a [`ClusterMap`].

use std::collections::{BTreeMap, BTreeSet};

/// Position → positions it is connected to, itself included.
pub type AdjacencyMap = BTreeMap<usize, BTreeSet<usize>>;

/// Representative position → ordered member positions.
pub type ClusterMap = BTreeMap<usize, Vec<usize>>;

/// Collects neighbour pairs into adjacency lists.
///
/// Every query position maps to itself plus each neighbour reported for it.
pub fn format_adjacency(pairs: &[(usize, usize)]) -> AdjacencyMap {
	let mut map = AdjacencyMap::new();
	for &(query, neighbour) in pairs {
		map.entry(query)
			.or_insert_with(|| BTreeSet::from([query]))
			.insert(neighbour);
	}
	map
}

/// Saturates every entry to the full connected component it belongs to.
///
/// Positions that only ever appear as neighbours are followed as well, so the
/// result is the transitive closure of the relation, whatever its depth.
pub fn connect_adjacency(map: &AdjacencyMap) -> AdjacencyMap {
	let Some(max_index) = map
		.iter()
		.flat_map(|(key, members)| std::iter::once(key).chain(members))
		.max()
	else {
		return AdjacencyMap::new();
	};

	let mut sets = DisjointSets::new(max_index + 1);
	for (&key, members) in map {
		for &member in members {
			sets.union(key, member);
		}
	}

	let mut components: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
	for (&key, members) in map {
		for &index in std::iter::once(&key).chain(members) {
			let root = sets.find(index);
			components.entry(root).or_default().insert(index);
		}
	}

	map.keys()
		.map(|&key| {
			let root = sets.find(key);
			(key, components[&root].clone())
		})
		.collect()
}

/// Keeps one representative per component.
///
/// Keys are scanned in ascending order. A key becomes a representative only when
/// its set still contains a position not covered by earlier representatives, so
/// the lowest key of every component wins.
pub fn retain_primary_clusters(map: &AdjacencyMap) -> ClusterMap {
	let mut covered: BTreeSet<usize> = BTreeSet::new();
	let mut clusters = ClusterMap::new();

	for (&key, members) in map {
		if members.is_subset(&covered) {
			continue;
		}
		covered.extend(members.iter().copied());
		clusters.insert(key, members.iter().copied().collect());
	}

	clusters
}

/// Union–find over `0..len` with path halving.
struct DisjointSets {
	parent: Vec<usize>,
	size: Vec<usize>,
}

impl DisjointSets {
	fn new(len: usize) -> Self {
		Self {
			parent: (0..len).collect(),
			size: vec![1; len],
		}
	}

	fn find(&mut self, mut index: usize) -> usize {
		while self.parent[index] != index {
			self.parent[index] = self.parent[self.parent[index]];
			index = self.parent[index];
		}
		index
	}

	fn union(&mut self, a: usize, b: usize) {
		let (mut a, mut b) = (self.find(a), self.find(b));
		if a == b {
			return;
		}
		if self.size[a] < self.size[b] {
			std::mem::swap(&mut a, &mut b);
		}
		self.parent[b] = a;
		self.size[a] += self.size[b];
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn adjacency(entries: &[(usize, &[usize])]) -> AdjacencyMap {
		entries
			.iter()
			.map(|(key, members)| (*key, members.iter().copied().collect()))
			.collect()
	}

	#[test]
	fn format_groups_pairs_by_query() {
		let map = format_adjacency(&[(0, 1), (1, 2), (0, 3)]);
		assert_eq!(map, adjacency(&[(0, &[0, 1, 3]), (1, &[1, 2])]));
	}

	#[test]
	fn format_of_nothing_is_empty() {
		assert!(format_adjacency(&[]).is_empty());
	}

	#[test]
	fn connect_saturates_components() {
		let map = adjacency(&[(0, &[0, 1]), (1, &[1, 2]), (2, &[2]), (3, &[3]), (4, &[4, 0])]);
		let connected = connect_adjacency(&map);

		let all: &[usize] = &[0, 1, 2, 4];
		assert_eq!(
			connected,
			adjacency(&[(0, all), (1, all), (2, all), (3, &[3]), (4, all)])
		);
	}

	#[test]
	fn connect_follows_long_chains_without_recursion() {
		let pairs: Vec<(usize, usize)> = (0..10_000).map(|i| (i + 1, i)).collect();
		let connected = connect_adjacency(&format_adjacency(&pairs));

		assert_eq!(connected[&1].len(), 10_001);
		assert_eq!(connected[&10_000].len(), 10_001);
	}

	#[test]
	fn retain_keeps_lowest_key_per_component() {
		let all: &[usize] = &[0, 1, 2, 4];
		let connected = adjacency(&[(0, all), (1, all), (2, all), (3, &[3]), (4, all)]);

		assert_eq!(
			retain_primary_clusters(&connected),
			ClusterMap::from([(0, vec![0, 1, 2, 4]), (3, vec![3])])
		);
	}

	#[test]
	fn retain_keeps_partially_covered_sets() {
		let map = adjacency(&[(0, &[0, 1]), (1, &[1, 2])]);

		assert_eq!(
			retain_primary_clusters(&map),
			ClusterMap::from([(0, vec![0, 1]), (1, vec![1, 2])])
		);
	}
}
