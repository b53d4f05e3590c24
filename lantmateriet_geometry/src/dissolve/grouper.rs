use super::{
	TOUCHING_MAX_DIST,
	adjacency::{ClusterMap, connect_adjacency, format_adjacency, retain_primary_clusters},
};
use geo::{BoundingRect, Distance, Euclidean, Geometry};
use rstar::{
	AABB, RTree,
	primitives::{GeomWithData, Rectangle},
};
use std::borrow::Borrow;

type IndexedEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Finds geometries that touch within a tolerance and groups them into
/// connected clusters.
///
/// Adjacency is approximate: each geometry reports only its nearest other
/// geometry within the tolerance (all of them when several are tied at the same
/// distance). A geometry touching two neighbours at different distances
/// therefore reports one edge, and clusters rely on the neighbours' own
/// reports to become connected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialProximityGrouper {
	tolerance: f64,
}

impl Default for SpatialProximityGrouper {
	fn default() -> Self {
		Self::new(TOUCHING_MAX_DIST)
	}
}

impl SpatialProximityGrouper {
	pub fn new(tolerance: f64) -> Self {
		Self {
			tolerance: tolerance.max(0.0),
		}
	}

	pub fn tolerance(&self) -> f64 {
		self.tolerance
	}

	/// Nearest-neighbour pairs `(query, neighbour)`, ordered by query position.
	pub fn touching_pairs<G: Borrow<Geometry<f64>>>(&self, geometries: &[G]) -> Vec<(usize, usize)> {
		let geometry = |index: usize| -> &Geometry<f64> { geometries[index].borrow() };

		let envelopes: Vec<Option<AABB<[f64; 2]>>> = (0..geometries.len())
			.map(|index| {
				geometry(index)
					.bounding_rect()
					.map(|r| AABB::from_corners([r.min().x, r.min().y], [r.max().x, r.max().y]))
			})
			.collect();

		let tree = RTree::bulk_load(
			envelopes
				.iter()
				.enumerate()
				.filter_map(|(index, envelope)| {
					envelope.map(|e| IndexedEnvelope::new(Rectangle::from_corners(e.lower(), e.upper()), index))
				})
				.collect(),
		);

		let mut pairs = Vec::new();
		for (index, envelope) in envelopes.iter().enumerate() {
			let Some(envelope) = envelope else {
				continue;
			};
			let (lower, upper) = (envelope.lower(), envelope.upper());
			let search = AABB::from_corners(
				[lower[0] - self.tolerance, lower[1] - self.tolerance],
				[upper[0] + self.tolerance, upper[1] + self.tolerance],
			);

			let mut best = f64::INFINITY;
			let mut nearest: Vec<usize> = Vec::new();
			for candidate in tree.locate_in_envelope_intersecting(&search) {
				let other = candidate.data;
				if other == index {
					continue;
				}
				let distance = Euclidean.distance(geometry(index), geometry(other));
				if distance > self.tolerance {
					continue;
				}
				if distance < best {
					best = distance;
					nearest.clear();
					nearest.push(other);
				} else if distance == best {
					nearest.push(other);
				}
			}

			nearest.sort_unstable();
			pairs.extend(nearest.into_iter().map(|other| (index, other)));
		}
		pairs
	}

	/// Connected clusters of touching geometries.
	///
	/// Positions missing from the result touch nothing and stay as they are.
	pub fn group<G: Borrow<Geometry<f64>>>(&self, geometries: &[G]) -> ClusterMap {
		let pairs = self.touching_pairs(geometries);
		let clusters = retain_primary_clusters(&connect_adjacency(&format_adjacency(&pairs)));
		log::debug!(
			"grouped {} geometries: {} touching pairs, {} clusters",
			geometries.len(),
			pairs.len(),
			clusters.len()
		);
		clusters
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use geo::{Rect, coord, point};
	use pretty_assertions::assert_eq;

	fn square(x: f64, y: f64, size: f64) -> Geometry<f64> {
		Geometry::Polygon(Rect::new(coord! {x: x, y: y}, coord! {x: x + size, y: y + size}).to_polygon())
	}

	#[test]
	fn stacked_squares_form_one_cluster() {
		let geometries = vec![square(0.0, 0.0, 1.0), square(0.0, -1.0, 1.0), square(0.0, 1.0, 1.0)];
		let clusters = SpatialProximityGrouper::default().group(&geometries);
		assert_eq!(clusters, ClusterMap::from([(0, vec![0, 1, 2])]));
	}

	#[test]
	fn far_geometry_is_left_out() {
		let geometries = vec![square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0), square(10.0, 10.0, 1.0)];
		let clusters = SpatialProximityGrouper::default().group(&geometries);
		assert_eq!(clusters, ClusterMap::from([(0, vec![0, 1])]));
	}

	#[test]
	fn near_miss_within_tolerance_touches() {
		let geometries = vec![square(0.0, 0.0, 1.0), square(1.000_000_1, 0.0, 1.0)];
		let clusters = SpatialProximityGrouper::default().group(&geometries);
		assert_eq!(clusters, ClusterMap::from([(0, vec![0, 1])]));
	}

	#[test]
	fn gap_larger_than_tolerance_does_not_touch() {
		let geometries = vec![square(0.0, 0.0, 1.0), square(1.001, 0.0, 1.0)];
		assert!(SpatialProximityGrouper::default().group(&geometries).is_empty());
	}

	#[test]
	fn single_and_empty_inputs_have_no_clusters() {
		let grouper = SpatialProximityGrouper::default();
		assert!(grouper.group::<Geometry<f64>>(&[]).is_empty());
		assert!(grouper.group(&[square(0.0, 0.0, 1.0)]).is_empty());
	}

	#[test]
	fn ties_report_every_nearest_neighbour() {
		let geometries = vec![square(0.0, 0.0, 1.0), square(-1.0, 0.0, 1.0), square(1.0, 0.0, 1.0)];
		let pairs = SpatialProximityGrouper::default().touching_pairs(&geometries);
		assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 0), (2, 0)]);
	}

	#[test]
	fn only_the_nearest_neighbour_is_reported() {
		let geometries = vec![
			Geometry::Point(point!(x: 0.0, y: 0.0)),
			Geometry::Point(point!(x: 0.000_001, y: 0.0)),
			Geometry::Point(point!(x: -0.000_005, y: 0.0)),
		];
		let pairs = SpatialProximityGrouper::default().touching_pairs(&geometries);
		assert_eq!(pairs, vec![(0, 1), (1, 0), (2, 0)]);
	}

	#[test]
	fn chain_is_transitively_connected() {
		let geometries = vec![square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0), square(2.0, 0.0, 1.0), square(3.0, 0.0, 1.0)];
		let clusters = SpatialProximityGrouper::default().group(&geometries);
		assert_eq!(clusters, ClusterMap::from([(0, vec![0, 1, 2, 3])]));
	}

	#[test]
	fn borrowed_geometries_are_accepted() {
		let owned = [square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0)];
		let borrowed: Vec<&Geometry<f64>> = owned.iter().collect();
		assert_eq!(
			SpatialProximityGrouper::default().group(&borrowed),
			ClusterMap::from([(0, vec![0, 1])])
		);
	}
}
