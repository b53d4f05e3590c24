use super::normalise_item_names;
use crate::{ExtractError, config::Config};
use lantmateriet_geometry::{DissolveStrategy, FeatureSet, GeometryKind, Measures};
use std::collections::BTreeSet;

/// One category of one layer, ready to be processed on its own.
#[derive(Debug, Clone)]
pub struct CategoryJob {
	pub layer: String,
	pub category: String,
	/// Attribute the category was taken from
	pub field: String,
	pub file_name: String,
	pub strategy: DissolveStrategy,
	pub measures: Measures,
	/// Hand the dissolved set back for the Sweden base
	pub keep_result: bool,
	pub features: FeatureSet,
}

#[derive(Debug)]
pub struct LayerPlan {
	pub layer: String,
	pub kind: Option<GeometryKind>,
	pub sweden_base: bool,
	pub jobs: Vec<CategoryJob>,
}

/// Splits a layer into category jobs.
///
/// Strict layers must contain exactly the configured categories; excluded
/// categories are dropped after that check.
pub fn plan_layer(config: &Config, layer: &str, features: FeatureSet) -> Result<LayerPlan, ExtractError> {
	let layer_config = config.layer(layer).cloned().unwrap_or_default();
	let field = config.category_field_for(layer).to_string();
	let kind = features.kind();
	let mut parts = features.split_by(&field);

	if let Some(unnamed) = parts.remove("") {
		log::warn!("layer {layer}: skipping {} features without {field}", unnamed.len());
	}

	if layer_config.strict {
		let found: BTreeSet<String> = parts.keys().cloned().collect();
		let expected: BTreeSet<String> = layer_config.categories.keys().cloned().collect();
		if found != expected {
			return Err(ExtractError::SchemaMismatch {
				layer: layer.to_string(),
				missing: expected.difference(&found).cloned().collect(),
				unexpected: found.difference(&expected).cloned().collect(),
			});
		}
	}

	let names: Vec<&String> = parts.keys().collect();
	let normalised = normalise_item_names(&names);
	let sweden_base = layer_config.sweden_base && kind == Some(GeometryKind::Polygon);

	let jobs = parts
		.into_iter()
		.filter(|(category, _)| {
			let excluded = config.is_excluded(category);
			if excluded {
				log::debug!("layer {layer}: excluding {category}");
			}
			!excluded
		})
		.map(|(category, features)| {
			let file_name = layer_config
				.categories
				.get(&category)
				.cloned()
				.unwrap_or_else(|| format!("{}.geojson", normalised[&category]));
			let kind = features.kind().or(kind).unwrap_or(GeometryKind::Point);
			CategoryJob {
				layer: layer.to_string(),
				field: field.clone(),
				file_name,
				strategy: config.strategy_for(kind, &category),
				measures: Measures::for_kind(kind),
				keep_result: sweden_base,
				category,
				features,
			}
		})
		.collect();

	Ok(LayerPlan {
		layer: layer.to_string(),
		kind,
		sweden_base,
		jobs,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::DetailLevel;
	use geo::{Geometry, line_string, polygon};
	use lantmateriet_geometry::{GeoFeature, GeoProperties};
	use pretty_assertions::assert_eq;

	fn polygon_feature(field: &str, category: &str) -> GeoFeature {
		GeoFeature::with_properties(
			Geometry::Polygon(polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]),
			GeoProperties::from(vec![(field, category)]),
		)
	}

	fn line_feature(category: &str) -> GeoFeature {
		GeoFeature::with_properties(
			Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
			GeoProperties::from(vec![("objekttyp", category)]),
		)
	}

	fn summary(plan: &LayerPlan) -> Vec<(&str, &str, DissolveStrategy)> {
		plan.jobs
			.iter()
			.map(|job| (job.category.as_str(), job.file_name.as_str(), job.strategy))
			.collect()
	}

	#[test]
	fn configured_layer_uses_configured_names() {
		let config = Config::for_detail_level(DetailLevel::Fifty).unwrap();
		let features = FeatureSet::from(vec![line_feature("Motorväg"), line_feature("Huvudgata"), line_feature("Motorväg")]);

		let plan = plan_layer(&config, "vaglinje", features).unwrap();

		assert_eq!(
			summary(&plan),
			vec![
				("Huvudgata", "09_huvudgata.geojson", DissolveStrategy::Explode),
				("Motorväg", "01_motorvag.geojson", DissolveStrategy::Explode),
			]
		);
		assert_eq!(plan.jobs[1].features.len(), 2);
		assert_eq!(plan.jobs[1].measures, Measures::for_kind(GeometryKind::Line));
		assert!(!plan.sweden_base);
	}

	#[test]
	fn unconfigured_layer_gets_normalised_names() {
		let config = Config::default();
		let features = FeatureSet::from(vec![
			polygon_feature("objekttyp", "Sankmark, fast"),
			polygon_feature("objekttyp", "Sankmark, våt"),
		]);

		let plan = plan_layer(&config, "sankmark", features).unwrap();

		assert_eq!(
			summary(&plan),
			vec![
				("Sankmark, fast", "01_sankmark_fast.geojson", DissolveStrategy::Touching),
				("Sankmark, våt", "02_sankmark_vat.geojson", DissolveStrategy::Touching),
			]
		);
	}

	#[test]
	fn text_layers_split_on_texttyp() {
		let config = Config::default();
		let features = FeatureSet::from(vec![polygon_feature("texttyp", "Bebyggelse")]);

		let plan = plan_layer(&config, "textyta", features).unwrap();

		assert_eq!(plan.jobs.len(), 1);
		assert_eq!(plan.jobs[0].field, "texttyp");
		assert_eq!(plan.jobs[0].category, "Bebyggelse");
	}

	#[test]
	fn strict_layer_must_match_configuration() {
		let config = Config::from_string(
			"layers:\n  mark:\n    strict: true\n    categories:\n      Sjö: 03_sjo.geojson\n      Åker: 09_aker.geojson\n",
		)
		.unwrap();
		let features = FeatureSet::from(vec![polygon_feature("objekttyp", "Sjö"), polygon_feature("objekttyp", "Skog")]);

		let error = plan_layer(&config, "mark", features).unwrap_err();

		assert_eq!(
			error,
			ExtractError::SchemaMismatch {
				layer: "mark".to_string(),
				missing: BTreeSet::from(["Åker".to_string()]),
				unexpected: BTreeSet::from(["Skog".to_string()]),
			}
		);
	}

	#[test]
	fn excluded_and_exteriorised_categories() {
		let config = Config::from_string(
			"exclude: [Hav]\nexteriorise: [Skog]\nlayers:\n  mark:\n    strict: true\n    sweden_base: true\n    categories:\n      Hav: 16_hav.geojson\n      Skog: 02_skog.geojson\n      Sjö: 03_sjo.geojson\n",
		)
		.unwrap();
		let features = FeatureSet::from(vec![
			polygon_feature("objekttyp", "Hav"),
			polygon_feature("objekttyp", "Skog"),
			polygon_feature("objekttyp", "Sjö"),
		]);

		let plan = plan_layer(&config, "mark", features).unwrap();

		assert_eq!(
			summary(&plan),
			vec![
				("Sjö", "03_sjo.geojson", DissolveStrategy::Touching),
				("Skog", "02_skog.geojson", DissolveStrategy::Exterior),
			]
		);
		assert!(plan.sweden_base);
		assert!(plan.jobs.iter().all(|job| job.keep_result));
	}

	#[test]
	fn empty_layer_has_no_jobs() {
		let plan = plan_layer(&Config::default(), "mark", FeatureSet::new()).unwrap();
		assert!(plan.jobs.is_empty());
		assert_eq!(plan.kind, None);
	}
}
