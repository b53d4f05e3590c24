use anyhow::{Context, Result};
use lantmateriet::geometry::{
	DEFAULT_CATEGORY_FIELD, DissolveStrategy, GeometryDissolver, Measures, SpatialProximityGrouper, TOUCHING_MAX_DIST,
	crs, read_geojson_file, write_geojson_file,
};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// GeoJSON file in SWEREF 99 TM holding a single category
	#[arg()]
	input_file: PathBuf,

	/// GeoJSON file to write
	#[arg()]
	output_file: PathBuf,

	/// rebuild polygons from their outer rings, dropping holes
	#[arg(long, conflicts_with = "explode_only", display_order = 1)]
	exterior: bool,

	/// only split multi-part geometries, merge nothing
	#[arg(long, display_order = 1)]
	explode_only: bool,

	/// attribute holding the category
	#[arg(long, value_name = "FIELD", default_value = DEFAULT_CATEGORY_FIELD, display_order = 2)]
	category_field: String,

	/// largest gap at which polygons still count as touching, in metres
	#[arg(long, value_name = "float", default_value_t = TOUCHING_MAX_DIST, display_order = 2)]
	tolerance: f64,

	/// do not write area_m2
	#[arg(long, display_order = 3)]
	no_area: bool,

	/// do not write length_m
	#[arg(long, display_order = 3)]
	no_length: bool,

	/// write coordinates in SWEREF 99 TM instead of WGS 84
	#[arg(long, display_order = 3)]
	keep_crs: bool,
}

impl Subcommand {
	fn strategy(&self) -> DissolveStrategy {
		if self.exterior {
			DissolveStrategy::Exterior
		} else if self.explode_only {
			DissolveStrategy::Explode
		} else {
			DissolveStrategy::Touching
		}
	}
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let set = read_geojson_file(&arguments.input_file)?;
	let strategy = arguments.strategy();
	log::info!("dissolving {} features of {:?} ({strategy})", set.len(), arguments.input_file);

	let kind = set.kind();
	let dissolver = GeometryDissolver::new(SpatialProximityGrouper::new(arguments.tolerance), &arguments.category_field);
	let mut dissolved = dissolver
		.dissolve(strategy, set)
		.with_context(|| format!("dissolving {:?}", arguments.input_file))?;

	if let Some(kind) = kind {
		let measures = Measures::for_kind(kind);
		Measures {
			area: measures.area && !arguments.no_area,
			length: measures.length && !arguments.no_length,
		}
		.apply(&mut dissolved);
	}

	if !arguments.keep_crs {
		crs::unproject(&mut dissolved)?;
	}
	write_geojson_file(&arguments.output_file, &dissolved, None)?;

	log::info!("wrote {} features to {:?}", dissolved.len(), arguments.output_file);
	Ok(())
}
