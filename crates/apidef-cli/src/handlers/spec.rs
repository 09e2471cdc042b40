//! Spec command handler: resolve, synthesize and render documentation

use crate::cli::SpecArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use crate::render;
use apidef_core::{EndpointSynthesizer, Resolver};
use std::fs;
use tracing::{info, instrument};

/// Handle the spec command
#[instrument(skip(config, output), fields(namespaces = ?args.namespaces))]
pub fn handle_spec(args: SpecArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let root = config.resolve_root(args.root);
    let format = config.resolve_format(args.format);
    info!(root = %root.display(), format = ?format, "Starting spec generation");

    let resolution = {
        let _timer = Timer::new("resolve");
        Resolver::new(&root).resolve_detailed(args.namespaces.as_slice())?
    };
    output.info(&format!(
        "Resolved {} resource(s) from {} namespace(s)",
        resolution.graph.len(),
        resolution.namespaces.len()
    ))?;

    let timer = Timer::new("render");
    let surfaces = EndpointSynthesizer::new().surface(&resolution.graph)?;
    let rendered = render::render(format, &surfaces)?;
    let endpoints: usize = surfaces.iter().map(|s| s.endpoints.len()).sum();
    info!(
        endpoints,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Rendered documentation"
    );
    drop(timer);

    match args.save_to {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, rendered)?;
            output.success(&format!("Documentation saved to {}", path.display()))?;
        }
        None => output.document(&rendered)?,
    }

    Ok(())
}
