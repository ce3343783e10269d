use std::env;
use std::fs;
use trellis::{LayoutConfig, LayoutEngine, LayoutSource, Size, TrellisError};

fn parse_extent(name: &str, raw: &str) -> Result<f64, TrellisError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| TrellisError::Argument(format!("{} '{}' is not a number", name, raw)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(TrellisError::Argument(format!("{} must be a finite, non-negative number", name)));
    }
    Ok(value)
}

/// Lays out a layout source at a fixed size and prints every frame.
fn main() -> Result<(), TrellisError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_output = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();
    if positional.len() != 3 {
        eprintln!("Computes component frames for a layout source.");
        eprintln!();
        eprintln!("Usage: {} <path/to/layout.json> <width> <height> [--json]", args[0]);
        std::process::exit(1);
    }

    let source_path = positional[0];
    let size = Size::new(
        parse_extent("width", positional[1])?,
        parse_extent("height", positional[2])?,
    );

    log::info!("Loading layout source from {}", source_path);
    let source = LayoutSource::from_json(&fs::read_to_string(source_path)?)?;
    log::info!(
        "Loaded {} components (format version {})",
        source.tree().len(),
        source.version()
    );

    let engine = LayoutEngine::new(LayoutConfig::default());
    let layouts = trellis::layout_roots(&engine, source.tree(), size);

    if json_output {
        let rendered = serde_json::to_string_pretty(&layouts)
            .map_err(|e| TrellisError::Argument(format!("cannot serialize layouts: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    for layout in &layouts {
        for (id, frame) in layout.flattened_frames() {
            println!(
                "{:<24} x={:<8.2} y={:<8.2} w={:<8.2} h={:<8.2}",
                id.as_str(),
                frame.origin.x,
                frame.origin.y,
                frame.size.width,
                frame.size.height
            );
        }
    }
    Ok(())
}
