use std::io::Write;

use tracing::info;

use woundmet::{ExtractorParams, ReportFormat, extract_from_path};

use super::args::CliArgs;
use super::errors::AppError;

/// Start from the config file (or defaults) and apply explicit flags on top.
fn resolve_params(args: &CliArgs) -> Result<ExtractorParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            ExtractorParams::from_json_file(path).map_err(|source| AppError::Config {
                path: path.clone(),
                source,
            })?
        }
        None => ExtractorParams::default(),
    };

    if let Some(scale) = args.scale {
        params.scaling_factor = scale;
    }
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    if let Some(order) = args.order {
        params.region_order = order;
    }
    if let Some(length) = args.arrow_length {
        params.arrow_length = length;
    }

    params.validate()?;
    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    if !args.input.exists() {
        return Err(AppError::MissingInput {
            path: args.input.clone(),
        }
        .into());
    }

    let params = resolve_params(&args)?;
    info!(
        "Extracting {:?}: scale={} cm/px, threshold={}, order={}",
        args.input, params.scaling_factor, params.threshold, params.region_order
    );

    let report = extract_from_path(&args.input, &params)?;

    let rendered = match args.format {
        ReportFormat::Text => report.to_text(),
        ReportFormat::Json => {
            let mut json = report.to_json(Some(&args.input))?;
            json.push('\n');
            json
        }
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if let Some(output) = &args.output {
        report.save_annotated(output)?;
    }

    info!(
        "Done: {} region(s) from {:?}",
        report.regions.len(),
        args.input
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write as _;
    use woundmet::RegionOrder;

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "scaling_factor": 0.05, "threshold": 10, "region_order": "area" }}"#
        )
        .unwrap();
        let config = file.path().to_str().unwrap().to_string();

        let args = CliArgs::parse_from([
            "woundmet", "-i", "mask.png", "--config", &config, "--threshold", "200",
        ]);
        let params = resolve_params(&args).unwrap();
        assert_eq!(params.scaling_factor, 0.05);
        assert_eq!(params.threshold, 200);
        assert_eq!(params.region_order, RegionOrder::Area);
    }

    #[test]
    fn defaults_without_config() {
        let args = CliArgs::parse_from(["woundmet", "--input", "mask.png"]);
        assert_eq!(resolve_params(&args).unwrap(), ExtractorParams::default());
        assert_eq!(args.format, ReportFormat::Text);
    }

    #[test]
    fn invalid_scale_flag_is_rejected() {
        let args = CliArgs::parse_from(["woundmet", "-i", "mask.png", "--scale=-2"]);
        assert!(matches!(
            resolve_params(&args),
            Err(AppError::Library(woundmet::Error::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn order_flag_uses_kebab_case() {
        let args = CliArgs::parse_from(["woundmet", "-i", "m.png", "--order", "top-left", "-f", "json"]);
        assert_eq!(args.order, Some(RegionOrder::TopLeft));
        assert_eq!(args.format, ReportFormat::Json);
    }
}
