use crate::conf::types::{
    ConfigSpec, ConversionConfig, DocumentRoot, LocationSpec, MAX_BUFFER_SIZE_MULTIPLIER,
    MIN_BUFFER_SIZE_MULTIPLIER, Origin, Phase, ServerSpec, SizeSpec, UrlConvertSpec, parse_size,
};
use crate::conf::validation::report::ValidationReport;
use crate::convert::{ConversionError, resolve_pair};
use encoding_rs::Encoding;
use std::path::Path;

/// Validate everything that exists in a fully parsed config.
pub fn validate_spec(spec: &ConfigSpec) -> ValidationReport {
    let mut report = ValidationReport::default();

    validate_server(&spec.server, &mut report);
    for location in &spec.locations {
        validate_location(location, &spec.server, &mut report);
    }

    report
}

pub fn validate_server(server: &ServerSpec, report: &mut ValidationReport) {
    if let Some(block) = &server.url_encoding_convert {
        validate_url_convert_block(block, &server.origin, report);
    }

    let conversion = server.conversion();
    if conversion.enabled {
        validate_effective_conversion(&conversion, &server.origin, report);
        validate_document_root(server.document_root().as_ref(), &server.origin, report);
    }
}

pub fn validate_location(
    location: &LocationSpec,
    server: &ServerSpec,
    report: &mut ValidationReport,
) {
    let origin = &location.origin;

    if !location.path.starts_with('/') {
        report.invalid_location_path(&location.path, origin);
    }

    if location.root.is_some() && location.alias.is_some() {
        report.root_and_alias_both_set(origin);
    }

    let block = location.url_encoding_convert.as_ref();
    if let Some(block) = block {
        validate_url_convert_block(block, origin, report);
    }

    // Everything below is inherited unchanged from the server unless the
    // location overrides settings or the document root.
    let overrides_root = location.root.is_some() || location.alias.is_some();
    if block.is_none() && !overrides_root {
        return;
    }

    let conversion = location.conversion(server);
    if !conversion.enabled {
        return;
    }

    if block.is_some() {
        validate_effective_conversion(&conversion, origin, report);
    }
    validate_document_root(location.document_root(server).as_ref(), origin, report);

    let server_conversion = server.conversion();
    let server_converts_early =
        server_conversion.enabled && server_conversion.active_phase == Phase::Early;

    let location_phase = block.and_then(|b| b.phase);
    if location_phase == Some(Phase::Early) && !server_converts_early {
        report.early_phase_in_location_warning(server_conversion.active_phase, origin);
    }

    if server_converts_early && conversion.active_phase == Phase::Late {
        report.both_phases_active_warning(origin);
    }

    if server_converts_early
        && conversion.active_phase == Phase::Early
        && block.is_some_and(overrides_conversion)
    {
        report.location_overrides_ignored_in_early_phase_warning(origin);
    }
}

/// Whether the block changes how a URI is converted, as opposed to when.
fn overrides_conversion(block: &UrlConvertSpec) -> bool {
    block.from.is_some()
        || block.to.is_some()
        || block.alloc_size.is_some()
        || block.alloc_size_x.is_some()
}

/// Checks that only need the block itself.
fn validate_url_convert_block(
    block: &UrlConvertSpec,
    origin: &Origin,
    report: &mut ValidationReport,
) {
    if let Some(spec) = &block.alloc_size_x {
        match spec.factor() {
            Ok(x) if !(MIN_BUFFER_SIZE_MULTIPLIER..=MAX_BUFFER_SIZE_MULTIPLIER).contains(&x) => {
                report.alloc_size_x_out_of_range(x, origin);
            }
            Ok(_) => {}
            Err(err) => report.invalid_alloc_size_x(&err.0, origin),
        }
    }

    if let Some(SizeSpec::Text(raw)) = &block.alloc_size {
        if parse_size(raw).is_err() {
            report.invalid_alloc_size(raw, origin);
        }
    }
}

/// Checks on the settings after inheritance.
fn validate_effective_conversion(
    cfg: &ConversionConfig,
    origin: &Origin,
    report: &mut ValidationReport,
) {
    let from = &cfg.source_encoding;
    let to = &cfg.target_encoding;

    let source = Encoding::for_label_no_replacement(from.trim().as_bytes());
    let target = Encoding::for_label_no_replacement(to.trim().as_bytes());

    if source.is_none() {
        report.unknown_encoding(from, origin);
    }
    if target.is_none() {
        report.unknown_encoding(to, origin);
    }

    match resolve_pair(from, to) {
        Ok((source, target)) => {
            if source == target {
                report.same_source_and_target_warning(source.name(), origin);
            }
        }
        Err(ConversionError::UnsupportedEncodingPair { .. })
            if source.is_some() && target.is_some() =>
        {
            report.target_encoding_not_writable(to, origin);
        }
        Err(_) => {}
    }
}

fn validate_document_root(
    root: Option<&DocumentRoot>,
    origin: &Origin,
    report: &mut ValidationReport,
) {
    let dir: &Path = match root {
        Some(DocumentRoot::Root(dir)) => dir,
        Some(DocumentRoot::Alias { dir, .. }) => dir,
        None => {
            report.enabled_without_document_root(origin);
            return;
        }
    };

    if !dir.exists() {
        report.document_root_does_not_exist_warning(dir.display(), origin);
    } else if !dir.is_dir() {
        report.document_root_is_not_a_dir(dir.display(), origin);
    }
}
