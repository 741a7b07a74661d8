//! CLI subcommands.

pub mod apply;
pub mod chain;
pub mod info;

use anyhow::{anyhow, bail, Result};
use pix_ops::FilterRequest;

/// Default parameters mirrored from the editor's dialogs.
const DEFAULT_SOLARIZE_THRESHOLD: u8 = 128;
const DEFAULT_POSTERIZE_BITS: u8 = 4;
const DEFAULT_BLUR_RADIUS: f64 = 2.0;
const DEFAULT_NOISE_AMOUNT: u32 = 64;

/// Parses a `name[:value]` filter spec into a catalog request.
///
/// `seed` feeds the noise generator; custom kernels are not expressible
/// in spec form and go through the `apply` command's --size/--weights.
pub fn parse_filter_spec(spec: &str, seed: u64) -> Result<FilterRequest> {
    let (name, param) = match spec.split_once(':') {
        Some((name, param)) => (name, Some(param)),
        None => (spec, None),
    };

    let parse_u8 = |p: Option<&str>, default: u8| -> Result<u8> {
        p.map_or(Ok(default), |s| {
            s.parse()
                .map_err(|_| anyhow!("invalid parameter for {name}: {s}"))
        })
    };
    let parse_u32 = |p: Option<&str>, default: u32| -> Result<u32> {
        p.map_or(Ok(default), |s| {
            s.parse()
                .map_err(|_| anyhow!("invalid parameter for {name}: {s}"))
        })
    };
    let parse_f64 = |p: Option<&str>, default: f64| -> Result<f64> {
        p.map_or(Ok(default), |s| {
            s.parse()
                .map_err(|_| anyhow!("invalid parameter for {name}: {s}"))
        })
    };

    let request = match name {
        "classic-bw" => FilterRequest::ClassicBw,
        "high-contrast-bw" => FilterRequest::HighContrastBw,
        "vintage" => FilterRequest::Vintage,
        "sepia" => FilterRequest::Sepia,
        "solarize" => FilterRequest::Solarize {
            threshold: parse_u8(param, DEFAULT_SOLARIZE_THRESHOLD)?,
        },
        "posterize" => FilterRequest::Posterize {
            bits: parse_u8(param, DEFAULT_POSTERIZE_BITS)?,
        },
        "invert" => FilterRequest::Invert,
        "add-noise" => FilterRequest::AddNoise {
            amount: parse_u32(param, DEFAULT_NOISE_AMOUNT)?,
            seed,
        },
        "gaussian-blur" => FilterRequest::GaussianBlur {
            radius: parse_f64(param, DEFAULT_BLUR_RADIUS)?,
        },
        "box-blur" => FilterRequest::BoxBlur {
            radius: parse_f64(param, DEFAULT_BLUR_RADIUS)?,
        },
        "sharpen" => FilterRequest::Sharpen,
        "detail" => FilterRequest::Detail,
        "find-edges" => FilterRequest::FindEdges,
        "edge-enhance" => FilterRequest::EdgeEnhance,
        "emboss" => FilterRequest::Emboss,
        "contour" => FilterRequest::Contour,
        "reduce-noise" => FilterRequest::ReduceNoise,
        "custom" => bail!("custom kernels need `pix apply <input> custom --size N --weights ...`"),
        other => bail!("unknown filter: {other}"),
    };

    if param.is_some() && !matches!(
        request,
        FilterRequest::Solarize { .. }
            | FilterRequest::Posterize { .. }
            | FilterRequest::AddNoise { .. }
            | FilterRequest::GaussianBlur { .. }
            | FilterRequest::BoxBlur { .. }
    ) {
        bail!("filter {name} takes no parameter");
    }

    Ok(request)
}

/// Comma-separated weight list for custom kernels.
pub fn parse_weights(weights: &str) -> Result<Vec<f64>> {
    weights
        .split(',')
        .map(|s| {
            let s = s.trim();
            s.parse::<f64>()
                .map_err(|_| anyhow!("invalid kernel weight: {s}"))
        })
        .collect()
}

/// Seed for the noise generator when the user didn't pin one.
pub fn derive_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
