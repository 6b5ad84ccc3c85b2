use std::time::Instant;

use crate::error::Result;
use crate::models::pob::{BuildSummary, EvalResult};
use crate::pob::markup::parse_build;
use crate::pob::metrics::{metrics, vitals};
use crate::pob::resolver::BuildResolver;

/// Resolve `pob`, then summarize the build it points at.
pub async fn evaluate(resolver: &BuildResolver, pob: &str) -> Result<EvalResult> {
    let started = Instant::now();

    let resolved = resolver.resolve(pob).await?;
    let build = parse_build(&resolved.markup)?;

    let vitals = vitals(&build.player_stats, &build.derived);
    let metrics = metrics(&build.player_stats, &build.derived, &vitals);

    tracing::debug!(
        "Evaluated build from {} with {} player stats",
        resolved.primary_source,
        build.player_stats.len()
    );

    Ok(EvalResult {
        summary: BuildSummary {
            class_name: build.class_name,
            ascendancy: build.ascendancy,
            level: build.level,
            life: vitals.life,
            energy_shield: vitals.energy_shield,
            ward: vitals.ward,
            mana: vitals.mana,
        },
        metrics,
        pob_xml: resolved.markup,
        player_stats: build.player_stats,
        warnings: build.warnings,
        sources: resolved.sources,
        timing_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        primary_source: resolved.primary_source,
    })
}
