use std::collections::BTreeMap;

use crate::models::pob::BuildMetrics;
use crate::pob::markup::DerivedStats;

/// Pool sizes shown in the build summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vitals {
    pub life: Option<f64>,
    pub energy_shield: Option<f64>,
    pub ward: Option<f64>,
    pub mana: Option<f64>,
}

/// First value that is present and non-zero.
pub fn coalesce(candidates: &[Option<f64>]) -> Option<f64> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| *value != 0.0)
}

/// `primary` when present and non-zero, otherwise `fallback` as-is.
fn prefer(primary: Option<f64>, fallback: Option<f64>) -> Option<f64> {
    primary.filter(|v| *v != 0.0).or(fallback)
}

pub fn vitals(stats: &BTreeMap<String, f64>, derived: &DerivedStats) -> Vitals {
    let stat = |name: &str| stats.get(name).copied();

    Vitals {
        life: prefer(stat("Life"), derived.life),
        energy_shield: prefer(stat("EnergyShield"), derived.energy_shield),
        ward: prefer(stat("Ward"), stat("WardTotal")),
        mana: prefer(stat("Mana"), derived.mana),
    }
}

pub fn metrics(stats: &BTreeMap<String, f64>, derived: &DerivedStats, vitals: &Vitals) -> BuildMetrics {
    let stat = |name: &str| stats.get(name).copied();

    let dps = coalesce(&[
        stat("CombinedDPS"),
        stat("TotalDPS"),
        stat("TotalDPSwithPoison"),
        stat("AverageDamage"),
        derived.total_dps,
        derived.total_dps_with_poison,
        derived.total_dps_with_ignite,
        derived.average_damage,
    ]);

    let ehp = stat("TotalEHP").or_else(|| {
        let pools = [vitals.life, vitals.energy_shield, vitals.ward];
        let nonzero: Vec<f64> = pools.iter().flatten().copied().filter(|v| *v != 0.0).collect();
        (!nonzero.is_empty()).then(|| nonzero.iter().sum())
    });

    let sustain = coalesce(&[
        stat("NetLifeRegen"),
        stat("NetEnergyShieldRegen"),
        derived.net_life_regen,
        derived.life_regen,
    ]);

    BuildMetrics { dps, ehp, sustain }
}
