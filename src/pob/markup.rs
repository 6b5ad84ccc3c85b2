use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Stats the evaluator falls back on when a headline `PlayerStat` is
/// missing or zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedStats {
    pub life: Option<f64>,
    pub energy_shield: Option<f64>,
    pub mana: Option<f64>,
    pub total_dps: Option<f64>,
    pub total_dps_with_poison: Option<f64>,
    pub total_dps_with_ignite: Option<f64>,
    pub average_damage: Option<f64>,
    pub net_life_regen: Option<f64>,
    pub life_regen: Option<f64>,
}

impl DerivedStats {
    fn slot(&mut self, stat: &str) -> Option<&mut Option<f64>> {
        match stat {
            "Life" => Some(&mut self.life),
            "EnergyShield" => Some(&mut self.energy_shield),
            "Mana" => Some(&mut self.mana),
            "TotalDPS" => Some(&mut self.total_dps),
            "WithPoisonDPS" => Some(&mut self.total_dps_with_poison),
            "WithIgniteDPS" => Some(&mut self.total_dps_with_ignite),
            "AverageDamage" => Some(&mut self.average_damage),
            "NetLifeRegen" => Some(&mut self.net_life_regen),
            "LifeRegen" => Some(&mut self.life_regen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildMarkup {
    pub class_name: Option<String>,
    pub ascendancy: Option<String>,
    pub level: Option<i64>,
    /// Numeric `PlayerStat` entries by stat name
    pub player_stats: BTreeMap<String, f64>,
    pub derived: DerivedStats,
    pub warnings: Vec<String>,
}

pub fn parse_build(xml: &str) -> Result<BuildMarkup> {
    let document = roxmltree::Document::parse(xml)?;
    let build = document
        .descendants()
        .find(|node| node.has_tag_name("Build"))
        .ok_or_else(|| Error::Markup("no Build element in build markup".to_string()))?;

    let mut parsed = BuildMarkup {
        class_name: build.attribute("className").map(str::to_owned),
        ascendancy: build
            .attribute("ascendClassName")
            .filter(|name| *name != "None")
            .map(str::to_owned),
        level: build.attribute("level").and_then(parse_level),
        ..Default::default()
    };

    let mut stat_count = 0;
    for stat in build.children().filter(|n| n.has_tag_name("PlayerStat")) {
        stat_count += 1;
        let (Some(name), Some(raw)) = (stat.attribute("stat"), stat.attribute("value")) else {
            continue;
        };

        let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        if let Some(value) = value {
            parsed.player_stats.insert(name.to_string(), value);
        }

        if let Some(slot) = parsed.derived.slot(name) {
            match value {
                Some(value) => *slot = Some(value),
                None => parsed
                    .warnings
                    .push(format!("PlayerStat {name} has non-numeric value {raw:?}")),
            }
        }
    }

    if stat_count == 0 {
        parsed
            .warnings
            .push("Build has no PlayerStat entries".to_string());
    }

    Ok(parsed)
}

fn parse_level(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_build() {
        let xml = r#"<PathOfBuilding>
            <Build level="95" className="Ranger" ascendClassName="Deadeye">
                <PlayerStat stat="Life" value="4200"/>
                <PlayerStat stat="TotalDPS" value="1.5e6"/>
                <PlayerStat stat="WithPoisonDPS" value="2000000"/>
                <PlayerStat stat="SkillName" value="Tornado Shot"/>
            </Build>
        </PathOfBuilding>"#;
        let build = parse_build(xml).unwrap();

        assert_eq!(build.class_name.as_deref(), Some("Ranger"));
        assert_eq!(build.ascendancy.as_deref(), Some("Deadeye"));
        assert_eq!(build.level, Some(95));
        assert_eq!(build.player_stats.len(), 3);
        assert_eq!(build.player_stats["TotalDPS"], 1_500_000.0);
        assert_eq!(build.derived.life, Some(4200.0));
        assert_eq!(build.derived.total_dps_with_poison, Some(2_000_000.0));
        assert!(build.warnings.is_empty());
    }

    #[test]
    fn test_root_build_and_no_ascendancy() {
        let build = parse_build(r#"<Build className="Witch" ascendClassName="None" level="1"/>"#)
            .unwrap();
        assert_eq!(build.ascendancy, None);
        assert_eq!(build.warnings, vec!["Build has no PlayerStat entries"]);
    }

    #[test]
    fn test_non_numeric_mapped_stat_warns() {
        let build = parse_build(
            r#"<Build><PlayerStat stat="Mana" value="lots"/><PlayerStat stat="Str" value="x"/></Build>"#,
        )
        .unwrap();
        assert!(build.player_stats.is_empty());
        assert_eq!(build.derived.mana, None);
        assert_eq!(build.warnings.len(), 1);
        assert!(build.warnings[0].contains("Mana"));
    }

    #[test]
    fn test_missing_build_element() {
        assert!(matches!(
            parse_build("<PathOfBuilding><Tree/></PathOfBuilding>"),
            Err(Error::Markup(_))
        ));
        assert!(matches!(parse_build("<unclosed"), Err(Error::Markup(_))));
    }
}
