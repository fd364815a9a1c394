//! Built-in combatants and power catalogues.

use battle_core::{Combatant, Power, PowerCatalogue, StatKind, StrategyConfig};

// ============================================================================
// Power catalogues
// ============================================================================

pub fn gomu_gomu() -> PowerCatalogue {
    PowerCatalogue::new(
        "Gomu Gomu no Mi",
        "Rubber powers that make the user's body stretch like rubber",
    )
    .with_power(
        Power::new("Gomu Gomu no Pistol", 10, 25, 1.0)
            .with_description("Basic stretching punch attack"),
    )
    .with_power(
        Power::new("Gomu Gomu no Gatling", 25, 15, 3.0)
            .with_description("Rapid-fire punches")
            .with_level_requirement(5),
    )
    .with_power(
        Power::new("Gear Second", 50, 0, 10.0)
            .with_description("Increases speed and power temporarily")
            .with_level_requirement(10),
    )
    .with_power(
        Power::new("Gear Third", 75, 100, 15.0)
            .with_description("Giant limb attack with massive damage")
            .with_level_requirement(15),
    )
}

pub fn mera_mera() -> PowerCatalogue {
    PowerCatalogue::new(
        "Mera Mera no Mi",
        "Fire powers that allow control over flames",
    )
    .with_power(
        Power::new("Fire Fist", 15, 35, 1.5).with_description("Launch a fist-shaped fire projectile"),
    )
    .with_power(
        Power::new("Flame Spear", 25, 45, 2.0)
            .with_description("Create spears of fire")
            .with_level_requirement(3),
    )
    .with_power(
        Power::new("Flame Emperor", 80, 120, 12.0)
            .with_description("Massive fireball attack")
            .with_level_requirement(12),
    )
}

pub fn hie_hie() -> PowerCatalogue {
    PowerCatalogue::new(
        "Hie Hie no Mi",
        "Ice powers that allow control over ice and cold",
    )
    .with_power(Power::new("Ice Saber", 12, 30, 1.2).with_description("Create weapons from ice"))
    .with_power(
        Power::new("Ice Age", 40, 20, 8.0)
            .with_description("Freeze the surrounding area")
            .with_level_requirement(8),
    )
    .with_power(
        Power::new("Absolute Zero", 100, 150, 20.0)
            .with_description("Ultimate freezing attack")
            .with_level_requirement(20),
    )
}

// ============================================================================
// Combatants
// ============================================================================

/// Player captain wielding the rubber catalogue.
pub fn luffy() -> Combatant {
    Combatant::player("Monkey D. Luffy")
        .with_title("Captain")
        .with_base(StatKind::MaxHealth, 120)
        .with_base(StatKind::Health, 120)
        .with_base(StatKind::Attack, 15)
        .with_base(StatKind::Defense, 8)
        .with_base(StatKind::Speed, 12)
        .with_powers(gomu_gomu())
}

pub fn zoro() -> Combatant {
    Combatant::crew("Roronoa Zoro")
        .with_title("Swordsman")
        .with_base(StatKind::Level, 2)
        .with_base(StatKind::MaxHealth, 130)
        .with_base(StatKind::Health, 130)
        .with_base(StatKind::Attack, 18)
        .with_base(StatKind::Defense, 12)
        .with_base(StatKind::Speed, 10)
        .with_bounty(1_111_000_000)
        .with_strategy(StrategyConfig::swordsman())
}

pub fn nami() -> Combatant {
    Combatant::crew("Nami")
        .with_title("Navigator")
        .with_base(StatKind::MaxHealth, 90)
        .with_base(StatKind::Health, 90)
        .with_base(StatKind::Attack, 8)
        .with_base(StatKind::Defense, 6)
        .with_base(StatKind::Speed, 12)
        .with_bounty(366_000_000)
        .with_strategy(StrategyConfig::navigator())
}

pub fn sanji() -> Combatant {
    Combatant::crew("Sanji")
        .with_title("Cook")
        .with_base(StatKind::Level, 2)
        .with_base(StatKind::MaxHealth, 120)
        .with_base(StatKind::Health, 120)
        .with_base(StatKind::Attack, 15)
        .with_base(StatKind::Defense, 10)
        .with_base(StatKind::Speed, 14)
        .with_bounty(1_032_000_000)
        .with_strategy(StrategyConfig::brawler())
}

/// Strategy presets by name, as referenced from content files.
pub fn strategy(name: &str) -> Option<StrategyConfig> {
    match name {
        "enemy_default" => Some(StrategyConfig::enemy_default()),
        "swordsman" => Some(StrategyConfig::swordsman()),
        "navigator" => Some(StrategyConfig::navigator()),
        "brawler" => Some(StrategyConfig::brawler()),
        _ => None,
    }
}
