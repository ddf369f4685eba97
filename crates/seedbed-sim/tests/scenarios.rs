//! End-to-end scenarios for the garden simulation.
//!
//! These drive the public host surface only: commands, ticks, snapshots and
//! events. Randomness is scripted so every outcome is fixed.

use seedbed_sim::prelude::*;

const CENTER: TilePos = TilePos { x: 10, y: 7 };

fn sim_with(rng: ScriptedRandom) -> Simulation {
    Simulation::with_random(SimulationConfig::default(), Box::new(rng))
}

fn quiet_sim() -> Simulation {
    sim_with(ScriptedRandom::never())
}

fn quiet_sim_with_money(money: u64) -> Simulation {
    let mut config = SimulationConfig::default();
    config.economy.starting_money = money;
    Simulation::with_random(config, Box::new(ScriptedRandom::never()))
}

/// Tick until the plant on `pos` is harvestable, at most `limit` ticks.
fn grow_to_harvest(sim: &mut Simulation, pos: TilePos, dt: f32, limit: usize) {
    for _ in 0..limit {
        if sim.garden().plant_at(pos).is_some_and(Plant::is_harvestable) {
            return;
        }
        sim.tick(dt);
    }
    panic!("plant at {pos} did not ripen within {limit} ticks");
}

mod growth {
    use super::*;

    #[test]
    fn carrot_unwatered_after_four_short_ticks() {
        let mut sim = quiet_sim();
        sim.plant_seed(CENTER, PlantKind::Carrot).expect("planted");
        for _ in 0..4 {
            sim.tick(2.0);
        }
        let plant = sim.garden().plant_at(CENTER).expect("carrot");
        // Dry carrot grows at half rate: 8 s * (1/8 * 0.5) = 0.5.
        assert_eq!(plant.stage(), GrowthStage::Seed);
        assert!((plant.growth_progress() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn carrot_watered_once_reaches_sprout() {
        let mut sim = quiet_sim();
        sim.plant_seed(CENTER, PlantKind::Carrot).expect("planted");
        sim.water_plant(CENTER).expect("watered");
        let mut stages = Vec::new();
        for _ in 0..4 {
            sim.tick(2.0);
            stages.push(sim.garden().plant_at(CENTER).map(Plant::stage));
        }
        assert_eq!(stages.last().copied().flatten(), Some(GrowthStage::Sprout));
        assert_eq!(
            sim.garden().plant_at(CENTER).map(Plant::growth_progress),
            Some(0.0),
            "progress resets on advance"
        );
    }

    #[test]
    fn water_level_sets_growth_rate() {
        let mut sim = quiet_sim();
        let dry = CENTER;
        let wet = CENTER.offset(1, 0);
        sim.plant_seed(dry, PlantKind::Corn).expect("planted");
        sim.plant_seed(wet, PlantKind::Corn).expect("planted");
        for _ in 0..4 {
            sim.water_plant(wet).expect("watered");
        }

        let garden = sim.garden();
        let base = 1.0 / 15.0;
        let dry_rate = garden.plant_at(dry).map(Plant::growth_rate).expect("dry");
        let wet_rate = garden.plant_at(wet).map(Plant::growth_rate).expect("wet");
        assert!((dry_rate - base * 0.5).abs() < 1e-6);
        assert!((wet_rate - base * 1.5).abs() < 1e-6);
    }

    #[test]
    fn stages_never_regress_over_a_long_run() {
        let mut sim = Simulation::new(SimulationConfig::seeded(77));
        let positions: Vec<TilePos> = (8..13).map(|x| TilePos::new(x, 7)).collect();
        for (i, &pos) in positions.iter().enumerate() {
            sim.plant_seed(pos, PlantKind::all()[i]).expect("planted");
        }

        let mut last: Vec<GrowthStage> = vec![GrowthStage::Seed; positions.len()];
        for step in 0..2_000 {
            if step % 7 == 0 {
                for &pos in &positions {
                    let _ = sim.water_plant(pos);
                }
            }
            sim.tick(0.5);
            for (i, &pos) in positions.iter().enumerate() {
                if let Some(plant) = sim.garden().plant_at(pos) {
                    assert!(plant.stage() >= last[i], "stage regressed at {pos}");
                    assert!(plant.water_level() <= plant.max_water());
                    last[i] = plant.stage();
                }
            }
        }
        assert!(sim.garden().is_consistent());
    }
}

mod garden {
    use super::*;

    #[test]
    fn planting_on_unplantable_soil_is_rejected() {
        let mut sim = quiet_sim();
        let corner = TilePos::new(0, 0);
        assert_eq!(
            sim.plant_seed(corner, PlantKind::Carrot),
            Err(ActionRejected::UnplantableSoil(corner))
        );
        assert!(sim.garden().plant_at(corner).is_none());
        assert_eq!(sim.garden().plant_count(), 0);
    }

    #[test]
    fn pest_destroys_both_of_two_plants_then_stays_idle() {
        let mut sim = quiet_sim();
        let a = CENTER;
        let b = CENTER.offset(0, 1);
        sim.plant_seed(a, PlantKind::Carrot).expect("planted");
        sim.plant_seed(b, PlantKind::Tomato).expect("planted");

        let mut destroyed = sim.trigger_pest_infestation().expect("triggered");
        destroyed.sort();
        assert_eq!(destroyed, vec![a, b]);
        assert_eq!(sim.garden().plant_count(), 0);
        assert!(sim.garden().is_consistent());

        sim.plant_seed(a, PlantKind::Corn).expect("planted");
        assert_eq!(sim.trigger_pest_infestation(), None);
        assert!(sim.garden().plant_at(a).is_some(), "no damage while active");

        sim.tick(30.0);
        assert!(!sim.garden().pest_active());
    }

    #[test]
    fn rain_waters_every_plant() {
        let mut sim = quiet_sim();
        sim.plant_seed(CENTER, PlantKind::Carrot).expect("planted");
        sim.plant_seed(CENTER.offset(-1, 0), PlantKind::Tomato)
            .expect("planted");
        sim.trigger_rain();

        for (_, plant) in sim.garden().plants() {
            assert_eq!(plant.water_level(), 1);
        }
        assert!(sim.garden().is_raining());
        assert!(sim.drain_events().contains(&SimEvent::RainStarted));
    }

    #[test]
    fn expansion_unlocks_a_larger_square() {
        let mut sim = quiet_sim_with_money(1_000);
        let outside = TilePos::new(6, 3);
        assert!(sim.plant_seed(outside, PlantKind::Carrot).is_err());

        sim.purchase_expansion().expect("expanded");
        assert!(sim.plant_seed(outside, PlantKind::Carrot).is_ok());
        assert_eq!(sim.economy().total_spent(), 200);
    }
}

mod market {
    use super::*;

    #[test]
    fn harvest_removes_plant_and_credits_money() {
        let mut sim = quiet_sim();
        sim.plant_seed(CENTER, PlantKind::Tomato).expect("planted");
        grow_to_harvest(&mut sim, CENTER, 5.0, 100);

        let before = sim.economy().money();
        let value = sim.harvest_plant(CENTER).expect("harvested");
        assert!(value >= 1);
        assert_eq!(sim.economy().money(), before + value);
        assert!(sim.garden().plant_at(CENTER).is_none());
        assert_eq!(
            sim.garden().tile(CENTER).and_then(Tile::plant),
            None,
            "tile no longer references the plant"
        );
        assert_eq!(sim.garden().plant_count(), 0);
        assert!(sim.garden().is_consistent());
    }

    #[test]
    fn boom_while_crash_active_applies_only_boom() {
        let mut sim = quiet_sim();
        sim.plant_seed(CENTER, PlantKind::Carrot).expect("planted");

        assert!(sim.trigger_market_crash());
        assert!(sim.trigger_market_boom());
        assert!(sim.economy().is_boom());
        assert!(sim.economy().is_crash());

        let plant = sim.garden().plant_at(CENTER).expect("carrot");
        // Prices: 15 -> crash 10 -> boom 15; value floor(15 * 1.5).
        assert_eq!(sim.economy().current_price(PlantKind::Carrot), 15);
        assert_eq!(sim.economy().calculate_value(plant), 22);
    }

    #[test]
    fn spending_more_than_balance_fails_cleanly() {
        let mut sim = quiet_sim_with_money(150);
        let money = sim.economy().money();
        assert!(sim.purchase_expansion().is_err());
        assert_eq!(sim.economy().money(), money);
        assert_eq!(sim.garden().expansions(), 1);
    }

    #[test]
    fn milestones_reported_once() {
        let mut sim = quiet_sim();
        for x in 8..13 {
            sim.plant_seed(TilePos::new(x, 7), PlantKind::Corn)
                .expect("planted");
        }
        for x in 8..13 {
            grow_to_harvest(&mut sim, TilePos::new(x, 7), 5.0, 200);
            sim.harvest_plant(TilePos::new(x, 7)).expect("harvested");
        }
        sim.tick(0.1);
        sim.tick(0.1);

        let reached: Vec<u64> = sim
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                SimEvent::MilestoneReached { threshold, .. } => Some(threshold),
                _ => None,
            })
            .collect();
        assert_eq!(reached, vec![100]);
        assert_eq!(sim.stats().plants_harvested, 5);
    }
}

mod clock {
    use super::*;

    #[test]
    fn day_rollover_drifts_prices_and_rolls_events() {
        let mut sim = sim_with(ScriptedRandom::always());
        sim.tick(300.0);
        assert_eq!(sim.day(), 2);
        assert_eq!(
            sim.economy()
                .market_price(PlantKind::Carrot)
                .map(|p| p.history.len()),
            Some(1)
        );
        assert!(sim.economy().is_boom());
        assert!(sim.garden().pest_active());
    }

    #[test]
    fn snapshot_serializes() {
        let mut sim = Simulation::new(SimulationConfig::seeded(3));
        sim.plant_seed(CENTER, PlantKind::Sunflower).expect("planted");
        sim.tick(1.0);
        let json = sim.snapshot().to_json_pretty().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["day"], 1);
        assert_eq!(value["plants"][0]["kind"], "sunflower");
        assert_eq!(value["economy"]["market"]["base_prices"]["sunflower"], 40);
    }
}
