mod common;

use common::{ScriptedModel, SimulationBuilder};
use wormsim_core::activation::ActivationModel;
use wormsim_core::config::AppConfig;
use wormsim_core::simulation::Simulation;
use wormsim_data::Point;

// A still worm sits at the canvas center, (320, 180).

#[test]
fn test_food_within_consumption_radius_is_eaten() {
    let mut sim = SimulationBuilder::new()
        .with_food_at(335.0, 180.0)
        .with_food_at(340.0, 180.0)
        .build();

    let report = sim.tick();

    assert_eq!(report.contact.consumed, 2);
    assert!(report.contact.sensed);
    assert!(sim.food().is_empty());
    assert_eq!(sim.metrics().food_eaten(), 2);
    assert_eq!(sim.model().food_flags, [true]);
}

#[test]
fn test_food_in_sensing_band_stays_and_raises_flag() {
    let mut sim = SimulationBuilder::new()
        .with_food_at(350.0, 180.0)
        .with_food_at(320.0, 230.0)
        .build();

    let report = sim.tick();

    assert_eq!(report.contact.consumed, 0);
    assert!(report.contact.sensed);
    assert_eq!(sim.food().len(), 2);
    assert_eq!(sim.model().food_flags, [true]);
}

#[test]
fn test_distant_food_leaves_flag_alone() {
    let mut sim = SimulationBuilder::new().with_food_at(371.0, 180.0).build();

    let report = sim.tick();

    assert!(!report.contact.sensed);
    assert!(sim.model().food_flags.is_empty());
    assert_eq!(sim.food().len(), 1);
}

#[test]
fn test_model_advances_once_per_tick() {
    let mut sim = SimulationBuilder::new().build();
    for _ in 0..7 {
        sim.tick();
    }
    assert_eq!(sim.model().advances, 7);
    assert_eq!(sim.tick_count(), 7);
}

#[test]
fn test_accumulators_drive_the_body() {
    let model = ScriptedModel::with_outputs(vec![(40.0, 40.0)]);
    let mut sim = SimulationBuilder::new().with_model(model).build();

    let mut last = sim.locomotion().target();
    for _ in 0..30 {
        let report = sim.tick();
        assert_eq!((report.left, report.right), (40.0, 40.0));
        assert_eq!(sim.chain().segments()[0].position, report.target);
        last = report.target;
    }

    // no turn, so the worm heads straight along +x
    assert!(last.x > 320.0);
    assert!((last.y - 180.0).abs() < 1e-9);
    let tail = sim.chain().segments()[1].position;
    assert!(tail.x < last.x);
}

#[test]
fn test_bundled_connectome_long_run_stays_finite() {
    let mut config = AppConfig::default();
    config.world.seed = Some(3);
    let mut sim = Simulation::with_connectome(&config).unwrap();
    sim.add_food(Point::new(100.0, 100.0));
    sim.add_food(Point::new(500.0, 300.0));

    for _ in 0..2000 {
        let report = sim.tick();
        assert!(report.target.is_finite());
        assert!((0.0..640.0).contains(&report.target.x));
        assert!((0.0..360.0).contains(&report.target.y));
    }
    assert!(sim.chain().positions().all(|p| p.is_finite()));
    assert!(sim.model().fire_threshold() > 0.0);
    assert_eq!(sim.metrics().tick_count(), 2000);
}

#[test]
fn test_frame_layers_in_order() {
    let model = ScriptedModel::still()
        .with_neuron("AIYL", 50.0)
        .with_synapse("AIYL", "AIYL", 1.0);
    let mut sim = SimulationBuilder::new()
        .with_model(model)
        .with_food_at(10.0, 10.0)
        .build();
    sim.tick();

    let frame = sim.frame();
    let sizes: Vec<usize> = frame.layers().map(|layer| layer.len()).collect();
    // static: disc + self-loop, activity: glow, food: one pellet,
    // body: line + 10 joints + head
    assert_eq!(sizes, [2, 1, 1, 12]);
}
