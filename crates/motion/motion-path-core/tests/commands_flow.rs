use std::sync::{Arc, Mutex};

use motion_path_core::{
    create_path, delete_path, encode, execute, export_path, import_path, CommandContext, CommandResponse, Config, PathCommand, PathDefinition,
    PathInstance, PathRegistry, PositionSink, RecordingSink, RotationSink, SavedPathStore,
    TickOutcome, Vec2, Vec3,
};

const ACTOR: &str = "steve";

/// Sink shared between the command context and a `PathInstance`.
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<RecordingSink>>);

impl PositionSink for SharedSink {
    fn force_position(&mut self, position: Vec3) {
        self.0.lock().unwrap().force_position(position);
    }
}

impl RotationSink for SharedSink {
    fn force_rotation(&mut self, yaw: f32, pitch: f32) {
        self.0.lock().unwrap().force_rotation(yaw, pitch);
    }
}

struct Host {
    registry: PathRegistry,
    store: SavedPathStore,
    config: Config,
    sink: SharedSink,
}

impl Host {
    fn new(config: Config) -> Self {
        Self {
            registry: PathRegistry::new(),
            store: SavedPathStore::new(),
            config,
            sink: SharedSink::default(),
        }
    }

    fn run(&mut self, command: PathCommand) -> CommandResponse {
        let mut sink = self.sink.clone();
        let mut ctx = CommandContext::new(&self.registry, &self.store, &self.config, &mut sink);
        execute(&mut ctx, ACTOR, &command)
    }

    fn ok(&mut self, command: PathCommand) -> String {
        let resp = self.run(command.clone());
        assert!(resp.success, "{command:?} failed: {}", resp.message);
        resp.message
    }

    fn recorded(&self) -> RecordingSink {
        self.sink.0.lock().unwrap().clone()
    }
}

fn add(x: f32, y: f32, z: f32) -> PathCommand {
    PathCommand::AddPoint {
        point: Vec3::new(x, y, z),
    }
}

#[test]
fn create_edit_generate_play() {
    let mut host = Host::new(Config::default());
    host.ok(PathCommand::Create { interval: Some(4) });
    assert_eq!(
        host.ok(PathCommand::Easing {
            mode: Some("LINEAR".into())
        }),
        "Easing set to Linear"
    );
    assert_eq!(host.ok(add(0.0, 0.0, 0.0)), "Point (0, 0, 0) added.");
    host.ok(add(10.0, 0.0, 0.0));
    host.ok(PathCommand::AddRotation {
        rotation: Vec2::new(0.0, 0.0),
    });
    host.ok(PathCommand::AddRotation {
        rotation: Vec2::new(90.0, 0.0),
    });

    assert_eq!(
        host.ok(PathCommand::Points),
        "Points (2):\n(0, 0, 0), (10, 0, 0)"
    );
    assert_eq!(
        host.run(PathCommand::Generated).message,
        "Path not generated yet! Use 'motionpath generate'"
    );
    assert_eq!(host.ok(PathCommand::Generate), "Motion path generated.");
    assert_eq!(
        host.run(PathCommand::Generate),
        CommandResponse::fail("Path already generated.")
    );
    assert_eq!(
        host.ok(PathCommand::Generated),
        "Generated points (4):\n(0, 0, 0), (2.5, 0, 0), (5, 0, 0), (10, 0, 0)"
    );
    assert!(host
        .ok(PathCommand::GeneratedRotations)
        .starts_with("Generated rotation (4):"));

    let path = host.registry.lookup(ACTOR).unwrap();
    let mut instance = PathInstance::new(ACTOR, path, Box::new(host.sink.clone()));
    instance.init(&host.registry);

    assert_eq!(host.ok(PathCommand::Start), "Started motion.");
    assert_eq!(
        instance.tick(&host.registry),
        TickOutcome::Emitted { frame: 1 }
    );
    assert_eq!(host.ok(PathCommand::Pause), "Paused motion.");
    assert_eq!(instance.tick(&host.registry), TickOutcome::Idle);
    assert_eq!(host.ok(PathCommand::Stop), "Stopped motion.");

    assert_eq!(host.ok(PathCommand::Restart), "Restarting motion.");
    let recorded = host.recorded();
    assert_eq!(recorded.positions().last(), Some(&Vec3::new(0.0, 0.0, 0.0)));

    instance.dispose(&host.registry);
    assert_eq!(
        host.run(PathCommand::Points).message,
        "You haven't created a motion path yet! Use 'motionpath create [interval]'"
    );
}

#[test]
fn removal_messages() {
    let mut host = Host::new(Config::default());
    host.ok(PathCommand::Create { interval: None });
    for i in 0..3 {
        host.ok(add(i as f32, 0.0, 0.0));
    }
    assert_eq!(host.ok(PathCommand::RemoveFirst), "First position removed.");
    assert_eq!(
        host.ok(PathCommand::RemoveAt { index: 1 }),
        "Vector at position 1 removed."
    );
    assert!(!host.run(PathCommand::RemoveAt { index: 7 }).success);
    assert_eq!(host.ok(PathCommand::RemoveLast), "Last position removed.");
    assert_eq!(
        host.run(PathCommand::RemoveLast),
        CommandResponse::fail("There are no points to remove.")
    );
    assert_eq!(host.ok(PathCommand::Clear), "Path cleared.");

    host.ok(PathCommand::AddRotation {
        rotation: Vec2::new(5.0, 5.0),
    });
    assert_eq!(
        host.ok(PathCommand::RemoveLastRotation),
        "Last rotation removed."
    );
    assert_eq!(
        host.run(PathCommand::RemoveFirstRotation),
        CommandResponse::fail("There are no points to remove.")
    );
    assert_eq!(host.ok(PathCommand::ClearRotations), "Rotations cleared.");
    assert_eq!(host.ok(PathCommand::Delete), "Path deleted.");
    assert_eq!(
        host.run(PathCommand::Delete),
        CommandResponse::fail("You don't have a motion path!")
    );
}

#[test]
fn settings_queries() {
    let mut host = Host::new(Config::default());
    host.ok(PathCommand::Create { interval: Some(12) });
    assert_eq!(
        host.ok(PathCommand::Delay { value: Some(3) }),
        "Delay is now 3s"
    );
    assert_eq!(host.ok(PathCommand::Delay { value: None }), "Current delay: 3s");
    assert!(!host.run(PathCommand::Delay { value: Some(-1) }).success);
    assert_eq!(
        host.ok(PathCommand::Interval { value: Some(30) }),
        "Interval is now 30"
    );
    assert_eq!(
        host.ok(PathCommand::Easing { mode: None }),
        "Current easing: Bezier\nTo change it, use 'motionpath easing <type>'"
    );
}

#[test]
fn limits_from_small_config() {
    let config: Config = motion_test_fixtures::configs::load("small").unwrap();
    config.validate().unwrap();
    let mut host = Host::new(config);
    assert_eq!(
        host.ok(PathCommand::Create { interval: None }),
        "Motion path created! Interval: 10"
    );
    for i in 0..4 {
        host.ok(add(i as f32, 0.0, 0.0));
    }
    assert_eq!(
        host.run(add(9.0, 9.0, 9.0)),
        CommandResponse::fail("You've already reached the vector limit (4 points).")
    );

    // A saved helix has more points than this host allows.
    let helix: PathDefinition = motion_test_fixtures::paths::load("helix").unwrap();
    host.store.save(ACTOR, encode(&helix));
    let resp = host.run(PathCommand::Import { regenerate: true });
    assert!(!resp.success);
    assert!(resp.message.starts_with("Malformed data object:"));
    assert_eq!(
        host.registry
            .lookup(ACTOR)
            .unwrap()
            .specified_points()
            .len(),
        4,
        "rejected import keeps the old path"
    );
}

#[test]
fn export_then_import_restores_and_replaces() {
    let mut host = Host::new(Config::default());
    assert_eq!(
        host.run(PathCommand::Import { regenerate: true }),
        CommandResponse::fail("No MotionPath has been saved for the target")
    );
    assert_eq!(
        host.run(PathCommand::Export),
        CommandResponse::fail("You haven't created a motion path yet!")
    );

    host.ok(PathCommand::Create { interval: Some(6) });
    host.ok(add(0.0, 0.0, 0.0));
    host.ok(add(3.0, 3.0, 3.0));
    host.ok(PathCommand::Delay { value: Some(1) });
    assert_eq!(
        host.ok(PathCommand::Export),
        "MotionPath saved to server memory."
    );
    let saved = host.registry.lookup(ACTOR).unwrap().definition();

    host.ok(PathCommand::Clear);
    let old = host.registry.lookup(ACTOR).unwrap();
    let mut instance = PathInstance::new(ACTOR, old.clone(), Box::new(host.sink.clone()));
    instance.init(&host.registry);

    host.ok(PathCommand::Import { regenerate: true });
    let restored = host.registry.lookup(ACTOR).unwrap();
    assert!(!Arc::ptr_eq(&old, &restored));
    assert_eq!(restored.definition(), saved);
    assert!(restored.is_generated());

    // The instance picks up the replacement on its next tick.
    instance.tick(&host.registry);
    assert!(Arc::ptr_eq(instance.path(), &restored));

    host.ok(PathCommand::Import { regenerate: false });
    assert!(!host.registry.lookup(ACTOR).unwrap().is_generated());
}

#[test]
fn ungeneratable_save_still_imports() {
    let mut host = Host::new(Config::default());
    host.ok(PathCommand::Create { interval: Some(5) });
    host.ok(add(1.0, 2.0, 3.0));
    host.ok(PathCommand::Export);
    let saved = host.registry.lookup(ACTOR).unwrap().definition();

    // A single Bezier point cannot be generated, but the blob itself is valid.
    let message = host.ok(PathCommand::Import { regenerate: true });
    assert!(
        message.starts_with("Successfully created MotionPath from saved data"),
        "{message}"
    );
    assert!(message.contains("Path not generated"), "{message}");
    let imported = host.registry.lookup(ACTOR).unwrap();
    assert_eq!(imported.definition(), saved);
    assert!(!imported.is_generated());

    // An empty path round-trips the same way.
    host.ok(PathCommand::Clear);
    host.ok(PathCommand::Export);
    let message = host.ok(PathCommand::Import { regenerate: true });
    assert!(message.contains("Path not generated"), "{message}");
    assert!(host
        .registry
        .lookup(ACTOR)
        .unwrap()
        .specified_points()
        .is_empty());
}

#[test]
fn registry_level_commands_as_free_functions() {
    let registry = PathRegistry::new();
    let store = SavedPathStore::new();
    let config = Config::default();

    assert!(create_path(&registry, &config, "alex", Some(3)).success);
    assert!(!create_path(&registry, &config, "alex", None).success);
    let path = registry.lookup("alex").unwrap();
    path.add_point(Vec3::new(0.0, 0.0, 0.0)).unwrap();
    path.add_point(Vec3::new(6.0, 0.0, 0.0)).unwrap();

    assert!(export_path(&registry, &store, "alex").success);
    assert_eq!(store.len(), 1);
    assert_eq!(
        import_path(&registry, &store, &config, "alex", true),
        CommandResponse::ok("Successfully created MotionPath from saved data")
    );
    assert!(registry.lookup("alex").unwrap().is_generated());
    assert_eq!(registry.keys(), vec!["alex".to_string()]);

    assert_eq!(delete_path(&registry, "alex"), CommandResponse::ok("Path deleted."));
    assert!(registry.is_empty());
    assert!(!import_path(&registry, &store, &config, "sam", true).success);
}

#[test]
fn corrupt_save_is_rejected() {
    let mut host = Host::new(Config::default());
    host.store.save(ACTOR, vec![0u8; 10]);
    let resp = host.run(PathCommand::Import { regenerate: true });
    assert!(!resp.success);
    assert!(resp.message.contains("Truncated path data"), "{}", resp.message);
    assert!(host.registry.is_empty());
}

#[test]
fn default_config_fixture_matches_defaults() {
    let json = motion_test_fixtures::configs::json("default").unwrap();
    assert_eq!(Config::from_json_str(&json).unwrap(), Config::default());
}
