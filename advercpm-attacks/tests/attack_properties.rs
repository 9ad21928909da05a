/// Behavioural checks of the attacks through the same entry points the
/// runner uses: `available_attacks`, `build_attack` and `Attack::apply`.
use advercpm_attacks::{available_attacks, build_attack, Attack, AttackError, AttackSpec, Parameters};
use shared::io::parse_frame_str;
use shared::{Frame, VehicleId};

const FRAME: &str = r#"
ego_speed: 11.4
vehicles:
  641:
    angle: [0.0, 0.0, 0.0]
    center: [0.0, 0.0, 0.7]
    extent: [2.4, 1.0, 0.75]
    location: [0.0, 0.0, 0.0]
    speed: 11.4
  650:
    angle: [0.0, 180.0, 0.0]
    center: [0.0, 0.0, 0.7]
    extent: [2.2, 0.9, 0.7]
    location: [25.0, 3.5, 0.0]
    speed: 9.0
"#;

fn frame() -> Frame {
    parse_frame_str(FRAME).unwrap()
}

fn spec(kind: &str, yaml: &str) -> AttackSpec {
    let parameters: Parameters = if yaml.is_empty() {
        Parameters::new()
    } else {
        serde_yaml::from_str(yaml).unwrap()
    };
    AttackSpec::new(kind, parameters)
}

fn location(frame: &Frame, id: i64) -> [f64; 3] {
    frame.vehicles[&VehicleId::Int(id)].position().unwrap()
}

#[test]
fn test_add_object_example() {
    let mut attack = build_attack(
        &spec("add_object", "ego_id: 641\nmalicious_id: 650\ndistance_ahead: 10\nobject_id: 9999"),
        None,
    )
    .unwrap();
    let attacked = attack.apply(frame());

    assert_eq!(location(&attacked, 9999), [10.0, 0.0, 0.0]);
    assert_eq!(attacked.extra, frame().extra);
}

#[test]
fn test_add_object_containment() {
    let mut attack = build_attack(&spec("add_object", "ego_id: 641\nmalicious_id: 99"), None).unwrap();
    assert_eq!(attack.apply(frame()), frame());

    let mut attack = build_attack(&spec("add_object", "ego_id: 1\nmalicious_id: 650"), None).unwrap();
    assert_eq!(attack.apply(frame()), frame());
}

#[test]
fn test_add_object_is_deterministic() {
    let spec = spec("add_object", "ego_id: 641\nmalicious_id: 650");
    let a = build_attack(&spec, None).unwrap().apply(frame());
    let b = build_attack(&spec, None).unwrap().apply(frame());
    assert_eq!(a, b);
}

#[test]
fn test_remove_object_example() {
    let mut attack = build_attack(&spec("remove_object", "mode: targeted\nomitted_id: 650"), None).unwrap();
    let attacked = attack.apply(frame());

    assert_eq!(attacked.vehicles.len(), 1);
    assert_eq!(attacked.vehicles[&VehicleId::Int(641)], frame().vehicles[&VehicleId::Int(641)]);
    assert_eq!(attacked.removed, vec![VehicleId::Int(650)]);

    let again = attack.apply(attacked.clone());
    assert_eq!(again, attacked);
}

#[test]
fn test_white_noise_zero_sigma() {
    let mut attack = build_attack(&spec("white_noise", "sigma: 0"), None).unwrap();
    assert_eq!(attack.apply(frame()), frame());
}

#[test]
fn test_burst_zero_lambda() {
    let mut attack = build_attack(&spec("burst", "lambda: 0\nmax_jitter: 50"), None).unwrap();
    for _ in 0..100 {
        assert_eq!(attack.apply(frame()), frame());
    }
}

#[test]
fn test_burst_out_of_range_parameters() {
    let mut attack = build_attack(&spec("burst", "lambda: .inf"), Some(3)).unwrap();
    assert_eq!(attack.apply(frame()), frame());

    let mut attack = build_attack(&spec("burst", "lambda: 50\nmax_jitter: 1e308"), Some(3)).unwrap();
    let attacked = attack.apply(frame());
    assert!(location(&attacked, 641).iter().all(|c| c.is_finite()));
}

#[test]
fn test_seeded_attacks_are_reproducible() {
    let specs = [
        spec("white_noise", "sigma: 1.0\napply_velocity: true"),
        spec("burst", "lambda: 1.5"),
        spec("drift", "mode: biased\nsigma: 0.5"),
        spec("remove_object", "mode: random"),
    ];
    for spec in specs.iter() {
        let mut a = build_attack(spec, Some(2024)).unwrap();
        let mut b = build_attack(spec, Some(2024)).unwrap();
        for _ in 0..5 {
            assert_eq!(a.apply(frame()), b.apply(frame()), "{}", spec.kind);
        }
    }
}

#[test]
fn test_linear_drift_displacement() {
    for (direction, rate) in [("NE", 0.5), ("W", 1.25), ("SE", 2.0)].iter() {
        let mut attack = build_attack(
            &spec(
                "drift",
                &format!("direction: {}\ndrift_rate: {}\napply_to_all: false\ntarget_id: 650", direction, rate),
            ),
            None,
        )
        .unwrap();
        let [x0, y0, z0] = location(&frame(), 650);
        for n in 1..=20 {
            let attacked = attack.apply(frame());
            let [x, y, z] = location(&attacked, 650);
            let displacement = ((x - x0).powi(2) + (y - y0).powi(2)).sqrt();

            assert!((displacement - rate * n as f64).abs() < 1e-9, "{} after {}", direction, n);
            assert_eq!(z, z0);
            assert_eq!(location(&attacked, 641), location(&frame(), 641));
        }
    }
}

#[test]
fn test_drift_defaults_touch_every_vehicle() {
    let mut attack = build_attack(&spec("drift", ""), None).unwrap();
    let attacked = attack.apply(frame());
    for id in [641, 650].iter() {
        assert_ne!(location(&attacked, *id), location(&frame(), *id));
    }
}

#[test]
fn test_unknown_parameters_are_ignored() {
    for kind in available_attacks() {
        let spec = spec(kind, "definitely_not_a_parameter: [1, 2]\nsigma: {nested: true}");
        assert!(build_attack(&spec, Some(1)).is_ok(), "{}", kind);
    }
}

#[test]
fn test_unknown_attack_message() {
    let err = match build_attack(&spec("nonexistent", ""), None) {
        Err(err) => err,
        Ok(_) => panic!("nonexistent attack was built"),
    };
    let message = err.to_string();

    assert!(matches!(err, AttackError::UnknownAttack { .. }));
    assert!(message.contains("nonexistent"));
    for kind in available_attacks() {
        assert!(message.contains(kind), "{} missing from {}", kind, message);
    }
    assert_eq!(err.available().len(), available_attacks().len());
}

#[test]
fn test_attack_spec_from_config_block() {
    let spec: AttackSpec =
        serde_yaml::from_str("type: white_noise\nparameters:\n  sigma: 0.25\n").unwrap();
    assert_eq!(spec.kind, "white_noise");
    assert_eq!(spec.parameters.f64_or("sigma", 0.5), 0.25);

    let bare: AttackSpec = serde_yaml::from_str("type: burst\n").unwrap();
    assert_eq!(bare.parameters, Parameters::new());
}
