//! End-to-end generation scenarios through the public API

use approx::assert_abs_diff_eq;

use combo_core::{
    CombinationSettings, GroupFactor, Interpolation, Load, LoadCase, LoadCombinations, LoadGroup, LoadKey,
    LoadTable,
};

const WIND_SCALE: f64 = (69.0 / 25.0) * (69.0 / 25.0);

fn wind_loads() -> Vec<Load> {
    vec![
        Load::wind(10, "Wind 0", "W0", 25.0, 0.0, true),
        Load::wind(11, "Wind 90", "W90", 25.0, 90.0, true),
    ]
}

fn wind_group(angles: &[f64]) -> LoadGroup {
    LoadGroup::builder("Wind", "W")
        .loads([10, 11])
        .angles(angles.iter().copied())
        .scale_to(69.0)
        .wind()
        .build()
        .unwrap()
}

fn building() -> LoadCombinations {
    let mut combos = LoadCombinations::new();
    combos
        .add_group_with_loads(
            LoadGroup::factored("Permanent", "G", [1], [0.9, 1.2]).unwrap(),
            vec![Load::plain(1, "Dead", "G1")],
        )
        .unwrap();
    combos
        .add_group_with_loads(
            LoadGroup::builder("Imposed", "Q")
                .loads([2, 3])
                .exclusive()
                .factors([0.0, 1.5])
                .scale_to(5.0)
                .build()
                .unwrap(),
            vec![Load::scalable(2, "Office", "Q1", 2.5), Load::scalable(3, "Storage", "Q2", 5.0)],
        )
        .unwrap();
    combos
        .add_group_with_loads(wind_group(&[0.0, 30.0, 90.0, 180.0, 300.0]), wind_loads())
        .unwrap();
    combos
}

fn strength_case(combos: &LoadCombinations) -> LoadCase {
    let mut case = LoadCase::new("Strength", 1, "ULS");
    for name in ["Permanent", "Imposed", "Wind"] {
        let group = combos.group(name).unwrap().clone();
        case.add_group(GroupFactor::new(group, 1.0).unwrap()).unwrap();
    }
    case
}

#[test]
fn test_wind_scale_factor() {
    let load = Load::wind(10, "Wind 0", "W0", 25.0, 0.0, true);
    let table = LoadTable::from_loads(vec![load]).unwrap();
    let group = LoadGroup::builder("Wind", "W").load(10).angles([0.0]).scale_to(69.0).wind().build().unwrap();

    let cases = group.generate_cases(&table).unwrap();
    assert_eq!(cases.len(), 1);
    assert_abs_diff_eq!(cases[0][0].scale_factor, 7.6176, epsilon = 1e-9);
    assert_eq!(cases[0][0].info.is_scaled, Some(true));
}

#[test]
fn test_wind_group_directions() {
    let table = LoadTable::from_loads(wind_loads()).unwrap();
    let group = wind_group(&[0.0, 30.0, 180.0, 300.0]);
    let cases = group.generate_cases(&table).unwrap();
    assert_eq!(cases.len(), 4);

    // exact direction: a single load at full weight
    assert_eq!(cases[0].len(), 1);
    assert_eq!(cases[0][0].load_no(), 10);
    assert_abs_diff_eq!(cases[0][0].factor(), WIND_SCALE, epsilon = 1e-9);

    // between 0 and 90
    let (left, right) = (&cases[1][0], &cases[1][1]);
    assert_eq!((left.load_no(), right.load_no()), (10, 11));
    assert_abs_diff_eq!(left.rotational_factor, 0.953529, epsilon = 1e-5);
    assert_abs_diff_eq!(right.rotational_factor, 0.550520, epsilon = 1e-5);
    assert_eq!(left.info.angle, Some(30.0));

    // mirrored 0 degree load
    assert_eq!(cases[2].len(), 1);
    assert_eq!(cases[2][0].load_no(), 10);
    assert_eq!(cases[2][0].symmetry_factor(), -1.0);
    assert_eq!(cases[2][0].info.symmetric, Some(true));
    assert_abs_diff_eq!(cases[2][0].factor(), -WIND_SCALE, epsilon = 1e-9);

    // between the mirrored 90 degree load at 270 and the 0 degree load at 360
    let (left, right) = (&cases[3][0], &cases[3][1]);
    assert_eq!((left.load_no(), right.load_no()), (11, 10));
    assert_eq!(left.symmetry_factor(), -1.0);
    assert_eq!(right.symmetry_factor(), 1.0);
    assert_abs_diff_eq!(left.rotational_factor, 0.953529, epsilon = 1e-5);
    assert_abs_diff_eq!(right.rotational_factor, 0.550520, epsilon = 1e-5);
}

#[test]
fn test_directional_order_factors_then_angles() {
    let table = LoadTable::from_loads(vec![
        Load::rotatable(1, "Crane N", "CN", 10.0, 0.0, false),
        Load::rotatable(2, "Crane E", "CE", 10.0, 90.0, false),
    ])
    .unwrap();
    let group = LoadGroup::builder("Crane", "C")
        .loads([1, 2])
        .factors([-1.0, 1.0])
        .angles([90.0, 0.0])
        .build()
        .unwrap();
    assert_eq!(group.case_count(), 4);

    let cases = group.generate_cases(&table).unwrap();
    let order: Vec<(u32, f64, Option<f64>)> = cases
        .iter()
        .map(|case| {
            assert_eq!(case.len(), 1);
            (case[0].load_no(), case[0].base_factor, case[0].info.angle)
        })
        .collect();
    assert_eq!(
        order,
        vec![
            (1, -1.0, Some(0.0)),
            (2, -1.0, Some(90.0)),
            (1, 1.0, Some(0.0)),
            (2, 1.0, Some(90.0)),
        ]
    );
}

#[test]
fn test_rotational_linear_interpolation() {
    let table = LoadTable::from_loads(vec![
        Load::rotatable(1, "Crane N", "CN", 10.0, 0.0, false),
        Load::rotatable(2, "Crane E", "CE", 10.0, 120.0, false),
    ])
    .unwrap();
    let group = LoadGroup::builder("Crane", "C")
        .loads([1, 2])
        .angles([60.0])
        .interpolation(Interpolation::Linear)
        .build()
        .unwrap();

    let cases = group.generate_cases(&table).unwrap();
    assert_eq!(cases.len(), 1);
    assert_abs_diff_eq!(cases[0][0].rotational_factor, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(cases[0][1].rotational_factor, 0.5, epsilon = 1e-12);
    assert_eq!(cases[0][0].info.is_scaled, Some(false));
}

#[test]
fn test_case_count_law() {
    let mut combos = building();
    let case = strength_case(&combos);
    assert_eq!(case.combination_count(), 2 * 4 * 5);
    combos.add_case(case).unwrap();

    let generated = combos.generate("Strength").unwrap();
    assert_eq!(generated.len(), 40);
}

#[test]
fn test_cross_product_order() {
    let mut combos = building();
    combos.add_case(strength_case(&combos)).unwrap();
    let generated = combos.generate("Strength").unwrap();

    // the first group varies slowest, the last fastest
    let dead_factors: Vec<f64> = generated.iter().map(|c| c.total_factor(1).unwrap()).collect();
    assert!(dead_factors[..20].iter().all(|f| *f == 0.9));
    assert!(dead_factors[20..].iter().all(|f| *f == 1.2));

    assert_eq!(generated[0].load_nos(), vec![1, 2, 10]);
    assert_eq!(generated[5].load_nos(), vec![1, 3, 10]);
}

#[test]
fn test_exclusive_scaling_in_case() {
    let mut combos = building();
    combos.add_case(strength_case(&combos)).unwrap();
    let generated = combos.generate("Strength").unwrap();

    // third imposed case: office at 1.5, scaled from 2.5 to 5.0
    let combination = &generated[10];
    assert_eq!(combination.load_factors_for(2).len(), 1);
    assert_abs_diff_eq!(combination.total_factor(2).unwrap(), 3.0, epsilon = 1e-12);
}

#[test]
fn test_group_factor_applies_to_every_load() {
    let mut combos = building();
    let mut case = LoadCase::new("Service", 2, "SLS");
    case.add_group_factor(combos.group("Permanent").unwrap().clone(), 0.5).unwrap();
    combos.add_case(case).unwrap();

    let generated = combos.generate("Service").unwrap();
    let factors: Vec<f64> = generated.iter().map(|c| c.total_factor(1).unwrap()).collect();
    assert_eq!(factors, vec![0.45, 0.6]);
}

#[test]
fn test_shared_load_duplicates() {
    let mut combos = building();
    combos.add_group(LoadGroup::plain("Self weight", "SW", [1]).unwrap()).unwrap();

    let mut case = LoadCase::new("Check", 3, "CHK");
    case.add_group_factor(combos.group("Permanent").unwrap().clone(), 1.0).unwrap();
    case.add_group_factor(combos.group("Self weight").unwrap().clone(), 1.0).unwrap();
    combos.add_case(case).unwrap();

    let err = combos.generate("Check").unwrap_err();
    assert_eq!(err.error_code(), "DUPLICATE_LOAD");

    combos.settings.allow_duplicates = true;
    let generated = combos.generate("Check").unwrap();
    assert_eq!(generated.len(), 2);
    assert_eq!(generated[0].load_factors_for(1).len(), 2);
    assert_abs_diff_eq!(generated[0].total_factor(1).unwrap(), 1.9, epsilon = 1e-12);
    assert_eq!(combos.title(&generated[1]), "+2.200×Dead");
}

#[test]
fn test_generation_is_repeatable() {
    let mut combos = building();
    combos.add_case(strength_case(&combos)).unwrap();
    let first = combos.generate("Strength").unwrap();
    let second = combos.generate("Strength").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_wind_speed_change_reaches_generation() {
    let mut combos = building();
    combos.add_case(strength_case(&combos)).unwrap();

    combos.load_mut(10).unwrap().set_load_value(69.0).unwrap();
    let generated = combos.generate("Strength").unwrap();
    let at_zero = &generated[0];
    assert_abs_diff_eq!(at_zero.load_factors_for(10)[0].scale_factor, 1.0, epsilon = 1e-12);
}

#[test]
fn test_shared_load_resolves_to_one_definition() {
    let mut combos = building();
    let duplicate = LoadGroup::builder("Wind copy", "WC")
        .loads([10, 11])
        .angles([0.0])
        .scale_to(69.0)
        .wind()
        .build()
        .unwrap();
    combos.add_group_with_loads(duplicate, wind_loads()).unwrap();
    assert_eq!(combos.loads().len(), 5);
    assert_eq!(combos.load_exists(&LoadKey::Name("Wind 90")), Some(11));
}

#[test]
fn test_settings_from_toml_drive_generation() {
    let settings = CombinationSettings::from_toml_str(
        r#"
        allow_duplicates = true
        title_precision = 1
        "#,
    )
    .unwrap();
    let mut combos = LoadCombinations::with_settings(settings);
    combos.add_load(Load::plain(1, "Dead", "G")).unwrap();
    combos.add_group(LoadGroup::plain("A", "A", [1]).unwrap()).unwrap();
    combos.add_group(LoadGroup::plain("B", "B", [1]).unwrap()).unwrap();

    let mut case = LoadCase::new("Both", 1, "B");
    case.add_group_factor(combos.group("A").unwrap().clone(), 1.0).unwrap();
    case.add_group_factor(combos.group("B").unwrap().clone(), 0.5).unwrap();
    combos.add_case(case).unwrap();

    let generated = combos.generate_all().unwrap();
    assert_eq!(generated.len(), 1);
    assert_eq!(combos.title(&generated[0].1[0]), "+1.5×Dead");
}

#[test]
fn test_empty_case() {
    let mut combos = building();
    let case = LoadCase::new("Empty", 9, "E");
    assert_eq!(case.combination_count(), 0);
    combos.add_case(case).unwrap();
    assert!(combos.generate("Empty").unwrap().is_empty());
}
