use super::*;

#[test]
fn test_equal_ratings_are_even() {
    // Equal ratings should give 50% win probability
    assert_eq!(win_probability(1500.0, 1500.0), 0.5);
    assert_eq!(win_probability(-20.0, -20.0), 0.5);
}

#[test]
fn test_probabilities_are_complementary() {
    let ratings = [-800.0, 0.0, 1250.0, 1300.0, 1508.0, 1627.0, 2900.5];
    for &a in &ratings {
        for &b in &ratings {
            let sum = win_probability(a, b) + win_probability(b, a);
            assert!((sum - 1.0).abs() < 1e-12, "p({a},{b}) + p({b},{a}) = {sum}");
        }
    }
}

#[test]
fn test_known_gap() {
    // 400 points is 10:1 odds
    let p = win_probability(1700.0, 1300.0);
    assert!((p - 10.0 / 11.0).abs() < 1e-12);

    let p = win_probability(1400.0, 1200.0);
    assert!((p - 0.7597).abs() < 1e-4);
}

#[test]
fn test_stronger_side_favoured() {
    assert!(win_probability(1627.0, 1250.0) > 0.5);
    assert!(win_probability(1250.0, 1627.0) < 0.5);
}

#[test]
fn test_extreme_gap_stays_open_interval() {
    let p = win_probability(3000.0, 0.0);
    assert!(p < 1.0 && p > 0.99);
    let q = win_probability(0.0, 3000.0);
    assert!(q > 0.0 && q < 0.01);
}

#[test]
fn test_custom_scale() {
    let model = EloModel::with_scale(200.0).unwrap();
    // 200 points on a 200 scale is the same as 400 on the default one
    let p = model.win_probability(1700.0, 1500.0);
    assert!((p - win_probability(1700.0, 1300.0)).abs() < 1e-12);
    assert_eq!(model.scale(), 200.0);
}

#[test]
fn test_invalid_scale_rejected() {
    for scale in [0.0, -400.0, f64::NAN, f64::INFINITY] {
        let err = EloModel::with_scale(scale).unwrap_err();
        assert!(err.is_invalid_input());
    }
}

#[test]
fn test_f64_saturation_limits() {
    assert!(win_probability(6000.0, 0.0) < 1.0);
    assert_eq!(win_probability(7000.0, 0.0), 1.0);
    // The underdog side keeps a tiny positive value until 10^x overflows
    assert!(win_probability(0.0, 7000.0) > 0.0);
    assert_eq!(win_probability(0.0, 130_000.0), 0.0);
    assert_eq!(win_probability(130_000.0, 0.0), 1.0);
}
