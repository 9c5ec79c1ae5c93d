//! Property-based soundness tests for the zonotope domain.
//!
//! For any zonotope and any perturbation vector in `[-1, 1]^m`, the concrete
//! point must lie inside the computed bounds, and every operation must keep
//! that property for its result.

use ndarray::Array2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use zonotope_rs::layer::{DenseLayer, Network};
use zonotope_rs::zonotope::{equalize_generators, Zonotope};
use zonotope_rs::Interval;

/// Tolerance for floating-point rounding in bound checks.
const FP_TOLERANCE: f64 = 1e-9;

fn zonotope(dims: std::ops::Range<usize>, gens: std::ops::Range<usize>) -> impl Strategy<Value = Zonotope> {
    (dims, gens).prop_flat_map(|(d, g)| {
        prop::collection::vec(-10.0f64..10.0, d * (g + 1))
            .prop_map(move |v| Zonotope::new(Array2::from_shape_vec((d, g + 1), v).unwrap()))
    })
}

fn perturbation(m: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0f64..=1.0, m)
}

fn within(bound: &Interval, v: f64) -> bool {
    bound.lower - FP_TOLERANCE <= v && v <= bound.upper + FP_TOLERANCE
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn center_between_bounds(z in zonotope(1..5, 0..5)) {
        let center = z.center();
        for d in 1..=z.dimensions() {
            let lo = z.lower_bound(d).unwrap();
            let hi = z.upper_bound(d).unwrap();
            prop_assert!(lo <= center[d - 1] && center[d - 1] <= hi);
        }
    }

    #[test]
    fn sampled_points_within_bounds(z in zonotope(1..5, 0..5), seed in any::<u64>()) {
        let bounds = z.to_intervals();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..1000 {
            let p = z.random_point_with(&mut rng);
            for (v, b) in p.iter().zip(&bounds) {
                prop_assert!(within(b, *v), "{} not in {}", v, b);
            }
        }
    }

    #[test]
    fn relu_is_sound(z in zonotope(1..2, 1..5), eps in perturbation(4)) {
        let r = z.relu().unwrap();
        let x = z.evaluate(&eps)[0];
        let bound = r.to_intervals()[0];
        prop_assert!(within(&bound, x.max(0.0)), "relu({}) = {} not in {}", x, x.max(0.0), bound);
    }

    #[test]
    fn add_is_commutative(a in zonotope(2..3, 0..4), b in zonotope(2..3, 0..4)) {
        prop_assert_eq!(a.try_add(&b).unwrap(), b.try_add(&a).unwrap());
    }

    #[test]
    fn add_is_associative(a in zonotope(1..2, 0..4), b in zonotope(1..2, 0..4), c in zonotope(1..2, 0..4)) {
        let left = a.try_add(&b).unwrap().try_add(&c).unwrap();
        let right = a.try_add(&b.try_add(&c).unwrap()).unwrap();
        for (l, r) in left.values().iter().zip(right.values().iter()) {
            prop_assert!((l - r).abs() < 1e-9);
        }
    }

    #[test]
    fn padding_preserves_bounds(a in zonotope(1..4, 0..3), b in zonotope(1..4, 0..6)) {
        let (pa, pb) = equalize_generators(&a, &b);
        prop_assert_eq!(pa.generators(), pb.generators());
        prop_assert_eq!(pa.to_intervals(), a.to_intervals());
        prop_assert_eq!(pb.to_intervals(), b.to_intervals());
    }

    #[test]
    fn combine_split_roundtrip(a in zonotope(2..3, 2..3), b in zonotope(2..3, 2..3)) {
        let (x, y) = a.combine(&b).split().unwrap();
        prop_assert_eq!(x, a);
        prop_assert_eq!(y, b);
    }

    #[test]
    fn network_is_sound(
        w1 in prop::collection::vec(prop::collection::vec(-2.0f64..2.0, 2), 3),
        w2 in prop::collection::vec(prop::collection::vec(-2.0f64..2.0, 3), 2),
        seed in any::<u64>(),
    ) {
        let net = Network::new(vec![
            DenseLayer::relu(w1).unwrap(),
            DenseLayer::relu(w2).unwrap(),
        ]).unwrap();
        let input = Zonotope::from_intervals(&[Interval::new(-1.0, 1.0), Interval::new(-0.5, 2.0)]);
        let bounds = net.propagate_zonotope(&input).unwrap().to_intervals();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..200 {
            let x = input.random_member_with(&mut rng);
            let y = net.evaluate(&x).unwrap();
            for (v, b) in y.iter().zip(&bounds) {
                prop_assert!(within(b, *v), "{} not in {}", v, b);
            }
        }
    }
}
