//! Strategy selection and opaque element types.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::rc::Rc;

use simdwalk::dispatch::is_vectorizable;
use simdwalk::ops::{Inspect, Sum, Transform};
use simdwalk::simd::{native_lanes, Window};
use simdwalk::{for_each, for_each_mut, Element, ReadOnly, ReadWrite, Strategy};

#[derive(Clone, Debug, PartialEq)]
struct Particle {
    position: [f64; 3],
    label: String,
}

impl Element for Particle {}

type Counter = fn(&u8);
type Zeroer = fn(&mut u8);

#[test]
fn test_strategy_per_element_and_access() {
    assert_eq!(
        Strategy::of::<f32, ReadOnly<Sum<f32>>>(),
        Strategy::VectorizedInspect
    );
    assert_eq!(
        Strategy::of::<u8, ReadWrite<Zeroer>>(),
        Strategy::VectorizedTransform
    );
    assert_eq!(
        Strategy::of::<u8, ReadOnly<Counter>>(),
        Strategy::VectorizedInspect
    );
    assert_eq!(
        Strategy::of::<String, ReadWrite<fn(&mut String)>>(),
        Strategy::SequentialTransform
    );
    assert_eq!(
        Strategy::of::<Particle, ReadOnly<fn(&Particle)>>(),
        Strategy::SequentialInspect
    );

    assert!(Strategy::VectorizedInspect.is_vectorized());
    assert!(!Strategy::VectorizedInspect.stores());
    assert!(Strategy::SequentialTransform.stores());
    assert!(!Strategy::SequentialTransform.is_vectorized());
}

#[test]
fn test_vectorizable_flags() {
    assert!(is_vectorizable::<f64>());
    assert!(is_vectorizable::<i16>());
    assert!(is_vectorizable::<bool>());
    assert!(!is_vectorizable::<u128>());
    assert!(!is_vectorizable::<String>());
    assert!(!is_vectorizable::<Option<u32>>());
    assert!(!is_vectorizable::<(u32, u32)>());
    assert!(!is_vectorizable::<[f32; 3]>());
    assert!(!is_vectorizable::<Particle>());
}

/// Counts scalar visits and bulk windows separately.
#[derive(Default)]
struct Shapes {
    scalars: usize,
    windows: usize,
}

impl<T: Copy> Inspect<T> for Shapes {
    fn inspect_one(&mut self, _: &T) {
        self.scalars += 1;
    }

    fn inspect<W: Window<T>>(&mut self, window: &W) {
        if W::LANES > 1 {
            self.windows += 1;
        } else {
            self.inspect_one(&window.lanes()[0]);
        }
    }
}

#[derive(Clone, Copy)]
struct Pixel(u8);

impl Element for Pixel {}

#[test]
fn test_reported_strategy_matches_walk() {
    let bytes = vec![0u8; 1000];
    let shapes = for_each(&bytes, Shapes::default());
    assert!(Strategy::of::<u8, ReadOnly<Shapes>>().is_vectorized());
    assert!(shapes.windows > 0);
    assert_eq!(shapes.scalars + shapes.windows * native_lanes::<u8>(), 1000);

    let pixels = vec![Pixel(0); 1000];
    let shapes = for_each(&pixels, Shapes::default());
    assert!(!Strategy::of::<Pixel, ReadOnly<Shapes>>().is_vectorized());
    assert_eq!(shapes.windows, 0);
    assert_eq!(shapes.scalars, 1000);
}

#[test]
fn test_tuples_and_arrays_match_naive_loop() {
    let pairs = [(1u32, 2u32), (3, 4), (5, 6)];
    let mut products = Vec::new();
    let _ = for_each(&pairs, |&(a, b): &(u32, u32)| products.push(a * b));
    assert_eq!(products, [2, 12, 30]);

    let mut points = [[1.0f32; 3], [2.0; 3]];
    let _ = for_each_mut(&mut points, |p: &mut [f32; 3]| p[1] = -p[1]);
    assert_eq!(points, [[1.0, -1.0, 1.0], [2.0, -2.0, 2.0]]);

    let mut wide = [(1u8, 'a', 2.5f64, -1i64), (2, 'b', 0.5, 7)];
    let _ = for_each_mut(&mut wide, |t: &mut (u8, char, f64, i64)| t.0 += 10);
    assert_eq!(wide[1].0, 12);
}

#[test]
fn test_std_wrappers_visit_in_order() {
    let shared: Vec<Rc<str>> = vec![Rc::from("x"), Rc::from("yz")];
    let mut total = 0;
    let _ = for_each(&shared, |s: &Rc<str>| total += s.len());
    assert_eq!(total, 3);

    let big = [u128::MAX, 1, 2];
    let sum = for_each(&big[1..], Sum::<u128>::default());
    assert_eq!(sum.value(), 3);

    let names: Vec<&str> = vec!["a", "bb", "ccc"];
    let mut lengths = Vec::new();
    let _ = for_each(&names, |name: &&str| lengths.push(name.len()));
    assert_eq!(lengths, [1, 2, 3]);

    let mut paths = vec![PathBuf::from("a"), PathBuf::from("b")];
    let _ = for_each_mut(&mut paths, |path: &mut PathBuf| path.push("c"));
    assert_eq!(paths[1], PathBuf::from("b/c"));
}

#[test_log::test]
fn test_strings_match_naive_loop() {
    let mut words: Vec<String> = ["alpha", "beta", "", "gamma", "delta", "epsilon", "zeta"]
        .iter()
        .map(|word| word.to_string())
        .collect();
    let mut expected = words.clone();
    for word in &mut expected {
        word.push('!');
    }

    let _ = for_each_mut(&mut words, |word: &mut String| word.push('!'));
    assert_eq!(words, expected);

    let mut order = Vec::new();
    let _ = for_each(&words, |word: &String| order.push(word.len()));
    assert_eq!(order, [6, 5, 1, 6, 6, 8, 5]);
}

struct Drift {
    step: f64,
    moved: usize,
}

impl Transform<Particle> for Drift {
    fn transform_one(&mut self, particle: &mut Particle) {
        for axis in &mut particle.position {
            *axis += self.step;
        }
        self.moved += 1;
    }
}

struct Labels(String);

impl Inspect<Particle> for Labels {
    fn inspect_one(&mut self, particle: &Particle) {
        self.0.push_str(&particle.label);
    }
}

#[test_log::test]
fn test_custom_type_matches_naive_loop() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut particles: Vec<Particle> = (0..29)
        .map(|i| Particle {
            position: [
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            ],
            label: char::from(b'a' + (i % 26) as u8).to_string(),
        })
        .collect();

    let mut expected = particles.clone();
    for particle in &mut expected {
        for axis in &mut particle.position {
            *axis += 0.5;
        }
    }

    let drift = for_each_mut(
        &mut particles,
        Drift {
            step: 0.5,
            moved: 0,
        },
    );
    assert_eq!(drift.moved, 29);
    assert_eq!(particles, expected);

    let labels = for_each(&particles, Labels(String::new()));
    assert_eq!(labels.0, "abcdefghijklmnopqrstuvwxyzabc");
}

#[test]
fn test_options_visited_in_order() {
    let data = [Some(3u32), None, Some(1), None, Some(4)];
    let mut present = Vec::new();
    let _ = for_each(&data, |value: &Option<u32>| {
        if let Some(value) = value {
            present.push(*value);
        }
    });
    assert_eq!(present, [3, 1, 4]);
}
