#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use primordia::simulation::error::GenomeError;
use primordia::simulation::genome::{
    Category, Genome, HORMONE_COUNT, Hormone, MUTATION_STEP, TRAIT_COUNT, Trait,
};
use primordia::simulation::rng::create_rng;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn test_categories_cover_every_trait_once() {
    let mut seen = Vec::new();
    for category in Category::ALL {
        for &t in category.traits() {
            assert_eq!(t.category(), category);
            assert!(!seen.contains(&t));
            seen.push(t);
        }
    }
    assert_eq!(seen.len(), TRAIT_COUNT);
    for (i, t) in Trait::ALL.into_iter().enumerate() {
        assert_eq!(t.index(), i);
    }
}

#[test]
fn test_random_genome_ranges() {
    let mut rng = create_rng(1);
    for _ in 0..50 {
        let genome = Genome::new_random(&mut rng);
        for &base in genome.bases() {
            assert!((0.9..=1.0).contains(&base), "base {base} out of init range");
        }
        for &level in genome.hormones() {
            assert!((0.0..=1.0).contains(&level));
        }
    }
}

#[test]
fn test_effective_trait_without_hormones_equals_base() {
    let genome = Genome::uniform(0.5, 0.0);
    for t in Trait::ALL {
        assert!(approx(genome.get_effective_trait(t), 0.5));
    }
}

#[test]
fn test_hormone_modulation() {
    let mut genome = Genome::uniform(0.5, 0.0);
    genome.set_hormone(Hormone::Testosterone, 1.0);

    assert!(approx(genome.get_effective_trait(Trait::Aggression), 1.0));
    assert!(approx(genome.get_effective_trait(Trait::SpikeLength), 0.7));
    assert!(approx(genome.get_effective_trait(Trait::ForwardOrganSize), 0.7));
    assert!(approx(genome.get_effective_trait(Trait::Size), 0.5));

    genome.set_hormone(Hormone::Melatonin, 1.0);
    // testosterone +0.2 and melatonin -0.2 cancel out
    assert!(approx(genome.get_effective_trait(Trait::ForwardOrganSize), 0.5));
    assert!(approx(genome.get_effective_trait(Trait::Reproduction), 0.9));
}

#[test]
fn test_effective_trait_is_clamped() {
    let mut genome = Genome::uniform(0.9, 0.0);
    genome.set_hormone(Hormone::Growth, 1.0);
    assert_eq!(genome.get_effective_trait(Trait::Size), 1.0);

    let mut genome = Genome::uniform(0.05, 0.0);
    genome.set_hormone(Hormone::Adrenaline, 1.0);
    assert_eq!(genome.get_effective_trait(Trait::Health), 0.0);
}

#[test]
fn test_setters_clamp() {
    let mut genome = Genome::uniform(0.5, 0.5);
    genome.set_base(Trait::Size, 3.0);
    genome.set_hormone(Hormone::Insulin, -2.0);
    assert_eq!(genome.base(Trait::Size), 1.0);
    assert_eq!(genome.hormone(Hormone::Insulin), 0.0);

    let genome = Genome::from_parts([2.0; TRAIT_COUNT], [-1.0; HORMONE_COUNT]);
    assert!(genome.bases().iter().all(|&b| b == 1.0));
    assert!(genome.hormones().iter().all(|&h| h == 0.0));
}

#[test]
fn test_effective_trait_is_cached_and_idempotent() {
    let mut rng = create_rng(7);
    let genome = Genome::new_random(&mut rng);

    assert!(!genome.is_cached(Trait::Metabolism));
    let first = genome.get_effective_trait(Trait::Metabolism);
    assert!(genome.is_cached(Trait::Metabolism));
    let second = genome.get_effective_trait(Trait::Metabolism);
    assert_eq!(first, second);
}

#[test]
fn test_cache_invalidated_on_change() {
    let mut genome = Genome::uniform(0.5, 0.0);
    assert!(approx(genome.get_effective_trait(Trait::Size), 0.5));

    genome.set_base(Trait::Size, 0.1);
    assert!(!genome.is_cached(Trait::Size));
    assert!(approx(genome.get_effective_trait(Trait::Size), 0.1));

    genome.set_hormone(Hormone::Growth, 0.5);
    assert!(approx(genome.get_effective_trait(Trait::Size), 0.3));

    let mut rng = create_rng(3);
    genome.get_effective_trait(Trait::Digestion);
    genome.mutate(1.0, &mut rng);
    assert!(Trait::ALL.iter().all(|&t| !genome.is_cached(t)));
}

#[test]
fn test_full_mutation_stays_in_unit_range() {
    let mut rng = create_rng(11);
    let mut low = Genome::uniform(0.0, 0.0);
    let mut high = Genome::uniform(1.0, 1.0);
    for _ in 0..100 {
        low.mutate(1.0, &mut rng);
        high.mutate(1.0, &mut rng);
    }
    for genome in [&low, &high] {
        assert!(genome.bases().iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(genome.hormones().iter().all(|v| (0.0..=1.0).contains(v)));
        for t in Trait::ALL {
            assert!((0.0..=1.0).contains(&genome.get_effective_trait(t)));
        }
    }
}

#[test]
fn test_mutation_step_is_bounded() {
    let mut rng = create_rng(5);
    let original = Genome::uniform(0.5, 0.5);
    let mut mutated = original.copy();
    mutated.mutate(1.0, &mut rng);

    for (a, b) in original.bases().iter().zip(mutated.bases()) {
        assert!((a - b).abs() <= MUTATION_STEP + 1e-6);
    }
    for (a, b) in original.hormones().iter().zip(mutated.hormones()) {
        assert!((a - b).abs() <= MUTATION_STEP + 1e-6);
    }
}

#[test]
fn test_zero_rate_mutation_is_noop() {
    let mut rng = create_rng(9);
    let original = Genome::new_random(&mut rng);
    let mut mutated = original.copy();
    mutated.mutate(0.0, &mut rng);
    assert_eq!(original, mutated);
}

#[test]
fn test_copy_is_independent() {
    let mut rng = create_rng(21);
    let source = Genome::new_random(&mut rng);
    let before: Vec<f32> = Trait::ALL
        .iter()
        .map(|&t| source.get_effective_trait(t))
        .collect();

    let mut copy = source.copy();
    assert!(Trait::ALL.iter().all(|&t| !copy.is_cached(t)));
    for (i, &t) in Trait::ALL.iter().enumerate() {
        assert_eq!(copy.get_effective_trait(t), before[i]);
    }

    copy.mutate(1.0, &mut rng);
    copy.set_base(Trait::Size, 0.0);
    for (i, &t) in Trait::ALL.iter().enumerate() {
        assert_eq!(source.get_effective_trait(t), before[i]);
    }
}

#[test]
fn test_trait_by_name() {
    let mut genome = Genome::uniform(0.4, 0.0);
    genome.set_base(Trait::MouthTeeth, 0.8);

    assert!(approx(genome.trait_by_name("feeding", "mouth_teeth").unwrap(), 0.8));
    assert!(approx(genome.trait_by_name("physical", "size").unwrap(), 0.4));
    assert!(approx(
        genome
            .trait_by_name("movement", "forward_organ_size")
            .unwrap(),
        0.4
    ));

    assert_eq!(
        genome.trait_by_name("wings", "size"),
        Err(GenomeError::UnknownCategory("wings".to_string()))
    );
    assert_eq!(
        genome.trait_by_name("physical", "horns"),
        Err(GenomeError::UnknownTrait("horns".to_string()))
    );
    assert!(matches!(
        genome.trait_by_name("physical", "aggression"),
        Err(GenomeError::TraitNotInCategory { .. })
    ));
}

#[test]
fn test_names_parse_back() {
    for t in Trait::ALL {
        assert_eq!(t.name().parse::<Trait>(), Ok(t));
    }
    for c in Category::ALL {
        assert_eq!(c.to_string().parse::<Category>(), Ok(c));
    }
    for h in Hormone::ALL {
        assert_eq!(h.name().parse::<Hormone>(), Ok(h));
    }
    assert!(matches!(
        "dopamine".parse::<Hormone>(),
        Err(GenomeError::UnknownHormone(_))
    ));
}

#[test]
fn test_trait_map_lists_every_trait() {
    let mut rng = create_rng(2);
    let genome = Genome::new_random(&mut rng);
    let map = genome.trait_map();

    assert_eq!(map.len(), TRAIT_COUNT);
    for (category, t, value) in map {
        assert_eq!(t.category(), category);
        assert_eq!(value, genome.get_effective_trait(t));
    }

    let feeding = genome.category_values(Category::Feeding);
    assert_eq!(feeding.len(), 4);
}

#[test]
fn test_serde_skips_cache() {
    let genome = Genome::uniform(0.3, 0.6);
    genome.get_effective_trait(Trait::Size);

    let json = serde_json::to_string(&genome).unwrap();
    assert!(!json.contains("cache"));

    let restored: Genome = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, genome);
    assert!(!restored.is_cached(Trait::Size));
}
