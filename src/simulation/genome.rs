//! Genome and hormone model.
//!
//! A genome stores a base value in [0, 1] for every trait of every category and a
//! level in [0, 1] for every hormone. The effective value of a trait is its base
//! plus the hormone modulation from a fixed effect table, clamped to [0, 1].

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::GenomeError;

/// Number of traits across all categories.
pub const TRAIT_COUNT: usize = 21;
/// Number of hormones.
pub const HORMONE_COUNT: usize = 6;

/// Half-width of the uniform perturbation applied by [`Genome::mutate`].
pub const MUTATION_STEP: f32 = 0.05;
/// Half-width of the jitter around the default base value at random init.
const INIT_JITTER: f32 = 0.1;
/// Base value every trait is jittered around at random init.
const DEFAULT_BASE: f32 = 1.0;

/// Trait categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Body size and constitution.
    Physical,
    /// Locomotion organs.
    Movement,
    /// Eyes and sensing range.
    Sensors,
    /// Aggression and spikes.
    Offense,
    /// Mouth and digestion.
    Feeding,
    /// Mutation and reproduction drive.
    Reproduction,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Physical,
        Category::Movement,
        Category::Sensors,
        Category::Offense,
        Category::Feeding,
        Category::Reproduction,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Physical => "physical",
            Category::Movement => "movement",
            Category::Sensors => "sensors",
            Category::Offense => "offense",
            Category::Feeding => "feeding",
            Category::Reproduction => "reproduction",
        }
    }

    /// Traits that belong to this category.
    pub fn traits(self) -> &'static [Trait] {
        match self {
            Category::Physical => &[Trait::Size, Trait::Health],
            Category::Movement => &[
                Trait::ForwardOrganCount,
                Trait::ForwardOrganSize,
                Trait::SideOrganCount,
                Trait::SideOrganSize,
            ],
            Category::Sensors => &[
                Trait::SenseRange,
                Trait::SensorRange,
                Trait::EyePosition,
                Trait::EyeSize,
                Trait::EyeColor,
                Trait::EyeViewingAngle,
            ],
            Category::Offense => &[Trait::Aggression, Trait::SpikePosition, Trait::SpikeLength],
            Category::Feeding => &[
                Trait::MouthSize,
                Trait::MouthTeeth,
                Trait::Digestion,
                Trait::Metabolism,
            ],
            Category::Reproduction => &[Trait::MutationRate, Trait::Reproduction],
        }
    }
}

impl FromStr for Category {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| GenomeError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Heritable traits. The discriminant is the index into the genome arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    /// Body size.
    Size,
    /// Constitution, scales max health.
    Health,
    /// Number of forward locomotion organs.
    ForwardOrganCount,
    /// Size of forward locomotion organs, scales speed and turn rate.
    ForwardOrganSize,
    /// Number of side locomotion organs.
    SideOrganCount,
    /// Size of side locomotion organs.
    SideOrganSize,
    /// Passive sensing range.
    SenseRange,
    /// Active sensor range, scales neighbor detection.
    SensorRange,
    /// Eye placement on the body.
    EyePosition,
    /// Eye size.
    EyeSize,
    /// Eye color.
    EyeColor,
    /// Eye field of view.
    EyeViewingAngle,
    /// Aggression drive.
    Aggression,
    /// Spike placement.
    SpikePosition,
    /// Spike length.
    SpikeLength,
    /// Mouth size, scales eating capacity.
    MouthSize,
    /// Teeth, scales energy extracted from meals.
    MouthTeeth,
    /// Digestion, scales digestion efficiency.
    Digestion,
    /// Metabolism, scales max energy and metabolic rate.
    Metabolism,
    /// Probability of each gene mutating in offspring.
    MutationRate,
    /// Reproduction drive.
    Reproduction,
}

impl Trait {
    /// All traits in index order.
    pub const ALL: [Trait; TRAIT_COUNT] = [
        Trait::Size,
        Trait::Health,
        Trait::ForwardOrganCount,
        Trait::ForwardOrganSize,
        Trait::SideOrganCount,
        Trait::SideOrganSize,
        Trait::SenseRange,
        Trait::SensorRange,
        Trait::EyePosition,
        Trait::EyeSize,
        Trait::EyeColor,
        Trait::EyeViewingAngle,
        Trait::Aggression,
        Trait::SpikePosition,
        Trait::SpikeLength,
        Trait::MouthSize,
        Trait::MouthTeeth,
        Trait::Digestion,
        Trait::Metabolism,
        Trait::MutationRate,
        Trait::Reproduction,
    ];

    /// Index into per-trait arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Category this trait belongs to.
    pub fn category(self) -> Category {
        match self {
            Trait::Size | Trait::Health => Category::Physical,
            Trait::ForwardOrganCount
            | Trait::ForwardOrganSize
            | Trait::SideOrganCount
            | Trait::SideOrganSize => Category::Movement,
            Trait::SenseRange
            | Trait::SensorRange
            | Trait::EyePosition
            | Trait::EyeSize
            | Trait::EyeColor
            | Trait::EyeViewingAngle => Category::Sensors,
            Trait::Aggression | Trait::SpikePosition | Trait::SpikeLength => Category::Offense,
            Trait::MouthSize | Trait::MouthTeeth | Trait::Digestion | Trait::Metabolism => {
                Category::Feeding
            }
            Trait::MutationRate | Trait::Reproduction => Category::Reproduction,
        }
    }

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Trait::Size => "size",
            Trait::Health => "health",
            Trait::ForwardOrganCount => "forward_organ_count",
            Trait::ForwardOrganSize => "forward_organ_size",
            Trait::SideOrganCount => "side_organ_count",
            Trait::SideOrganSize => "side_organ_size",
            Trait::SenseRange => "sense_range",
            Trait::SensorRange => "sensor_range",
            Trait::EyePosition => "eye_position",
            Trait::EyeSize => "eye_size",
            Trait::EyeColor => "eye_color",
            Trait::EyeViewingAngle => "eye_viewing_angle",
            Trait::Aggression => "aggression",
            Trait::SpikePosition => "spike_position",
            Trait::SpikeLength => "spike_length",
            Trait::MouthSize => "mouth_size",
            Trait::MouthTeeth => "mouth_teeth",
            Trait::Digestion => "digestion",
            Trait::Metabolism => "metabolism",
            Trait::MutationRate => "mutation_rate",
            Trait::Reproduction => "reproduction",
        }
    }
}

impl FromStr for Trait {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trait::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| GenomeError::UnknownTrait(s.to_string()))
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hormones that additively modulate traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hormone {
    /// Raises aggression and forward drive.
    Testosterone,
    /// Raises locomotion and sensing, lowers constitution.
    Adrenaline,
    /// Raises reproduction and constitution.
    Melatonin,
    /// Raises digestion and metabolism.
    Insulin,
    /// Lowers aggression, raises reproduction.
    Oxytocin,
    /// Raises size, mouth, eyes and metabolism.
    Growth,
}

impl Hormone {
    /// All hormones in index order.
    pub const ALL: [Hormone; HORMONE_COUNT] = [
        Hormone::Testosterone,
        Hormone::Adrenaline,
        Hormone::Melatonin,
        Hormone::Insulin,
        Hormone::Oxytocin,
        Hormone::Growth,
    ];

    /// Index into per-hormone arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Hormone::Testosterone => "testosterone",
            Hormone::Adrenaline => "adrenaline",
            Hormone::Melatonin => "melatonin",
            Hormone::Insulin => "insulin",
            Hormone::Oxytocin => "oxytocin",
            Hormone::Growth => "growth",
        }
    }

    /// Additive effect of a unit hormone level on each affected trait.
    pub fn effects(self) -> &'static [(Trait, f32)] {
        match self {
            Hormone::Testosterone => &[
                (Trait::Aggression, 0.5),
                (Trait::SpikeLength, 0.2),
                (Trait::ForwardOrganSize, 0.2),
            ],
            Hormone::Adrenaline => &[
                (Trait::ForwardOrganCount, 0.3),
                (Trait::SideOrganCount, 0.2),
                (Trait::SenseRange, 0.2),
                (Trait::Health, -0.1),
            ],
            Hormone::Melatonin => &[
                (Trait::Reproduction, 0.4),
                (Trait::Health, 0.3),
                (Trait::ForwardOrganSize, -0.2),
            ],
            Hormone::Insulin => &[
                (Trait::Digestion, 0.5),
                (Trait::Metabolism, 0.3),
                (Trait::SideOrganSize, -0.2),
            ],
            Hormone::Oxytocin => &[
                (Trait::Aggression, -0.4),
                (Trait::EyeViewingAngle, 0.3),
                (Trait::Reproduction, 0.3),
            ],
            Hormone::Growth => &[
                (Trait::Size, 0.4),
                (Trait::MouthSize, 0.3),
                (Trait::EyeSize, 0.3),
                (Trait::Metabolism, 0.4),
            ],
        }
    }

    /// Effect of this hormone on a single trait, zero if unaffected.
    pub fn effect_on(self, t: Trait) -> f32 {
        self.effects()
            .iter()
            .find(|(affected, _)| *affected == t)
            .map(|(_, effect)| *effect)
            .unwrap_or(0.0)
    }
}

impl FromStr for Hormone {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hormone::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| GenomeError::UnknownHormone(s.to_string()))
    }
}

impl fmt::Display for Hormone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Heritable trait values plus hormone levels, with memoized effective values.
///
/// Every stored value lies in [0, 1]; setters and mutation clamp instead of
/// rejecting. Any change to a base value or hormone level empties the cache.
#[derive(Debug, Serialize, Deserialize)]
pub struct Genome {
    bases: [f32; TRAIT_COUNT],
    hormones: [f32; HORMONE_COUNT],
    #[serde(skip)]
    cache: [Cell<Option<f32>>; TRAIT_COUNT],
}

impl Genome {
    /// Creates a genome with every base jittered around the default and random hormone levels.
    pub fn new_random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bases = [0.0; TRAIT_COUNT];
        for base in &mut bases {
            *base = DEFAULT_BASE + rng.random_range(-INIT_JITTER..INIT_JITTER);
        }

        let mut hormones = [0.0; HORMONE_COUNT];
        for level in &mut hormones {
            *level = rng.random_range(0.0..1.0);
        }

        Self::from_parts(bases, hormones)
    }

    /// Creates a genome from explicit base values and hormone levels, clamping each to [0, 1].
    pub fn from_parts(bases: [f32; TRAIT_COUNT], hormones: [f32; HORMONE_COUNT]) -> Self {
        Self {
            bases: bases.map(clamp_unit),
            hormones: hormones.map(clamp_unit),
            cache: Default::default(),
        }
    }

    /// Creates a genome with every base and hormone set to the same value.
    pub fn uniform(base: f32, hormone: f32) -> Self {
        Self::from_parts([base; TRAIT_COUNT], [hormone; HORMONE_COUNT])
    }

    /// Base (unmodulated) value of a trait.
    pub fn base(&self, t: Trait) -> f32 {
        self.bases[t.index()]
    }

    /// All base values in trait index order.
    pub fn bases(&self) -> &[f32; TRAIT_COUNT] {
        &self.bases
    }

    /// Level of a hormone.
    pub fn hormone(&self, h: Hormone) -> f32 {
        self.hormones[h.index()]
    }

    /// All hormone levels in hormone index order.
    pub fn hormones(&self) -> &[f32; HORMONE_COUNT] {
        &self.hormones
    }

    /// Sets a base value (clamped) and invalidates the cache.
    pub fn set_base(&mut self, t: Trait, value: f32) {
        self.bases[t.index()] = clamp_unit(value);
        self.invalidate();
    }

    /// Sets a hormone level (clamped) and invalidates the cache.
    pub fn set_hormone(&mut self, h: Hormone, value: f32) {
        self.hormones[h.index()] = clamp_unit(value);
        self.invalidate();
    }

    /// Effective value of a trait: `clamp(base + Σ level·effect, 0, 1)`.
    ///
    /// Served from the cache when present, otherwise computed and cached.
    pub fn get_effective_trait(&self, t: Trait) -> f32 {
        let slot = &self.cache[t.index()];
        if let Some(value) = slot.get() {
            return value;
        }
        let value = self.compute_effective(t);
        slot.set(Some(value));
        value
    }

    /// Whether the effective value of a trait is currently memoized.
    pub fn is_cached(&self, t: Trait) -> bool {
        self.cache[t.index()].get().is_some()
    }

    /// Looks up an effective trait value by category and trait name.
    pub fn trait_by_name(&self, category: &str, trait_name: &str) -> Result<f32, GenomeError> {
        let category: Category = category.parse()?;
        let t: Trait = trait_name.parse()?;
        if t.category() != category {
            return Err(GenomeError::TraitNotInCategory {
                category: category.name().to_string(),
                trait_name: trait_name.to_string(),
            });
        }
        Ok(self.get_effective_trait(t))
    }

    /// Effective values of every trait in a category.
    pub fn category_values(&self, category: Category) -> Vec<(Trait, f32)> {
        category
            .traits()
            .iter()
            .map(|&t| (t, self.get_effective_trait(t)))
            .collect()
    }

    /// Effective value of every trait, grouped by category. Consumed by renderers.
    pub fn trait_map(&self) -> Vec<(Category, Trait, f32)> {
        Category::ALL
            .into_iter()
            .flat_map(|c| {
                c.traits()
                    .iter()
                    .map(move |&t| (c, t, self.get_effective_trait(t)))
            })
            .collect()
    }

    /// Mutates every trait and hormone independently with probability `rate`.
    ///
    /// A mutated value moves by a uniform step in `[-MUTATION_STEP, MUTATION_STEP]`
    /// and is clamped to [0, 1].
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, rng: &mut R) {
        self.mutate_with_step(rate, MUTATION_STEP, rng);
    }

    /// Like [`Genome::mutate`] with an explicit perturbation half-width.
    pub fn mutate_with_step<R: Rng + ?Sized>(&mut self, rate: f32, step: f32, rng: &mut R) {
        for value in self.bases.iter_mut().chain(self.hormones.iter_mut()) {
            if rng.random::<f32>() < rate {
                let delta = if step > 0.0 {
                    rng.random_range(-step..=step)
                } else {
                    0.0
                };
                *value = clamp_unit(*value + delta);
            }
        }

        self.invalidate();
    }

    /// Deep copy of base values and hormone levels. The cache starts empty.
    pub fn copy(&self) -> Genome {
        Self::from_parts(self.bases, self.hormones)
    }

    fn compute_effective(&self, t: Trait) -> f32 {
        let modulation: f32 = Hormone::ALL
            .into_iter()
            .map(|h| self.hormones[h.index()] * h.effect_on(t))
            .sum();
        clamp_unit(self.bases[t.index()] + modulation)
    }

    fn invalidate(&mut self) {
        for slot in &self.cache {
            slot.set(None);
        }
    }
}

impl Clone for Genome {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for Genome {
    fn eq(&self, other: &Self) -> bool {
        self.bases == other.bases && self.hormones == other.hormones
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in Category::ALL {
            writeln!(f, "{category}:")?;
            for &t in category.traits() {
                writeln!(
                    f,
                    "  {}: base {:.2} effective {:.2}",
                    t,
                    self.base(t),
                    self.get_effective_trait(t)
                )?;
            }
        }
        writeln!(f, "hormones:")?;
        for h in Hormone::ALL {
            writeln!(f, "  {}: {:.2}", h, self.hormone(h))?;
        }
        Ok(())
    }
}

fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
