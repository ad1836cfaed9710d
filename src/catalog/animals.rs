use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::{CatalogEntity, FilterCriteria, SortField};

pub type AnimalCriteria = FilterCriteria<AnimalCategory, ConservationStatus>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnimalCategory {
    Marine,
    Terrestrial,
    Avian,
}

impl AnimalCategory {
    pub const ALL: [AnimalCategory; 3] = [
        AnimalCategory::Marine,
        AnimalCategory::Terrestrial,
        AnimalCategory::Avian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnimalCategory::Marine => "Marine",
            AnimalCategory::Terrestrial => "Terrestrial",
            AnimalCategory::Avian => "Avian",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

// IUCN red list categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ConservationStatus {
    CriticallyEndangered,
    Endangered,
    Vulnerable,
    NearThreatened,
}

impl ConservationStatus {
    pub const ALL: [ConservationStatus; 4] = [
        ConservationStatus::CriticallyEndangered,
        ConservationStatus::Endangered,
        ConservationStatus::Vulnerable,
        ConservationStatus::NearThreatened,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConservationStatus::CriticallyEndangered => "Critically Endangered",
            ConservationStatus::Endangered => "Endangered",
            ConservationStatus::Vulnerable => "Vulnerable",
            ConservationStatus::NearThreatened => "Near Threatened",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Animal {
    pub id: u32,
    pub name: String,
    pub scientific_name: String,
    pub emoji: String,
    pub status: ConservationStatus,
    pub population: String,
    pub habitat: String,
    pub location: String,
    pub threats: Vec<String>,
    pub facts: Vec<String>,
    pub conservation_efforts: String,
    pub category: AnimalCategory,
}

impl CatalogEntity for Animal {
    type Category = AnimalCategory;
    type Status = ConservationStatus;

    fn searchable_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.scientific_name.as_str()]
    }

    fn category(&self) -> &AnimalCategory {
        &self.category
    }

    fn matches_status(&self, status: &ConservationStatus) -> bool {
        self.status == *status
    }

    fn sort_value(&self, _field: SortField) -> Option<f64> {
        None
    }
}

/// Picks one fact about one animal, for the "did you know" prompt.
pub fn random_fact<'a, R: Rng + ?Sized>(
    animals: &'a [Animal],
    rng: &mut R,
) -> Option<(&'a Animal, &'a str)> {
    let with_facts = animals
        .iter()
        .filter(|animal| !animal.facts.is_empty())
        .collect::<Vec<_>>();
    let animal = *with_facts.choose(rng)?;
    let fact = animal.facts.choose(rng)?;
    Some((animal, fact.as_str()))
}

struct AnimalRecord<'a> {
    id: u32,
    name: &'a str,
    scientific_name: &'a str,
    emoji: &'a str,
    status: ConservationStatus,
    population: &'a str,
    habitat: &'a str,
    location: &'a str,
    threats: [&'a str; 3],
    facts: [&'a str; 3],
    conservation_efforts: &'a str,
    category: AnimalCategory,
}

impl From<AnimalRecord<'_>> for Animal {
    fn from(record: AnimalRecord<'_>) -> Self {
        Self {
            id: record.id,
            name: record.name.to_string(),
            scientific_name: record.scientific_name.to_string(),
            emoji: record.emoji.to_string(),
            status: record.status,
            population: record.population.to_string(),
            habitat: record.habitat.to_string(),
            location: record.location.to_string(),
            threats: record.threats.iter().map(|t| t.to_string()).collect(),
            facts: record.facts.iter().map(|f| f.to_string()).collect(),
            conservation_efforts: record.conservation_efforts.to_string(),
            category: record.category,
        }
    }
}

/// The endangered species featured in the catalog.
pub fn endangered_animals() -> Vec<Animal> {
    use AnimalCategory::*;
    use ConservationStatus::*;

    [
        AnimalRecord {
            id: 1,
            name: "Vaquita",
            scientific_name: "Phocoena sinus",
            emoji: "🐬",
            status: CriticallyEndangered,
            population: "< 20 individuals",
            habitat: "Marine - Gulf of California",
            location: "Mexico",
            threats: ["Illegal fishing", "Bycatch", "Habitat degradation"],
            facts: [
                "Smallest cetacean species in the world",
                "Only found in the northern Gulf of California",
                "Known as the \"panda of the sea\" due to distinctive markings",
            ],
            conservation_efforts: "International conservation programs, fishing restrictions, and habitat protection",
            category: Marine,
        },
        AnimalRecord {
            id: 2,
            name: "Sumatran Orangutan",
            scientific_name: "Pongo abelii",
            emoji: "🦧",
            status: CriticallyEndangered,
            population: "~14,000 individuals",
            habitat: "Tropical rainforest",
            location: "Sumatra, Indonesia",
            threats: ["Deforestation", "Illegal pet trade", "Hunting"],
            facts: [
                "One of the most intelligent primates",
                "Builds nests in trees every night",
                "Shares 97% of DNA with humans",
            ],
            conservation_efforts: "Forest protection, anti-poaching measures, and rehabilitation programs",
            category: Terrestrial,
        },
        AnimalRecord {
            id: 3,
            name: "California Condor",
            scientific_name: "Gymnogyps californianus",
            emoji: "🦅",
            status: CriticallyEndangered,
            population: "~500 individuals",
            habitat: "Mountainous regions and coastal areas",
            location: "California, Arizona, Utah",
            threats: ["Lead poisoning", "Habitat loss", "Power line collisions"],
            facts: [
                "Largest flying bird in North America",
                "Wingspan can reach 9.5 feet",
                "Can live up to 60 years in the wild",
            ],
            conservation_efforts: "Captive breeding programs, lead ammunition bans, and habitat restoration",
            category: Avian,
        },
        AnimalRecord {
            id: 4,
            name: "Javan Rhino",
            scientific_name: "Rhinoceros sondaicus",
            emoji: "🦏",
            status: CriticallyEndangered,
            population: "~75 individuals",
            habitat: "Tropical rainforest and grasslands",
            location: "Java, Indonesia",
            threats: ["Poaching", "Habitat loss", "Natural disasters"],
            facts: [
                "Smallest rhino species",
                "Only found in Ujung Kulon National Park",
                "Excellent swimmers despite their size",
            ],
            conservation_efforts: "Protected area management, anti-poaching patrols, and population monitoring",
            category: Terrestrial,
        },
        AnimalRecord {
            id: 5,
            name: "Hawksbill Sea Turtle",
            scientific_name: "Eretmochelys imbricata",
            emoji: "🐢",
            status: CriticallyEndangered,
            population: "~25,000 nesting females",
            habitat: "Coral reefs and tropical oceans",
            location: "Global tropical waters",
            threats: ["Illegal trade", "Habitat destruction", "Climate change"],
            facts: [
                "Named for their hawk-like beak",
                "Play crucial role in coral reef health",
                "Can live up to 50 years",
            ],
            conservation_efforts: "International trade bans, protected nesting beaches, and marine protected areas",
            category: Marine,
        },
        AnimalRecord {
            id: 6,
            name: "Amur Leopard",
            scientific_name: "Panthera pardus orientalis",
            emoji: "🐆",
            status: CriticallyEndangered,
            population: "~100 individuals",
            habitat: "Temperate forests",
            location: "Russian Far East and China",
            threats: ["Poaching", "Habitat fragmentation", "Prey depletion"],
            facts: [
                "Most northern leopard subspecies",
                "Adapted to cold climates",
                "Excellent climbers and swimmers",
            ],
            conservation_efforts: "Anti-poaching measures, habitat corridors, and prey population management",
            category: Terrestrial,
        },
    ]
    .into_iter()
    .map(Animal::from)
    .collect()
}
