//! Static lookup tables used by name matching and query expansion.
//!
//! All entries are lowercase. Multi-word entries are single-space separated.

/// Legal-entity and generic type words removed during name cleaning.
pub(crate) const LEGAL_SUFFIXES: &[&str] = &[
    "restaurant", "cafe", "café", "llc", "inc", "corp", "ltd", "co",
];

/// Establishment-type words. Two names whose type words share nothing are
/// treated as different businesses.
pub(crate) const ESTABLISHMENT_TYPES: &[&str] = &[
    "restaurant", "cafe", "café", "bistro", "grill", "grille", "bar", "pub", "diner",
    "pizzeria", "pizza", "bakery",
];

/// Maps a type word to its equivalence family.
pub(crate) fn establishment_family(word: &str) -> &str {
    match word {
        "grille" => "grill",
        "pizza" => "pizzeria",
        "café" => "cafe",
        other => other,
    }
}

/// Longest location phrase, in words (e.g. "district of columbia").
pub(crate) const MAX_LOCATION_WORDS: usize = 3;

pub(crate) const US_STATE_NAMES: &[&str] = &[
    "alabama", "alaska", "arizona", "arkansas", "california", "colorado", "connecticut",
    "delaware", "florida", "georgia", "hawaii", "idaho", "illinois", "indiana", "iowa",
    "kansas", "kentucky", "louisiana", "maine", "maryland", "massachusetts", "michigan",
    "minnesota", "mississippi", "missouri", "montana", "nebraska", "nevada",
    "new hampshire", "new jersey", "new mexico", "new york", "north carolina",
    "north dakota", "ohio", "oklahoma", "oregon", "pennsylvania", "rhode island",
    "south carolina", "south dakota", "tennessee", "texas", "utah", "vermont", "virginia",
    "washington", "west virginia", "wisconsin", "wyoming", "district of columbia",
];

pub(crate) const US_STATE_CODES: &[&str] = &[
    "al", "ak", "az", "ar", "ca", "co", "ct", "de", "fl", "ga", "hi", "id", "il", "in", "ia",
    "ks", "ky", "la", "me", "md", "ma", "mi", "mn", "ms", "mo", "mt", "ne", "nv", "nh", "nj",
    "nm", "ny", "nc", "nd", "oh", "ok", "or", "pa", "ri", "sc", "sd", "tn", "tx", "ut", "vt",
    "va", "wa", "wv", "wi", "wy", "dc", "usa", "us",
];

pub(crate) const COMMON_CITIES: &[&str] = &[
    "new york", "los angeles", "chicago", "houston", "phoenix", "philadelphia",
    "san antonio", "san diego", "dallas", "san jose", "austin", "jacksonville",
    "fort worth", "columbus", "charlotte", "san francisco", "indianapolis", "seattle",
    "denver", "nashville", "oklahoma city", "el paso", "boston", "portland", "las vegas",
    "detroit", "memphis", "louisville", "baltimore", "milwaukee", "albuquerque", "tucson",
    "fresno", "sacramento", "mesa", "kansas city", "atlanta", "omaha", "colorado springs",
    "raleigh", "miami", "long beach", "virginia beach", "oakland", "minneapolis", "tulsa",
    "tampa", "arlington", "new orleans", "cleveland", "orlando", "pittsburgh",
    "cincinnati", "st louis", "saint louis", "salt lake city", "waco", "plano", "irving",
    "garland", "frisco", "mckinney", "killeen", "temple", "round rock", "corpus christi",
    "lubbock", "laredo", "amarillo", "brownsville", "college station", "tyler", "midland",
    "odessa", "abilene", "beaumont", "denton", "mcallen", "pflugerville", "georgetown",
    "san marcos", "new braunfels", "boise", "spokane", "richmond", "birmingham",
];

/// Category keywords recognised in the business-name part of a query, used to
/// build category + location fallback variants.
pub(crate) const QUERY_CATEGORY_KEYWORDS: &[&str] = &["pest control", "plumbing", "electrical"];

/// Pest-control category membership keywords.
pub(crate) const PEST_CONTROL_KEYWORDS: &[&str] = &[
    "pest control", "pest", "pests", "exterminator", "exterminators", "exterminating",
    "extermination", "termite", "termites", "bug", "bugs", "rodent",
];

/// Words removed before comparing business-name tokens inside a category.
pub(crate) const CATEGORY_STOP_WORDS: &[&str] = &[
    "pest", "control", "service", "services", "management", "solutions", "company", "llc",
    "inc", "corp", "ltd", "professional", "the", "and", "of", "for",
];

/// Provider category tags too generic to describe a competitor market.
pub(crate) const GENERIC_PLACE_TYPES: &[&str] = &[
    "point_of_interest", "establishment", "store", "premise", "food", "health",
    "general_contractor",
];

pub(crate) fn is_location_phrase(phrase: &str) -> bool {
    US_STATE_NAMES.contains(&phrase)
        || US_STATE_CODES.contains(&phrase)
        || COMMON_CITIES.contains(&phrase)
}
