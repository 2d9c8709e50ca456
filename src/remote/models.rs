use crate::domain::{PropertyGroup, Suggestion};
use serde::{Deserialize, Deserializer, Serialize};

// GET /suggestion/
//  ├── suggestions            grouped by CARES property, unverified
//  │    ├── id
//  │    ├── propertyName
//  │    └── suggestions[]     caseID, address, verification
//  ├── archivedSuggestions[]  id, caseID, address, verification
//  │                          (or grouped like `suggestions`)
//  └── numSuggestions

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<PropertyGroup>,
    #[serde(rename = "archivedSuggestions", deserialize_with = "archived_rows")]
    pub archived_suggestions: Vec<Suggestion>,
    #[serde(rename = "numSuggestions")]
    pub num_suggestions: u64,
}

/// Body of the confirm / reject / undo POSTs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationRequest {
    #[serde(rename = "caresId")]
    pub cares_id: i64,
    #[serde(rename = "caseID")]
    pub case_id: String,
}

/// GET /suggestion/map. Points are `[lon, lat]`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SuggestionLocations {
    #[serde(rename = "caresLocation")]
    pub cares_location: [f64; 2],
    #[serde(rename = "evictionLocation")]
    pub eviction_location: [f64; 2],
}

/// The backend has shipped archived suggestions both flat and grouped by
/// property. Either way they end up as flat rows.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArchivedShape {
    Flat(Vec<Suggestion>),
    Grouped(Vec<PropertyGroup>),
}

fn archived_rows<'de, D>(deserializer: D) -> Result<Vec<Suggestion>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ArchivedShape::deserialize(deserializer)? {
        ArchivedShape::Flat(rows) => rows,
        ArchivedShape::Grouped(groups) => groups
            .iter()
            .flat_map(|group| {
                group.suggestions.iter().map(move |s| Suggestion {
                    property_id: group.property_id,
                    case_id: s.case_id.clone(),
                    address: s.address.clone(),
                    verification: s.verification,
                })
            })
            .collect(),
    })
}
