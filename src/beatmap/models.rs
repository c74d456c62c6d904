use serde::Deserialize;

/// A beatmapset as returned by the mirror's `/api/v2/s/{id}` and
/// `/api/v2/search` endpoints. Fetched fresh on every request, never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct BeatmapSet {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub creator: String,
    #[serde(default)]
    pub bpm: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub favourite_count: u64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub genre: Option<NamedEntry>,
    #[serde(default)]
    pub language: Option<NamedEntry>,
    #[serde(default)]
    pub covers: Option<Covers>,
    #[serde(default)]
    pub beatmaps: Vec<Beatmap>,
}

/// One difficulty chart within a set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Beatmap {
    #[serde(default)]
    pub total_length: u64,
    #[serde(default)]
    pub cs: f64,
    #[serde(default)]
    pub ar: f64,
    #[serde(default)]
    pub drain: f64,
    #[serde(default)]
    pub difficulty_rating: f64,
    #[serde(default)]
    pub max_combo: Option<u64>,
    #[serde(default)]
    pub count_circles: Option<u64>,
    #[serde(default)]
    pub count_sliders: Option<u64>,
    #[serde(default)]
    pub count_spinners: Option<u64>,
    #[serde(default)]
    pub playcount: Option<u64>,
    #[serde(default)]
    pub passcount: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Covers {
    #[serde(default)]
    pub card: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub list: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntry {
    pub name: String,
}
