use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::beatmap::{background_preview_url, download_urls, Beatmap, BeatmapSet};
use crate::config::{BOT_NAME, BOT_VERSION, EMBED_COLOR};

/// Tags past this count are dropped from the embed.
const MAX_TAGS: usize = 8;

/// Builds the rich embed for a beatmapset. Difficulty and play stats come
/// from the first difficulty entry only.
pub fn beatmap_embed(set: &BeatmapSet) -> CreateEmbed {
    let urls = download_urls(set.id);
    let fallback = Beatmap::default();
    let diff = set.beatmaps.first().unwrap_or(&fallback);

    let genre = set.genre.as_ref().map(|g| g.name.as_str()).unwrap_or("Unknown");
    let language = set.language.as_ref().map(|l| l.name.as_str()).unwrap_or("Unknown");

    let mut embed = CreateEmbed::new()
        .colour(EMBED_COLOR)
        .title(set.title.as_str())
        .description(format!(
            "**Artist:** {}\n**Creator:** {}\n**Genre:** {}\n**Language:** {}",
            set.artist, set.creator, genre, language
        ))
        .field(
            "Length / BPM",
            format!("{} • {} BPM", format_duration(diff.total_length), set.bpm),
            true,
        )
        .field(
            "Status / Rating",
            format!("{} • {:.2} ★", set.status, set.rating),
            true,
        )
        .field("Favorites", group_digits(set.favourite_count), true)
        .field(
            "Difficulty",
            format!(
                "**CS:** {} • **AR:** {} • **HP:** {}\n**Stars:** {:.2} ★ • **Max Combo:** {}",
                diff.cs,
                diff.ar,
                diff.drain,
                diff.difficulty_rating,
                diff.max_combo
                    .map(group_digits)
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            false,
        )
        .field(
            "Play Stats",
            format!(
                "**Circles:** {} • **Sliders:** {} • **Spinners:** {}\n**Play Count:** {} • **Pass Count:** {}",
                group_digits(diff.count_circles.unwrap_or(0)),
                group_digits(diff.count_sliders.unwrap_or(0)),
                group_digits(diff.count_spinners.unwrap_or(0)),
                group_digits(diff.playcount.unwrap_or(0)),
                group_digits(diff.passcount.unwrap_or(0)),
            ),
            false,
        )
        .field(
            "Download Links",
            format!(
                "[Download with Video]({})\n[Download without Video]({})",
                urls.with_video, urls.without_video
            ),
            false,
        );

    if !set.tags.trim().is_empty() {
        let tags = set
            .tags
            .split_whitespace()
            .take(MAX_TAGS)
            .collect::<Vec<_>>()
            .join(", ");
        embed = embed.field("Tags", tags, false);
    }

    embed = embed
        .image(background_preview_url(set.id))
        .footer(CreateEmbedFooter::new(format!(
            "Beatmap ID: {} • {} {}",
            set.id, BOT_NAME, BOT_VERSION
        )));

    if let Some(card) = set.covers.as_ref().and_then(|c| c.card.as_deref()) {
        embed = embed.thumbnail(card);
    }

    embed
}

/// Seconds to `m:ss`, floor-divided.
fn format_duration(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Comma-grouped decimal rendering, 1234567 -> "1,234,567".
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{Covers, NamedEntry};

    fn sample_set() -> BeatmapSet {
        BeatmapSet {
            id: 320118,
            title: "Night of Knights".to_string(),
            artist: "beatMARIO".to_string(),
            creator: "Jenny".to_string(),
            bpm: 180.0,
            status: "ranked".to_string(),
            favourite_count: 4213,
            rating: 9.314,
            tags: "touhou cool&create remix scarlet devil knight night piano stream jump".to_string(),
            genre: Some(NamedEntry { name: "Video Game".to_string() }),
            language: Some(NamedEntry { name: "Japanese".to_string() }),
            covers: Some(Covers {
                card: Some("https://assets.ppy.sh/beatmaps/320118/covers/card.jpg".to_string()),
                cover: None,
                list: None,
            }),
            beatmaps: vec![Beatmap {
                total_length: 125,
                cs: 4.0,
                ar: 9.3,
                drain: 6.0,
                difficulty_rating: 5.92,
                max_combo: Some(1057),
                count_circles: Some(411),
                count_sliders: Some(251),
                count_spinners: Some(2),
                playcount: Some(1204417),
                passcount: Some(190211),
            }],
        }
    }

    #[test]
    fn format_duration_floor_divides_into_minutes() {
        assert_eq!(format_duration(125), "2:05");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(600), "10:00");
    }

    #[test]
    fn group_digits_inserts_thousands_separators() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(1204417), "1,204,417");
    }

    #[test]
    fn embed_carries_title_fields_and_footer() {
        let value = serde_json::to_value(beatmap_embed(&sample_set())).expect("embed serializes");

        assert_eq!(value["title"], "Night of Knights");
        assert_eq!(value["color"], 0xFF66AA);

        let description = value["description"].as_str().unwrap();
        assert!(description.contains("**Artist:** beatMARIO"));
        assert!(description.contains("**Genre:** Video Game"));

        let fields = value["fields"].as_array().unwrap();
        assert_eq!(fields[0]["name"], "Length / BPM");
        assert_eq!(fields[0]["value"], "2:05 • 180 BPM");
        assert_eq!(fields[0]["inline"], true);
        assert_eq!(fields[1]["value"], "ranked • 9.31 ★");
        assert_eq!(fields[2]["value"], "4,213");
        assert!(fields[4]["value"].as_str().unwrap().contains("**Play Count:** 1,204,417"));

        let footer = value["footer"]["text"].as_str().unwrap();
        assert!(footer.starts_with("Beatmap ID: 320118"));
        assert_eq!(
            value["image"]["url"],
            "https://catboy.best/preview/background/320118"
        );
        assert_eq!(
            value["thumbnail"]["url"],
            "https://assets.ppy.sh/beatmaps/320118/covers/card.jpg"
        );
    }

    #[test]
    fn tags_field_keeps_only_the_first_eight() {
        let value = serde_json::to_value(beatmap_embed(&sample_set())).expect("embed serializes");
        let fields = value["fields"].as_array().unwrap();
        let tags = fields
            .iter()
            .find(|f| f["name"] == "Tags")
            .expect("tags field present");

        assert_eq!(
            tags["value"],
            "touhou, cool&create, remix, scarlet, devil, knight, night, piano"
        );
    }

    #[test]
    fn missing_metadata_falls_back_to_unknown_and_zero() {
        let mut set = sample_set();
        set.genre = None;
        set.language = None;
        set.covers = None;
        set.tags = String::new();
        set.beatmaps.clear();

        let value = serde_json::to_value(beatmap_embed(&set)).expect("embed serializes");

        let description = value["description"].as_str().unwrap();
        assert!(description.contains("**Genre:** Unknown"));
        assert!(description.contains("**Language:** Unknown"));

        let fields = value["fields"].as_array().unwrap();
        assert_eq!(fields[0]["value"], "0:00 • 180 BPM");
        assert!(fields[3]["value"].as_str().unwrap().contains("**Max Combo:** Unknown"));
        assert!(fields.iter().all(|f| f["name"] != "Tags"));
        assert!(value.get("thumbnail").is_none());
    }
}
