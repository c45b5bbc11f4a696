use domain::spotify_api::RecommendationQuery;
use serde::Deserialize;

/// Query parameters accepted by GET /recommendations.
///
/// `tracks` is a comma-separated list of seed track ids; the remaining named
/// fields are the tunable audio attributes, forwarded to Spotify as
/// `target_<attribute>` values without local validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsParams {
    pub tracks: Option<String>,
    pub limit: Option<u32>,
    pub market: Option<String>,
    pub acousticness: Option<String>,
    pub danceability: Option<String>,
    pub duration_ms: Option<String>,
    pub energy: Option<String>,
    pub instrumentalness: Option<String>,
    pub key: Option<String>,
    pub liveness: Option<String>,
    pub loudness: Option<String>,
    pub mode: Option<String>,
    pub popularity: Option<String>,
    pub speechiness: Option<String>,
    pub tempo: Option<String>,
    pub valence: Option<String>,
}

impl RecommendationsParams {
    pub(crate) fn into_query(self) -> RecommendationQuery {
        let seed_tracks = self
            .tracks
            .map(|tracks| {
                tracks
                    .split(',')
                    .map(str::trim)
                    .filter(|track| !track.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let attributes = [
            ("acousticness", self.acousticness),
            ("danceability", self.danceability),
            ("duration_ms", self.duration_ms),
            ("energy", self.energy),
            ("instrumentalness", self.instrumentalness),
            ("key", self.key),
            ("liveness", self.liveness),
            ("loudness", self.loudness),
            ("mode", self.mode),
            ("popularity", self.popularity),
            ("speechiness", self.speechiness),
            ("tempo", self.tempo),
            ("valence", self.valence),
        ];

        let targets = attributes
            .into_iter()
            .filter_map(|(attribute, value)| value.map(|value| (attribute.to_string(), value)))
            .collect();

        RecommendationQuery {
            seed_tracks,
            limit: self.limit,
            market: self.market,
            targets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_params() -> RecommendationsParams {
        RecommendationsParams {
            tracks: None,
            limit: None,
            market: None,
            acousticness: None,
            danceability: None,
            duration_ms: None,
            energy: None,
            instrumentalness: None,
            key: None,
            liveness: None,
            loudness: None,
            mode: None,
            popularity: None,
            speechiness: None,
            tempo: None,
            valence: None,
        }
    }

    #[test]
    fn into_query_splits_tracks_and_drops_empty_segments() {
        let params = RecommendationsParams {
            tracks: Some("track-a, track-b,,".to_string()),
            ..empty_params()
        };

        let query = params.into_query();
        assert_eq!(query.seed_tracks, vec!["track-a", "track-b"]);
    }

    #[test]
    fn into_query_only_forwards_supplied_attributes() {
        let params = RecommendationsParams {
            energy: Some("0.8".to_string()),
            tempo: Some("120".to_string()),
            ..empty_params()
        };

        let query = params.into_query();
        assert_eq!(
            query.targets,
            vec![
                ("energy".to_string(), "0.8".to_string()),
                ("tempo".to_string(), "120".to_string()),
            ]
        );
    }
}
