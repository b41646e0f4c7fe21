use serde::{Deserialize, Serialize};

/// Track as served by `/api/tracks` and embedded in a created race.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Track {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub segments: Vec<u32>,
}

/// Racer as served by `/api/cars`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Racer {
    pub id: u32,
    pub driver_name: String,
    pub top_speed: u32,
    pub acceleration: u32,
    pub handling: u32,
}

/// Response of `POST /api/races`. The race server uses PascalCase keys here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Race {
    #[serde(rename = "ID")]
    pub id: u32,
    pub track: Track,
    #[serde(rename = "PlayerID", default)]
    pub player_id: Option<u32>,
    #[serde(default)]
    pub cars: Vec<Racer>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Progress {
    Unstarted,
    InProgress,
    Finished,
}

/// Response of `GET /api/races/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RaceStatus {
    pub status: Progress,
    #[serde(default)]
    pub positions: Vec<Position>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Position {
    pub id: u32,
    pub driver_name: String,
    #[serde(default)]
    pub segment: u32,
    #[serde(default)]
    pub final_position: Option<u32>,
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Body of `POST /api/races`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateRace {
    pub player_id: u32,
    pub track_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_uses_pascal_case_keys() {
        let json = r#"{
            "ID": 4,
            "Track": { "id": 2, "name": "Track 2", "segments": [10, 20, 30] },
            "PlayerID": 1,
            "Cars": [],
            "Results": { "status": "unstarted", "positions": [] }
        }"#;
        let race: Race = serde_json::from_str(json).unwrap();
        assert_eq!(race.id, 4);
        assert_eq!(race.track.segments.len(), 3);
        assert_eq!(race.player_id, Some(1));
    }

    #[test]
    fn test_status_parsing() {
        let json = r#"{
            "status": "in-progress",
            "positions": [
                { "id": 1, "driver_name": "Racer 1", "segment": 12, "speed": 88.5 },
                { "id": 2, "driver_name": "Racer 2", "segment": 30, "final_position": 1 }
            ]
        }"#;
        let status: RaceStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.status, Progress::InProgress);
        assert_eq!(status.positions[0].final_position, None);
        assert_eq!(status.positions[1].final_position, Some(1));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{ "status": "paused", "positions": [] }"#;
        assert!(serde_json::from_str::<RaceStatus>(json).is_err());
    }

    #[test]
    fn test_create_race_body() {
        let body = serde_json::to_value(CreateRace { player_id: 3, track_id: 5 }).unwrap();
        assert_eq!(body, serde_json::json!({ "player_id": 3, "track_id": 5 }));
    }
}
