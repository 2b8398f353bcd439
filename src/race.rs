//! Race results: the example target types for the `fit` command.
//!
//! A results sheet has one row per race, with a `Race Number` column and
//! per-lane columns such as `lane1_place`, `lane1_time`, `lane1_laptime1`.

use serde::{Deserialize, Serialize};

use crate::timespan::TimeSpan;

fit_type! {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Race {
        #[prefix("Race Number")]
        pub race_id: u32,
        #[prefix("lane*")]
        pub lanes: Vec<Lane>,
    }
}

fit_type! {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Lane {
        pub place: u32,
        /// Finishing time.
        pub time: TimeSpan,
        #[prefix("laptime*")]
        pub lap_times: Vec<TimeSpan>,
    }
}

impl Race {
    pub fn winner(&self) -> Option<&Lane> {
        self.lanes.iter().min_by_key(|lane| lane.place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatRecord, coerce, try_coerce};

    fn results_row() -> FlatRecord {
        [
            ("Race Number", "3"),
            ("lane1_place", "1"),
            ("lane1_time", "00:01:30"),
            ("lane1_laptime1", "00:00:45"),
            ("lane1_laptime2", "00:00:45"),
            ("lane2_place", "2"),
            ("lane2_time", "00:01:40"),
            ("lane2_laptime1", "00:00:48"),
            ("lane2_laptime2", "00:00:52"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn results_row_fits_race() {
        let race: Race = coerce(&results_row()).unwrap();
        assert_eq!(race.race_id, 3);
        assert_eq!(race.lanes.len(), 2);
        assert_eq!(race.lanes[0].place, 1);
        assert_eq!(race.lanes[0].time, TimeSpan::from_hms(0, 1, 30));
        assert_eq!(
            race.lanes[0].lap_times,
            vec![TimeSpan::from_hms(0, 0, 45), TimeSpan::from_hms(0, 0, 45)]
        );
        assert_eq!(race.lanes[1].time, TimeSpan::from_hms(0, 1, 40));
        assert_eq!(race.winner().map(|lane| lane.place), Some(1));
    }

    #[test]
    fn stray_lane_column_without_index_is_ignored() {
        let row: FlatRecord = [
            ("Race Number", "3"),
            ("lane1_place", "1"),
            ("lane1_time", "00:01:30"),
            ("lanes_note", "dry"),
        ]
        .into_iter()
        .collect();
        let race: Race = coerce(&row).unwrap();
        assert_eq!(race.lanes.len(), 1);
        assert_eq!(race.lanes[0].place, 1);
        assert!(race.lanes[0].lap_times.is_empty());
    }

    #[test]
    fn missing_race_number_does_not_fit() {
        let mut row = FlatRecord::new();
        row.push("lane1_place", "1");
        row.push("lane1_time", "00:01:30");
        assert!(try_coerce::<Race>(&row).is_none());
    }

    #[test]
    fn serializes_lap_times_as_text() {
        let race: Race = coerce(&results_row()).unwrap();
        let json = serde_json::to_value(&race).unwrap();
        assert_eq!(json["race_id"], 3);
        assert_eq!(json["lanes"][1]["lap_times"][1], "00:00:52");
    }
}
