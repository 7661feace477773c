//! Exports generated meets and checks the file against its own trailer.

use std::sync::Arc;

use meetfile::{
    assembler::MeetFileExporter,
    config::ExportOptions,
    records::{RECORD_WIDTH, RecordCounts, RecordKind},
};
use rand::{SeedableRng, rngs::StdRng};
use test_data::prelude::*;

async fn export(scenario: &Scenario) -> meetfile::assembler::MeetFile {
    MeetFileExporter::new(Arc::new(scenario.to_store()), ExportOptions::default())
        .export_meet(&scenario.meet.id)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_generated_meets_satisfy_trailer() {
    for seed in [1_u64, 7, 42, 12345] {
        let mut rng = StdRng::seed_from_u64(seed);
        let scenario = ScenarioBuilder::new().with_swimmers(40).build_data(&mut rng);
        let file = export(&scenario).await;
        let lines: Vec<&str> = file.lines().collect();

        assert!(lines.iter().all(|l| l.len() == RECORD_WIDTH), "seed {seed}");
        let counts = RecordCounts::from_trailer_line(lines[lines.len() - 1]).unwrap();
        let count = |kind: RecordKind| lines.iter().filter(|l| RecordKind::of_line(l) == Some(kind)).count();

        assert_eq!(counts.d_records, count(RecordKind::IndividualEntry), "seed {seed}");
        assert_eq!(counts.e_records, count(RecordKind::RelayHeader), "seed {seed}");
        assert_eq!(counts.f_records, count(RecordKind::RelayLeg), "seed {seed}");
        assert_eq!(counts.d_records, scenario.selections.len(), "seed {seed}");
        assert_eq!(counts.e_records, scenario.relay_teams.len(), "seed {seed}");
        assert!(counts.swimmers <= scenario.swimmers.len());
    }
}

#[tokio::test]
async fn test_long_course_meet_header() {
    let mut rng = StdRng::seed_from_u64(3);
    let scenario = ScenarioBuilder::small_meet()
        .with_course(Course::LongCourseMeters)
        .build_data(&mut rng);
    let file = export(&scenario).await;

    let b1 = file.lines().find(|l| l.starts_with("B1")).unwrap();
    assert_eq!(&b1[151..152], "L");
    assert!(file.suggested_file_name.ends_with("_20240315.sd3"));
}
