//! Journey: moving a household's data between devices.
//!
//! JSON backup out of one store and into another, plus the spreadsheet
//! paths: question-bank CSV in, problems/logs CSV out.

use chrono::Utc;
use fukushu_core::{
    export_logs_csv, export_problems_csv, import_backup, import_question_bank_csv,
    io::{backup_from_snapshot, read_backup_file, write_backup_file},
    AppSettings, MemoryStore, NewReviewLog, Rating, ReviewLogSink, ReviewStore,
};
use fukushu_e2e_tests::fixtures::TestDataFactory;
use tempfile::TempDir;

#[tokio::test]
async fn backup_moves_between_devices() {
    // Device A: some problems and history.
    let device_a = MemoryStore::new();
    for problem in TestDataFactory::batch(3, "rin", "漢字") {
        device_a.put_problem(problem).await.unwrap();
    }
    device_a
        .append_review_log(NewReviewLog {
            problem_id: "p0".to_string(),
            user_id: "rin".to_string(),
            rating: Rating::Doubt,
            reviewed_at: Utc::now(),
        })
        .await
        .unwrap();

    // Export to a file, as the data I/O page does.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("backup.json");
    let backup = backup_from_snapshot(&device_a.snapshot(), AppSettings::default());
    write_backup_file(&path, &backup).unwrap();

    // Device B already has one of the ids: the collision gets a fresh id.
    let device_b = MemoryStore::new();
    device_b
        .put_problem(TestDataFactory::problem("p0", "rin", "漢字", "already here"))
        .await
        .unwrap();

    let restored = read_backup_file(&path).unwrap();
    let summary = import_backup(&device_b, &device_b.snapshot(), restored)
        .await
        .unwrap();
    assert_eq!(summary.problems_added, 3);
    assert_eq!(summary.problems_renamed, 1);
    assert_eq!(summary.logs_added, 1);

    let snapshot = device_b.snapshot();
    assert_eq!(snapshot.problems.len(), 4);
    // the pre-existing problem was not overwritten
    let kept = snapshot.problems.iter().find(|p| p.id == "p0").unwrap();
    assert_eq!(kept.text, "already here");
    // the imported log follows its renamed problem
    let log = &snapshot.review_logs[0];
    assert_ne!(log.problem_id, "p0");
    assert!(snapshot.problems.iter().any(|p| p.id == log.problem_id));
}

#[tokio::test]
async fn question_bank_csv_lands_in_the_store() {
    let data = "id,subject,unit,question,answer,status,note\r\n\
                1,算数,わり算,12 ÷ 3 = ?,4,×,\r\n\
                2,算数,わり算,15 ÷ 5 = ?,3,○,\r\n\
                3,漢字,,「川」の読みは？,かわ,△,要復習\r\n";

    let settings = AppSettings::default();
    let import = import_question_bank_csv(data, "yui", &settings, Utc::now()).unwrap();
    assert_eq!(import.problems.len(), 3);
    assert_eq!(import.initial_logs.len(), 2);

    let store = MemoryStore::new();
    for problem in import.problems {
        store.put_problem(problem).await.unwrap();
    }
    for log in import.initial_logs {
        store
            .append_review_log(NewReviewLog {
                problem_id: log.problem_id,
                user_id: log.user_id,
                rating: log.rating,
                reviewed_at: log.reviewed_at,
            })
            .await
            .unwrap();
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.problems.len(), 3);
    // the correct row entered unscored; the others carry their first rating
    assert_eq!(snapshot.review_logs.len(), 2);
    assert!(snapshot
        .review_logs
        .iter()
        .any(|log| log.rating == Rating::Wrong));
    assert!(snapshot
        .review_logs
        .iter()
        .any(|log| log.rating == Rating::Doubt));
}

#[tokio::test]
async fn spreadsheet_exports_cover_both_children() {
    let store = MemoryStore::new();
    store
        .put_problem(TestDataFactory::problem("p1", "rin", "算数", "rin's question"))
        .await
        .unwrap();
    store
        .put_problem(TestDataFactory::problem("p2", "yui", "漢字", "yui's question"))
        .await
        .unwrap();
    store
        .append_review_log(NewReviewLog {
            problem_id: "p1".to_string(),
            user_id: "rin".to_string(),
            rating: Rating::Wrong,
            reviewed_at: Utc::now(),
        })
        .await
        .unwrap();

    let snapshot = store.snapshot();
    let users = AppSettings::default_users();

    let both = export_problems_csv(&snapshot.problems, &users, None).unwrap();
    assert!(both.contains("rin's question"));
    assert!(both.contains("yui's question"));

    let rin_only = export_problems_csv(&snapshot.problems, &users, Some("rin")).unwrap();
    assert!(rin_only.contains("rin's question"));
    assert!(!rin_only.contains("yui's question"));

    let logs = export_logs_csv(&snapshot.review_logs, &users, None, None, None).unwrap();
    assert!(logs.contains("wrong,まちがい"));
}
