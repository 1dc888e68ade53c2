use chrono::{Duration, NaiveDate};

use mastery_engine::mastery::{HintLevel, MasteryProfile, Readiness};
use mastery_engine::store::Store;

fn sample_profile() -> (MasteryProfile, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let levels = [
        HintLevel::Minimal,
        HintLevel::Moderate,
        HintLevel::FullExplanation,
        HintLevel::Acknowledged,
    ];

    let mut profile = MasteryProfile::new();
    for i in 0..12_i64 {
        let concept = format!("concept_{}", i % 7);
        let level = levels[(i as usize) % levels.len()];
        profile
            .record_event(&[concept.as_str()], level, start + Duration::days(i))
            .unwrap();
    }
    for exam in ["quiz-1", "midterm", "final"] {
        profile.compute_exam_readiness(exam, &["concept_0", "concept_3", "concept_6"]);
    }

    let today = start + Duration::days(20);
    profile.recompute_schedule(today);
    (profile, today)
}

#[test]
fn pt_profile_json_roundtrip() {
    let (profile, today) = sample_profile();

    let encoded = serde_json::to_string(&profile).expect("serialize profile");
    let mut decoded: MasteryProfile = serde_json::from_str(&encoded).expect("deserialize profile");
    decoded.recompute_schedule(today);

    assert_eq!(decoded, profile);
    assert_eq!(decoded.concepts.len(), 7);
    assert_eq!(decoded.exams.len(), 3);
}

#[test]
fn pt_profile_wire_format_is_camel_case() {
    let (profile, _) = sample_profile();
    let value = serde_json::to_value(&profile).expect("to value");

    let concept = &value["concepts"]["concept_0"];
    assert!(concept.get("hintUsageCount").is_some());
    assert!(concept.get("lastReviewDate").is_some());
    assert!(concept["lastHintLevel"].is_number());
    assert!(value["schedule"].get("dueWithin24h").is_some());

    let readiness = value["exams"]["midterm"]["readiness"].as_str().unwrap();
    assert!(["Ready", "Needs Work", "Not Ready"].contains(&readiness));
}

#[test]
fn pt_rejects_out_of_range_hint_level() {
    let raw = r#"{
        "id": "user_x",
        "concepts": {
            "loops": {
                "score": 2.5,
                "attempts": 1,
                "hintUsageCount": 0,
                "lastReviewDate": "2024-03-01",
                "lastHintLevel": 7
            }
        }
    }"#;
    assert!(serde_json::from_str::<MasteryProfile>(raw).is_err());
}

#[test]
fn pt_missing_collections_default_to_empty() {
    let decoded: MasteryProfile = serde_json::from_str(r#"{"id":"user_legacy"}"#).unwrap();
    assert!(decoded.is_empty());
    assert!(decoded.schedule.is_empty());
}

#[test]
fn pt_store_roundtrip_preserves_profile() {
    let (profile, today) = sample_profile();
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let path = temp_dir.path().join("roundtrip.sled");

    {
        let store = Store::open(&path.to_string_lossy()).expect("open store");
        store.set_profile("masteryProfile", &profile).expect("save");
        store.flush().expect("flush");
    }

    let store = Store::open(&path.to_string_lossy()).expect("reopen store");
    let mut loaded = store
        .get_profile("masteryProfile")
        .expect("load")
        .expect("profile present");
    loaded.recompute_schedule(today);

    assert_eq!(loaded, profile);
    assert_eq!(loaded.exams["midterm"].readiness, profile.exams["midterm"].readiness);
    assert!(matches!(
        loaded.exams["final"].readiness,
        Readiness::Ready | Readiness::NeedsWork | Readiness::NotReady
    ));
}

#[test]
fn pt_concept_order_survives_persistence() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let mut profile = MasteryProfile::new();
    for concept in ["zeta", "alpha", "mu"] {
        profile
            .record_event(&[concept], HintLevel::FullExplanation, today)
            .unwrap();
    }

    let encoded = serde_json::to_string(&profile).expect("serialize profile");
    let decoded: MasteryProfile = serde_json::from_str(&encoded).expect("deserialize profile");

    let ids: Vec<&str> = decoded.concepts.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["zeta", "alpha", "mu"]);
    let weak: Vec<String> = decoded.weak_concepts(3.0).into_iter().map(|w| w.concept).collect();
    assert_eq!(weak, vec!["zeta", "alpha", "mu"]);
}
