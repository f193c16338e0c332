//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use pdh_core::entities::*;
use pdh_core::enums::*;
use pdh_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn key_result(current: f64, target: f64) -> KeyResult {
    KeyResult {
        id: "krs-0a1b2c3d4e5f6a7b".into(),
        objective_id: "obj-0a1b2c3d4e5f6a7b".into(),
        title: "Weekly active teams".into(),
        description: Some("Teams with at least one edit".into()),
        current_value: current,
        target_value: target,
        status: OkrStatus::InProgress,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn objective() -> Objective {
    Objective {
        id: "obj-0a1b2c3d4e5f6a7b".into(),
        project_id: "prj-0a1b2c3d4e5f6a7b".into(),
        user_id: "user-1".into(),
        title: "Become the default discovery workspace".into(),
        description: None,
        status: OkrStatus::AtRisk,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

roundtrip_and_validate!(
    project_roundtrip,
    Project,
    Project {
        id: "prj-0a1b2c3d4e5f6a7b".into(),
        user_id: "user-1".into(),
        name: "Checkout redesign".into(),
        description: Some("Reduce drop-off in the payment step".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    csd_item_roundtrip,
    CsdItem,
    CsdItem {
        id: "csd-0a1b2c3d4e5f6a7b".into(),
        project_id: "prj-0a1b2c3d4e5f6a7b".into(),
        user_id: "user-1".into(),
        category: CsdCategory::Supposition,
        text: "Users abandon carts because of shipping cost".into(),
        position: 2,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    persona_detail_roundtrip,
    PersonaDetail,
    PersonaDetail {
        id: "pdt-0a1b2c3d4e5f6a7b".into(),
        persona_id: "per-0a1b2c3d4e5f6a7b".into(),
        user_id: "user-1".into(),
        category: PersonaDetailCategory::PainPoint,
        content: "Too many steps to reorder".into(),
        order_index: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    canvas_item_roundtrip,
    CanvasItem,
    CanvasItem {
        id: "bmi-0a1b2c3d4e5f6a7b".into(),
        project_id: "prj-0a1b2c3d4e5f6a7b".into(),
        user_id: "user-1".into(),
        block: BmcBlock::RevenueStreams,
        content: "Subscription tiers".into(),
        position: 1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    rice_item_roundtrip,
    RiceItem,
    RiceItem {
        id: "rce-0a1b2c3d4e5f6a7b".into(),
        project_id: "prj-0a1b2c3d4e5f6a7b".into(),
        user_id: "user-1".into(),
        name: "Saved carts".into(),
        description: None,
        reach_score: 8,
        impact_score: 6,
        confidence_score: 7,
        effort_score: 3,
        rice_score: 112.0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    roadmap_item_roundtrip,
    RoadmapItem,
    RoadmapItem {
        id: "rmp-0a1b2c3d4e5f6a7b".into(),
        project_id: "prj-0a1b2c3d4e5f6a7b".into(),
        user_id: "user-1".into(),
        name: "Public beta".into(),
        content: "Public beta".into(),
        description: Some("Invite waitlist".into()),
        quarter: Quarter::Q2,
        year: 2026,
        status: RoadmapStatus::InProgress,
        start_date: NaiveDate::from_ymd_opt(2026, 4, 1),
        end_date: NaiveDate::from_ymd_opt(2026, 6, 30),
        priority: Priority::High,
        timeframe: Timeframe::Now,
        position: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    framework_link_roundtrip,
    FrameworkLink,
    FrameworkLink {
        id: "lnk-0a1b2c3d4e5f6a7b".into(),
        project_id: "prj-0a1b2c3d4e5f6a7b".into(),
        user_id: "user-1".into(),
        source_item_id: "csd-0a1b2c3d4e5f6a7b".into(),
        source_item_type: ItemType::CsdItem,
        target_item_id: "rce-0a1b2c3d4e5f6a7b".into(),
        target_item_type: ItemType::RiceItem,
        link_type: Some("validates".into()),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    objective_with_key_results_roundtrip,
    ObjectiveWithKeyResults,
    ObjectiveWithKeyResults::new(objective(), vec![key_result(30.0, 60.0), key_result(5.0, 5.0)])
);

roundtrip_and_validate!(
    ai_suggestion_roundtrip,
    AiSuggestion,
    AiSuggestion {
        suggestions: vec!["Interview five churned customers".into()],
        reasoning: None,
    }
);

#[test]
fn snippet_serializes_type_tag() {
    let snippet = LinkedItemSnippet {
        id: "csd-1".into(),
        item_type: ItemType::CsdItem,
        content: "We know users want exports".into(),
        name: None,
    };
    let json = serde_json::to_value(&snippet).unwrap();
    assert_eq!(json["type"], "csd_item");
    assert!(json.get("item_type").is_none());
}

#[test]
fn objective_view_flattens_fields_and_reports_progress() {
    let view = ObjectiveWithKeyResults::new(
        objective(),
        vec![key_result(30.0, 60.0), key_result(10.0, 5.0)],
    );
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["title"], "Become the default discovery workspace");
    assert_eq!(json["status"], "At Risk");
    assert_eq!(json["key_results"][1]["progress"], 100.0);
    assert_eq!(json["progress"], 75.0);
}
