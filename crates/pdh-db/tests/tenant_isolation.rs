//! Cross-framework integration tests:
//! - one user's rows are invisible and immutable to another
//! - deleting a project cascades to every framework table and its links
//! - schema checks reject out-of-range writes
//! - unknown ids surface as labelled not-found errors

use pdh_core::enums::{BmcBlock, CsdCategory, ItemType, OkrStatus, PersonaDetailCategory, Quarter};
use pdh_core::requests::{
    CanvasItemCreate, CsdItemCreate, FrameworkLinkCreate, KeyResultCreate, ObjectiveCreate,
    PersonaCreate, PersonaDetailCreate, ProjectCreate, RiceItemCreate, RoadmapItemCreate,
    VisionBoardCreate,
};
use pdh_db::error::DatabaseError;
use pdh_db::service::PdhService;
use rstest::rstest;

const OWNER: &str = "user-owner";
const INTRUDER: &str = "user-intruder";

async fn test_service() -> PdhService {
    PdhService::new_local(":memory:").await.unwrap()
}

struct Seeded {
    project_id: String,
    csd_id: String,
    persona_id: String,
    detail_id: String,
    rice_id: String,
    roadmap_id: String,
    objective_id: String,
    key_result_id: String,
}

async fn seed(svc: &PdhService) -> Seeded {
    let project = svc
        .create_project(
            OWNER,
            &ProjectCreate {
                name: "Payroll".into(),
                description: None,
            },
        )
        .await
        .unwrap();
    let project_id = project.id;

    let csd_id = svc
        .create_csd_item(
            OWNER,
            &CsdItemCreate {
                project_id: project_id.clone(),
                category: CsdCategory::Certainty,
                text: "Payroll runs monthly".into(),
            },
        )
        .await
        .unwrap()
        .id;

    let persona_id = svc
        .create_persona(
            OWNER,
            &PersonaCreate {
                project_id: project_id.clone(),
                name: "HR Hana".into(),
                photo_url: None,
                quote: None,
                demographics: None,
                bio: None,
            },
        )
        .await
        .unwrap()
        .id;

    let detail_id = svc
        .create_persona_detail(
            OWNER,
            &PersonaDetailCreate {
                persona_id: persona_id.clone(),
                category: PersonaDetailCategory::PainPoint,
                content: "Manual exports".into(),
            },
        )
        .await
        .unwrap()
        .id;

    svc.create_vision_board(
        OWNER,
        &VisionBoardCreate {
            project_id: project_id.clone(),
            vision: Some("Payroll in one click".into()),
            ..VisionBoardCreate::default()
        },
    )
    .await
    .unwrap();

    svc.create_canvas_item(
        OWNER,
        &project_id,
        &CanvasItemCreate {
            block: BmcBlock::Channels,
            content: "Accountants".into(),
            position: None,
        },
    )
    .await
    .unwrap();

    let rice_id = svc
        .create_rice_item(
            OWNER,
            &RiceItemCreate {
                project_id: project_id.clone(),
                name: "Bank sync".into(),
                description: None,
                reach_score: 7,
                impact_score: 8,
                confidence_score: 6,
                effort_score: 3,
            },
        )
        .await
        .unwrap()
        .id;

    let roadmap_id = svc
        .create_roadmap_item(
            OWNER,
            &RoadmapItemCreate {
                project_id: project_id.clone(),
                name: Some("Bank sync beta".into()),
                content: None,
                description: None,
                quarter: Quarter::Q3,
                year: 2026,
                status: Default::default(),
                start_date: None,
                end_date: None,
                priority: Default::default(),
                timeframe: Default::default(),
                position: None,
            },
        )
        .await
        .unwrap()
        .id;

    let objective_id = svc
        .create_objective(
            OWNER,
            &ObjectiveCreate {
                project_id: project_id.clone(),
                title: "Cut payroll time".into(),
                description: None,
                status: OkrStatus::NotStarted,
            },
        )
        .await
        .unwrap()
        .id;

    let key_result_id = svc
        .create_key_result(
            OWNER,
            &project_id,
            &KeyResultCreate {
                objective_id: objective_id.clone(),
                title: "Under 10 minutes".into(),
                description: None,
                current_value: 30.0,
                target_value: 10.0,
                status: OkrStatus::NotStarted,
            },
        )
        .await
        .unwrap()
        .id;

    svc.create_link(
        OWNER,
        &FrameworkLinkCreate {
            project_id: project_id.clone(),
            source_item_id: rice_id.clone(),
            source_item_type: ItemType::RiceItem,
            target_item_id: key_result_id.clone(),
            target_item_type: ItemType::OkrKeyResult,
            link_type: None,
        },
    )
    .await
    .unwrap();

    Seeded {
        project_id,
        csd_id,
        persona_id,
        detail_id,
        rice_id,
        roadmap_id,
        objective_id,
        key_result_id,
    }
}

async fn count(svc: &PdhService, table: &str) -> i64 {
    let mut rows = svc
        .db()
        .conn()
        .query(&format!("SELECT COUNT(*) FROM {table}"), ())
        .await
        .unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}

// ---------------------------------------------------------------------------
// Isolation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn intruder_sees_nothing() {
    let svc = test_service().await;
    let seeded = seed(&svc).await;

    assert!(svc.list_projects(INTRUDER).await.unwrap().is_empty());
    for err in [
        svc.list_csd_items(INTRUDER, &seeded.project_id).await.unwrap_err(),
        svc.list_personas(INTRUDER, &seeded.project_id).await.unwrap_err(),
        svc.list_rice_items(INTRUDER, &seeded.project_id).await.unwrap_err(),
        svc.list_roadmap_items(INTRUDER, &seeded.project_id).await.unwrap_err(),
        svc.list_okr(INTRUDER, &seeded.project_id).await.unwrap_err(),
        svc.get_vision_board(INTRUDER, &seeded.project_id).await.unwrap_err(),
    ] {
        assert!(matches!(err, DatabaseError::NotFound { entity: "Project" }));
    }

    let err = svc
        .list_persona_details(INTRUDER, &seeded.persona_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { entity: "Persona" }));

    assert!(
        svc.list_linked_items(INTRUDER, ItemType::RiceItem, &seeded.rice_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn intruder_cannot_delete_owner_rows() {
    let svc = test_service().await;
    let seeded = seed(&svc).await;

    assert!(svc.delete_project(INTRUDER, &seeded.project_id).await.is_err());
    assert!(
        svc.delete_persona_detail(INTRUDER, &seeded.persona_id, &seeded.detail_id)
            .await
            .is_err()
    );
    assert!(
        svc.delete_key_result(INTRUDER, &seeded.project_id, &seeded.key_result_id)
            .await
            .is_err()
    );

    assert_eq!(count(&svc, "projects").await, 1);
    assert_eq!(count(&svc, "persona_details").await, 1);
    assert_eq!(count(&svc, "key_results").await, 1);
}

#[tokio::test]
async fn intruder_cannot_attach_rows_to_owner_project() {
    let svc = test_service().await;
    let seeded = seed(&svc).await;

    let err = svc
        .create_csd_item(
            INTRUDER,
            &CsdItemCreate {
                project_id: seeded.project_id.clone(),
                category: CsdCategory::Doubt,
                text: "Injected".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { entity: "Project" }));
    assert_eq!(count(&svc, "csd_items").await, 1);
}

// ---------------------------------------------------------------------------
// Cascades
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_project_cascades_everywhere() {
    let svc = test_service().await;
    let seeded = seed(&svc).await;
    assert_eq!(count(&svc, "framework_links").await, 1);

    svc.delete_project(OWNER, &seeded.project_id).await.unwrap();

    for table in [
        "csd_items",
        "personas",
        "persona_details",
        "product_vision_boards",
        "bmc_items",
        "rice_items",
        "roadmap_items",
        "objectives",
        "key_results",
        "framework_links",
    ] {
        assert_eq!(count(&svc, table).await, 0, "{table} not emptied");
    }
}

#[tokio::test]
async fn deleting_objective_unlinks_its_key_results() {
    let svc = test_service().await;
    let seeded = seed(&svc).await;

    svc.delete_objective(OWNER, &seeded.project_id, &seeded.objective_id)
        .await
        .unwrap();
    assert_eq!(count(&svc, "key_results").await, 0);
    assert_eq!(count(&svc, "framework_links").await, 0);
}

// ---------------------------------------------------------------------------
// Schema checks
// ---------------------------------------------------------------------------

#[rstest]
#[case("UPDATE rice_items SET effort_score = 0")]
#[case("UPDATE rice_items SET impact_score = 11")]
#[case("UPDATE roadmap_items SET year = 1999")]
#[case("UPDATE roadmap_items SET quarter = 'Q5'")]
#[case("UPDATE csd_items SET category = 'Belief'")]
#[case("UPDATE persona_details SET category = 'Wish'")]
#[case("UPDATE key_results SET target_value = -1")]
#[case("UPDATE objectives SET status = 'Done'")]
#[tokio::test]
async fn schema_rejects_out_of_range_values(#[case] sql: &str) {
    let svc = test_service().await;
    seed(&svc).await;

    let err: DatabaseError = svc.db().conn().execute(sql, ()).await.unwrap_err().into();
    assert!(matches!(err, DatabaseError::Constraint(_)), "{sql}: {err}");
}

// ---------------------------------------------------------------------------
// Not found
// ---------------------------------------------------------------------------

#[rstest]
#[case(ItemType::CsdItem, "CSD item not found")]
#[case(ItemType::RoadmapItem, "Roadmap item not found")]
#[case(ItemType::PersonaDetail, "Persona detail not found")]
#[case(ItemType::OkrKeyResult, "Key result not found")]
#[case(ItemType::Objective, "Objective not found")]
#[case(ItemType::RiceItem, "RICE item not found")]
#[tokio::test]
async fn unknown_items_are_labelled(#[case] item_type: ItemType, #[case] message: &str) {
    let svc = test_service().await;
    let err = svc.get_item(OWNER, item_type, "zzz-unknown").await.unwrap_err();
    assert_eq!(err.to_string(), message);
}

#[tokio::test]
async fn item_lookup_returns_owner_rows() {
    let svc = test_service().await;
    let seeded = seed(&svc).await;

    let csd = svc
        .get_item(OWNER, ItemType::CsdItem, &seeded.csd_id)
        .await
        .unwrap();
    assert_eq!(csd.content, "Payroll runs monthly");
    assert_eq!(csd.name, None);

    let roadmap = svc
        .get_item(OWNER, ItemType::RoadmapItem, &seeded.roadmap_id)
        .await
        .unwrap();
    assert_eq!(roadmap.name.as_deref(), Some("Bank sync beta"));
    assert_eq!(roadmap.content, "");
    assert_eq!(roadmap.project_id, seeded.project_id);

    let detail = svc
        .get_item(OWNER, ItemType::PersonaDetail, &seeded.detail_id)
        .await
        .unwrap();
    assert_eq!(detail.project_id, seeded.project_id);
}
