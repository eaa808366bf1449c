use super::common::*;
use std::sync::Arc;

use crate::recommendation::repository::{FeedbackKind, RecordId, RepositoryError};
use crate::recommendation::{
    AgeGroup, RecommendationRequest, RecommendationService, RecommendationServiceError,
    StyleConfidence,
};
use crate::wardrobe::{
    Category, ClothingItem, ItemId, Occasion, ProfileValidationError, Season, UserId,
    UserProfile, Weather,
};

fn work_request() -> RecommendationRequest {
    RecommendationRequest {
        occasion: Some(Occasion::Work),
        season: Some(Season::Autumn),
        location: Some("上海".to_string()),
        ..RecommendationRequest::default()
    }
}

#[test]
fn recommend_rejects_unknown_users() {
    let (service, _, _, _) = build_service();

    match service.recommend(STRANGER, RecommendationRequest::default()) {
        Err(RecommendationServiceError::UserNotFound(user)) => assert_eq!(user, STRANGER),
        other => panic!("expected missing user, got {other:?}"),
    }
}

#[test]
fn recommend_reports_empty_wardrobe() {
    let (service, _, _, _) = build_service();

    let error = service
        .recommend(EMPTY_CLOSET, RecommendationRequest::default())
        .expect_err("empty wardrobe is rejected");

    assert!(matches!(error, RecommendationServiceError::EmptyWardrobe));
    assert_eq!(error.to_string(), "wardrobe is empty, add clothing first");
}

#[test]
fn recommend_applies_default_context() {
    let (service, _, _, _) = build_service();

    let response = service
        .recommend(OWNER, RecommendationRequest::default())
        .expect("recommendation succeeds");

    assert_eq!(response.context.occasion, Occasion::Everyday);
    assert_eq!(response.context.weather, Weather::Sunny);
    assert_eq!(response.context.season, Season::Spring);
    assert_eq!(response.context.user_id, OWNER);
    assert_eq!(response.total, 4);
    assert_eq!(response.outfits.len(), response.total);
}

#[test]
fn recommend_copies_top_outfit_summary() {
    let (service, _, _, _) = build_service();

    let response = service
        .recommend(OWNER, work_request())
        .expect("recommendation succeeds");

    let top = &response.outfits[0];
    assert_eq!(response.rationale, top.reasoning);
    assert_eq!(response.confidence, top.confidence);
    assert_eq!(response.style_analysis.as_ref(), Some(&top.style_analysis));
    assert_eq!(response.context.location.as_deref(), Some("上海"));
}

#[test]
fn recommend_without_candidates_returns_placeholder_rationale() {
    let (service, wardrobes, _, _) = build_service();
    wardrobes.insert(
        UserId(3),
        vec![ClothingItem::new(10, Category::Shoes, "黑色", "休闲")],
    );

    let response = service
        .recommend(UserId(3), RecommendationRequest::default())
        .expect("recommendation succeeds");

    assert!(response.outfits.is_empty());
    assert_eq!(response.confidence, 0.0);
    assert!(response.style_analysis.is_none());
    assert!(!response.rationale.is_empty());
}

#[test]
fn recommend_clamps_requested_limit() {
    let (service, _, _, _) = build_service();

    let single = service
        .recommend(
            OWNER,
            RecommendationRequest {
                limit: Some(0),
                ..RecommendationRequest::default()
            },
        )
        .expect("recommendation succeeds");
    assert_eq!(single.total, 1);

    let many = service
        .recommend(
            OWNER,
            RecommendationRequest {
                limit: Some(500),
                ..RecommendationRequest::default()
            },
        )
        .expect("recommendation succeeds");
    assert_eq!(many.total, 4);
}

#[test]
fn recommend_propagates_repository_failures() {
    let service = RecommendationService::new(
        Arc::new(UnavailableWardrobes),
        Arc::new(MemoryProfiles::default()),
        Arc::new(MemoryHistory::default()),
        settings(),
    );

    match service.recommend(OWNER, RecommendationRequest::default()) {
        Err(RecommendationServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository failure, got {other:?}"),
    }
}

#[test]
fn history_is_saved_and_listed_newest_first() {
    let (service, _, _, history) = build_service();
    let work = service
        .recommend(OWNER, work_request())
        .expect("work recommendation");
    let everyday = service
        .recommend(OWNER, RecommendationRequest::default())
        .expect("everyday recommendation");

    let first = service.save_history(OWNER, &work).expect("saves work");
    let second = service
        .save_history(OWNER, &everyday)
        .expect("saves everyday");

    assert_eq!(first.item_ids, vec![ItemId(2), ItemId(3), ItemId(5)]);
    assert_eq!(first.context.occasion, Occasion::Work);
    assert_eq!(history.records().len(), 2);

    let listed = service.load_history(OWNER, 10).expect("history loads");
    let ids: Vec<RecordId> = listed.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let capped = service.load_history(OWNER, 1).expect("history loads");
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].id, second.id);
}

#[test]
fn feedback_updates_stored_record() {
    let (service, _, _, history) = build_service();
    let response = service
        .recommend(OWNER, work_request())
        .expect("recommendation succeeds");
    let record = service.save_history(OWNER, &response).expect("saves");

    let updated = service
        .record_feedback(
            OWNER,
            record.id,
            FeedbackKind::Liked,
            Some("很适合开会".to_string()),
        )
        .expect("feedback recorded");

    let feedback = updated.feedback.expect("feedback present");
    assert_eq!(feedback.kind, FeedbackKind::Liked);
    assert_eq!(feedback.reason.as_deref(), Some("很适合开会"));
    assert!(history.records()[0].feedback.is_some());
}

#[test]
fn feedback_for_unknown_record_is_not_found() {
    let (service, _, _, _) = build_service();

    match service.record_feedback(OWNER, RecordId(u64::MAX), FeedbackKind::Disliked, None) {
        Err(RecommendationServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn feedback_cannot_touch_other_users_records() {
    let (service, _, _, _) = build_service();
    let response = service
        .recommend(OWNER, RecommendationRequest::default())
        .expect("recommendation succeeds");
    let record = service.save_history(OWNER, &response).expect("saves");

    assert!(matches!(
        service.record_feedback(EMPTY_CLOSET, record.id, FeedbackKind::Neutral, None),
        Err(RecommendationServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn profile_updates_are_validated_before_storage() {
    let (service, _, profiles, _) = build_service();

    let invalid = UserProfile {
        age: Some(130),
        ..UserProfile::default()
    };
    match service.update_profile(OWNER, invalid) {
        Err(RecommendationServiceError::InvalidProfile(ProfileValidationError::AgeOutOfRange(
            130,
        ))) => {}
        other => panic!("expected invalid profile, got {other:?}"),
    }
    assert!(profiles.get(OWNER).is_none());

    let valid = UserProfile {
        age: Some(28),
        preferred_colors: ["黑色".to_string()].into_iter().collect(),
        ..UserProfile::default()
    };
    let stored = service
        .update_profile(OWNER, valid.clone())
        .expect("profile stored");
    assert_eq!(stored, valid);
    assert_eq!(profiles.get(OWNER), Some(valid));
}

#[test]
fn stored_profile_adds_preference_component() {
    let (service, _, _, _) = build_service();
    service
        .update_profile(
            OWNER,
            UserProfile {
                preferred_styles: ["商务正式".to_string()].into_iter().collect(),
                ..UserProfile::default()
            },
        )
        .expect("profile stored");

    let response = service
        .recommend(OWNER, work_request())
        .expect("recommendation succeeds");

    assert_eq!(response.outfits[0].components.len(), 5);
}

#[test]
fn wardrobe_gaps_use_stored_items() {
    let (service, _, _, _) = build_service();

    let suggestions = service.wardrobe_gaps(OWNER).expect("gaps computed");
    assert_eq!(suggestions.len(), 10);

    assert!(matches!(
        service.wardrobe_gaps(STRANGER),
        Err(RecommendationServiceError::UserNotFound(_))
    ));
}

#[test]
fn profile_analysis_combines_stored_profile_and_wardrobe() {
    let (service, _, _, _) = build_service();
    service
        .update_profile(
            OWNER,
            UserProfile {
                age: Some(46),
                body_type: Some("倒三角".to_string()),
                ..UserProfile::default()
            },
        )
        .expect("profile stored");

    let analysis = service.profile_analysis(OWNER).expect("analysis built");

    assert_eq!(analysis.basic_info.age_group, AgeGroup::Mature);
    assert_eq!(analysis.basic_info.skin_tone, "中性色调");
    assert_eq!(analysis.body_recommendations.avoid_styles[1], "垫肩");
    assert_eq!(analysis.style_preferences.dominant_styles[0].label, "商务正式");
    assert_eq!(
        analysis.personality_insights.style_confidence,
        StyleConfidence::Defined
    );
    assert_eq!(analysis.shopping_suggestions[0].item, "经典白衬衫");

    assert!(matches!(
        service.profile_analysis(STRANGER),
        Err(RecommendationServiceError::UserNotFound(_))
    ));
}
